//! Plugin interface definition.
//!
//! Collectors feed metrics into an evaluation pass; evaluators judge them.

use crate::evaluation::result::EvaluatorOutput;
use crate::metrics::MetricSet;
use crate::slo::SLOConfig;

/// Result type for plugin operations.
pub type PluginResult<T> = std::result::Result<T, PluginError>;

/// Plugin-specific error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PluginError {
    /// Error message
    pub message: String,
    /// Error code
    pub code: i32,
    /// Is recoverable
    pub recoverable: bool,
}

impl PluginError {
    /// Create a new error.
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            code: -1,
            recoverable: true,
        }
    }

    /// Create a fatal error.
    pub fn fatal(message: &str) -> Self {
        Self {
            message: message.to_string(),
            code: -1,
            recoverable: false,
        }
    }

    /// Set error code.
    pub fn with_code(mut self, code: i32) -> Self {
        self.code = code;
        self
    }
}

impl std::fmt::Display for PluginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PluginError: {}", self.message)
    }
}

impl std::error::Error for PluginError {}

/// A source of metric samples.
pub trait Collector: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Collect the current metric series, keyed by metric name.
    fn collect(&self) -> PluginResult<MetricSet>;
}

/// Judges metrics against SLOs.
pub trait Evaluator: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Evaluate the merged metrics of one pass against the SLO definitions.
    fn evaluate(&self, metrics: &MetricSet, slos: &[SLOConfig]) -> PluginResult<EvaluatorOutput>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;

    impl Collector for Empty {
        fn collect(&self) -> PluginResult<MetricSet> {
            Ok(MetricSet::new())
        }
    }

    #[test]
    fn test_plugin_error() {
        let err = PluginError::fatal("sensor bus down").with_code(503);
        assert!(!err.recoverable);
        assert_eq!(err.code, 503);
        assert_eq!(err.to_string(), "PluginError: sensor bus down");
        assert!(PluginError::new("retry me").recoverable);
    }

    #[test]
    fn test_default_name() {
        let collector: Box<dyn Collector> = Box::new(Empty);
        assert!(collector.name().ends_with("Empty"));
    }
}
