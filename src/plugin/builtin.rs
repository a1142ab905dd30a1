//! Simple plugins for fixtures and ad-hoc wiring.

use crate::evaluation::result::EvaluatorOutput;
use crate::metrics::{MetricData, MetricSet};
use crate::plugin::interface::{Collector, Evaluator, PluginResult};
use crate::slo::SLOConfig;

/// Collector that always returns the same metrics.
#[derive(Clone, Debug, Default)]
pub struct StaticCollector {
    name: String,
    metrics: MetricSet,
}

impl StaticCollector {
    /// Create an empty collector.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            metrics: MetricSet::new(),
        }
    }

    /// Set the series reported for a metric.
    pub fn with_series(mut self, metric: &str, series: Vec<MetricData>) -> Self {
        self.metrics.insert(metric.to_string(), series);
        self
    }
}

impl Collector for StaticCollector {
    fn name(&self) -> &str {
        &self.name
    }

    fn collect(&self) -> PluginResult<MetricSet> {
        Ok(self.metrics.clone())
    }
}

/// Collector backed by a closure.
pub struct FnCollector<F> {
    name: String,
    f: F,
}

impl<F> FnCollector<F>
where
    F: Fn() -> PluginResult<MetricSet> + Send + Sync,
{
    /// Wrap a closure.
    pub fn new(name: &str, f: F) -> Self {
        Self {
            name: name.to_string(),
            f,
        }
    }
}

impl<F> Collector for FnCollector<F>
where
    F: Fn() -> PluginResult<MetricSet> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn collect(&self) -> PluginResult<MetricSet> {
        (self.f)()
    }
}

/// Evaluator backed by a closure.
pub struct FnEvaluator<F> {
    name: String,
    f: F,
}

impl<F> FnEvaluator<F>
where
    F: Fn(&MetricSet, &[SLOConfig]) -> PluginResult<EvaluatorOutput> + Send + Sync,
{
    /// Wrap a closure.
    pub fn new(name: &str, f: F) -> Self {
        Self {
            name: name.to_string(),
            f,
        }
    }
}

impl<F> Evaluator for FnEvaluator<F>
where
    F: Fn(&MetricSet, &[SLOConfig]) -> PluginResult<EvaluatorOutput> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, metrics: &MetricSet, slos: &[SLOConfig]) -> PluginResult<EvaluatorOutput> {
        (self.f)(metrics, slos)
    }
}
