//! Metric samples.

use crate::core::{now, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metric name to its observed series, as produced by collectors.
pub type MetricSet = HashMap<String, Vec<MetricData>>;

/// One observed sample of a metric.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricData {
    /// When the sample was observed
    pub timestamp: Timestamp,
    /// Observed value
    pub value: f64,
    /// Auxiliary key/value pairs (model version, site, sensor id, ...)
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl MetricData {
    /// Create a sample observed now.
    pub fn new(value: f64) -> Self {
        Self::at(now(), value)
    }

    /// Create a sample observed at a given time.
    pub fn at(timestamp: Timestamp, value: f64) -> Self {
        Self {
            timestamp,
            value,
            metadata: HashMap::new(),
        }
    }

    /// Add a metadata entry.
    pub fn with_metadata(mut self, key: &str, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.metadata.insert(key.to_string(), v);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata() {
        let sample = MetricData::new(0.97)
            .with_metadata("model_version", "v3")
            .with_metadata("batch", 12);

        assert_eq!(sample.value, 0.97);
        assert_eq!(sample.metadata["model_version"], serde_json::json!("v3"));
        assert_eq!(sample.metadata["batch"], serde_json::json!(12));
    }

    #[test]
    fn test_metadata_is_optional_on_input() {
        let sample: MetricData =
            serde_json::from_str(r#"{"timestamp": "2024-05-01T12:00:00Z", "value": 12.5}"#)
                .unwrap();
        assert_eq!(sample.value, 12.5);
        assert!(sample.metadata.is_empty());
    }
}
