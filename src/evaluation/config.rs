//! Framework configuration.
//!
//! Mirrors the nested `system` / `slos` layout evaluation configs are written
//! in. Every field has a default, so a partial document is valid input.

use crate::core::{Error, Result};
use crate::slo::definition::{
    SLOConfig, DEFAULT_ERROR_BUDGET, DEFAULT_TARGET, DEFAULT_WINDOW,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Kind of ML system under evaluation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SystemType {
    /// One model behind one endpoint
    #[default]
    SingleModel,
    /// Several models served side by side
    MultiModel,
    /// Models chained into a processing pipeline
    Pipeline,
    /// Cooperating agents
    MultiAgent,
    /// Anything else, kept verbatim
    Other(String),
}

impl SystemType {
    /// Configuration string for this type.
    pub fn as_str(&self) -> &str {
        match self {
            SystemType::SingleModel => "single_model",
            SystemType::MultiModel => "multi_model",
            SystemType::Pipeline => "pipeline",
            SystemType::MultiAgent => "multi_agent",
            SystemType::Other(s) => s,
        }
    }
}

impl From<String> for SystemType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "single_model" => SystemType::SingleModel,
            "multi_model" => SystemType::MultiModel,
            "pipeline" => SystemType::Pipeline,
            "multi_agent" => SystemType::MultiAgent,
            _ => SystemType::Other(s),
        }
    }
}

impl From<SystemType> for String {
    fn from(t: SystemType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for SystemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `system` section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// System name
    pub name: String,
    /// System type
    #[serde(rename = "type")]
    pub system_type: SystemType,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            system_type: SystemType::default(),
        }
    }
}

/// One entry of the `slos` section. The SLO name is the map key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SLOSpec {
    /// Target value
    pub target: f64,
    /// Window duration string
    pub window: String,
    /// Allowed violation fraction
    pub error_budget: f64,
    /// Description
    pub description: String,
}

impl Default for SLOSpec {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET,
            window: DEFAULT_WINDOW.to_string(),
            error_budget: DEFAULT_ERROR_BUDGET,
            description: String::new(),
        }
    }
}

impl SLOSpec {
    /// Build the named SLO from this entry.
    pub fn to_slo(&self, name: &str) -> SLOConfig {
        SLOConfig {
            name: name.to_string(),
            target: self.target,
            window: self.window.clone(),
            error_budget: self.error_budget,
            description: self.description.clone(),
        }
    }
}

/// Top-level framework configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkConfig {
    /// System section
    pub system: SystemConfig,
    /// SLO definitions keyed by name
    pub slos: BTreeMap<String, SLOSpec>,
}

impl FrameworkConfig {
    /// Create a config for a named system with no SLOs.
    pub fn new(system_name: &str) -> Self {
        Self {
            system: SystemConfig {
                name: system_name.to_string(),
                ..Default::default()
            },
            slos: BTreeMap::new(),
        }
    }

    /// Set system type.
    pub fn with_system_type(mut self, system_type: SystemType) -> Self {
        self.system.system_type = system_type;
        self
    }

    /// Add an SLO entry.
    pub fn with_slo(mut self, name: &str, spec: SLOSpec) -> Self {
        self.slos.insert(name.to_string(), spec);
        self
    }

    /// Load from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Load from a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a YAML document.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            _ => Err(Error::InvalidConfig(format!(
                "unsupported config file extension: {}",
                path.display()
            ))),
        }
    }

    /// SLO definitions in name order.
    pub fn slo_configs(&self) -> Vec<SLOConfig> {
        self.slos
            .iter()
            .map(|(name, spec)| spec.to_slo(name))
            .collect()
    }

    /// Check every SLO definition.
    pub fn validate(&self) -> Result<()> {
        for slo in self.slo_configs() {
            slo.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_defaults() {
        let config = FrameworkConfig::from_json_str("{}").unwrap();
        assert_eq!(config.system.name, "Unknown");
        assert_eq!(config.system.system_type, SystemType::SingleModel);
        assert!(config.slos.is_empty());
    }

    #[test]
    fn test_one_slo_per_key_with_defaults() {
        let config = FrameworkConfig::from_value(serde_json::json!({
            "system": {"name": "defect-detector", "type": "pipeline"},
            "slos": {
                "accuracy": {"target": 0.99, "description": "top-1 accuracy"},
                "latency_p99": {"target": 250.0, "window": "7d"},
                "availability": {}
            }
        }))
        .unwrap();

        assert_eq!(config.system.system_type, SystemType::Pipeline);
        let slos = config.slo_configs();
        assert_eq!(slos.len(), 3);

        let names: Vec<&str> = slos.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["accuracy", "availability", "latency_p99"]);

        assert_eq!(slos[0].target, 0.99);
        assert_eq!(slos[0].window, "30d");
        assert_eq!(slos[0].error_budget, 0.05);
        assert_eq!(slos[0].description, "top-1 accuracy");

        assert_eq!(slos[1].target, 0.95);
        assert_eq!(slos[1].window, "30d");
        assert_eq!(slos[1].error_budget, 0.05);

        assert_eq!(slos[2].target, 250.0);
        assert_eq!(slos[2].window, "7d");
    }

    #[test]
    fn test_unknown_system_type_is_kept() {
        let config =
            FrameworkConfig::from_json_str(r#"{"system": {"type": "federated"}}"#).unwrap();
        assert_eq!(
            config.system.system_type,
            SystemType::Other("federated".to_string())
        );
        assert_eq!(config.system.name, "Unknown");

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["system"]["type"], "federated");
    }

    #[test]
    fn test_yaml() {
        let yaml = r#"
system:
  name: turbine-anomaly
slos:
  recall:
    target: 0.9
    window: 24h
    error_budget: 0.1
"#;
        let config = FrameworkConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.system.name, "turbine-anomaly");
        let slo = &config.slo_configs()[0];
        assert_eq!(slo.name, "recall");
        assert_eq!(slo.window, "24h");
        assert_eq!(slo.error_budget, 0.1);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"system": {{"name": "X"}}}}"#).unwrap();

        let config = FrameworkConfig::from_file(file.path()).unwrap();
        assert_eq!(config.system.name, "X");
    }

    #[test]
    fn test_from_file_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let err = FrameworkConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_validate() {
        let good = FrameworkConfig::new("X").with_slo("a", SLOSpec::default());
        assert!(good.validate().is_ok());

        let bad = FrameworkConfig::new("X").with_slo(
            "a",
            SLOSpec {
                window: "forever".to_string(),
                ..Default::default()
            },
        );
        assert!(matches!(bad.validate(), Err(Error::InvalidWindow(_))));
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        let result = FrameworkConfig::from_json_str(r#"{"slos": {"a": {"target": "high"}}}"#);
        assert!(matches!(result, Err(Error::DeserializationError(_))));
    }
}
