//! # sloeval - SLO evaluation for industrial ML systems
//!
//! Evaluates machine-learning deployments against Service Level Objectives:
//! - **SLO**: definitions, windows and error budgets
//! - **Plugins**: pluggable metric collectors and evaluators
//! - **Evaluation**: the collect → evaluate → aggregate pipeline and reports
//!
//! ## Quick Start
//!
//! ```rust
//! use sloeval::evaluation::{EvaluationFramework, FrameworkConfig};
//! use sloeval::metrics::MetricData;
//! use sloeval::plugin::{StaticCollector, ThresholdEvaluator};
//!
//! let config = FrameworkConfig::from_json_str(
//!     r#"{"system": {"name": "weld-inspector"}, "slos": {"accuracy": {"target": 0.9}}}"#,
//! )
//! .unwrap();
//!
//! let mut framework = EvaluationFramework::new(config).unwrap();
//! framework.add_collector(
//!     StaticCollector::new("offline-eval").with_series("accuracy", vec![MetricData::new(0.93)]),
//! );
//! framework.add_evaluator(ThresholdEvaluator::new());
//!
//! let result = framework.evaluate().unwrap();
//! assert!(result.is_compliant());
//! ```

pub mod core;
pub mod evaluation;
pub mod metrics;
pub mod plugin;
pub mod slo;

#[cfg(feature = "python")]
pub mod python;

pub use crate::core::error::{Error, Result};
