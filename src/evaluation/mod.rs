//! Evaluation Module
//!
//! Provides the evaluation pipeline:
//! - Framework configuration
//! - The collect → evaluate → aggregate orchestrator
//! - Results and reports

pub mod config;
pub mod framework;
pub mod report;
pub mod result;

pub use config::{FrameworkConfig, SLOSpec, SystemConfig, SystemType};
pub use framework::EvaluationFramework;
pub use result::{EvaluationResult, EvaluatorOutput, Incident, IncidentSeverity};
