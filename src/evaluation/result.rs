//! Evaluation results.
//!
//! Evaluators each return an [`EvaluatorOutput`]; the framework folds them
//! into one [`EvaluationResult`] per pass.

use crate::core::{now, Timestamp};
use crate::evaluation::config::SystemType;
use crate::slo::ErrorBudget;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Incident severity.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IncidentSeverity {
    /// Budget overspent, burn rate below 2
    #[default]
    Minor,
    /// Budget overspent
    Major,
    /// Budget overspent many times over
    Critical,
}

impl std::fmt::Display for IncidentSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IncidentSeverity::Minor => write!(f, "MINOR"),
            IncidentSeverity::Major => write!(f, "MAJOR"),
            IncidentSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

fn new_incident_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// An incident raised by an evaluator.
///
/// Every named field is optional on input; keys this struct does not know
/// land in `details`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// Incident ID
    #[serde(default = "new_incident_id")]
    pub id: String,
    /// SLO the incident concerns
    #[serde(default)]
    pub slo_name: String,
    /// Severity
    #[serde(default)]
    pub severity: IncidentSeverity,
    /// Human-readable summary
    #[serde(default)]
    pub message: String,
    /// Detection time
    #[serde(default = "now")]
    pub detected_at: Timestamp,
    /// Evaluator-specific details
    #[serde(flatten)]
    pub details: BTreeMap<String, serde_json::Value>,
}

impl Incident {
    /// Create a new incident.
    pub fn new(slo_name: &str, severity: IncidentSeverity, message: &str) -> Self {
        Self {
            id: new_incident_id(),
            slo_name: slo_name.to_string(),
            severity,
            message: message.to_string(),
            detected_at: now(),
            details: BTreeMap::new(),
        }
    }

    /// Add a detail entry.
    pub fn with_detail(mut self, key: &str, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.details.insert(key.to_string(), v);
        }
        self
    }
}

/// Partial result produced by one evaluator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorOutput {
    /// SLO name to compliance flag
    pub slo_compliance: BTreeMap<String, bool>,
    /// SLO name to error budget
    pub error_budgets: BTreeMap<String, ErrorBudget>,
    /// Incidents raised
    pub incidents: Vec<Incident>,
    /// Recommendations
    pub recommendations: Vec<String>,
}

impl EvaluatorOutput {
    /// Create an empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record compliance for an SLO.
    pub fn with_compliance(mut self, slo_name: &str, compliant: bool) -> Self {
        self.slo_compliance.insert(slo_name.to_string(), compliant);
        self
    }

    /// Record an error budget.
    pub fn with_budget(mut self, budget: ErrorBudget) -> Self {
        self.error_budgets.insert(budget.slo_name.clone(), budget);
        self
    }

    /// Add an incident.
    pub fn with_incident(mut self, incident: Incident) -> Self {
        self.incidents.push(incident);
        self
    }

    /// Add a recommendation.
    pub fn with_recommendation(mut self, recommendation: &str) -> Self {
        self.recommendations.push(recommendation.to_string());
        self
    }
}

/// The merged outcome of one evaluation pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// System under evaluation
    pub system_name: String,
    /// System type
    pub system_type: SystemType,
    /// When the results were merged
    pub evaluation_time: Timestamp,
    /// SLO name to compliance flag
    pub slo_compliance: BTreeMap<String, bool>,
    /// SLO name to error budget
    pub error_budgets: BTreeMap<String, ErrorBudget>,
    /// Incidents, in evaluator registration order
    pub incidents: Vec<Incident>,
    /// Recommendations, in evaluator registration order
    pub recommendations: Vec<String>,
}

impl EvaluationResult {
    /// Create an empty result for a system.
    pub fn new(system_name: &str, system_type: SystemType) -> Self {
        Self {
            system_name: system_name.to_string(),
            system_type,
            evaluation_time: now(),
            slo_compliance: BTreeMap::new(),
            error_budgets: BTreeMap::new(),
            incidents: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// Fold one evaluator's output into this result.
    ///
    /// Map entries are replaced key by key; lists are appended.
    pub fn merge(&mut self, output: EvaluatorOutput) {
        self.slo_compliance.extend(output.slo_compliance);
        self.error_budgets.extend(output.error_budgets);
        self.incidents.extend(output.incidents);
        self.recommendations.extend(output.recommendations);
    }

    /// True when every reported SLO is compliant.
    pub fn is_compliant(&self) -> bool {
        self.slo_compliance.values().all(|&ok| ok)
    }

    /// Names of non-compliant SLOs, sorted.
    pub fn non_compliant_slos(&self) -> Vec<&str> {
        self.slo_compliance
            .iter()
            .filter(|(_, ok)| !**ok)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Budgets with nothing left, sorted by SLO name.
    pub fn exhausted_budgets(&self) -> Vec<&ErrorBudget> {
        self.error_budgets
            .values()
            .filter(|b| b.is_exhausted())
            .collect()
    }
}
