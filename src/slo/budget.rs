//! Error budget accounting.

use crate::slo::definition::SLOConfig;
use serde::{Deserialize, Serialize};

/// Remaining fraction below which a budget counts as nearly spent.
pub const LOW_BUDGET_THRESHOLD: f64 = 0.25;

/// Burn rate at or above which the budget is being spent too fast.
pub const HIGH_BURN_RATE: f64 = 2.0;

/// Error budget state for one SLO.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorBudget {
    /// SLO this budget belongs to
    pub slo_name: String,
    /// Remaining fraction of the budget (negative once overspent)
    pub budget_remaining: f64,
    /// Observed violation ratio relative to the allowed ratio
    pub burn_rate: f64,
    /// Alert identifiers raised for this budget
    #[serde(default)]
    pub alerts: Vec<String>,
}

impl ErrorBudget {
    /// Create a budget with explicit values.
    pub fn new(slo_name: &str, budget_remaining: f64, burn_rate: f64) -> Self {
        Self {
            slo_name: slo_name.to_string(),
            budget_remaining,
            burn_rate,
            alerts: Vec::new(),
        }
    }

    /// Add an alert identifier.
    pub fn with_alert(mut self, alert: &str) -> Self {
        self.alerts.push(alert.to_string());
        self
    }

    /// Derive the budget from the fraction of samples that missed the target.
    pub fn from_violation_ratio(slo: &SLOConfig, violation_ratio: f64) -> Self {
        let allowed = slo.error_budget.max(f64::EPSILON);
        let burn_rate = violation_ratio / allowed;
        let mut budget = Self::new(&slo.name, 1.0 - burn_rate, burn_rate);

        if budget.is_exhausted() {
            budget.alerts.push(format!("{}.budget_exhausted", slo.name));
        } else if budget.budget_remaining < LOW_BUDGET_THRESHOLD {
            budget.alerts.push(format!("{}.budget_low", slo.name));
        }
        if burn_rate >= HIGH_BURN_RATE {
            budget.alerts.push(format!("{}.burn_rate_high", slo.name));
        }

        budget
    }

    /// True once nothing is left of the budget.
    pub fn is_exhausted(&self) -> bool {
        self.budget_remaining <= 0.0
    }
}
