//! SLO definitions.
//!
//! An SLO names a measured property, a target it must meet and the window
//! and error budget it is judged over.

use crate::core::{Error, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Default target when a definition omits one.
pub const DEFAULT_TARGET: f64 = 0.95;

/// Default evaluation window.
pub const DEFAULT_WINDOW: &str = "30d";

/// Default error budget (fraction of samples allowed to miss the target).
pub const DEFAULT_ERROR_BUDGET: f64 = 0.05;

/// A parsed Service Level Objective.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SLOConfig {
    /// Unique SLO name
    pub name: String,
    /// Target value (a fraction or a raw threshold, depending on the metric)
    pub target: f64,
    /// Window as a duration string, e.g. "30d"
    pub window: String,
    /// Allowed violation fraction
    pub error_budget: f64,
    /// Free-text description
    pub description: String,
}

impl SLOConfig {
    /// Create an SLO with the default target, window and budget.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            target: DEFAULT_TARGET,
            window: DEFAULT_WINDOW.to_string(),
            error_budget: DEFAULT_ERROR_BUDGET,
            description: String::new(),
        }
    }

    /// Set target.
    pub fn with_target(mut self, target: f64) -> Self {
        self.target = target;
        self
    }

    /// Set window.
    pub fn with_window(mut self, window: &str) -> Self {
        self.window = window.to_string();
        self
    }

    /// Set error budget.
    pub fn with_error_budget(mut self, error_budget: f64) -> Self {
        self.error_budget = error_budget;
        self
    }

    /// Set description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Window as a duration.
    pub fn window_duration(&self) -> Result<Duration> {
        parse_window(&self.window)
    }

    /// Check that the definition can be evaluated.
    pub fn validate(&self) -> Result<()> {
        if !self.target.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "SLO '{}' has a non-finite target",
                self.name
            )));
        }
        if !(self.error_budget > 0.0 && self.error_budget <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "SLO '{}' error_budget must be in (0, 1], got {}",
                self.name, self.error_budget
            )));
        }
        self.window_duration()?;
        Ok(())
    }
}

/// Parse a window string such as "45s", "15m", "12h", "30d" or "2w".
pub fn parse_window(window: &str) -> Result<Duration> {
    let window = window.trim();
    let invalid = || Error::InvalidWindow(window.to_string());

    let split = window
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(invalid)?;
    let (count, unit) = window.split_at(split);
    let count: i64 = count.parse().map_err(|_| invalid())?;
    if count <= 0 {
        return Err(invalid());
    }

    let duration = match unit {
        "s" => Duration::try_seconds(count),
        "m" => Duration::try_minutes(count),
        "h" => Duration::try_hours(count),
        "d" => Duration::try_days(count),
        "w" => Duration::try_weeks(count),
        _ => None,
    };
    duration.ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let slo = SLOConfig::new("accuracy");
        assert_eq!(slo.target, 0.95);
        assert_eq!(slo.window, "30d");
        assert_eq!(slo.error_budget, 0.05);
        assert!(slo.description.is_empty());
    }

    #[test]
    fn test_parse_window_units() {
        assert_eq!(parse_window("45s").unwrap(), Duration::seconds(45));
        assert_eq!(parse_window("15m").unwrap(), Duration::minutes(15));
        assert_eq!(parse_window("12h").unwrap(), Duration::hours(12));
        assert_eq!(parse_window("30d").unwrap(), Duration::days(30));
        assert_eq!(parse_window("2w").unwrap(), Duration::weeks(2));
    }

    #[test]
    fn test_parse_window_rejects_garbage() {
        for bad in ["", "d", "30", "0d", "-3d", "30y", "3.5h"] {
            assert!(parse_window(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_validate() {
        assert!(SLOConfig::new("a").validate().is_ok());
        assert!(SLOConfig::new("a").with_error_budget(0.0).validate().is_err());
        assert!(SLOConfig::new("a").with_error_budget(1.5).validate().is_err());
        assert!(SLOConfig::new("a").with_target(f64::NAN).validate().is_err());
        assert!(SLOConfig::new("a").with_window("soon").validate().is_err());
    }
}
