//! Threshold evaluator.
//!
//! Judges each SLO by the share of in-window samples that miss its target
//! and compares that share with the SLO's error budget.

use crate::core::{now, Timestamp};
use crate::evaluation::result::{EvaluatorOutput, Incident, IncidentSeverity};
use crate::metrics::{MetricData, MetricSet};
use crate::plugin::interface::{Evaluator, PluginError, PluginResult};
use crate::slo::budget::LOW_BUDGET_THRESHOLD;
use crate::slo::{ErrorBudget, SLOConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Burn rate at which an incident becomes critical.
pub const CRITICAL_BURN_RATE: f64 = 10.0;

/// Burn rate at which an incident becomes major.
pub const MAJOR_BURN_RATE: f64 = 2.0;

/// How a sample is compared with the SLO target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// Higher is better (accuracy, availability, recall)
    #[default]
    AtLeast,
    /// Lower is better (latency, error rate, drift)
    AtMost,
}

impl Comparison {
    /// Check if a value meets the target.
    pub fn is_met(self, value: f64, target: f64) -> bool {
        match self {
            Comparison::AtLeast => value >= target,
            Comparison::AtMost => value <= target,
        }
    }

    fn worst<'a>(self, samples: impl Iterator<Item = &'a MetricData>) -> Option<f64> {
        let values = samples.map(|m| m.value);
        match self {
            Comparison::AtLeast => values.reduce(f64::min),
            Comparison::AtMost => values.reduce(f64::max),
        }
    }
}

fn severity_for(burn_rate: f64) -> IncidentSeverity {
    if burn_rate >= CRITICAL_BURN_RATE {
        IncidentSeverity::Critical
    } else if burn_rate >= MAJOR_BURN_RATE {
        IncidentSeverity::Major
    } else {
        IncidentSeverity::Minor
    }
}

/// Reference evaluator comparing samples against SLO targets.
///
/// By default an SLO reads the metric of the same name and treats higher
/// values as better.
#[derive(Clone, Debug, Default)]
pub struct ThresholdEvaluator {
    comparisons: HashMap<String, Comparison>,
    metric_names: HashMap<String, String>,
    reference_time: Option<Timestamp>,
}

impl ThresholdEvaluator {
    /// Create a new evaluator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the comparison for an SLO.
    pub fn with_comparison(mut self, slo_name: &str, comparison: Comparison) -> Self {
        self.comparisons.insert(slo_name.to_string(), comparison);
        self
    }

    /// Read an SLO from a differently named metric.
    pub fn with_metric(mut self, slo_name: &str, metric_name: &str) -> Self {
        self.metric_names
            .insert(slo_name.to_string(), metric_name.to_string());
        self
    }

    /// Pin the end of every window instead of using the wall clock.
    pub fn with_reference_time(mut self, reference_time: Timestamp) -> Self {
        self.reference_time = Some(reference_time);
        self
    }

    fn metric_for<'a>(&'a self, slo: &'a SLOConfig) -> &'a str {
        self.metric_names
            .get(&slo.name)
            .map(String::as_str)
            .unwrap_or(&slo.name)
    }

    fn comparison_for(&self, slo: &SLOConfig) -> Comparison {
        self.comparisons.get(&slo.name).copied().unwrap_or_default()
    }

    fn evaluate_slo(
        &self,
        slo: &SLOConfig,
        metrics: &MetricSet,
        reference: Timestamp,
        output: &mut EvaluatorOutput,
    ) -> PluginResult<()> {
        let metric = self.metric_for(slo);
        let window = slo
            .window_duration()
            .map_err(|e| PluginError::fatal(&e.to_string()))?;
        let cutoff = reference
            .checked_sub_signed(window)
            .unwrap_or(chrono::DateTime::<chrono::Utc>::MIN_UTC);

        let samples: Vec<&MetricData> = metrics
            .get(metric)
            .map(|series| {
                series
                    .iter()
                    .filter(|m| m.timestamp >= cutoff && m.timestamp <= reference)
                    .collect()
            })
            .unwrap_or_default();

        if samples.is_empty() {
            debug!(slo = %slo.name, metric, "no samples in window");
            output.recommendations.push(format!(
                "No '{}' samples in the last {} for SLO '{}'; register a collector that reports it",
                metric, slo.window, slo.name
            ));
            return Ok(());
        }

        let comparison = self.comparison_for(slo);
        let violations = samples
            .iter()
            .filter(|m| !comparison.is_met(m.value, slo.target))
            .count();
        let violation_ratio = violations as f64 / samples.len() as f64;
        let compliant = violation_ratio <= slo.error_budget;
        let budget = ErrorBudget::from_violation_ratio(slo, violation_ratio);

        debug!(
            slo = %slo.name,
            samples = samples.len(),
            violations,
            burn_rate = budget.burn_rate,
            compliant,
            "slo evaluated"
        );

        if !compliant {
            let worst = comparison.worst(samples.iter().copied());
            let message = format!(
                "SLO '{}' out of compliance: {} of {} samples missed target {}",
                slo.name,
                violations,
                samples.len(),
                slo.target
            );
            output.incidents.push(
                Incident::new(&slo.name, severity_for(budget.burn_rate), &message)
                    .with_detail("metric", metric)
                    .with_detail("samples", samples.len())
                    .with_detail("violations", violations)
                    .with_detail("target", slo.target)
                    .with_detail("worst_value", worst)
                    .with_detail("burn_rate", budget.burn_rate),
            );
            output.recommendations.push(format!(
                "Investigate '{}': error budget overspent at burn rate {:.2} over {}",
                slo.name, budget.burn_rate, slo.window
            ));
        } else if budget.budget_remaining < LOW_BUDGET_THRESHOLD {
            output.recommendations.push(format!(
                "Error budget for '{}' is nearly spent ({:.0}% left); hold risky model changes",
                slo.name,
                budget.budget_remaining.max(0.0) * 100.0
            ));
        }

        output.slo_compliance.insert(slo.name.clone(), compliant);
        output.error_budgets.insert(slo.name.clone(), budget);
        Ok(())
    }
}

impl Evaluator for ThresholdEvaluator {
    fn name(&self) -> &str {
        "threshold"
    }

    fn evaluate(&self, metrics: &MetricSet, slos: &[SLOConfig]) -> PluginResult<EvaluatorOutput> {
        let reference = self.reference_time.unwrap_or_else(now);
        let mut output = EvaluatorOutput::new();

        for slo in slos {
            self.evaluate_slo(slo, metrics, reference, &mut output)?;
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn series(reference: Timestamp, values: &[f64]) -> Vec<MetricData> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| MetricData::at(reference - Duration::hours(i as i64 + 1), v))
            .collect()
    }

    fn metrics(name: &str, samples: Vec<MetricData>) -> MetricSet {
        let mut set = MetricSet::new();
        set.insert(name.to_string(), samples);
        set
    }

    #[test]
    fn test_comparison() {
        assert!(Comparison::AtLeast.is_met(0.96, 0.95));
        assert!(Comparison::AtLeast.is_met(0.95, 0.95));
        assert!(!Comparison::AtLeast.is_met(0.90, 0.95));
        assert!(Comparison::AtMost.is_met(80.0, 100.0));
        assert!(!Comparison::AtMost.is_met(150.0, 100.0));
    }

    #[test]
    fn test_compliant_slo() {
        let reference = now();
        let evaluator = ThresholdEvaluator::new().with_reference_time(reference);
        let slo = SLOConfig::new("accuracy").with_target(0.9).with_error_budget(0.1);
        let data = metrics("accuracy", series(reference, &[0.95; 20]));

        let output = evaluator.evaluate(&data, &[slo]).unwrap();
        assert_eq!(output.slo_compliance["accuracy"], true);
        assert_eq!(output.error_budgets["accuracy"].budget_remaining, 1.0);
        assert!(output.incidents.is_empty());
        assert!(output.recommendations.is_empty());
    }

    #[test]
    fn test_overspent_slo_raises_incident() {
        let reference = now();
        let evaluator = ThresholdEvaluator::new()
            .with_reference_time(reference)
            .with_comparison("latency_p99", Comparison::AtMost);
        let slo = SLOConfig::new("latency_p99")
            .with_target(200.0)
            .with_error_budget(0.1);
        // 3 of 10 samples too slow: burn rate 3.0
        let mut values = vec![150.0; 7];
        values.extend([250.0, 400.0, 300.0]);
        let data = metrics("latency_p99", series(reference, &values));

        let output = evaluator.evaluate(&data, &[slo]).unwrap();
        assert_eq!(output.slo_compliance["latency_p99"], false);

        let budget = &output.error_budgets["latency_p99"];
        assert!(budget.is_exhausted());
        assert!((budget.burn_rate - 3.0).abs() < 1e-9);

        assert_eq!(output.incidents.len(), 1);
        let incident = &output.incidents[0];
        assert_eq!(incident.severity, IncidentSeverity::Major);
        assert_eq!(incident.details["violations"], serde_json::json!(3));
        assert_eq!(incident.details["worst_value"], serde_json::json!(400.0));
        assert_eq!(output.recommendations.len(), 1);
    }

    #[test]
    fn test_samples_outside_window_ignored() {
        let reference = now();
        let evaluator = ThresholdEvaluator::new().with_reference_time(reference);
        let slo = SLOConfig::new("accuracy").with_target(0.9).with_window("1d");

        let mut samples = series(reference, &[0.95, 0.96]);
        samples.push(MetricData::at(reference - Duration::days(3), 0.10));
        samples.push(MetricData::at(reference + Duration::hours(1), 0.10));
        let data = metrics("accuracy", samples);

        let output = evaluator.evaluate(&data, &[slo]).unwrap();
        assert_eq!(output.slo_compliance["accuracy"], true);
    }

    #[test]
    fn test_missing_metric_recommends_collector() {
        let evaluator = ThresholdEvaluator::new();
        let output = evaluator
            .evaluate(&MetricSet::new(), &[SLOConfig::new("recall")])
            .unwrap();

        assert!(output.slo_compliance.is_empty());
        assert!(output.error_budgets.is_empty());
        assert_eq!(output.recommendations.len(), 1);
        assert!(output.recommendations[0].contains("recall"));
    }

    #[test]
    fn test_metric_mapping() {
        let reference = now();
        let evaluator = ThresholdEvaluator::new()
            .with_reference_time(reference)
            .with_metric("top1", "classifier.accuracy");
        let data = metrics("classifier.accuracy", series(reference, &[0.99, 0.98]));

        let output = evaluator
            .evaluate(&data, &[SLOConfig::new("top1")])
            .unwrap();
        assert_eq!(output.slo_compliance["top1"], true);
    }

    #[test]
    fn test_nearly_spent_budget_recommendation() {
        let reference = now();
        let evaluator = ThresholdEvaluator::new().with_reference_time(reference);
        let slo = SLOConfig::new("accuracy").with_target(0.9).with_error_budget(0.1);
        // 9 of 100 samples miss: 90% of budget used
        let mut values = vec![0.95; 91];
        values.extend([0.5; 9]);
        let data = metrics("accuracy", series(reference, &values));

        let output = evaluator.evaluate(&data, &[slo]).unwrap();
        assert_eq!(output.slo_compliance["accuracy"], true);
        assert!(output.incidents.is_empty());
        assert_eq!(output.recommendations.len(), 1);
        assert!(output.recommendations[0].contains("nearly spent"));
    }

    #[test]
    fn test_invalid_window_fails() {
        let evaluator = ThresholdEvaluator::new();
        let slo = SLOConfig::new("accuracy").with_window("monthly");
        let err = evaluator.evaluate(&MetricSet::new(), &[slo]).unwrap_err();
        assert!(!err.recoverable);
    }

    #[test]
    fn test_severity() {
        assert_eq!(severity_for(1.5), IncidentSeverity::Minor);
        assert_eq!(severity_for(2.0), IncidentSeverity::Major);
        assert_eq!(severity_for(12.0), IncidentSeverity::Critical);
    }
}
