//! Evaluation reporting.
//!
//! Renders an [`EvaluationResult`] as JSON or as a plain-text summary.

use crate::core::Result;
use crate::evaluation::result::EvaluationResult;

/// Render a result as pretty-printed JSON.
pub fn to_json(result: &EvaluationResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Render a result as a human-readable summary.
pub fn to_text(result: &EvaluationResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("SLO Evaluation: {}\n", result.system_name));
    output.push_str(&format!("System Type: {}\n", result.system_type));
    output.push_str(&format!("Evaluated: {}\n", result.evaluation_time));
    output.push_str(&format!(
        "Status: {}\n",
        if result.is_compliant() { "COMPLIANT" } else { "NON-COMPLIANT" }
    ));

    let mut names: Vec<&String> = result
        .slo_compliance
        .keys()
        .chain(result.error_budgets.keys())
        .collect();
    names.sort();
    names.dedup();

    if !names.is_empty() {
        output.push_str("\nSLO Summary:\n");
    }
    for name in names {
        let status = match result.slo_compliance.get(name) {
            Some(true) => "✓",
            Some(false) => "✗",
            None => "?",
        };
        match result.error_budgets.get(name) {
            Some(budget) => output.push_str(&format!(
                "  {} {}: budget remaining {:.1}%, burn rate {:.2}\n",
                status,
                name,
                budget.budget_remaining * 100.0,
                budget.burn_rate
            )),
            None => output.push_str(&format!("  {} {}\n", status, name)),
        }
    }

    if !result.incidents.is_empty() {
        output.push_str(&format!("\nIncidents: {}\n", result.incidents.len()));
        for incident in &result.incidents {
            output.push_str(&format!(
                "  [{}] {}: {}\n",
                incident.severity, incident.slo_name, incident.message
            ));
        }
    }

    if !result.recommendations.is_empty() {
        output.push_str("\nRecommendations:\n");
        for recommendation in &result.recommendations {
            output.push_str(&format!("  - {}\n", recommendation));
        }
    }

    output
}
