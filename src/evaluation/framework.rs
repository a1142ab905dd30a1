//! Evaluation framework.
//!
//! Runs one collect → evaluate → aggregate pass over the registered plugins.
//! Plugins run sequentially in registration order; the first plugin error
//! aborts the pass.

use crate::core::{now, Result};
use crate::evaluation::config::{FrameworkConfig, SystemType};
use crate::evaluation::result::{EvaluationResult, EvaluatorOutput};
use crate::metrics::MetricSet;
use crate::plugin::{Collector, Evaluator};
use crate::slo::SLOConfig;
use tracing::{debug, info, info_span, warn};

/// Orchestrates collectors and evaluators for one system.
pub struct EvaluationFramework {
    /// Configuration
    config: FrameworkConfig,
    /// SLOs parsed from the configuration
    slos: Vec<SLOConfig>,
    /// Collectors, in registration order
    collectors: Vec<Box<dyn Collector>>,
    /// Evaluators, in registration order
    evaluators: Vec<Box<dyn Evaluator>>,
}

impl EvaluationFramework {
    /// Create a framework from a validated configuration.
    pub fn new(config: FrameworkConfig) -> Result<Self> {
        config.validate()?;
        let slos = config.slo_configs();

        info!(
            system = %config.system.name,
            system_type = %config.system.system_type,
            slos = slos.len(),
            "evaluation framework configured"
        );

        Ok(Self {
            config,
            slos,
            collectors: Vec::new(),
            evaluators: Vec::new(),
        })
    }

    /// Register a collector.
    pub fn add_collector(&mut self, collector: impl Collector + 'static) {
        self.add_boxed_collector(Box::new(collector));
    }

    /// Register an already boxed collector.
    pub fn add_boxed_collector(&mut self, collector: Box<dyn Collector>) {
        debug!(collector = collector.name(), "collector registered");
        self.collectors.push(collector);
    }

    /// Register an evaluator.
    pub fn add_evaluator(&mut self, evaluator: impl Evaluator + 'static) {
        self.add_boxed_evaluator(Box::new(evaluator));
    }

    /// Register an already boxed evaluator.
    pub fn add_boxed_evaluator(&mut self, evaluator: Box<dyn Evaluator>) {
        debug!(evaluator = evaluator.name(), "evaluator registered");
        self.evaluators.push(evaluator);
    }

    /// Run the full pipeline.
    pub fn evaluate(&self) -> Result<EvaluationResult> {
        let span = info_span!("evaluate", system = %self.config.system.name);
        let _enter = span.enter();

        let metrics = self.collect_metrics()?;
        let outputs = self.run_evaluators(&metrics)?;
        let result = self.aggregate(outputs);

        info!(
            compliant = result.is_compliant(),
            incidents = result.incidents.len(),
            "evaluation complete"
        );
        Ok(result)
    }

    /// Collect from every collector.
    ///
    /// A metric reported by several collectors keeps only the series of the
    /// last one registered.
    pub fn collect_metrics(&self) -> Result<MetricSet> {
        let mut metrics = MetricSet::new();

        for collector in &self.collectors {
            let collected = collector.collect().map_err(|e| {
                warn!(collector = collector.name(), error = %e, "collector failed");
                e
            })?;
            debug!(
                collector = collector.name(),
                metrics = collected.len(),
                "metrics collected"
            );

            for (name, series) in collected {
                if metrics.insert(name.clone(), series).is_some() {
                    debug!(
                        metric = %name,
                        collector = collector.name(),
                        "metric series replaced"
                    );
                }
            }
        }

        Ok(metrics)
    }

    /// Run every evaluator over the merged metrics.
    pub fn run_evaluators(&self, metrics: &MetricSet) -> Result<Vec<EvaluatorOutput>> {
        let mut outputs = Vec::with_capacity(self.evaluators.len());

        for evaluator in &self.evaluators {
            let output = evaluator.evaluate(metrics, &self.slos).map_err(|e| {
                warn!(evaluator = evaluator.name(), error = %e, "evaluator failed");
                e
            })?;
            debug!(
                evaluator = evaluator.name(),
                slos = output.slo_compliance.len(),
                incidents = output.incidents.len(),
                "evaluator finished"
            );
            outputs.push(output);
        }

        Ok(outputs)
    }

    /// Merge evaluator outputs, in order, into one result.
    pub fn aggregate(&self, outputs: Vec<EvaluatorOutput>) -> EvaluationResult {
        let mut result = EvaluationResult::new(
            &self.config.system.name,
            self.config.system.system_type.clone(),
        );
        for output in outputs {
            result.merge(output);
        }
        result.evaluation_time = now();
        result
    }

    /// System name.
    pub fn system_name(&self) -> &str {
        &self.config.system.name
    }

    /// System type.
    pub fn system_type(&self) -> &SystemType {
        &self.config.system.system_type
    }

    /// Parsed SLOs, in name order.
    pub fn slos(&self) -> &[SLOConfig] {
        &self.slos
    }

    /// Get the configuration.
    pub fn config(&self) -> &FrameworkConfig {
        &self.config
    }

    /// Number of registered collectors.
    pub fn collector_count(&self) -> usize {
        self.collectors.len()
    }

    /// Number of registered evaluators.
    pub fn evaluator_count(&self) -> usize {
        self.evaluators.len()
    }
}
