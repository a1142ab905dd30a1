//! Python bindings.
//!
//! Python collectors and evaluators are plain objects exposing `collect()`
//! or `evaluate(metrics, slos)`. Data crosses the boundary as JSON documents
//! decoded with Python's `json` module.

use crate::evaluation::{report, EvaluationFramework, EvaluatorOutput, FrameworkConfig};
use crate::metrics::MetricSet;
use crate::plugin::{Collector, Evaluator, PluginError, PluginResult};
use crate::slo::SLOConfig;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

fn plugin_error(err: impl std::fmt::Display) -> PluginError {
    PluginError::new(&err.to_string())
}

fn to_py_json<'py>(py: Python<'py>, value: &impl serde::Serialize) -> PyResult<&'py PyAny> {
    let json = serde_json::to_string(value).map_err(|e| PyValueError::new_err(e.to_string()))?;
    py.import("json")?.call_method1("loads", (json,))
}

fn from_py_json(py: Python<'_>, obj: &PyAny) -> PyResult<String> {
    py.import("json")?.call_method1("dumps", (obj,))?.extract()
}

// --- Plugin adapters ---

struct PyCollector {
    name: String,
    inner: PyObject,
}

impl Collector for PyCollector {
    fn name(&self) -> &str {
        &self.name
    }

    fn collect(&self) -> PluginResult<MetricSet> {
        Python::with_gil(|py| {
            let collected = self.inner.call_method0(py, "collect").map_err(plugin_error)?;
            let json = from_py_json(py, collected.as_ref(py)).map_err(plugin_error)?;
            serde_json::from_str(&json).map_err(plugin_error)
        })
    }
}

struct PyEvaluator {
    name: String,
    inner: PyObject,
}

impl Evaluator for PyEvaluator {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, metrics: &MetricSet, slos: &[SLOConfig]) -> PluginResult<EvaluatorOutput> {
        Python::with_gil(|py| {
            let metrics = to_py_json(py, metrics).map_err(plugin_error)?;
            let slos = to_py_json(py, &slos).map_err(plugin_error)?;
            let output = self
                .inner
                .call_method1(py, "evaluate", (metrics, slos))
                .map_err(plugin_error)?;
            let json = from_py_json(py, output.as_ref(py)).map_err(plugin_error)?;
            serde_json::from_str(&json).map_err(plugin_error)
        })
    }
}

fn plugin_name(obj: &PyAny) -> String {
    obj.get_type()
        .name()
        .map(str::to_string)
        .unwrap_or_else(|_| "python".to_string())
}

// --- Framework Bindings ---

#[pyclass(name = "EvaluationFramework")]
pub struct PyEvaluationFramework {
    inner: EvaluationFramework,
}

#[pymethods]
impl PyEvaluationFramework {
    #[new]
    fn new(config_json: &str) -> PyResult<Self> {
        let config = FrameworkConfig::from_json_str(config_json)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let inner =
            EvaluationFramework::new(config).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PyEvaluationFramework { inner })
    }

    #[getter]
    fn get_system_name(&self) -> String {
        self.inner.system_name().to_string()
    }

    fn add_collector(&mut self, collector: &PyAny) {
        self.inner.add_collector(PyCollector {
            name: plugin_name(collector),
            inner: collector.into(),
        });
    }

    fn add_evaluator(&mut self, evaluator: &PyAny) {
        self.inner.add_evaluator(PyEvaluator {
            name: plugin_name(evaluator),
            inner: evaluator.into(),
        });
    }

    /// Run an evaluation pass and return the result as JSON.
    fn evaluate(&self) -> PyResult<String> {
        let result = self
            .inner
            .evaluate()
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        report::to_json(&result).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Run an evaluation pass and return the text summary.
    fn evaluate_text(&self) -> PyResult<String> {
        let result = self
            .inner
            .evaluate()
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        Ok(report::to_text(&result))
    }
}

// --- Module ---

#[pymodule]
fn sloeval(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyEvaluationFramework>()?;
    Ok(())
}
