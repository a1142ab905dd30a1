//! Plugin Module
//!
//! Provides the collector/evaluator plugin architecture:
//! - Plugin interface
//! - Built-in collectors and evaluators

pub mod builtin;
pub mod interface;
pub mod threshold;

pub use builtin::{FnCollector, FnEvaluator, StaticCollector};
pub use interface::{Collector, Evaluator, PluginError, PluginResult};
pub use threshold::{Comparison, ThresholdEvaluator};
