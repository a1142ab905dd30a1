//! Metrics Module
//!
//! Timestamped metric samples exchanged between collectors and evaluators.

pub mod sample;

pub use sample::{MetricData, MetricSet};
