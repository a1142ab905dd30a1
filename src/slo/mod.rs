//! SLO Module
//!
//! Provides SLO definitions and error budget accounting.

pub mod budget;
pub mod definition;

pub use budget::ErrorBudget;
pub use definition::{parse_window, SLOConfig};
