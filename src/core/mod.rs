//! Core utilities and common types for sloeval.

pub mod error;
pub mod logging;
pub mod types;

pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat};
pub use types::*;
