//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (`ProbeError`, `InitializationError`)
//! - Categorization of HTTP client failures
//! - Processing statistics tracking (errors and info metrics)
//!
//! Resolution failures never escape `optimize`; they are recorded on the
//! outcome and, for batches, counted here.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use stats::ProcessingStats;
pub use types::{ErrorType, InfoType, InitializationError, ProbeError};
