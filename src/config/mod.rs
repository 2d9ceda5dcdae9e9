//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, etc.)
//! - Probe request headers
//! - Resolver configuration and logging option types
//! - Command-line options (`clap` derive)

mod cli;
mod constants;
mod headers;
mod types;

// Re-export all constants
pub use cli::{Cli, Command, ResolveArgs, RewriteArgs};
pub use constants::*;
pub use headers::*;
pub use types::{LogFormat, LogLevel, ResolverConfig};
