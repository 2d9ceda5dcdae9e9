//! Configuration types.
//!
//! This module defines the resolver configuration and the enums shared with
//! command-line parsing.

use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Redirect resolver configuration (no CLI dependencies).
///
/// # Examples
///
/// ```
/// use urlsift::ResolverConfig;
/// use std::time::Duration;
///
/// let config = ResolverConfig {
///     max_redirects: 3,
///     timeout: Duration::from_secs(5),
///     ..Default::default()
/// };
/// assert!(config.follow_redirects);
/// ```
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Follow redirects at all; when false `optimize` only normalizes
    pub follow_redirects: bool,

    /// Maximum number of redirect hops to follow
    pub max_redirects: usize,

    /// Per-probe timeout
    pub timeout: Duration,

    /// HTTP User-Agent header value (falls back to `DEFAULT_USER_AGENT`)
    pub user_agent: Option<String>,

    /// Issue a bounded GET on HTML terminal pages to look for a cookie wall
    pub detect_cookie_walls: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            follow_redirects: true,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            detect_cookie_walls: true,
        }
    }
}

impl ResolverConfig {
    /// Returns the configured user agent, or the default one.
    pub fn effective_user_agent(&self) -> &str {
        self.user_agent
            .as_deref()
            .unwrap_or(crate::config::DEFAULT_USER_AGENT)
    }
}
