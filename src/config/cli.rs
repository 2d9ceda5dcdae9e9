//! Command-line options.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::config::constants::{
    DEFAULT_BATCH_CONCURRENCY, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS,
};
use crate::config::types::{LogFormat, LogLevel, ResolverConfig};

/// Command-line interface of the `urlsift` binary.
///
/// # Examples
///
/// ```bash
/// # Resolve a list of URLs (one per line, `#` comments allowed)
/// urlsift resolve urls.txt
///
/// # From stdin, without following redirects
/// cat urls.txt | urlsift resolve - --no-follow
///
/// # Inspect and rewrite an image URL
/// urlsift analyze "https://acme.imgix.net/photo.jpg"
/// urlsift rewrite "https://acme.imgix.net/photo.jpg" --width 800 --quality 70
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "urlsift",
    about = "Resolves URLs to canonical, tracking-free destinations and rewrites image URLs."
)]
pub struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize URLs and follow their redirects, printing one JSON outcome per line
    Resolve(ResolveArgs),

    /// Print the manipulation capabilities of an image URL as JSON
    Analyze {
        /// Image URL
        url: String,
    },

    /// Print an image URL rewritten for the requested dimensions
    Rewrite(RewriteArgs),
}

/// Options of `urlsift resolve`.
#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// File with one URL per line, or `-` for stdin
    #[arg(value_parser, default_value = "-")]
    pub file: PathBuf,

    /// Maximum number of redirect hops to follow
    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,

    /// Per-probe timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Only normalize; do not issue any requests
    #[arg(long)]
    pub no_follow: bool,

    /// HTTP User-Agent header value
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Maximum URLs resolved at once
    #[arg(long, default_value_t = DEFAULT_BATCH_CONCURRENCY)]
    pub concurrency: usize,

    /// Skip the cookie-wall check on terminal HTML pages
    #[arg(long)]
    pub no_cookie_check: bool,
}

impl ResolveArgs {
    /// Builds the resolver configuration these options describe.
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            follow_redirects: !self.no_follow,
            max_redirects: self.max_redirects,
            timeout: Duration::from_secs(self.timeout_seconds),
            user_agent: self.user_agent.clone(),
            detect_cookie_walls: !self.no_cookie_check,
        }
    }
}

/// Options of `urlsift rewrite`.
#[derive(Debug, Clone, Args)]
pub struct RewriteArgs {
    /// Image URL
    pub url: String,

    /// Target width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Target height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Target quality
    #[arg(long)]
    pub quality: Option<u32>,
}
