//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `urlsift` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use urlsift::config::{Cli, Command, RewriteArgs};
use urlsift::initialization::init_logger_with;
use urlsift::{analyze_image_url, generate_url, run_resolve, ImageRequest};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    match cli.command {
        Command::Resolve(args) => {
            let report = run_resolve(&args).await?;

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for outcome in &report.outcomes {
                let line = serde_json::to_string(outcome).context("Failed to serialize outcome")?;
                writeln!(out, "{line}").context("Failed to write output")?;
            }

            info!(
                "Resolved {} URL{} in {:.1}s: {} reached 200, {} ended on another status, {} errored",
                report.outcomes.len(),
                if report.outcomes.len() == 1 { "" } else { "s" },
                report.elapsed_seconds,
                report.successful(),
                report.other_status(),
                report.errored()
            );
            report.stats.log_summary();
        }
        Command::Analyze { url } => {
            let caps = analyze_image_url(&url);
            let json =
                serde_json::to_string_pretty(&caps).context("Failed to serialize capabilities")?;
            println!("{json}");
        }
        Command::Rewrite(RewriteArgs {
            url,
            width,
            height,
            quality,
        }) => {
            let caps = analyze_image_url(&url);
            let request = ImageRequest {
                width,
                height,
                quality,
            };
            println!("{}", generate_url(&caps, &url, &request));
        }
    }

    Ok(())
}
