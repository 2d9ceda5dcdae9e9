//! Logger setup for the `urlsift` binary and tests.

use std::io::Write;

use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Dependencies whose debug output drowns out the resolver's own.
const NOISY_MODULES: &[&str] = &["reqwest", "hyper", "hyper_util"];

/// Renders one log record as a single JSON object.
fn json_line(ts_millis: i64, level: Level, target: &str, msg: &str) -> String {
    serde_json::json!({
        "ts": ts_millis,
        "level": level.as_str(),
        "target": target,
        "msg": msg,
    })
    .to_string()
}

fn colored_level(level: Level) -> ColoredString {
    let label = level.as_str();
    match level {
        Level::Error => label.red(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.purple(),
    }
}

/// Installs `env_logger` as the global logger.
///
/// `RUST_LOG` is read first; `level` then overrides the global and `urlsift`
/// levels while noisy HTTP dependencies stay capped at `info`. `Plain` output
/// is colored and human-oriented; `Json` emits one object per line with
/// millisecond `ts`, `level`, `target` and `msg`.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=urlsift=debug,reqwest=info urlsift resolve urls.txt
/// urlsift --log-format json resolve urls.txt 2> log.jsonl
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    for module in NOISY_MODULES {
        builder.filter_module(module, LevelFilter::Info.min(level));
    }
    builder.filter_module("urlsift", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(
                        chrono::Utc::now().timestamp_millis(),
                        record.level(),
                        record.target(),
                        &record.args().to_string(),
                    )
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    record.target().cyan(),
                    colored_level(record.level()),
                    record.args()
                )
            });
        }
    }

    builder.try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_line_escapes_message() {
        let line = json_line(1_700_000_000_000, Level::Warn, "urlsift::fetch", "bad \"quote\"\n");
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["ts"], 1_700_000_000_000i64);
        assert_eq!(value["level"], "WARN");
        assert_eq!(value["target"], "urlsift::fetch");
        assert_eq!(value["msg"], "bad \"quote\"\n");
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_colored_level_keeps_label() {
        colored::control::set_override(false);
        assert_eq!(colored_level(Level::Info).to_string(), "INFO");
        assert_eq!(colored_level(Level::Trace).to_string(), "TRACE");
    }

    #[test]
    fn test_second_init_fails() {
        let _ = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        assert!(init_logger_with(LevelFilter::Debug, LogFormat::Json).is_err());
    }
}
