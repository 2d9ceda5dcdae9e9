//! Tests for CLI parsing and the `resolve` driver it feeds.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tempfile::NamedTempFile;
use urlsift::config::{Cli, Command};
use urlsift::{run_resolve, InfoType, LogFormat, LogLevel};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper function to write URLs to a temporary file
fn write_urls_to_file(lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for line in lines {
        writeln!(file, "{}", line).expect("Failed to write URL");
    }
    file.flush().expect("Failed to flush file");
    file
}

#[test]
fn test_every_subcommand_parses() {
    for args in [
        vec!["urlsift", "resolve"],
        vec!["urlsift", "resolve", "urls.txt", "--concurrency", "8"],
        vec!["urlsift", "analyze", "https://example.com/a.jpg"],
        vec!["urlsift", "rewrite", "https://example.com/a.jpg", "--height", "300"],
    ] {
        assert!(Cli::try_parse_from(args.clone()).is_ok(), "failed to parse {args:?}");
    }
}

#[test]
fn test_log_options_default_to_info_plain() {
    let cli = Cli::try_parse_from(["urlsift", "resolve", "urls.txt"]).unwrap();
    assert!(matches!(cli.log_level, LogLevel::Info));
    assert!(matches!(cli.log_format, LogFormat::Plain));
}

#[test]
fn test_global_flags_before_subcommand() {
    let cli = Cli::try_parse_from([
        "urlsift",
        "--log-level",
        "trace",
        "resolve",
        "urls.txt",
    ])
    .unwrap();
    assert!(matches!(cli.log_level, LogLevel::Trace));
}

#[test]
fn test_rewrite_requires_url() {
    assert!(Cli::try_parse_from(["urlsift", "rewrite", "--width", "10"]).is_err());
}

#[test]
fn test_rewrite_rejects_negative_width() {
    assert!(Cli::try_parse_from([
        "urlsift",
        "rewrite",
        "https://example.com/a.jpg",
        "--width=-5"
    ])
    .is_err());
}

#[tokio::test]
async fn test_resolve_from_file_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let file = write_urls_to_file(&[
        "# redirected".to_string(),
        format!("{}/old", server.uri()),
        String::new(),
        format!("{}/new?utm_source=x", server.uri()),
    ]);
    let file_arg = file.path().to_string_lossy().into_owned();

    let cli = Cli::try_parse_from([
        "urlsift",
        "resolve",
        file_arg.as_str(),
        "--timeout-seconds",
        "5",
        "--no-cookie-check",
    ])
    .unwrap();
    let Command::Resolve(args) = cli.command else {
        panic!("expected resolve");
    };
    assert_eq!(args.file, PathBuf::from(&file_arg));

    let report = run_resolve(&args).await.expect("resolve should succeed");
    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.outcomes[0].final_url, format!("{}/new", server.uri()));
    assert_eq!(report.outcomes[1].final_url, format!("{}/new", server.uri()));
    assert_eq!(report.outcomes[1].hop_count, 0);
    assert_eq!(report.successful(), 2);
    assert_eq!(report.stats.get_info_count(InfoType::Redirected), 1);

    let line = serde_json::to_string(&report.outcomes[0]).unwrap();
    assert!(line.contains("\"hopCount\":1"), "{line}");
}

#[tokio::test]
async fn test_resolve_no_follow_only_normalizes() {
    let file = write_urls_to_file(&["example.com/page?gclid=1#top".to_string()]);
    let file_arg = file.path().to_string_lossy().into_owned();
    let cli = Cli::try_parse_from(["urlsift", "resolve", file_arg.as_str(), "--no-follow"]).unwrap();
    let Command::Resolve(args) = cli.command else {
        panic!("expected resolve");
    };

    let report = run_resolve(&args).await.unwrap();
    assert_eq!(report.outcomes[0].final_url, "https://example.com/page");
    assert_eq!(report.outcomes[0].status_code, None);
    assert!(report.outcomes[0].redirect_chain.is_empty());
}

#[tokio::test]
async fn test_resolve_missing_file_errors() {
    let cli = Cli::try_parse_from(["urlsift", "resolve", "/nonexistent/urls.txt"]).unwrap();
    let Command::Resolve(args) = cli.command else {
        panic!("expected resolve");
    };
    assert!(run_resolve(&args).await.is_err());
}
