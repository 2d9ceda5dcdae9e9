//! Batch resolution driver behind `urlsift resolve`.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::config::ResolveArgs;
use crate::error_handling::ProcessingStats;
use crate::fetch::{RedirectOutcome, RedirectResolver};

/// Results of a batch resolution.
pub struct ResolveReport {
    /// One outcome per input URL, in input order
    pub outcomes: Vec<RedirectOutcome>,
    /// Error and info counters over all outcomes
    pub stats: ProcessingStats,
    /// Wall-clock duration of the batch in seconds
    pub elapsed_seconds: f64,
}

impl ResolveReport {
    /// Number of outcomes with no error whose last probe returned 200, or
    /// that needed no probe.
    pub fn successful(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_successful()).count()
    }

    /// Number of outcomes that carry an error.
    pub fn errored(&self) -> usize {
        self.outcomes.iter().filter(|o| o.error.is_some()).count()
    }

    /// Number of outcomes with no error that ended on a status other than 200.
    pub fn other_status(&self) -> usize {
        self.outcomes.len() - self.successful() - self.errored()
    }
}

/// Reads URLs one per line, skipping blank lines and `#` comments.
pub async fn read_urls<R>(reader: R) -> Result<Vec<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut urls = Vec::new();
    while let Some(line) = lines.next_line().await.context("Failed to read URL list")? {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        urls.push(trimmed.to_string());
    }
    Ok(urls)
}

/// Reads URLs from a file, or from stdin when `path` is `-`.
pub async fn read_url_source(path: &Path) -> Result<Vec<String>> {
    if path.as_os_str() == "-" {
        info!("Reading URLs from stdin");
        return read_urls(BufReader::new(tokio::io::stdin())).await;
    }
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open input file {}", path.display()))?;
    let urls = read_urls(BufReader::new(file)).await?;
    info!("Total URLs in file: {}", urls.len());
    Ok(urls)
}

/// Resolves every URL of the input the options point at.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the HTTP client cannot be
/// built. Individual resolution failures are recorded on their outcomes.
pub async fn run_resolve(args: &ResolveArgs) -> Result<ResolveReport> {
    let urls = read_url_source(&args.file).await?;
    let resolver = RedirectResolver::with_reqwest(args.resolver_config())
        .context("Failed to initialize HTTP client")?;
    Ok(resolve_batch(&resolver, urls, args.concurrency).await)
}

/// Resolves `urls` with a prepared resolver and tallies the outcomes.
pub async fn resolve_batch(
    resolver: &RedirectResolver,
    urls: Vec<String>,
    concurrency: usize,
) -> ResolveReport {
    let start = Instant::now();
    let outcomes = resolver.optimize_all(urls, concurrency).await;

    let stats = ProcessingStats::new();
    for outcome in &outcomes {
        stats.record_outcome(outcome);
    }

    ResolveReport {
        outcomes,
        stats,
        elapsed_seconds: start.elapsed().as_secs_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use crate::error_handling::InfoType;
    use crate::fetch::{NetworkProbe, ProbeRequest, ProbeResponse};
    use crate::ProbeError;
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::Arc;

    struct RedirectOnce;

    #[async_trait]
    impl NetworkProbe for RedirectOnce {
        async fn send(&self, request: ProbeRequest) -> Result<ProbeResponse, ProbeError> {
            if request.url.ends_with("/old") {
                Ok(ProbeResponse::new(301).with_header("location", "/new"))
            } else if request.url.ends_with("/gone") {
                Ok(ProbeResponse::new(404))
            } else if request.url.ends_with("/moved") {
                Ok(ProbeResponse::new(302))
            } else {
                Ok(ProbeResponse::new(200))
            }
        }
    }

    #[tokio::test]
    async fn test_read_urls_skips_blank_lines_and_comments() {
        let input = b"# header\nhttps://a.example\n\n   \n  https://b.example  \n#x\n";
        let urls = read_urls(&input[..]).await.unwrap();
        assert_eq!(urls, vec!["https://a.example", "https://b.example"]);
    }

    #[tokio::test]
    async fn test_read_url_source_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "example.com\n# comment\nhttps://example.org/page").unwrap();
        let urls = read_url_source(file.path()).await.unwrap();
        assert_eq!(urls, vec!["example.com", "https://example.org/page"]);
    }

    #[tokio::test]
    async fn test_read_url_source_missing_file() {
        let err = read_url_source(Path::new("/nonexistent/urls.txt"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open input file"));
    }

    #[tokio::test]
    async fn test_resolve_batch_tallies_outcomes() {
        let resolver = RedirectResolver::new(Arc::new(RedirectOnce), ResolverConfig::default());
        let report = resolve_batch(
            &resolver,
            vec![
                "https://example.com/old".to_string(),
                "https://example.com/".to_string(),
            ],
            2,
        )
        .await;

        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.outcomes[0].final_url, "https://example.com/new");
        assert_eq!(report.successful(), 2);
        assert_eq!(report.stats.get_info_count(InfoType::Redirected), 1);
        assert_eq!(report.stats.total_errors(), 0);
    }

    #[tokio::test]
    async fn test_non_200_endings_are_not_successful() {
        let resolver = RedirectResolver::new(Arc::new(RedirectOnce), ResolverConfig::default());
        let report = resolve_batch(
            &resolver,
            vec![
                "https://example.com/".to_string(),
                "https://example.com/gone".to_string(),
                "https://example.com/moved".to_string(),
            ],
            3,
        )
        .await;

        assert_eq!(report.outcomes[1].status_code, Some(404));
        assert_eq!(report.outcomes[2].status_code, Some(302));
        assert!(report.outcomes[2].error.is_none());
        assert_eq!(report.successful(), 1);
        assert_eq!(report.errored(), 0);
        assert_eq!(report.other_status(), 2);
    }
}
