use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::domain::SraRunId;
use crate::error::SoftError;

static RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"run=(SRR[0-9]+)").expect("valid run regex"));

pub trait SraClient {
    fn fetch_text(&self, url: &str) -> Result<String, SoftError>;
}

impl<C: SraClient + ?Sized> SraClient for &C {
    fn fetch_text(&self, url: &str) -> Result<String, SoftError> {
        (**self).fetch_text(url)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SraClientOptions {
    pub user_agent: Option<String>,
    pub timeout: Option<Duration>,
}

#[derive(Clone)]
pub struct SraHttpClient {
    client: Client,
}

impl SraHttpClient {
    pub fn with_options(options: &SraClientOptions) -> Result<Self, SoftError> {
        let agent = options
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("geo-soft-json/{}", env!("CARGO_PKG_VERSION")));
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&agent).map_err(|err| SoftError::SraHttp(err.to_string()))?,
        );
        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| SoftError::SraHttp(err.to_string()))?;
        Ok(Self { client })
    }
}

impl SraClient for SraHttpClient {
    fn fetch_text(&self, url: &str) -> Result<String, SoftError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| SoftError::SraHttp(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            // Error pages are scanned like any other body.
            tracing::warn!(
                url,
                status = status.as_u16(),
                "SRA link returned non-success status"
            );
        }
        response
            .text()
            .map_err(|err| SoftError::SraHttp(err.to_string()))
    }
}

// ASCII digits only; every match is a valid run id.
pub fn extract_run_ids(text: &str) -> Vec<SraRunId> {
    RUN_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|run| run.as_str().parse().ok())
        .collect()
}

pub fn resolve_runs<C: SraClient + ?Sized>(
    client: &C,
    url: &str,
) -> Result<Vec<SraRunId>, SoftError> {
    let text = client.fetch_text(url)?;
    let runs = extract_run_ids(&text);
    tracing::debug!(url, runs = runs.len(), "resolved SRA link");
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_runs_in_text_order() {
        let text = "<a href=\"?run=SRR222\">x</a> run=SRR111 acc=SRR999 run=SRR222";
        let runs = extract_run_ids(text);
        let runs: Vec<&str> = runs.iter().map(SraRunId::as_str).collect();
        assert_eq!(runs, vec!["SRR222", "SRR111", "SRR222"]);
    }

    #[test]
    fn extract_runs_ignores_other_archives() {
        assert!(extract_run_ids("run=ERR123 run=DRR1 run=srr5 run=SRR").is_empty());
    }

    #[test]
    fn extract_runs_stops_at_non_ascii_digits() {
        let runs = extract_run_ids("run=SRR12\u{0663} run=SRR7");
        let runs: Vec<&str> = runs.iter().map(SraRunId::as_str).collect();
        assert_eq!(runs, vec!["SRR12", "SRR7"]);
    }

    #[test]
    fn extract_runs_is_idempotent() {
        let text = "run=SRR1\nrun=SRR2\n";
        assert_eq!(extract_run_ids(text), extract_run_ids(text));
    }
}
