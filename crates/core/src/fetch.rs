//! Page loading from URLs, files, and stdin.
//!
//! This module provides functions for retrieving the HTML of the page whose
//! article should be summarized, plus the shared HTTP client used by the
//! remote source.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{Result, SummaristError};

/// HTTP client configuration.
///
/// Controls timeout and user agent for page fetches and REST lookups.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; Summarist/0.1)".to_string() }
    }
}

impl FetchConfig {
    /// Builds a reqwest client honouring this configuration.
    pub fn client(&self) -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(self.timeout))
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(SummaristError::HttpError)
    }
}

/// Fetches HTML content from a URL.
///
/// Performs an HTTP GET request and returns the response body as text.
/// Follows redirects and respects the configured timeout.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| SummaristError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(SummaristError::InvalidUrl(
            "URL must use http:// or https://".to_string(),
        ));
    }

    let response = config
        .client()?
        .get(parsed_url)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                SummaristError::Timeout { timeout: config.timeout }
            } else {
                SummaristError::HttpError(e)
            }
        })?;

    let content = response.error_for_status()?.text().await?;

    Ok(content)
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(SummaristError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(SummaristError::from)
    }
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(SummaristError::from)?;

    Ok(buffer)
}
