//! sections::http
//!
//! TOC source backed by an HTTP JSON endpoint.
//!
//! # Protocol
//!
//! `GET {base_url}/{work}/toc.json` returns
//! `{"entries": [{"section_id": "...", "title": "...", "book": 1, ...}]}`.
//! Hints omitted by the server are derived from titles.
//!
//! # Errors
//!
//! | Response            | Error                      |
//! |---------------------|----------------------------|
//! | 404                 | `TocError::NotFound`       |
//! | 429                 | `TocError::RateLimited`    |
//! | other non-2xx       | `TocError::Api`            |
//! | undecodable 2xx     | `TocError::Parse`          |
//! | transport failure   | `TocError::Network`        |
//!
//! There is no retry; callers decide whether to try again.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::traits::{Toc, TocEntry, TocError, TocSource};

/// User-Agent header value for TOC requests.
const USER_AGENT_VALUE: &str = concat!("scriptref/", env!("CARGO_PKG_VERSION"));

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct TocResponse {
    entries: Vec<TocEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// HTTP TOC source.
#[derive(Debug, Clone)]
pub struct HttpTocSource {
    client: Client,
    base_url: String,
}

impl HttpTocSource {
    /// Create a source for `base_url` with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `TocError::Network` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TocError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a source with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TocError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT_VALUE)
            .default_headers(headers)
            .build()
            .map_err(|e| TocError::Network(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a source around an existing client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the TOC document for `work`.
    ///
    /// ```
    /// use scriptref::sections::http::HttpTocSource;
    ///
    /// let source = HttpTocSource::new("https://toc.example.org/").unwrap();
    /// assert_eq!(
    ///     source.toc_url("calvin/institutes"),
    ///     "https://toc.example.org/calvin/institutes/toc.json"
    /// );
    /// ```
    pub fn toc_url(&self, work: &str) -> String {
        format!("{}/{}/toc.json", self.base_url, work.trim_matches('/'))
    }

    async fn handle_response(&self, work: &str, response: Response) -> Result<Toc, TocError> {
        let status = response.status();

        if status.is_success() {
            let body: TocResponse = response
                .json()
                .await
                .map_err(|e| TocError::Parse(format!("{}: {}", work, e)))?;
            Ok(Toc::from_entries(body.entries))
        } else {
            self.handle_error_response(work, response, status).await
        }
    }

    async fn handle_error_response<T>(
        &self,
        work: &str,
        response: Response,
        status: StatusCode,
    ) -> Result<T, TocError> {
        let message = match response.json::<ErrorResponse>().await {
            Ok(err) => err.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };

        Err(match status {
            StatusCode::NOT_FOUND => TocError::NotFound(work.to_string()),
            StatusCode::TOO_MANY_REQUESTS => TocError::RateLimited,
            _ if status.is_server_error() => TocError::Api {
                status: status.as_u16(),
                message: format!("server error: {}", message),
            },
            _ => TocError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }
}

#[async_trait]
impl TocSource for HttpTocSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_toc(&self, work: &str) -> Result<Toc, TocError> {
        let url = self.toc_url(work);
        debug!(%url, "fetching TOC");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TocError::Network(e.to_string()))?;

        self.handle_response(work, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_trimmed() {
        let source = HttpTocSource::new("http://localhost:9999///").unwrap();
        assert_eq!(source.base_url(), "http://localhost:9999");
        assert_eq!(source.toc_url("/w/"), "http://localhost:9999/w/toc.json");
    }

    #[test]
    fn name() {
        let source = HttpTocSource::new("http://localhost").unwrap();
        assert_eq!(source.name(), "http");
    }
}
