//! HTTP client for the Sentry API.
//!
//! Requests are authenticated with a bearer token and issued sequentially;
//! the request timeout is configurable (30 seconds by default). The fetch
//! seam is a trait so the pagination loop can be driven by a scripted
//! client in tests.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, LINK};

use crate::error::{DumpError, Result};

/// Base URL of the Sentry REST API.
pub const SENTRY_API_BASE: &str = "https://sentry.io/api/0";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Initial events endpoint for an issue.
#[must_use]
pub fn issue_events_url(issue: &str) -> String {
    format!("{SENTRY_API_BASE}/issues/{issue}/events/")
}

/// One fetched page, reduced to the parts the scrape loop consumes.
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw `Link` header, when present and valid UTF-8.
    pub link_header: Option<String>,
    /// Raw response body.
    pub body: String,
}

/// Fetch seam for the pagination loop.
pub trait EventsApi {
    /// Issue an authenticated GET for one page of events.
    ///
    /// Transport failures (connection refused, timeout) are errors; an HTTP
    /// error status is not, and is reported through [`PageResponse::status`].
    fn fetch(&self, url: &str) -> Result<PageResponse>;
}

impl<A: EventsApi + ?Sized> EventsApi for &A {
    fn fetch(&self, url: &str) -> Result<PageResponse> {
        (**self).fetch(url)
    }
}

/// Sentry API client over blocking reqwest.
#[derive(Debug)]
pub struct SentryClient {
    client: Client,
    headers: HeaderMap,
}

impl SentryClient {
    /// Create a client for the given bearer token and request timeout.
    pub fn new(bearer_token: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let auth = format!("Bearer {bearer_token}");
        let auth = HeaderValue::from_str(&auth).map_err(|_| {
            DumpError::invalid_argument("bearer-token", "not a valid header value")
        })?;
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DumpError::http("build HTTP client", e))?;

        Ok(Self { client, headers })
    }
}

impl EventsApi for SentryClient {
    fn fetch(&self, url: &str) -> Result<PageResponse> {
        let response = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .send()
            .map_err(|e| DumpError::http(format!("GET {url}"), e))?;

        let status = response.status().as_u16();
        let link_header = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let body = response
            .text()
            .map_err(|e| DumpError::http(format!("read body of {url}"), e))?;

        Ok(PageResponse {
            status,
            link_header,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_events_url() {
        assert_eq!(
            issue_events_url("123456"),
            "https://sentry.io/api/0/issues/123456/events/"
        );
    }

    #[test]
    fn test_rejects_control_characters_in_token() {
        let err = SentryClient::new("bad\ntoken", Duration::from_secs(1)).unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }
}
