use super::envelope::{EnvelopeError, unwrap_payload};
use crate::config::HttpConfig;
use crate::error::{ConfigError, FetchError};
use reqwest::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Thin JSON-over-GET client bound to one base URL.
///
/// Requests never carry cookies or credentials and always ask intermediaries
/// not to serve cached copies.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str, http: &HttpConfig) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ConfigError::Validation(format!("invalid base URL {base_url}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(ConfigError::Validation(format!(
                "base URL {base_url} cannot carry a path"
            )));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ConfigError::Validation(format!(
                "base URL {base_url} must not carry a query string or fragment"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
            .user_agent(http.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::Validation(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the absolute request URL for `path` plus `query`.
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, FetchError> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| FetchError::Transport {
            path: path.to_string(),
            message: format!("invalid request URL: {e}"),
        })?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// GET `path?query`, check the status, parse JSON and unwrap the
    /// response envelope.
    pub async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        let url = self.endpoint(path, query)?;
        let label = request_label(&url);
        debug!(path = %label, "api.get");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                path: label.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(path = %label, status = status.as_u16(), "api.status");
            return Err(FetchError::Status {
                path: label,
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await.map_err(|e| FetchError::Decode {
            path: label.clone(),
            message: e.to_string(),
        })?;

        unwrap_payload(body).map_err(|e| match e {
            EnvelopeError::Malformed(message) => FetchError::Malformed {
                path: label,
                message,
            },
            EnvelopeError::Rejected(message) => FetchError::Rejected {
                path: label,
                message,
            },
        })
    }
}

fn request_label(url: &Url) -> String {
    match url.query() {
        Some(q) => format!("{}?{q}", url.path()),
        None => url.path().to_string(),
    }
}
