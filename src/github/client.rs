//! HTTP client for GitHub API requests.
//!
//! This module provides a low-level HTTP client wrapper that applies the
//! configured timeouts, authentication and admission limit, and decodes
//! response bodies into wire records.

use super::error::GithubError;
use crate::config::Config;
use log::*;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("ghview/", env!("CARGO_PKG_VERSION"));

/// Makes requests to GitHub and tries to conform response data to given model.
///
#[derive(Clone)]
pub struct Client {
    base_url: Url,
    http_client: reqwest::Client,
    admission: Arc<Semaphore>,
}

impl Client {
    /// Returns a new instance for the given configuration.
    ///
    pub fn new(config: &Config) -> Result<Self, GithubError> {
        let timeout = Duration::from_secs(config.timeout_secs);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_GITHUB_JSON));
        if let Some(token) = config.access_token.as_deref().filter(|t| !t.is_empty()) {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| GithubError::Other(format!("Invalid access token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(GithubError::ClientBuild)?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            GithubError::Other(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GithubError::Other(format!(
                "Invalid base URL '{}'",
                config.base_url
            )));
        }

        Ok(Client {
            base_url,
            http_client,
            admission: Arc::new(Semaphore::new(config.max_concurrent_requests.max(1))),
        })
    }

    /// GET the path made of `segments` below the base URL and decode the body
    /// as `T`. Segments are percent-encoded, so ids cannot escape their slot.
    ///
    /// Waits for an admission permit first; the permit is held until the body
    /// has been read in full.
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, GithubError> {
        let _permit = self
            .admission
            .acquire()
            .await
            .map_err(|e| GithubError::Other(e.to_string()))?;

        let request_url = self.url_for(segments);
        debug!("GET {}", request_url);

        let response = self
            .http_client
            .get(request_url.clone())
            .send()
            .await
            .map_err(GithubError::Connectivity)?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(GithubError::Connectivity)?;

        if !status.is_success() {
            debug!(
                "GET {} failed with status {}: {}",
                request_url,
                status,
                String::from_utf8_lossy(&body)
            );
            return Err(GithubError::Http {
                status: status.as_u16(),
                body: body.to_vec(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }

    fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
