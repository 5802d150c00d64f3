//! Cloud suggestion client.
//!
//! One blocking GET per query against the transliteration endpoint; the
//! response envelope is decoded into candidate strings. Uses the `reqwest`
//! blocking client with a per-request timeout — no async runtime needed;
//! the engine's generation counter already guarantees that a slow response
//! can never overwrite newer state.

use std::time::Duration;

use tracing::debug;

use crate::config::JyutpingConfig;
use crate::decode::decode_candidates;
use crate::error::CloudError;
use crate::url::{UrlBuilder, DEFAULT_ENDPOINT};

/// Where candidate queries are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloudProvider {
    /// Hosted transliteration endpoint
    Hosted,
    /// Self-hosted endpoint speaking the same wire contract
    Custom(String),
}

impl Default for CloudProvider {
    fn default() -> Self {
        Self::Hosted
    }
}

impl CloudProvider {
    fn endpoint(&self) -> &str {
        match self {
            Self::Hosted => DEFAULT_ENDPOINT,
            Self::Custom(url) => url,
        }
    }
}

/// Cloud input client: locator builder plus blocking fetch.
pub struct CloudInput {
    builder: UrlBuilder,
    timeout_ms: u64,
}

impl CloudInput {
    /// Create a client for the given provider with default settings.
    pub fn new(provider: CloudProvider) -> Self {
        let config = JyutpingConfig::default();
        Self {
            builder: UrlBuilder::with_settings(
                provider.endpoint(),
                &config.input_tool,
                config.candidate_limit,
                config.url_cache_capacity,
            ),
            timeout_ms: config.timeout_ms,
        }
    }

    /// Create a client from a full configuration.
    pub fn from_config(config: &JyutpingConfig) -> Self {
        let endpoint = config.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        Self {
            builder: UrlBuilder::with_settings(
                endpoint,
                &config.input_tool,
                config.candidate_limit,
                config.url_cache_capacity,
            ),
            timeout_ms: config.timeout_ms,
        }
    }

    /// Set the request timeout in milliseconds.
    pub fn set_timeout(&mut self, timeout_ms: u64) {
        self.timeout_ms = timeout_ms;
    }

    /// Access the locator builder (locator inspection, cache statistics).
    pub fn url_builder(&self) -> &UrlBuilder {
        &self.builder
    }

    /// Query the service for candidates (blocking call with timeout).
    ///
    /// `query` is the romanization segment, `retained` the composed han
    /// context. Returns the decoded candidate strings in provider order.
    pub fn query(&mut self, query: &str, retained: &str) -> Result<Vec<String>, CloudError> {
        let url = self.builder.build(query, retained)?;
        debug!(%url, "fetching candidates");
        let body = self.fetch(&url)?;
        decode_candidates(&body)
    }

    /// Perform the GET and return the raw body.
    fn fetch(&self, url: &str) -> Result<String, CloudError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(self.timeout_ms))
            .build()
            .map_err(|e| CloudError::Transport(e.to_string()))?;

        let response = client
            .get(url)
            .send()
            .map_err(|e| CloudError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CloudError::Transport(format!("HTTP status {status}")));
        }
        response.text().map_err(|e| CloudError::Transport(e.to_string()))
    }
}

impl Default for CloudInput {
    fn default() -> Self {
        Self::new(CloudProvider::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_endpoints() {
        assert_eq!(CloudProvider::Hosted.endpoint(), DEFAULT_ENDPOINT);
        let custom = CloudProvider::Custom("https://example.com/request".to_string());
        assert_eq!(custom.endpoint(), "https://example.com/request");
    }

    #[test]
    fn empty_query_never_touches_the_network() {
        let mut cloud = CloudInput::default();
        assert_eq!(cloud.query("", "你"), Err(CloudError::InvalidInput));
    }

    #[test]
    fn config_endpoint_overrides_the_default() {
        let config = JyutpingConfig {
            endpoint: Some("https://ime.example.org/request".to_string()),
            ..JyutpingConfig::default()
        };
        let mut cloud = CloudInput::from_config(&config);
        // Build fails on the wire, but the locator must target the override;
        // the builder is exercised before any fetch
        let _ = cloud.builder.build("nei", "").expect("build");
        assert!(cloud.builder.cached("nei", ""));
    }

    // Real network test; requires connectivity and a reachable provider.
    #[test]
    #[ignore]
    fn query_hosted_real_network() {
        let mut cloud = CloudInput::new(CloudProvider::Hosted);
        cloud.set_timeout(3000);

        match cloud.query("nei", "") {
            Ok(candidates) => {
                println!("candidates for 'nei': {candidates:?}");
                assert!(!candidates.is_empty());
            }
            Err(e) => println!("cloud query failed (offline?): {e}"),
        }
    }
}
