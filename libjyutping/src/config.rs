//! Jyutping-specific configuration extending the base core config.
//!
//! All generic front-end options (page size, debounce windows, simplified
//! output) come from `libjyutping_core::Config`, flattened via serde so one
//! TOML file configures both layers. The fields here cover the provider
//! wire contract and the host-integration knobs.

use serde::{Deserialize, Serialize};

use crate::url::{DEFAULT_CACHE_CAPACITY, DEFAULT_CANDIDATE_LIMIT, DEFAULT_INPUT_TOOL};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JyutpingConfig {
    /// Base configuration fields (page size, debounce, simplified output)
    #[serde(flatten)]
    pub base: libjyutping_core::Config,

    /// Input-tool code sent with every request
    pub input_tool: String,

    /// Server-side candidate cap; deeper than one page so paging has depth
    pub candidate_limit: usize,

    /// Locator cache capacity
    pub url_cache_capacity: usize,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,

    /// Copy committed text to the host clipboard (a presentation concern;
    /// the engine never reads this)
    pub copy_on_commit: bool,

    /// Self-hosted endpoint speaking the same wire contract; None uses the
    /// hosted default
    pub endpoint: Option<String>,
}

impl Default for JyutpingConfig {
    fn default() -> Self {
        Self {
            base: libjyutping_core::Config::default(),
            input_tool: DEFAULT_INPUT_TOOL.to_string(),
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            url_cache_capacity: DEFAULT_CACHE_CAPACITY,
            timeout_ms: 1000,
            copy_on_commit: false,
            endpoint: None,
        }
    }
}

impl JyutpingConfig {
    /// Convert this config into the base config for `ImeEngine::new()`.
    pub fn into_base(self) -> libjyutping_core::Config {
        self.base
    }

    /// Get a reference to the base config.
    pub fn base(&self) -> &libjyutping_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config.
    pub fn base_mut(&mut self) -> &mut libjyutping_core::Config {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_wire_contract() {
        let config = JyutpingConfig::default();
        assert_eq!(config.input_tool, "yue-hant-t");
        assert_eq!(config.candidate_limit, 13);
        assert_eq!(config.url_cache_capacity, 100);
        assert_eq!(config.base.page_size, 6);
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn flattened_toml_configures_both_layers() {
        let text = r#"
            page_size = 5
            debounce_initial_ms = 50
            debounce_settled_ms = 150
            simplified = true
            input_tool = "yue-hant-t"
            candidate_limit = 20
            url_cache_capacity = 10
            timeout_ms = 500
            copy_on_commit = true
        "#;
        let config: JyutpingConfig = toml::from_str(text).expect("parse");
        assert_eq!(config.base.page_size, 5);
        assert!(config.base.simplified);
        assert_eq!(config.candidate_limit, 20);
        assert!(config.copy_on_commit);
    }
}
