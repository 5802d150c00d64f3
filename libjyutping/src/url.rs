//! Request locator construction for the transliteration service.
//!
//! A locator is a plain GET URL. For a given (query, retained) pair the
//! output is byte-identical on every call: the callback name is a fixed
//! string, never randomized, so any HTTP cache between us and the provider
//! can hit. Built locators are memoized in a bounded first-in-first-out
//! cache; the cache is purely a shortcut and never changes observable
//! behaviour.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::error::CloudError;

/// Hosted transliteration endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://inputtools.google.com/request";

/// Callback function name sent as `cb`. Constant so identical queries yield
/// identical, cacheable locators.
pub const CALLBACK_NAME: &str = "_callbacks____x";

/// Input-tool code for traditional-script jyutping transliteration.
pub const DEFAULT_INPUT_TOOL: &str = "yue-hant-t";

/// Server-side candidate cap; deeper than one page so paging has something
/// to show.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 13;

/// Locator cache capacity.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Builds and memoizes request locators.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    endpoint: String,
    input_tool: String,
    candidate_limit: usize,
    capacity: usize,
    cache: HashMap<String, String>,
    /// Insertion order for first-in-first-out eviction
    order: VecDeque<String>,
}

impl UrlBuilder {
    /// Create a builder against the hosted endpoint with default settings.
    pub fn new() -> Self {
        Self::with_settings(
            DEFAULT_ENDPOINT,
            DEFAULT_INPUT_TOOL,
            DEFAULT_CANDIDATE_LIMIT,
            DEFAULT_CACHE_CAPACITY,
        )
    }

    /// Create a builder with explicit endpoint and protocol settings.
    pub fn with_settings(
        endpoint: &str,
        input_tool: &str,
        candidate_limit: usize,
        capacity: usize,
    ) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            input_tool: input_tool.to_string(),
            candidate_limit,
            capacity: capacity.max(1),
            cache: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// The canonical cache key for a (query, retained) pair.
    ///
    /// Retained context is prefixed with `|` and joined with `,` so the
    /// provider sees the composed text it should condition on.
    pub fn canonical_key(query: &str, retained: &str) -> String {
        if retained.is_empty() {
            query.to_string()
        } else {
            format!("|{retained},{query}")
        }
    }

    /// Build (or recall) the locator for a query with optional retained
    /// context.
    ///
    /// Fails with `InvalidInput` when the query trims to nothing; callers
    /// check the query segment before getting here.
    pub fn build(&mut self, query: &str, retained: &str) -> Result<String, CloudError> {
        if query.trim().is_empty() {
            return Err(CloudError::InvalidInput);
        }

        let key = Self::canonical_key(query, retained);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit.clone());
        }

        let url = format!(
            "{}?text={}&itc={}&num={}&cp=0&cs=1&ie=utf-8&oe=utf-8&app=jsapi&cb={}",
            self.endpoint,
            urlencoding::encode(&key),
            self.input_tool,
            self.candidate_limit,
            CALLBACK_NAME,
        );
        self.insert(key, url.clone());
        Ok(url)
    }

    /// Whether a (query, retained) pair is currently memoized.
    pub fn cached(&self, query: &str, retained: &str) -> bool {
        self.cache.contains_key(&Self::canonical_key(query, retained))
    }

    /// Number of memoized locators.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    fn insert(&mut self, key: String, url: String) {
        if self.cache.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.cache.remove(&oldest);
                debug!(key = %oldest, "evicted oldest cached locator");
            }
        }
        self.order.push_back(key.clone());
        self.cache.insert(key, url);
    }
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_is_deterministic() {
        let mut a = UrlBuilder::new();
        let mut b = UrlBuilder::new();
        let one = a.build("nei", "你").expect("build");
        let two = b.build("nei", "你").expect("build");
        assert_eq!(one, two);
        // And stable across repeated calls on the same builder
        assert_eq!(a.build("nei", "你").expect("build"), one);
    }

    #[test]
    fn canonical_key_joins_retained_context() {
        assert_eq!(UrlBuilder::canonical_key("nei", ""), "nei");
        assert_eq!(UrlBuilder::canonical_key("hou", "你"), "|你,hou");
    }

    #[test]
    fn locator_carries_the_fixed_protocol_parameters() {
        let mut builder = UrlBuilder::new();
        let url = builder.build("nei", "").expect("build");
        assert!(url.starts_with(DEFAULT_ENDPOINT));
        assert!(url.contains("text=nei"));
        assert!(url.contains("itc=yue-hant-t"));
        assert!(url.contains("num=13"));
        assert!(url.contains("cp=0"));
        assert!(url.contains("cs=1"));
        assert!(url.contains("ie=utf-8"));
        assert!(url.contains("oe=utf-8"));
        assert!(url.contains("app=jsapi"));
        assert!(url.contains(&format!("cb={CALLBACK_NAME}")));
    }

    #[test]
    fn retained_context_is_percent_encoded() {
        let mut builder = UrlBuilder::new();
        let url = builder.build("hou", "你").expect("build");
        // '|' and the han character must not appear raw in the locator
        assert!(url.contains("text=%7C%E4%BD%A0%2Chou"));
    }

    #[test]
    fn empty_query_is_rejected() {
        let mut builder = UrlBuilder::new();
        assert_eq!(builder.build("", ""), Err(CloudError::InvalidInput));
        assert_eq!(builder.build("   ", "你"), Err(CloudError::InvalidInput));
    }

    #[test]
    fn eviction_drops_the_oldest_inserted_key() {
        let mut builder =
            UrlBuilder::with_settings(DEFAULT_ENDPOINT, DEFAULT_INPUT_TOOL, 13, 100);
        for i in 0..101 {
            builder.build(&format!("q{i}"), "").expect("build");
        }
        assert_eq!(builder.cache_len(), 100);
        assert!(!builder.cached("q0", ""));
        for i in 1..101 {
            assert!(builder.cached(&format!("q{i}"), ""), "q{i} should remain");
        }
    }

    #[test]
    fn cache_hits_do_not_reorder() {
        // FIFO, not LRU: touching an old key must not save it from eviction
        let mut builder = UrlBuilder::with_settings(DEFAULT_ENDPOINT, DEFAULT_INPUT_TOOL, 13, 2);
        builder.build("a", "").expect("build");
        builder.build("b", "").expect("build");
        builder.build("a", "").expect("hit");
        builder.build("c", "").expect("build");
        assert!(!builder.cached("a", ""));
        assert!(builder.cached("b", ""));
        assert!(builder.cached("c", ""));
    }
}
