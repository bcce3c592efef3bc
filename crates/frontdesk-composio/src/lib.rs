// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration catalog backed by the Composio apps API.
//!
//! Results are cached per `(query, limit)` in a shared [`DashMap`] for
//! `composio.cache_ttl_secs`. Expired entries are dropped on lookup and swept
//! before each insert, and the map never holds more than
//! [`MAX_CACHE_ENTRIES`] keys. The API key never leaves the server.

pub mod normalize;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use frontdesk_config::model::ComposioConfig;
use frontdesk_core::error::FrontdeskError;
use frontdesk_core::traits::{CatalogAdapter, PluginAdapter};
use frontdesk_core::types::{
    AdapterType, HealthStatus, IntegrationApp, IntegrationQuery, IntegrationResults,
};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::{debug, info, warn};
use url::Url;

use crate::normalize::{app_records, matches_query, normalize_app};

const SERVICE: &str = "Composio";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_SEARCH_LIMIT: usize = 24;
const DEFAULT_POPULAR_LIMIT: usize = 12;
const MAX_LIMIT: usize = 100;

/// Upper bound on cached `(query, limit)` keys.
pub const MAX_CACHE_ENTRIES: usize = 512;

/// Builds a normalized query from raw request parameters.
///
/// An unparseable limit falls back to the default for the query kind; the
/// limit is clamped to `1..=100`.
pub fn build_query(query: Option<&str>, limit: Option<&str>) -> IntegrationQuery {
    let query = query.unwrap_or_default().trim().to_lowercase();
    let default = if query.is_empty() {
        DEFAULT_POPULAR_LIMIT
    } else {
        DEFAULT_SEARCH_LIMIT
    };
    let limit = limit
        .and_then(|l| l.trim().parse::<usize>().ok())
        .unwrap_or(default)
        .clamp(1, MAX_LIMIT);
    IntegrationQuery { query, limit }
}

fn cache_key(query: &IntegrationQuery) -> String {
    let q = if query.query.is_empty() {
        "__popular__"
    } else {
        query.query.as_str()
    };
    format!("{q}::{}", query.limit)
}

fn upstream(message: impl Into<String>) -> FrontdeskError {
    FrontdeskError::Upstream {
        service: SERVICE.into(),
        message: message.into(),
    }
}

struct CacheEntry {
    stored_at: Instant,
    /// Insertion order, for evicting the oldest key.
    seq: u64,
    apps: Vec<IntegrationApp>,
}

pub struct ComposioCatalog {
    client: Option<reqwest::Client>,
    apps_url: Url,
    ttl: Duration,
    cache: DashMap<String, CacheEntry>,
    next_seq: AtomicU64,
}

impl ComposioCatalog {
    pub fn new(config: &ComposioConfig) -> Result<Self, FrontdeskError> {
        let apps_url = Url::parse(&config.apps_url)
            .map_err(|e| FrontdeskError::Config(format!("invalid composio.apps_url: {e}")))?;

        let client = match config.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            Some(key) => Some(build_client(key)?),
            None => {
                warn!("composio.api_key is not set; integration search is disabled");
                None
            }
        };

        info!(configured = client.is_some(), ttl_secs = config.cache_ttl_secs, "integration catalog initialized");

        Ok(Self {
            client,
            apps_url,
            ttl: Duration::from_secs(config.cache_ttl_secs),
            cache: DashMap::new(),
            next_seq: AtomicU64::new(0),
        })
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        entry.stored_at.elapsed() < self.ttl
    }

    fn cached(&self, key: &str) -> Option<Vec<IntegrationApp>> {
        // The read guard must be gone before `remove_if` locks the shard.
        {
            let entry = self.cache.get(key)?;
            if self.is_fresh(&entry) {
                return Some(entry.apps.clone());
            }
        }
        self.cache.remove_if(key, |_, entry| !self.is_fresh(entry));
        None
    }

    fn store(&self, key: String, apps: Vec<IntegrationApp>) {
        self.cache.retain(|_, entry| self.is_fresh(entry));
        while self.cache.len() >= MAX_CACHE_ENTRIES {
            let oldest = self
                .cache
                .iter()
                .min_by_key(|entry| entry.seq)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(oldest) => {
                    self.cache.remove(&oldest);
                }
                None => break,
            }
        }
        self.cache.insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                apps,
            },
        );
    }

    async fn fetch(
        &self,
        client: &reqwest::Client,
        query: &IntegrationQuery,
    ) -> Result<Vec<IntegrationApp>, FrontdeskError> {
        let mut url = self.apps_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            if !query.query.is_empty() {
                pairs.append_pair("search", &query.query);
            }
            pairs.append_pair("limit", &query.limit.to_string());
        }

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| upstream(format!("HTTP request failed: {e}")))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| upstream(format!("failed to read response body: {e}")))?;
        if !status.is_success() {
            return Err(upstream(format!("API error ({status}): {body}")));
        }

        let parsed: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| upstream(format!("failed to parse apps response: {e}")))?;
        let records = app_records(parsed);
        let total = records.len();
        let apps: Vec<IntegrationApp> = records.iter().filter_map(normalize_app).collect();
        debug!(total, usable = apps.len(), "apps fetched");
        Ok(apps)
    }
}

fn build_client(api_key: &str) -> Result<reqwest::Client, FrontdeskError> {
    let mut headers = HeaderMap::new();
    let mut bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(|e| FrontdeskError::Config(format!("invalid Composio key header value: {e}")))?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);
    let mut key = HeaderValue::from_str(api_key)
        .map_err(|e| FrontdeskError::Config(format!("invalid Composio key header value: {e}")))?;
    key.set_sensitive(true);
    headers.insert("x-api-key", key);

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| upstream(format!("failed to build HTTP client: {e}")))
}

#[async_trait]
impl PluginAdapter for ComposioCatalog {
    fn name(&self) -> &str {
        "composio"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Catalog
    }

    async fn health_check(&self) -> Result<HealthStatus, FrontdeskError> {
        Ok(if self.client.is_some() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded("API key not configured".into())
        })
    }

    async fn shutdown(&self) -> Result<(), FrontdeskError> {
        self.cache.clear();
        Ok(())
    }
}

#[async_trait]
impl CatalogAdapter for ComposioCatalog {
    async fn search(&self, query: IntegrationQuery) -> Result<IntegrationResults, FrontdeskError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| FrontdeskError::NotConfigured("Integration search".into()))?;

        let key = cache_key(&query);
        if let Some(apps) = self.cached(&key) {
            debug!(key = %key, "integration search served from cache");
            return Ok(IntegrationResults {
                apps,
                from_cache: true,
            });
        }

        let mut apps = self.fetch(client, &query).await?;
        if !query.query.is_empty() {
            apps.retain(|app| matches_query(app, &query.query));
        }
        apps.truncate(query.limit);

        self.store(key, apps.clone());

        Ok(IntegrationResults {
            apps,
            from_cache: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server: &MockServer, ttl: u64) -> ComposioConfig {
        ComposioConfig {
            api_key: Some("cmp-key".into()),
            apps_url: format!("{}/api/v1/apps", server.uri()),
            cache_ttl_secs: ttl,
        }
    }

    fn apps_body() -> serde_json::Value {
        json!({"apps": [
            {"id": "slack", "name": "Slack", "description": "Team chat", "categories": ["communication"]},
            {"id": "gmail", "name": "Gmail", "description": "Email", "categories": ["communication"]},
            {"name": "No id"},
            {"id": "hubspot", "name": "HubSpot", "description": "CRM"}
        ]})
    }

    #[test]
    fn query_defaults_depend_on_search_text() {
        assert_eq!(build_query(None, None).limit, 12);
        assert_eq!(build_query(Some("  Slack "), None), IntegrationQuery {
            query: "slack".into(),
            limit: 24
        });
        assert_eq!(build_query(Some("x"), Some("abc")).limit, 24);
        assert_eq!(build_query(None, Some("5")).limit, 5);
        assert_eq!(build_query(None, Some("100000")).limit, 100);
    }

    #[test]
    fn cache_key_marks_popular() {
        assert_eq!(cache_key(&build_query(None, None)), "__popular__::12");
        assert_eq!(cache_key(&build_query(Some("CRM"), Some("3"))), "crm::3");
    }

    #[tokio::test]
    async fn second_identical_search_hits_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/apps"))
            .and(header("x-api-key", "cmp-key"))
            .and(query_param("search", "communication"))
            .respond_with(ResponseTemplate::new(200).set_body_json(apps_body()))
            .expect(1)
            .mount(&server)
            .await;

        let catalog = ComposioCatalog::new(&config(&server, 300)).unwrap();
        let query = build_query(Some("Communication"), None);

        let first = catalog.search(query.clone()).await.unwrap();
        assert!(!first.from_cache);
        let ids: Vec<_> = first.apps.iter().map(|a| a.app_id.as_str()).collect();
        assert_eq!(ids, vec!["slack", "gmail"]);

        let second = catalog.search(query).await.unwrap();
        assert!(second.from_cache);
        assert_eq!(second.apps, first.apps);
    }

    #[tokio::test]
    async fn expired_entries_are_refetched() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/apps"))
            .respond_with(ResponseTemplate::new(200).set_body_json(apps_body()))
            .expect(2)
            .mount(&server)
            .await;

        let catalog = ComposioCatalog::new(&config(&server, 0)).unwrap();
        let query = build_query(None, Some("2"));
        let first = catalog.search(query.clone()).await.unwrap();
        assert_eq!(first.apps.len(), 2);
        let second = catalog.search(query).await.unwrap();
        assert!(!second.from_cache);
    }

    #[tokio::test]
    async fn expired_entries_do_not_accumulate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/apps"))
            .respond_with(ResponseTemplate::new(200).set_body_json(apps_body()))
            .mount(&server)
            .await;

        let catalog = ComposioCatalog::new(&config(&server, 0)).unwrap();
        for i in 0..50 {
            let query = build_query(Some(&format!("q{i}")), None);
            catalog.search(query).await.unwrap();
        }
        assert!(catalog.cache.len() <= 1, "cache holds {}", catalog.cache.len());

        // A stale hit is removed rather than left behind.
        catalog.store("stale::1".into(), Vec::new());
        assert!(catalog.cached("stale::1").is_none());
        assert!(!catalog.cache.contains_key("stale::1"));
    }

    #[test]
    fn cache_is_capped_and_evicts_oldest() {
        let catalog = ComposioCatalog::new(&ComposioConfig {
            api_key: None,
            apps_url: "http://localhost/api/v1/apps".into(),
            cache_ttl_secs: 300,
        })
        .unwrap();

        for i in 0..MAX_CACHE_ENTRIES + 10 {
            catalog.store(format!("q{i}::24"), Vec::new());
        }
        assert_eq!(catalog.cache.len(), MAX_CACHE_ENTRIES);
        assert!(!catalog.cache.contains_key("q0::24"));
        assert!(catalog.cached(&format!("q{}::24", MAX_CACHE_ENTRIES + 9)).is_some());
    }

    #[tokio::test]
    async fn upstream_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let catalog = ComposioCatalog::new(&config(&server, 300)).unwrap();
        let err = catalog.search(build_query(None, None)).await.unwrap_err();
        assert!(err.to_string().contains("503"));
        assert!(catalog.cache.is_empty());
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let catalog = ComposioCatalog::new(&ComposioConfig::default()).unwrap();
        let err = catalog.search(build_query(None, None)).await.unwrap_err();
        assert!(matches!(err, FrontdeskError::NotConfigured(_)));
    }
}
