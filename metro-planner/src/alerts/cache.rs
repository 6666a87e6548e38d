//! Caching layer for alert fetches.
//!
//! Alerts change slowly compared to how often screens ask for them, so
//! responses are kept for a short TTL.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use super::client::{AlertClient, AlertSource};
use super::error::AlertError;
use super::types::Alert;

/// Configuration for the alert cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertCacheConfig {
    /// TTL for cached responses.
    pub ttl: Duration,

    /// Maximum number of cached responses.
    pub max_capacity: u64,
}

impl AlertCacheConfig {
    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for AlertCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 16,
        }
    }
}

/// Alert client with caching.
///
/// Wraps an `AlertClient`; responses are keyed by endpoint URL.
pub struct CachedAlertClient {
    client: AlertClient,
    cache: MokaCache<String, Arc<Vec<Alert>>>,
}

impl CachedAlertClient {
    /// Create a new cached client.
    pub fn new(client: AlertClient, config: &AlertCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { client, cache }
    }

    /// Get alerts, using the cache if available.
    ///
    /// Failures are not cached.
    pub async fn get_alerts(&self) -> Result<Arc<Vec<Alert>>, AlertError> {
        let key = self.client.endpoint();

        if let Some(cached) = self.cache.get(&key).await {
            return Ok(cached);
        }

        let alerts = Arc::new(self.client.fetch_all().await?);
        self.cache.insert(key, alerts.clone()).await;

        Ok(alerts)
    }

    /// Access the underlying client for operations that bypass cache.
    pub fn client(&self) -> &AlertClient {
        &self.client
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}

impl AlertSource for CachedAlertClient {
    fn fetch_alerts(&self) -> impl Future<Output = Result<Vec<Alert>, AlertError>> + Send {
        async move {
            let alerts = self.get_alerts().await?;
            Ok(alerts.as_ref().clone())
        }
    }
}
