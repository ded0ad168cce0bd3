use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

use crate::{
    error::AppResult,
    models::{Catalog, ColumnMapping, ColumnOverrides, RankOutcome},
    services::{columns, ranking, sources::CatalogSource},
};

/// How often a cached catalog asks its source whether it changed
const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// A catalog snapshot together with its validated column mapping
#[derive(Debug)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub mapping: ColumnMapping,
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub fingerprint: Option<String>,
}

impl LoadedCatalog {
    pub fn rank(&self, reference_name: &str, count: usize) -> RankOutcome {
        ranking::rank(reference_name, &self.catalog, &self.mapping, count)
    }

    pub fn names(&self) -> Vec<String> {
        self.catalog.names(&self.mapping)
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            source: self.source.clone(),
            rows: self.catalog.len(),
            columns: self.mapping.clone(),
            loaded_at: self.loaded_at,
        }
    }
}

/// Catalog metadata exposed over the API
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    pub source: String,
    pub rows: usize,
    pub columns: ColumnMapping,
    pub loaded_at: DateTime<Utc>,
}

struct CacheEntry {
    catalog: Arc<LoadedCatalog>,
    loaded: Instant,
    checked: Instant,
}

/// Process-wide holder of the current catalog snapshot
///
/// The snapshot is loaded on first use and replaced when its TTL elapses, when
/// the source fingerprint changes or on an explicit [`CatalogCache::reload`].
/// Readers get an `Arc` and never block a reload for longer than the swap.
/// Loads are serialized, so concurrent misses share a single source read.
pub struct CatalogCache {
    source: Arc<dyn CatalogSource>,
    overrides: ColumnOverrides,
    ttl: Option<Duration>,
    check_interval: Duration,
    entry: RwLock<Option<CacheEntry>>,
    loading: Mutex<()>,
}

impl CatalogCache {
    pub fn new(source: Arc<dyn CatalogSource>, overrides: ColumnOverrides) -> Self {
        Self {
            source,
            overrides,
            ttl: None,
            check_interval: DEFAULT_CHECK_INTERVAL,
            entry: RwLock::new(None),
            loading: Mutex::new(()),
        }
    }

    /// Expire snapshots after `ttl`. `None` keeps them until the source changes.
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_check_interval(mut self, interval: Duration) -> Self {
        self.check_interval = interval;
        self
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Returns the current snapshot, loading or refreshing it when needed
    pub async fn get(&self) -> AppResult<Arc<LoadedCatalog>> {
        let (cached, expired, due_for_check) = {
            let entry = self.entry.read().await;
            match entry.as_ref() {
                Some(e) => (
                    Some(e.catalog.clone()),
                    self.ttl.is_some_and(|ttl| e.loaded.elapsed() >= ttl),
                    e.checked.elapsed() >= self.check_interval,
                ),
                None => (None, false, false),
            }
        };

        let Some(cached) = cached else {
            return self.load_if_absent().await;
        };

        if expired {
            tracing::info!(source = %cached.source, "Catalog TTL elapsed, reloading");
            return self.reload_or_keep(cached).await;
        }

        if due_for_check {
            match self.source.fingerprint().await {
                Ok(current) if current.is_some() && current != cached.fingerprint => {
                    tracing::info!(
                        source = %cached.source,
                        previous = ?cached.fingerprint,
                        current = ?current,
                        "Catalog source changed, reloading"
                    );
                    return self.reload_or_keep(cached).await;
                }
                Ok(_) => self.mark_checked().await,
                Err(e) => {
                    tracing::warn!(error = %e, "Could not check catalog source, serving cached copy");
                    self.mark_checked().await;
                }
            }
        }

        tracing::debug!(source = %cached.source, "Catalog cache hit");
        Ok(cached)
    }

    /// Loads the source unconditionally and swaps in the new snapshot
    ///
    /// On failure the previous snapshot, if any, stays in place.
    pub async fn reload(&self) -> AppResult<Arc<LoadedCatalog>> {
        let _loading = self.loading.lock().await;
        self.load_and_swap().await
    }

    /// Drops the current snapshot so the next [`CatalogCache::get`] loads afresh
    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
        tracing::info!(source = %self.source.describe(), "Catalog cache invalidated");
    }

    async fn load_if_absent(&self) -> AppResult<Arc<LoadedCatalog>> {
        let _loading = self.loading.lock().await;
        if let Some(entry) = self.entry.read().await.as_ref() {
            tracing::debug!(source = %entry.catalog.source, "Catalog loaded while waiting");
            return Ok(entry.catalog.clone());
        }
        tracing::info!(source = %self.source.describe(), "Catalog not cached, loading");
        self.load_and_swap().await
    }

    /// Caller must hold `loading`
    async fn load_and_swap(&self) -> AppResult<Arc<LoadedCatalog>> {
        let catalog = self.source.load().await?;
        let mapping = columns::resolve_for_catalog(&catalog, &self.overrides)?;
        let fingerprint = self.source.fingerprint().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not fingerprint catalog source");
            None
        });

        let loaded = Arc::new(LoadedCatalog {
            catalog,
            mapping,
            source: self.source.describe(),
            loaded_at: Utc::now(),
            fingerprint,
        });

        let now = Instant::now();
        *self.entry.write().await = Some(CacheEntry {
            catalog: loaded.clone(),
            loaded: now,
            checked: now,
        });

        tracing::info!(
            source = %loaded.source,
            rows = loaded.catalog.len(),
            "Catalog snapshot replaced"
        );

        Ok(loaded)
    }

    /// Refreshes `stale`, falling back to it when the load fails
    ///
    /// A refresh that finished while this one waited for `loading` is reused.
    async fn reload_or_keep(&self, stale: Arc<LoadedCatalog>) -> AppResult<Arc<LoadedCatalog>> {
        let waiting_since = Instant::now();
        let _loading = self.loading.lock().await;
        if let Some(entry) = self.entry.read().await.as_ref() {
            if entry.checked >= waiting_since {
                return Ok(entry.catalog.clone());
            }
        }

        match self.load_and_swap().await {
            Ok(fresh) => Ok(fresh),
            Err(e) => {
                tracing::warn!(error = %e, source = %stale.source, "Catalog reload failed, serving stale copy");
                self.mark_checked().await;
                Ok(stale)
            }
        }
    }

    async fn mark_checked(&self) {
        if let Some(entry) = self.entry.write().await.as_mut() {
            entry.checked = Instant::now();
        }
    }
}
