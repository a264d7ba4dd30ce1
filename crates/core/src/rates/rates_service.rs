use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, warn};

use super::rates_errors::RatesError;
use super::rates_model::{CachedEntry, RateSnapshot, RateTable};
use super::rates_traits::RateProviderTrait;
use crate::constants::RATES_CACHE_KEY;
use crate::errors::Result;
use crate::store::SnapshotStore;

/// Produces a usable [`RateSnapshot`] while minimizing provider calls.
///
/// A persisted snapshot younger than the freshness window is served without
/// touching the network. An expired (or absent) one triggers exactly one
/// fetch; when that fetch fails and a stale snapshot exists, the stale copy
/// is returned so the session stays usable.
pub struct RateCacheService {
    store: Arc<dyn SnapshotStore>,
    provider: Arc<dyn RateProviderTrait>,
    base_currency: String,
    currencies: Vec<String>,
}

impl RateCacheService {
    pub fn new(
        store: Arc<dyn SnapshotStore>,
        provider: Arc<dyn RateProviderTrait>,
        base_currency: impl Into<String>,
        currencies: Vec<String>,
    ) -> Self {
        Self {
            store,
            provider,
            base_currency: base_currency.into(),
            currencies,
        }
    }

    /// Acquires a rate snapshot, preferring the cached copy.
    ///
    /// Only [`RatesError::NoCacheAvailable`] escapes as a hard failure; every
    /// other fetch problem degrades to the last persisted snapshot.
    pub async fn acquire(&self, freshness_window: Duration) -> Result<RateSnapshot> {
        let cached = self.read_cached();
        let now = Utc::now();

        if let Some(entry) = &cached {
            if entry.is_fresh(now, freshness_window) {
                debug!("using cached rates, {}ms old", entry.age_millis(now));
                return Ok(entry.to_snapshot(&self.base_currency));
            }
        }

        match self.fetch_validated().await {
            Ok(table) => {
                let entry = CachedEntry::new(now, table);
                if let Err(e) = self.persist(&entry) {
                    warn!("failed to persist rate snapshot: {}", e);
                }
                Ok(entry.to_snapshot(&self.base_currency))
            }
            Err(fetch_err) => match cached {
                Some(entry) => {
                    let snapshot = entry.to_snapshot(&self.base_currency);
                    warn!(
                        "rate fetch failed ({}), falling back to snapshot fetched at {}",
                        fetch_err, snapshot.fetched_at
                    );
                    Ok(snapshot)
                }
                None => Err(RatesError::NoCacheAvailable.into()),
            },
        }
    }

    async fn fetch_validated(&self) -> std::result::Result<RateTable, RatesError> {
        let table = self.provider.fetch_latest(&self.base_currency).await?;
        table.validate(&self.base_currency, &self.currencies)?;
        Ok(table)
    }

    /// Reads the persisted entry. Unreadable or corrupt entries are logged
    /// and treated as absent, so the next step is a normal fetch that
    /// overwrites them.
    fn read_cached(&self) -> Option<CachedEntry> {
        let bytes = match self.store.get(RATES_CACHE_KEY) {
            Ok(bytes) => bytes?,
            Err(e) => {
                warn!("failed to read cached rate entry: {}", e);
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("ignoring corrupt cached rate entry: {}", e);
                None
            }
        }
    }

    fn persist(&self, entry: &CachedEntry) -> Result<()> {
        let bytes =
            serde_json::to_vec(entry).map_err(|e| RatesError::CacheError(e.to_string()))?;
        self.store.set(RATES_CACHE_KEY, &bytes)
    }
}
