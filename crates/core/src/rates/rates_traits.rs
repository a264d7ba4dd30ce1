use async_trait::async_trait;

use super::rates_errors::RatesError;
use super::rates_model::RateTable;

/// Trait defining the contract for remote rate providers.
///
/// A provider is an opaque fetch: given a base currency it either yields a
/// well-formed [`RateTable`] or a [`RatesError`] describing why it could not.
/// The caching layer decides what to do with either outcome.
#[async_trait]
pub trait RateProviderTrait: Send + Sync {
    /// Fetches the latest rate table quoted against `base_currency`.
    async fn fetch_latest(&self, base_currency: &str) -> Result<RateTable, RatesError>;
}
