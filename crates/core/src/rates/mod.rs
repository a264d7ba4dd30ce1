//! Rate acquisition and caching - domain models, services, and traits.

pub mod providers;
mod rates_errors;
mod rates_model;
mod rates_service;
mod rates_traits;

pub use rates_errors::RatesError;
pub use rates_model::{CachedEntry, RateSnapshot, RateTable};
pub use rates_service::RateCacheService;
pub use rates_traits::RateProviderTrait;
