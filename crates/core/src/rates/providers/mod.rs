//! Remote rate provider implementations.

mod exchange_rate_api_provider;

pub use exchange_rate_api_provider::ExchangeRateApiProvider;
