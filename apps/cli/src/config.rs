//! Process configuration from environment variables.

use std::env;
use std::time::Duration;

use anyhow::{bail, Context};

use cambio_core::constants::{BASE_CURRENCY, DEFAULT_FRESHNESS_WINDOW};

/// Default board, matching the original deployment.
const DEFAULT_CURRENCIES: &str = "CNY,JPY,USD,EUR,KRW";

pub struct Config {
    pub api_key: String,
    pub base_currency: String,
    pub currencies: Vec<String>,
    pub cache_dir: String,
    pub freshness_window: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = env::var("CAMBIO_API_KEY")
            .context("CAMBIO_API_KEY must be set to an exchangerate-api.com key")?;

        let base_currency =
            env::var("CAMBIO_BASE_CURRENCY").unwrap_or_else(|_| BASE_CURRENCY.to_string());

        let currencies = parse_currencies(
            &env::var("CAMBIO_CURRENCIES").unwrap_or_else(|_| DEFAULT_CURRENCIES.to_string()),
        );
        if currencies.is_empty() {
            bail!("CAMBIO_CURRENCIES must name at least one currency code");
        }
        if !currencies.iter().any(|c| c == &base_currency) {
            bail!(
                "CAMBIO_CURRENCIES must include the base currency {}",
                base_currency
            );
        }

        let cache_dir = env::var("CAMBIO_CACHE_DIR").unwrap_or_else(|_| ".cambio".to_string());

        let freshness_window = match env::var("CAMBIO_FRESHNESS_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.parse()
                    .context("CAMBIO_FRESHNESS_SECS must be a whole number of seconds")?,
            ),
            Err(_) => DEFAULT_FRESHNESS_WINDOW,
        };

        Ok(Self {
            api_key,
            base_currency,
            currencies,
            cache_dir,
            freshness_window,
        })
    }
}

fn parse_currencies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_currencies_trims_and_uppercases() {
        assert_eq!(
            parse_currencies(" cny, JPY ,usd"),
            vec!["CNY".to_string(), "JPY".to_string(), "USD".to_string()]
        );
    }

    #[test]
    fn test_parse_currencies_drops_empty_entries() {
        assert_eq!(parse_currencies("USD,,EUR,"), vec!["USD", "EUR"]);
        assert!(parse_currencies("").is_empty());
    }
}
