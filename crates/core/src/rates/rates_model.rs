use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use super::rates_errors::RatesError;

/// Raw success payload from the rate provider.
///
/// Persisted verbatim inside a [`CachedEntry`], so a later session can
/// rebuild the same snapshot without touching the network. All rates are
/// quoted against a single base currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTable {
    pub result: String,
    pub time_last_update_unix: i64,
    pub conversion_rates: HashMap<String, Decimal>,
}

impl RateTable {
    /// Checks that the table covers every configured code with a usable rate.
    ///
    /// The base currency's own rate, when present, must be exactly 1 - a
    /// table quoted against anything else would silently skew every pivot.
    pub fn validate(&self, base_currency: &str, codes: &[String]) -> Result<(), RatesError> {
        for code in codes {
            match self.conversion_rates.get(code) {
                None => {
                    return Err(RatesError::InvalidRate(format!("missing rate for {}", code)))
                }
                Some(rate) if *rate <= Decimal::ZERO => {
                    return Err(RatesError::InvalidRate(format!(
                        "non-positive rate {} for {}",
                        rate, code
                    )))
                }
                Some(_) => {}
            }
        }

        if let Some(base_rate) = self.conversion_rates.get(base_currency) {
            if *base_rate != Decimal::ONE {
                return Err(RatesError::InvalidRate(format!(
                    "base currency {} quoted at {}, expected 1",
                    base_currency, base_rate
                )));
            }
        }

        Ok(())
    }
}

/// A persisted rate table together with the local fetch time.
///
/// Exactly one entry is ever retained; new fetches overwrite it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedEntry {
    /// Unix milliseconds at the time of the successful fetch.
    pub timestamp: i64,
    pub data: RateTable,
}

impl CachedEntry {
    pub fn new(fetched_at: DateTime<Utc>, data: RateTable) -> Self {
        Self {
            timestamp: fetched_at.timestamp_millis(),
            data,
        }
    }

    /// Age of this entry in milliseconds as of `now`.
    pub fn age_millis(&self, now: DateTime<Utc>) -> i64 {
        now.timestamp_millis() - self.timestamp
    }

    /// Whether this entry is younger than `window` as of `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.age_millis(now) < window.as_millis() as i64
    }

    /// Builds the in-memory snapshot view handed to the conversion engine.
    pub fn to_snapshot(&self, base_currency: &str) -> RateSnapshot {
        RateSnapshot {
            fetched_at: DateTime::from_timestamp_millis(self.timestamp).unwrap_or_default(),
            last_update: DateTime::from_timestamp(self.data.time_last_update_unix, 0)
                .unwrap_or_default(),
            base_currency: base_currency.to_string(),
            rates: self.data.conversion_rates.clone(),
        }
    }
}

/// In-memory view of a usable rate table.
///
/// Immutable for the lifetime of a session once handed to the engine.
#[derive(Debug, Clone)]
pub struct RateSnapshot {
    /// When this table was fetched locally.
    pub fetched_at: DateTime<Utc>,
    /// The provider's own update clock for the table.
    pub last_update: DateTime<Utc>,
    pub base_currency: String,
    pub rates: HashMap<String, Decimal>,
}

impl RateSnapshot {
    pub fn rate_for(&self, code: &str) -> Option<Decimal> {
        self.rates.get(code).copied()
    }

    /// Human-readable status line derived from the provider's update clock.
    pub fn last_update_display(&self) -> String {
        format!(
            "Rates last updated {}",
            self.last_update.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_table(rates: &[(&str, Decimal)]) -> RateTable {
        RateTable {
            result: "success".to_string(),
            time_last_update_unix: 1_700_000_000,
            conversion_rates: rates
                .iter()
                .map(|(c, r)| (c.to_string(), *r))
                .collect(),
        }
    }

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_validate_accepts_full_positive_table() {
        let table = make_table(&[("USD", dec!(1)), ("CNY", dec!(7.1)), ("EUR", dec!(0.92))]);
        assert!(table.validate("USD", &codes(&["USD", "CNY", "EUR"])).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_code() {
        let table = make_table(&[("USD", dec!(1))]);
        let err = table.validate("USD", &codes(&["USD", "JPY"])).unwrap_err();
        assert!(matches!(err, RatesError::InvalidRate(_)));
    }

    #[test]
    fn test_validate_rejects_non_positive_rate() {
        let table = make_table(&[("USD", dec!(1)), ("CNY", dec!(0))]);
        assert!(table.validate("USD", &codes(&["CNY"])).is_err());

        let table = make_table(&[("USD", dec!(1)), ("CNY", dec!(-7.1))]);
        assert!(table.validate("USD", &codes(&["CNY"])).is_err());
    }

    #[test]
    fn test_validate_rejects_skewed_base_rate() {
        let table = make_table(&[("USD", dec!(1.02)), ("CNY", dec!(7.1))]);
        assert!(table.validate("USD", &codes(&["CNY"])).is_err());
    }

    #[test]
    fn test_cached_entry_freshness_window() {
        let now = Utc::now();
        let entry = CachedEntry::new(now - chrono::Duration::minutes(30), make_table(&[]));
        let window = Duration::from_secs(60 * 60);

        assert!(entry.is_fresh(now, window));
        assert!(!entry.is_fresh(now + chrono::Duration::minutes(31), window));
    }

    #[test]
    fn test_cached_entry_round_trips_through_json() {
        let entry = CachedEntry::new(Utc::now(), make_table(&[("USD", dec!(1)), ("JPY", dec!(155.3))]));
        let bytes = serde_json::to_vec(&entry).unwrap();
        let decoded: CachedEntry = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(decoded.timestamp, entry.timestamp);
        assert_eq!(
            decoded.data.conversion_rates["JPY"],
            entry.data.conversion_rates["JPY"]
        );
    }

    #[test]
    fn test_snapshot_carries_provider_clock() {
        let entry = CachedEntry::new(Utc::now(), make_table(&[("USD", dec!(1))]));
        let snapshot = entry.to_snapshot("USD");

        assert_eq!(snapshot.last_update.timestamp(), 1_700_000_000);
        assert_eq!(snapshot.rate_for("USD"), Some(dec!(1)));
        assert!(snapshot.last_update_display().contains("2023"));
    }
}
