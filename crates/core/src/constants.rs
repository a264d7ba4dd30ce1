use std::time::Duration;

/// Base currency all provider rates are quoted against.
pub const BASE_CURRENCY: &str = "USD";

/// Store key under which the latest rate snapshot is persisted.
pub const RATES_CACHE_KEY: &str = "rates.latest";

/// Decimal precision for propagated slot values.
pub const SLOT_DECIMAL_PRECISION: u32 = 4;

/// Default maximum age of a cached snapshot before a refetch is attempted.
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(60 * 60);
