mod config;
mod repl;

use std::sync::Arc;

use config::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cambio_core::convert::ConversionEngine;
use cambio_core::rates::providers::ExchangeRateApiProvider;
use cambio_core::rates::RateCacheService;
use cambio_storage_file::FileSnapshotStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();

    let store = Arc::new(FileSnapshotStore::open(config.cache_dir.clone())?);
    let provider = Arc::new(ExchangeRateApiProvider::new(config.api_key.clone()));
    let rate_cache = RateCacheService::new(
        store,
        provider,
        config.base_currency.clone(),
        config.currencies.clone(),
    );

    let snapshot = match rate_cache.acquire(config.freshness_window).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            // No snapshot, fresh or stale: the board is unusable.
            eprintln!("Could not load exchange rates: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "loaded {} rates against {}",
        snapshot.rates.len(),
        snapshot.base_currency
    );
    println!("{}", snapshot.last_update_display());

    let mut engine = ConversionEngine::new(snapshot, &config.currencies)?;
    // Seed the board with one unit of the base currency.
    engine.on_reset(&config.base_currency)?;

    repl::run(&mut engine)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
