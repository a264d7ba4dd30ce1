use thiserror::Error;

/// Errors from rate acquisition and caching.
#[derive(Error, Debug)]
pub enum RatesError {
    /// The provider could not be reached, or the transport reported a
    /// non-success status.
    #[error("Rate fetch failed: {0}")]
    FetchFailed(String),

    /// The provider answered but reported an explicit failure status.
    #[error("Rate provider reported failure: {0}")]
    ProviderFailure(String),

    /// The response decoded, but required fields were missing or unusable.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// A fetched table carried a missing or non-positive rate for a
    /// configured currency. Treated the same as a failed fetch.
    #[error("Invalid rate in fetched table: {0}")]
    InvalidRate(String),

    /// The fetch failed and no cached snapshot exists to fall back to.
    #[error("No exchange rates available: fetch failed and no cached snapshot exists")]
    NoCacheAvailable,

    /// Encoding or decoding the cached snapshot failed.
    #[error("Rate cache error: {0}")]
    CacheError(String),
}
