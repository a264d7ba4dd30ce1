use thiserror::Error;

/// Errors from the conversion engine.
///
/// Both variants indicate a startup configuration bug: the slot set and the
/// rate table must be consistent at load time, which
/// [`ConversionEngine::new`](super::ConversionEngine::new) enforces.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// A currency code is not part of the configured slot set, or the rate
    /// table has no entry for it.
    #[error("Currency '{0}' is not covered by the configured rate table")]
    UnknownCurrency(String),

    /// The rate table carries a zero or negative rate for the currency.
    #[error("Unusable rate for currency '{0}'")]
    MissingRate(String),
}
