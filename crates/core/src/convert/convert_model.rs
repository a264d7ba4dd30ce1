use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One currency's input/display field and its current numeric value.
///
/// `None` is the blank state: a slot with no valid amount renders empty
/// rather than showing a misleading zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub currency_code: String,
    pub value: Option<Decimal>,
}

impl Slot {
    pub fn empty(currency_code: impl Into<String>) -> Self {
        Self {
            currency_code: currency_code.into(),
            value: None,
        }
    }
}
