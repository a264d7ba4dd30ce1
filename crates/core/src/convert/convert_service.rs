use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use super::convert_errors::ConvertError;
use super::convert_model::Slot;
use crate::constants::SLOT_DECIMAL_PRECISION;
use crate::errors::Result;
use crate::rates::RateSnapshot;

/// Parses a user-typed amount, accepting plain and scientific notation.
fn parse_amount(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Rounds to 4 decimal places (half away from zero) and strips trailing
/// zeros, so 3.5000 renders as 3.5 and 3.0000 as 3.
pub fn round4(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(SLOT_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Keeps a fixed, ordered set of currency slots mutually consistent.
///
/// An edit in one slot is converted to the base currency once (the pivot
/// amount) and every other slot is derived from that pivot, so any two
/// non-empty slots always imply the same base amount. The rate table is
/// immutable for the engine's lifetime; propagation never re-enters
/// [`on_edit`](Self::on_edit).
#[derive(Debug)]
pub struct ConversionEngine {
    snapshot: RateSnapshot,
    slots: Vec<Slot>,
}

impl ConversionEngine {
    /// Creates an engine with one empty slot per code, in the given order.
    ///
    /// Fails when a code has no positive rate in the snapshot. Checking here
    /// means per-edit rate lookups cannot miss later.
    pub fn new(snapshot: RateSnapshot, codes: &[String]) -> Result<Self> {
        for code in codes {
            match snapshot.rate_for(code) {
                None => return Err(ConvertError::UnknownCurrency(code.clone()).into()),
                Some(rate) if rate <= Decimal::ZERO => {
                    return Err(ConvertError::MissingRate(code.clone()).into())
                }
                Some(_) => {}
            }
        }

        let slots = codes.iter().map(|c| Slot::empty(c.clone())).collect();
        Ok(Self { snapshot, slots })
    }

    pub fn snapshot(&self) -> &RateSnapshot {
        &self.snapshot
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, code: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.currency_code == code)
    }

    /// Applies a user edit of `raw` in the slot for `code`.
    ///
    /// An unparsable or zero amount yields no valid pivot, so every other
    /// slot is cleared instead of propagated - blank fields beat misleading
    /// zeros. The edited slot keeps the parsed value exactly as typed,
    /// un-rounded.
    pub fn on_edit(&mut self, code: &str, raw: &str) -> Result<()> {
        if self.slot(code).is_none() {
            return Err(ConvertError::UnknownCurrency(code.to_string()).into());
        }
        let rate = self.edited_rate(code)?;

        let parsed = parse_amount(raw);
        let value = match parsed {
            Some(v) if !v.is_zero() => v,
            no_pivot => {
                for slot in &mut self.slots {
                    slot.value = if slot.currency_code == code {
                        no_pivot
                    } else {
                        None
                    };
                }
                return Ok(());
            }
        };

        let pivot = value / rate;
        for slot in &mut self.slots {
            if slot.currency_code == code {
                slot.value = Some(value);
                continue;
            }
            let slot_rate = match self.snapshot.rates.get(&slot.currency_code) {
                Some(r) => *r,
                None => {
                    return Err(ConvertError::UnknownCurrency(slot.currency_code.clone()).into())
                }
            };
            slot.value = Some(round4(pivot * slot_rate));
        }

        Ok(())
    }

    /// Resets the slot for `code` to exactly one unit and repropagates, as if
    /// the user had typed "1".
    pub fn on_reset(&mut self, code: &str) -> Result<()> {
        self.on_edit(code, "1")
    }

    fn edited_rate(&self, code: &str) -> Result<Decimal> {
        let rate = self
            .snapshot
            .rate_for(code)
            .ok_or_else(|| ConvertError::UnknownCurrency(code.to_string()))?;
        if rate <= Decimal::ZERO {
            return Err(ConvertError::MissingRate(code.to_string()).into());
        }
        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn snapshot(rates: &[(&str, Decimal)]) -> RateSnapshot {
        RateSnapshot {
            fetched_at: Utc::now(),
            last_update: Utc::now(),
            base_currency: "USD".to_string(),
            rates: rates.iter().map(|(c, r)| (c.to_string(), *r)).collect::<HashMap<_, _>>(),
        }
    }

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    fn engine() -> ConversionEngine {
        ConversionEngine::new(
            snapshot(&[("USD", dec!(1)), ("CNY", dec!(7.1)), ("EUR", dec!(0.92))]),
            &codes(&["USD", "CNY", "EUR"]),
        )
        .unwrap()
    }

    fn value_of(engine: &ConversionEngine, code: &str) -> Option<Decimal> {
        engine.slot(code).unwrap().value
    }

    #[test]
    fn test_round4_strips_trailing_zeros() {
        assert_eq!(round4(dec!(3.5000)).to_string(), "3.5");
        assert_eq!(round4(dec!(3.0000)).to_string(), "3");
        assert_eq!(round4(dec!(71.00001)).to_string(), "71");
    }

    #[test]
    fn test_round4_rounds_half_away_from_zero() {
        // Half-to-even would give 1.2344 here.
        assert_eq!(round4(dec!(1.23445)), dec!(1.2345));
        assert_eq!(round4(dec!(-1.23445)), dec!(-1.2345));
        assert_eq!(round4(dec!(0.00005)), dec!(0.0001));
    }

    #[test]
    fn test_edit_propagates_through_base_pivot() {
        let mut engine = engine();
        engine.on_edit("USD", "10").unwrap();

        assert_eq!(value_of(&engine, "CNY"), Some(dec!(71)));
        assert_eq!(value_of(&engine, "EUR"), Some(dec!(9.2)));
        // Display forms have trailing zeros stripped.
        assert_eq!(value_of(&engine, "CNY").unwrap().to_string(), "71");
        assert_eq!(value_of(&engine, "EUR").unwrap().to_string(), "9.2");
    }

    #[test]
    fn test_edit_from_non_base_slot() {
        let mut engine = engine();
        engine.on_edit("EUR", "46").unwrap();

        // 46 EUR -> 50 USD -> 355 CNY
        assert_eq!(value_of(&engine, "USD"), Some(dec!(50)));
        assert_eq!(value_of(&engine, "CNY"), Some(dec!(355)));
    }

    #[test]
    fn test_edited_slot_keeps_value_as_typed() {
        let mut engine = engine();
        engine.on_edit("USD", "10.123456789").unwrap();

        // Not re-rounded to 4 places.
        assert_eq!(
            value_of(&engine, "USD").unwrap().to_string(),
            "10.123456789"
        );
    }

    #[test]
    fn test_scientific_notation_is_accepted() {
        let mut engine = engine();
        engine.on_edit("USD", "1e1").unwrap();

        assert_eq!(value_of(&engine, "CNY"), Some(dec!(71)));
    }

    #[test]
    fn test_zero_input_clears_other_slots() {
        let mut engine = engine();
        engine.on_edit("USD", "10").unwrap();
        engine.on_edit("CNY", "0").unwrap();

        assert_eq!(value_of(&engine, "CNY"), Some(dec!(0)));
        assert_eq!(value_of(&engine, "USD"), None);
        assert_eq!(value_of(&engine, "EUR"), None);
    }

    #[test]
    fn test_invalid_input_clears_other_slots() {
        let mut engine = engine();
        engine.on_edit("USD", "10").unwrap();
        engine.on_edit("CNY", "abc").unwrap();

        assert_eq!(value_of(&engine, "CNY"), None);
        assert_eq!(value_of(&engine, "USD"), None);
        assert_eq!(value_of(&engine, "EUR"), None);
    }

    #[test]
    fn test_reset_propagates_one_unit() {
        let mut engine = engine();
        engine.on_edit("USD", "10").unwrap();
        engine.on_reset("CNY").unwrap();

        assert_eq!(value_of(&engine, "CNY"), Some(dec!(1)));
        assert_eq!(value_of(&engine, "USD"), Some(dec!(0.1408)));
        assert_eq!(value_of(&engine, "EUR"), Some(dec!(0.1296)));
    }

    #[test]
    fn test_pairwise_pivot_consistency() {
        let mut engine = engine();
        engine.on_edit("CNY", "123.45").unwrap();

        // Every non-empty slot must match the direct pivot formula exactly.
        let source = dec!(123.45);
        let pivot = source / dec!(7.1);
        assert_eq!(value_of(&engine, "USD"), Some(round4(pivot * dec!(1))));
        assert_eq!(value_of(&engine, "EUR"), Some(round4(pivot * dec!(0.92))));
    }

    #[test]
    fn test_unknown_code_rejected_at_construction() {
        let err = ConversionEngine::new(
            snapshot(&[("USD", dec!(1))]),
            &codes(&["USD", "KRW"]),
        )
        .unwrap_err();

        assert!(matches!(err, Error::Convert(ConvertError::UnknownCurrency(_))));
    }

    #[test]
    fn test_zero_rate_rejected_at_construction() {
        let err = ConversionEngine::new(
            snapshot(&[("USD", dec!(1)), ("CNY", dec!(0))]),
            &codes(&["USD", "CNY"]),
        )
        .unwrap_err();

        assert!(matches!(err, Error::Convert(ConvertError::MissingRate(_))));
    }

    #[test]
    fn test_edit_for_unconfigured_code_is_rejected() {
        let mut engine = engine();
        // JPY is in no slot, even though a rate could exist for it.
        assert!(engine.on_edit("JPY", "5").is_err());
    }

    #[test]
    fn test_slots_keep_configured_order() {
        let engine = engine();
        let order: Vec<&str> = engine
            .slots()
            .iter()
            .map(|s| s.currency_code.as_str())
            .collect();
        assert_eq!(order, vec!["USD", "CNY", "EUR"]);
    }
}
