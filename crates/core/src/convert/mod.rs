//! Conversion engine - synchronized multi-currency slots.

mod convert_errors;
mod convert_model;
mod convert_service;

pub use convert_errors::ConvertError;
pub use convert_model::Slot;
pub use convert_service::{round4, ConversionEngine};
