//! Currency units
//!
//! A currency system is built around one base currency. Every other
//! currency is a scaled base unit: `rate` is the base-currency value of one
//! unit of that currency. Rates are fixed when the system is built; callers
//! with changing rates build a new system.

use mensura_core::Ratio;

use crate::{Dimension, QuantityKind, SystemOfUnits, Unit, UnitError};

/// The base unit for currency code `code`
pub fn currency(code: &str) -> Unit {
    Unit::base(code, Dimension::currency())
}

/// Build a currency system from a base code and `(code, rate)` pairs.
///
/// Minor units (cents, pence) are registered the same way with a fractional
/// rate, e.g. `("USD.cent", 1/100)` with USD as base.
pub fn system(base: &str, rates: &[(&str, Ratio)]) -> Result<SystemOfUnits, UnitError> {
    let base_unit = currency(base);
    let mut builder = SystemOfUnits::builder(&format!("currency:{}", base))
        .with_unit_for(QuantityKind::CURRENCY, base_unit.clone());

    for (code, rate) in rates {
        let unit = base_unit.scale(rate.clone())?.named(code);
        builder = builder.with_unit(unit);
    }

    builder.build()
}
