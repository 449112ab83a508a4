//! Mensura Core - Numeric foundation
//!
//! This crate provides the numeric types used throughout Mensura:
//! - `Number`: Arbitrary precision decimal numbers
//! - `Ratio`: Exact rational numbers, used for converter factors and offsets
//! - `NumericAdapter`: Uniform arithmetic over any value representation

mod number;
mod adapter;

pub use number::{Number, NumberError, DEFAULT_PRECISION};
pub use adapter::NumericAdapter;

pub use dashu_int::IBig;

/// Exact rational number
pub type Ratio = dashu_ratio::RBig;

/// Build an exact rational from a decimal literal such as "273.15" or
/// "-0.5", or a quotient of two such literals like "1/3".
pub fn ratio_from_decimal(s: &str) -> Result<Ratio, NumberError> {
    let Some((num, den)) = s.split_once('/') else {
        return Number::from_str(s).map(|n| n.to_ratio());
    };
    let den = Number::from_str(den)?.to_ratio();
    if den == Ratio::ZERO {
        return Err(NumberError::DivisionByZero);
    }
    Ok(Number::from_str(num)?.to_ratio() / den)
}

/// Build `num/den` as an exact rational.
pub fn ratio(num: i64, den: i64) -> Result<Ratio, NumberError> {
    if den == 0 {
        return Err(NumberError::DivisionByZero);
    }
    Ok(Ratio::from_parts_signed(IBig::from(num), IBig::from(den)))
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Number, NumberError, NumericAdapter, Ratio};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_from_decimal() {
        assert_eq!(ratio_from_decimal("273.15").unwrap(), ratio(27315, 100).unwrap());
        assert_eq!(ratio_from_decimal("-0.5").unwrap(), ratio(-1, 2).unwrap());
        assert!(ratio_from_decimal("abc").is_err());
    }

    #[test]
    fn test_ratio_from_quotient_is_exact() {
        assert_eq!(ratio_from_decimal("1/3").unwrap(), ratio(1, 3).unwrap());
        assert_eq!(ratio_from_decimal(" 2.5 / 4 ").unwrap(), ratio(5, 8).unwrap());
        assert_eq!(ratio_from_decimal("1/0"), Err(NumberError::DivisionByZero));
        assert!(ratio_from_decimal("1/2/3").is_err());
    }

    #[test]
    fn test_ratio_zero_denominator() {
        assert_eq!(ratio(1, 0), Err(NumberError::DivisionByZero));
    }
}
