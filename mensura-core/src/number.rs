//! Arbitrary precision numbers using dashu
//!
//! Uses dashu-float (DBig) for arbitrary precision decimal arithmetic.
//! Exact rational factors (`Ratio`) enter a `Number` through `from_ratio`,
//! which divides numerator by denominator at working precision.

use dashu_float::DBig;
use dashu_int::IBig;
use serde::{Deserialize, Serialize, Serializer, Deserializer};
use thiserror::Error;

use crate::Ratio;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Inexact result: {0}")]
    Inexact(String),

    #[error("Overflow: result too large")]
    Overflow,
}

/// Default precision for calculations (decimal digits)
pub const DEFAULT_PRECISION: usize = 50;

/// Arbitrary precision decimal number
///
/// Built on dashu-float's DBig. All operations return Results or new
/// Numbers - never panic.
#[derive(Debug, Clone)]
pub struct Number {
    inner: DBig,
}

impl Number {
    // ========== Construction ==========

    /// Ensure a DBig has adequate precision for calculations
    fn with_work_precision(val: DBig) -> DBig {
        val.with_precision(DEFAULT_PRECISION).value()
    }

    /// Parse a plain decimal literal: "42", "-0.0025", "273.15"
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let literal = s.trim();
        literal.parse::<DBig>()
            .map(|inner| Self { inner: Self::with_work_precision(inner) })
            .map_err(|_| NumberError::ParseError(literal.to_string()))
    }

    /// Create from i64 with working precision
    pub fn from_i64(n: i64) -> Self {
        Self { inner: Self::with_work_precision(DBig::from(n)) }
    }

    /// Create from an exact rational. Terminating fractions (1/100, 5/8)
    /// come out exact; others are rounded at working precision.
    pub fn from_ratio(r: &Ratio) -> Self {
        let num = Self::with_work_precision(DBig::from(r.numerator().clone()));
        let den = Self::with_work_precision(DBig::from(IBig::from(r.denominator().clone())));
        Self { inner: num / den }
    }

    // ========== Predicates ==========

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.inner == DBig::ZERO
    }

    /// Check if negative
    pub fn is_negative(&self) -> bool {
        self.inner < DBig::ZERO
    }

    /// Check if value is an integer
    pub fn is_integer(&self) -> bool {
        let floor_val = self.inner.clone().floor();
        self.inner == floor_val
    }

    // ========== Basic Arithmetic ==========

    /// Addition
    pub fn add(&self, other: &Self) -> Self {
        Self { inner: &self.inner + &other.inner }
    }

    /// Subtraction
    pub fn sub(&self, other: &Self) -> Self {
        Self { inner: &self.inner - &other.inner }
    }

    /// Multiplication
    pub fn mul(&self, other: &Self) -> Self {
        Self { inner: &self.inner * &other.inner }
    }

    /// Negation
    pub fn neg(&self) -> Self {
        Self { inner: -self.inner.clone() }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            Err(NumberError::DivisionByZero)
        } else {
            Ok(Self { inner: &self.inner / &other.inner })
        }
    }

    /// Floor - largest integer <= x
    pub fn floor(&self) -> Self {
        Self { inner: self.inner.clone().floor() }
    }

    // ========== Conversion ==========

    /// Exact rational value of this decimal
    pub fn to_ratio(&self) -> Ratio {
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();
        let ten = IBig::from(10u8);
        if exponent >= 0 {
            Ratio::from(significand * ten.pow(exponent as usize))
        } else {
            Ratio::from_parts_signed(significand, ten.pow(exponent.unsigned_abs()))
        }
    }

    /// Nearest f64, or None when out of range
    pub fn to_f64(&self) -> Option<f64> {
        self.to_string().parse::<f64>().ok().filter(|f| f.is_finite())
    }
}

// ========== Trait Implementations ==========

impl std::fmt::Display for Number {
    /// Plain positional notation of the exact stored value: "150", "1.5",
    /// "-0.0025". Never scientific, never rounded.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();
        let text = significand.to_string();
        let (sign, digits) = match text.strip_prefix('-') {
            Some(magnitude) => ("-", magnitude.to_string()),
            None => ("", text),
        };

        if exponent >= 0 {
            if digits == "0" {
                return write!(f, "0");
            }
            return write!(f, "{}{}{}", sign, digits, "0".repeat(exponent as usize));
        }

        let scale = exponent.unsigned_abs();
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale - digits.len() + 1), digits)
        } else {
            digits
        };
        let (whole, frac) = padded.split_at(padded.len() - scale);
        let frac = frac.trim_end_matches('0');
        if frac.is_empty() {
            write!(f, "{}{}", sign, whole)
        } else {
            write!(f, "{}{}.{}", sign, whole, frac)
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.inner.partial_cmp(&other.inner).unwrap_or(std::cmp::Ordering::Equal)
    }
}
