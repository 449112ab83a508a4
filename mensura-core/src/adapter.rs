//! Uniform arithmetic over quantity value representations
//!
//! Everything above this crate is generic over `NumericAdapter`; it never
//! names a concrete numeric type. Implementations are provided for:
//! - `Number`: arbitrary precision decimal
//! - `Ratio`: exact rational
//! - `IBig`: arbitrary precision integer (exact or fail)
//! - `f64`: floating point

use std::cmp::Ordering;
use std::fmt;

use dashu_int::{IBig, UBig};

use crate::{Number, NumberError, Ratio};

/// Arithmetic primitives a value representation must supply
pub trait NumericAdapter: Clone + fmt::Debug + fmt::Display + PartialEq {
    /// Additive identity
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// Exact for every representation except `f64` beyond 2^53
    fn from_i64(n: i64) -> Self;

    /// Bring an exact rational into this representation.
    fn from_ratio(r: &Ratio) -> Result<Self, NumberError>;

    /// `self + other`
    fn add(&self, other: &Self) -> Self;

    /// `self - other`
    fn sub(&self, other: &Self) -> Self;

    /// `self * other`; `IBig` and `Ratio` are exact, the others round
    fn mul(&self, other: &Self) -> Self;

    /// Fails with `DivisionByZero`, or `Inexact` when the quotient is not
    /// representable
    fn div(&self, other: &Self) -> Result<Self, NumberError>;

    /// `-self`
    fn negate(&self) -> Self;

    /// Total order on values; the two zeros of `f64` compare equal
    fn compare(&self, other: &Self) -> Ordering;

    /// Largest integral value not greater than `self`
    fn floor(&self) -> Self;

    /// True when the value has no fractional part
    fn is_integral(&self) -> bool;

    /// `1 / self`
    fn reciprocal(&self) -> Result<Self, NumberError> {
        Self::one().div(self)
    }

    fn is_zero(&self) -> bool {
        self.compare(&Self::zero()) == Ordering::Equal
    }

    /// Strictly below zero, so `-0.0` is not negative
    fn is_negative(&self) -> bool {
        self.compare(&Self::zero()) == Ordering::Less
    }

    /// Multiply by an exact rational: numerator first, then denominator,
    /// so that decimal factors like 1/100 never pass through a rounded
    /// intermediate.
    fn mul_ratio(&self, r: &Ratio) -> Result<Self, NumberError> {
        let num = Self::from_ratio(&Ratio::from(r.numerator().clone()))?;
        let den = Self::from_ratio(&Ratio::from(IBig::from(r.denominator().clone())))?;
        self.mul(&num).div(&den)
    }
}

impl NumericAdapter for Number {
    fn zero() -> Self {
        Number::from_i64(0)
    }

    fn one() -> Self {
        Number::from_i64(1)
    }

    fn from_i64(n: i64) -> Self {
        Number::from_i64(n)
    }

    fn from_ratio(r: &Ratio) -> Result<Self, NumberError> {
        Ok(Number::from_ratio(r))
    }

    fn add(&self, other: &Self) -> Self {
        Number::add(self, other)
    }

    fn sub(&self, other: &Self) -> Self {
        Number::sub(self, other)
    }

    fn mul(&self, other: &Self) -> Self {
        Number::mul(self, other)
    }

    fn div(&self, other: &Self) -> Result<Self, NumberError> {
        self.checked_div(other)
    }

    fn negate(&self) -> Self {
        self.neg()
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn floor(&self) -> Self {
        Number::floor(self)
    }

    fn is_integral(&self) -> bool {
        self.is_integer()
    }

    fn is_zero(&self) -> bool {
        Number::is_zero(self)
    }

    fn is_negative(&self) -> bool {
        Number::is_negative(self)
    }
}

impl NumericAdapter for Ratio {
    fn zero() -> Self {
        Ratio::ZERO
    }

    fn one() -> Self {
        Ratio::ONE
    }

    fn from_i64(n: i64) -> Self {
        Ratio::from(IBig::from(n))
    }

    fn from_ratio(r: &Ratio) -> Result<Self, NumberError> {
        Ok(r.clone())
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn sub(&self, other: &Self) -> Self {
        self - other
    }

    fn mul(&self, other: &Self) -> Self {
        self * other
    }

    fn div(&self, other: &Self) -> Result<Self, NumberError> {
        if *other == Ratio::ZERO {
            return Err(NumberError::DivisionByZero);
        }
        Ok(self / other)
    }

    fn negate(&self) -> Self {
        -self.clone()
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn floor(&self) -> Self {
        let num = self.numerator();
        let den = IBig::from(self.denominator().clone());
        let truncated = num / &den;
        if *num < IBig::ZERO && &truncated * &den != *num {
            Ratio::from(truncated - IBig::ONE)
        } else {
            Ratio::from(truncated)
        }
    }

    fn is_integral(&self) -> bool {
        *self.denominator() == UBig::ONE
    }

    fn mul_ratio(&self, r: &Ratio) -> Result<Self, NumberError> {
        Ok(self * r)
    }
}

impl NumericAdapter for IBig {
    fn zero() -> Self {
        IBig::ZERO
    }

    fn one() -> Self {
        IBig::ONE
    }

    fn from_i64(n: i64) -> Self {
        IBig::from(n)
    }

    fn from_ratio(r: &Ratio) -> Result<Self, NumberError> {
        if *r.denominator() != UBig::ONE {
            return Err(NumberError::Inexact(format!("{} is not an integer", r)));
        }
        Ok(r.numerator().clone())
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn sub(&self, other: &Self) -> Self {
        self - other
    }

    fn mul(&self, other: &Self) -> Self {
        self * other
    }

    fn div(&self, other: &Self) -> Result<Self, NumberError> {
        if *other == IBig::ZERO {
            return Err(NumberError::DivisionByZero);
        }
        let quotient = self / other;
        if &quotient * other != *self {
            return Err(NumberError::Inexact(format!("{} / {}", self, other)));
        }
        Ok(quotient)
    }

    fn negate(&self) -> Self {
        -self.clone()
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn floor(&self) -> Self {
        self.clone()
    }

    fn is_integral(&self) -> bool {
        true
    }

    fn mul_ratio(&self, r: &Ratio) -> Result<Self, NumberError> {
        Self::from_ratio(&(Ratio::from(self.clone()) * r))
    }
}

impl NumericAdapter for f64 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn from_i64(n: i64) -> Self {
        n as f64
    }

    fn from_ratio(r: &Ratio) -> Result<Self, NumberError> {
        Number::from_ratio(r).to_f64().ok_or(NumberError::Overflow)
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn sub(&self, other: &Self) -> Self {
        self - other
    }

    fn mul(&self, other: &Self) -> Self {
        self * other
    }

    fn div(&self, other: &Self) -> Result<Self, NumberError> {
        if *other == 0.0 {
            return Err(NumberError::DivisionByZero);
        }
        Ok(self / other)
    }

    fn negate(&self) -> Self {
        -self
    }

    /// NaN compares equal to everything; `-0.0` equals `0.0`
    fn compare(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }

    fn floor(&self) -> Self {
        f64::floor(*self)
    }

    fn is_integral(&self) -> bool {
        self.fract() == 0.0
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn is_negative(&self) -> bool {
        *self < 0.0
    }
}
