//! Integration tests for the numeric adapters
//!
//! The same generic routine runs over every representation and must agree
//! wherever the representation can express the exact result.

use std::cmp::Ordering;

use mensura_core::{ratio, ratio_from_decimal, IBig, Number, NumberError, NumericAdapter, Ratio};

/// `(x + offset) * factor`, the shape of an affine unit conversion
fn affine<N: NumericAdapter>(x: &N, offset: &Ratio, factor: &Ratio) -> Result<N, NumberError> {
    x.add(&N::from_ratio(offset)?).mul_ratio(factor)
}

#[test]
fn test_fahrenheit_to_kelvin_in_every_representation() {
    let offset = ratio_from_decimal("459.67").unwrap();
    let factor = ratio(5, 9).unwrap();

    let exact = affine(&<Ratio as NumericAdapter>::from_i64(32), &offset, &factor).unwrap();
    assert_eq!(exact, ratio(27315, 100).unwrap());

    let decimal = affine(&Number::from_i64(32), &offset, &factor).unwrap();
    assert_eq!(decimal, Number::from_str("273.15").unwrap());

    let float = affine(&32.0_f64, &offset, &factor).unwrap();
    assert!((float - 273.15).abs() < 1e-9);
}

#[test]
fn test_integer_adapter_refuses_fractions() {
    let offset = ratio(1, 2).unwrap();
    assert!(matches!(<IBig as NumericAdapter>::from_ratio(&offset), Err(NumberError::Inexact(_))));

    let doubled = affine(&IBig::from(4), &Ratio::ZERO, &ratio(2, 1).unwrap()).unwrap();
    assert_eq!(doubled, IBig::from(8));
    assert!(affine(&IBig::from(4), &Ratio::ZERO, &ratio(1, 3).unwrap()).is_err());
}

#[test]
fn test_floor_agrees_across_representations() {
    let value = ratio(-7, 2).unwrap();
    assert_eq!(NumericAdapter::floor(&value), ratio(-4, 1).unwrap());
    assert_eq!(NumericAdapter::floor(&Number::from_ratio(&value)), Number::from_i64(-4));
    assert_eq!(NumericAdapter::floor(&-3.5_f64), -4.0);
}

#[test]
fn test_reciprocal_of_zero_fails() {
    assert!(matches!(NumericAdapter::reciprocal(&Number::from_i64(0)), Err(NumberError::DivisionByZero)));
    assert!(matches!(NumericAdapter::reciprocal(&Ratio::ZERO), Err(NumberError::DivisionByZero)));
    assert!(matches!(NumericAdapter::reciprocal(&IBig::ZERO), Err(NumberError::DivisionByZero)));
}

#[test]
fn test_compare_and_sign() {
    let a = Number::from_str("0.1").unwrap();
    let b = Number::from_str("0.10000000000000000001").unwrap();
    assert_eq!(NumericAdapter::compare(&a, &b), Ordering::Less);
    assert!(NumericAdapter::is_negative(&NumericAdapter::negate(&a)));
    assert!(NumericAdapter::is_zero(&NumericAdapter::sub(&a, &a)));
}

#[test]
fn test_number_serde_round_trip() {
    let n = Number::from_str("273.15").unwrap();
    let json = serde_json::to_string(&n).unwrap();
    assert_eq!(json, "\"273.15\"");
    let back: Number = serde_json::from_str(&json).unwrap();
    assert_eq!(back, n);
}
