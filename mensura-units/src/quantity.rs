//! Quantity type - a value with an associated unit and scale

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use mensura_core::{Number, NumericAdapter};

use crate::{Converter, Dimension, Unit, UnitError};

/// Whether a quantity is a point value or a difference between two points.
///
/// Affine unit converters (°C to K) apply their offset to absolute values
/// only; a relative value goes through the converter's linear part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scale {
    #[default]
    Absolute,
    Relative,
}

/// A numeric value with a unit of measurement
#[derive(Debug, Clone)]
pub struct Quantity<N: NumericAdapter = Number> {
    value: N,
    unit: Unit,
    scale: Scale,
}

impl<N: NumericAdapter> Quantity<N> {
    /// Create an absolute quantity
    pub fn new(value: N, unit: Unit) -> Self {
        Self::from_parts(value, unit, Scale::Absolute)
    }

    /// Create a point value, e.g. a temperature reading
    pub fn absolute(value: N, unit: Unit) -> Self {
        Self::from_parts(value, unit, Scale::Absolute)
    }

    /// Create a difference quantity, e.g. a temperature delta
    pub fn relative(value: N, unit: Unit) -> Self {
        Self::from_parts(value, unit, Scale::Relative)
    }

    /// Create a quantity with an explicit scale
    pub fn from_parts(value: N, unit: Unit, scale: Scale) -> Self {
        Quantity { value, unit, scale }
    }

    /// The same value and unit under another scale
    pub fn with_scale(&self, scale: Scale) -> Self {
        Self::from_parts(self.value.clone(), self.unit.clone(), scale)
    }

    /// The numeric value, expressed in `unit()`
    pub fn value(&self) -> &N {
        &self.value
    }

    /// The unit the value is expressed in
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Point value or difference
    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Dimension of the unit
    pub fn dimension(&self) -> &Dimension {
        self.unit.dimension()
    }

    /// True when `other` can be converted into this quantity's unit
    pub fn is_compatible(&self, other: &Quantity<N>) -> bool {
        self.unit.is_compatible(&other.unit)
    }

    fn converter_to(&self, target: &Unit) -> Result<Converter, UnitError> {
        let converter = self.unit.get_converter_to(target)?;
        Ok(match self.scale {
            Scale::Absolute => converter,
            Scale::Relative => converter.linear_part(),
        })
    }

    // ========== Conversion ==========

    /// Express this quantity in `target`; scale is preserved
    pub fn to(&self, target: &Unit) -> Result<Quantity<N>, UnitError> {
        if &self.unit == target {
            return Ok(self.clone());
        }
        let value = self.converter_to(target)?.convert(&self.value)?;
        Ok(Self::from_parts(value, target.clone(), self.scale))
    }

    /// Express this quantity in its unit's system unit
    pub fn to_system_unit(&self) -> Result<Quantity<N>, UnitError> {
        self.to(&self.unit.system_unit()?)
    }

    // ========== Arithmetic ==========

    /// `other` is converted into this unit first; the result keeps this
    /// quantity's unit and scale.
    pub fn add(&self, other: &Quantity<N>) -> Result<Quantity<N>, UnitError> {
        let converted = other.to(&self.unit)?;
        Ok(Self::from_parts(self.value.add(&converted.value), self.unit.clone(), self.scale))
    }

    /// `self - other`, in this quantity's unit and scale
    pub fn subtract(&self, other: &Quantity<N>) -> Result<Quantity<N>, UnitError> {
        let converted = other.to(&self.unit)?;
        Ok(Self::from_parts(self.value.sub(&converted.value), self.unit.clone(), self.scale))
    }

    /// Product of values in the product unit
    pub fn multiply(&self, other: &Quantity<N>) -> Result<Quantity<N>, UnitError> {
        Ok(Self::from_parts(
            self.value.mul(&other.value),
            self.unit.multiply(&other.unit)?,
            self.scale,
        ))
    }

    /// Quotient of values in the quotient unit
    pub fn divide(&self, other: &Quantity<N>) -> Result<Quantity<N>, UnitError> {
        Ok(Self::from_parts(
            self.value.div(&other.value)?,
            self.unit.divide(&other.unit)?,
            self.scale,
        ))
    }

    /// Scale the value; unit and scale are unchanged
    pub fn multiply_scalar(&self, factor: &N) -> Quantity<N> {
        Self::from_parts(self.value.mul(factor), self.unit.clone(), self.scale)
    }

    /// Divide the value; unit and scale are unchanged
    pub fn divide_scalar(&self, divisor: &N) -> Result<Quantity<N>, UnitError> {
        Ok(Self::from_parts(self.value.div(divisor)?, self.unit.clone(), self.scale))
    }

    /// Reciprocal value in the inverted unit
    pub fn inverse(&self) -> Result<Quantity<N>, UnitError> {
        Ok(Self::from_parts(self.value.reciprocal()?, self.unit.inverse()?, self.scale))
    }

    /// Negated value; unit and scale are unchanged
    pub fn negate(&self) -> Quantity<N> {
        Self::from_parts(self.value.negate(), self.unit.clone(), self.scale)
    }

    /// Integer power of both value and unit
    pub fn pow(&self, n: i32) -> Result<Quantity<N>, UnitError> {
        let unit = self.unit.pow(n)?;
        let mut base = self.value.clone();
        let mut remaining = n.unsigned_abs();
        let mut value = N::one();
        while remaining > 0 {
            if remaining & 1 == 1 {
                value = value.mul(&base);
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.mul(&base);
            }
        }
        if n < 0 {
            value = value.reciprocal()?;
        }
        Ok(Self::from_parts(value, unit, self.scale))
    }

    // ========== Comparison ==========

    /// Compare after converting `other` into this quantity's unit
    pub fn compare_to(&self, other: &Quantity<N>) -> Result<Ordering, UnitError> {
        let converted = other.to(&self.unit)?;
        Ok(self.value.compare(&converted.value))
    }
}

impl<N: NumericAdapter> PartialEq for Quantity<N> {
    /// Equal scale and equal values once `other` is in this unit;
    /// incommensurable quantities are never equal.
    fn eq(&self, other: &Self) -> bool {
        if self.scale != other.scale {
            return false;
        }
        match other.to(&self.unit) {
            Ok(converted) => self.value.compare(&converted.value) == Ordering::Equal,
            Err(_) => false,
        }
    }
}

impl<N: NumericAdapter> fmt::Display for Quantity<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit == Unit::one() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mensura_core::{ratio, Ratio};
    use crate::{si, MetricPrefix};

    fn r(num: i64, den: i64) -> Ratio {
        ratio(num, den).unwrap()
    }

    fn centimetre() -> Unit {
        si::metre().prefixed(MetricPrefix::Centi)
    }

    #[test]
    fn test_convert_exact_and_back() {
        let q = Quantity::new(Number::from_str("1.5").unwrap(), si::metre());
        let cm = q.to(&centimetre()).unwrap();
        assert_eq!(cm.value(), &Number::from_i64(150));
        assert_eq!(cm.unit(), &centimetre());
        let back = cm.to(&si::metre()).unwrap();
        assert_eq!(back.value(), &Number::from_str("1.5").unwrap());
    }

    #[test]
    fn test_same_unit_is_identity() {
        let q = Quantity::new(r(7, 3), si::second());
        assert_eq!(q.to(&si::second()).unwrap().value(), &r(7, 3));
    }

    #[test]
    fn test_absolute_temperature_applies_offset() {
        let c = si::celsius().unwrap();
        let q = Quantity::absolute(r(20, 1), c);
        let k = q.to(&si::kelvin()).unwrap();
        assert_eq!(k.value(), &r(29315, 100));
        assert_eq!(k.scale(), Scale::Absolute);
    }

    #[test]
    fn test_relative_temperature_skips_offset() {
        let delta = Quantity::relative(r(9, 1), si::fahrenheit().unwrap());
        let k = delta.to(&si::kelvin()).unwrap();
        assert_eq!(k.value(), &r(5, 1));
        assert_eq!(k.scale(), Scale::Relative);
    }

    #[test]
    fn test_adding_delta_to_reading_applies_offset_once() {
        let reading = Quantity::absolute(r(20, 1), si::celsius().unwrap());
        let delta = Quantity::relative(r(10, 1), si::kelvin());
        let sum = reading.add(&delta).unwrap();
        assert_eq!(sum.value(), &r(30, 1));
        assert_eq!(sum.unit(), &si::celsius().unwrap());
        assert_eq!(sum.scale(), Scale::Absolute);

        let f_delta = Quantity::relative(r(18, 1), si::fahrenheit().unwrap());
        assert_eq!(reading.add(&f_delta).unwrap().value(), &r(30, 1));
    }

    #[test]
    fn test_add_incommensurable_fails() {
        let a = Quantity::new(r(1, 1), si::metre());
        let b = Quantity::new(r(1, 1), si::second());
        assert!(matches!(a.add(&b), Err(UnitError::Unconvertible { .. })));
    }

    #[test]
    fn test_subtract_keeps_left_unit() {
        let a = Quantity::new(Number::from_i64(2), si::metre());
        let b = Quantity::new(Number::from_i64(50), centimetre());
        let d = a.subtract(&b).unwrap();
        assert_eq!(d.value(), &Number::from_str("1.5").unwrap());
        assert_eq!(d.unit(), &si::metre());
    }

    #[test]
    fn test_multiply_and_divide_units() {
        let distance = Quantity::new(r(100, 1), si::metre());
        let time = Quantity::new(r(20, 1), si::second());
        let speed = distance.divide(&time).unwrap();
        assert_eq!(speed.value(), &r(5, 1));
        assert_eq!(speed.unit().name(), "m/s");
        let back = speed.multiply(&time).unwrap();
        assert_eq!(back.unit(), &si::metre());
        assert_eq!(back, distance);
    }

    #[test]
    fn test_divide_by_zero() {
        let a = Quantity::new(Number::from_i64(1), si::metre());
        let zero = Number::from_i64(0);
        assert!(matches!(a.divide_scalar(&zero), Err(UnitError::Number(_))));
    }

    #[test]
    fn test_scalar_ops_keep_unit() {
        let a = Quantity::relative(r(3, 1), si::kelvin());
        let b = a.multiply_scalar(&r(2, 1));
        assert_eq!(b.value(), &r(6, 1));
        assert_eq!(b.scale(), Scale::Relative);
        assert_eq!(b.divide_scalar(&r(4, 1)).unwrap().value(), &r(3, 2));
    }

    #[test]
    fn test_inverse_and_negate() {
        let period = Quantity::new(r(4, 1), si::second());
        let freq = period.inverse().unwrap();
        assert_eq!(freq.value(), &r(1, 4));
        assert_eq!(freq.unit(), &si::second().inverse().unwrap());
        assert_eq!(period.negate().value(), &r(-4, 1));
    }

    #[test]
    fn test_pow() {
        let side = Quantity::new(r(3, 1), si::metre());
        let area = side.pow(2).unwrap();
        assert_eq!(area.value(), &r(9, 1));
        assert_eq!(area.unit(), &si::metre().pow(2).unwrap());
        assert_eq!(side.pow(-1).unwrap().value(), &r(1, 3));
        assert_eq!(side.pow(0).unwrap().unit(), &Unit::one());
        assert_eq!(side.pow(5).unwrap().value(), &r(243, 1));
        assert!(matches!(side.pow(i32::MIN), Err(UnitError::ExponentOverflow(_))));
    }

    #[test]
    fn test_compare_across_units() {
        let km = Quantity::new(Number::from_i64(1), si::metre().prefixed(MetricPrefix::Kilo));
        let m = Quantity::new(Number::from_i64(999), si::metre());
        assert_eq!(km.compare_to(&m).unwrap(), Ordering::Greater);
        assert_eq!(m.compare_to(&km).unwrap(), Ordering::Less);
        let thousand = Quantity::new(Number::from_i64(1000), si::metre());
        assert_eq!(km, thousand);
    }

    #[test]
    fn test_equality_requires_same_scale() {
        let a = Quantity::absolute(r(1, 1), si::kelvin());
        let b = Quantity::relative(r(1, 1), si::kelvin());
        assert_ne!(a, b);
        assert_ne!(a, Quantity::absolute(r(1, 1), si::metre()));
    }

    #[test]
    fn test_to_system_unit() {
        let hours = Quantity::new(r(3, 2), si::system().unwrap().unit("h").unwrap().clone());
        let seconds = hours.to_system_unit().unwrap();
        assert_eq!(seconds.value(), &r(5400, 1));
        assert_eq!(seconds.unit(), &si::second());
    }

    #[test]
    fn test_display() {
        let q = Quantity::new(Number::from_str("1.5").unwrap(), si::metre());
        assert_eq!(q.to_string(), "1.5 m");
        let plain = Quantity::new(Number::from_i64(3), Unit::one());
        assert_eq!(plain.to_string(), "3");
    }
}
