//! Affine converters between a unit and its system unit
//!
//! `Converter` is a closed algebra: composing or inverting converters always
//! yields another `Converter`, and compositions are kept in canonical form
//! (adjacent offsets and adjacent factors are folded, identities dropped).

use std::fmt;

use mensura_core::{NumberError, NumericAdapter, Ratio};

use crate::UnitError;

/// A value transform `x ↦ a·x + b` built from primitive steps
///
/// Build converters with `from_offset`, `from_factor` and `concatenate`,
/// which keep the canonical form that equality and `is_identity` rely on.
/// Matching on the variants is for inspecting steps.
#[derive(Debug, Clone, Eq)]
pub enum Converter {
    Identity,
    /// `x + offset`
    Add { offset: Ratio },
    /// `x * factor`, never zero
    Multiply { factor: Ratio },
    /// Apply `right`, then `left`
    Combine { left: Box<Converter>, right: Box<Converter> },
}

impl Converter {
    /// Offset converter; zero collapses to `Identity`.
    pub fn from_offset(offset: Ratio) -> Converter {
        if offset == Ratio::ZERO {
            Converter::Identity
        } else {
            Converter::Add { offset }
        }
    }

    /// Scaling converter; a factor of one collapses to `Identity`.
    pub fn from_factor(factor: Ratio) -> Result<Converter, UnitError> {
        if factor == Ratio::ZERO {
            return Err(UnitError::InvalidOperand("conversion factor cannot be zero".to_string()));
        }
        if factor == Ratio::ONE {
            Ok(Converter::Identity)
        } else {
            Ok(Converter::Multiply { factor })
        }
    }

    /// Offset converter from a decimal or `a/b` literal
    pub fn parse_offset(literal: &str) -> Result<Converter, UnitError> {
        Ok(Self::from_offset(parse_operand(literal)?))
    }

    /// Scaling converter from a decimal or `a/b` literal
    pub fn parse_factor(literal: &str) -> Result<Converter, UnitError> {
        Self::from_factor(parse_operand(literal)?)
    }

    /// True when every step cancels out
    pub fn is_identity(&self) -> bool {
        self.steps().is_empty()
    }

    /// True when no step carries an offset
    pub fn is_linear(&self) -> bool {
        self.steps().iter().all(|step| !matches!(step, Converter::Add { .. }))
    }

    /// Compose: the result applies `other` first, then `self`.
    pub fn concatenate(&self, other: &Converter) -> Converter {
        let mut steps = other.steps();
        steps.extend(self.steps());
        Self::from_steps(steps)
    }

    /// The converter undoing this one
    pub fn inverse(&self) -> Converter {
        match self {
            Converter::Identity => Converter::Identity,
            Converter::Add { offset } => Converter::Add { offset: -offset.clone() },
            Converter::Multiply { factor } => Converter::Multiply { factor: &Ratio::ONE / factor },
            Converter::Combine { left, right } => Converter::Combine {
                left: Box::new(right.inverse()),
                right: Box::new(left.inverse()),
            },
        }
    }

    /// The converter with every offset removed. Differences between two
    /// readings transform through this part only.
    pub fn linear_part(&self) -> Converter {
        Self::from_steps(self.steps()
            .into_iter()
            .filter(|step| !matches!(step, Converter::Add { .. }))
            .collect())
    }

    /// Integer power of a linear converter; negative powers invert first.
    pub fn pow(&self, n: i32) -> Result<Converter, UnitError> {
        if !self.is_linear() {
            return Err(UnitError::NonLinearConverter(self.to_string()));
        }
        let mut base = if n < 0 { self.inverse() } else { self.clone() };
        let mut remaining = n.unsigned_abs();
        let mut result = Converter::Identity;
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.concatenate(&base);
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.concatenate(&base);
            }
        }
        Ok(result)
    }

    /// Apply the transform to a value
    pub fn convert<N: NumericAdapter>(&self, value: &N) -> Result<N, NumberError> {
        match self {
            Converter::Identity => Ok(value.clone()),
            Converter::Add { offset } => Ok(value.add(&N::from_ratio(offset)?)),
            Converter::Multiply { factor } => value.mul_ratio(factor),
            Converter::Combine { left, right } => left.convert(&right.convert(value)?),
        }
    }

    /// Primitive steps in the order they are applied
    pub fn conversion_steps(&self) -> Vec<Converter> {
        self.steps()
    }

    fn steps(&self) -> Vec<Converter> {
        match self {
            Converter::Identity => Vec::new(),
            Converter::Add { .. } | Converter::Multiply { .. } => vec![self.clone()],
            Converter::Combine { left, right } => {
                let mut steps = right.steps();
                steps.extend(left.steps());
                steps
            }
        }
    }

    /// Rebuild a canonical converter from steps in application order
    fn from_steps(steps: Vec<Converter>) -> Converter {
        let mut folded: Vec<Converter> = Vec::with_capacity(steps.len());
        for step in steps {
            let merged = match (folded.last(), &step) {
                (Some(Converter::Add { offset: a }), Converter::Add { offset: b }) => {
                    Some(Self::from_offset(a + b))
                }
                (Some(Converter::Multiply { factor: a }), Converter::Multiply { factor: b }) => {
                    let product = a * b;
                    Some(if product == Ratio::ONE {
                        Converter::Identity
                    } else {
                        Converter::Multiply { factor: product }
                    })
                }
                _ => None,
            };
            match merged {
                Some(merged) => {
                    folded.pop();
                    if !merged.is_identity() {
                        folded.push(merged);
                    }
                }
                None if step.is_identity() => {}
                None => folded.push(step),
            }
        }

        let mut steps = folded.into_iter();
        let first = match steps.next() {
            Some(first) => first,
            None => return Converter::Identity,
        };
        steps.fold(first, |applied, next| Converter::Combine {
            left: Box::new(next),
            right: Box::new(applied),
        })
    }
}

fn parse_operand(literal: &str) -> Result<Ratio, UnitError> {
    mensura_core::ratio_from_decimal(literal)
        .map_err(|e| UnitError::InvalidOperand(e.to_string()))
}

impl PartialEq for Converter {
    fn eq(&self, other: &Self) -> bool {
        let (mine, theirs) = (self.steps(), other.steps());
        mine.len() == theirs.len()
            && mine.iter().zip(theirs.iter()).all(|(a, b)| match (a, b) {
                (Converter::Add { offset: x }, Converter::Add { offset: y }) => x == y,
                (Converter::Multiply { factor: x }, Converter::Multiply { factor: y }) => x == y,
                _ => false,
            })
    }
}

impl Default for Converter {
    fn default() -> Self {
        Converter::Identity
    }
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut expr = "x".to_string();
        for step in self.steps() {
            expr = match step {
                Converter::Add { offset } if offset < Ratio::ZERO => format!("{} - {}", expr, -offset),
                Converter::Add { offset } => format!("{} + {}", expr, offset),
                Converter::Multiply { factor } if expr.contains(' ') => format!("({}) * {}", expr, factor),
                Converter::Multiply { factor } => format!("{} * {}", expr, factor),
                _ => expr,
            };
        }
        write!(f, "{}", expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mensura_core::{ratio, Number};

    fn add(n: i64, d: i64) -> Converter {
        Converter::from_offset(ratio(n, d).unwrap())
    }

    fn mul(n: i64, d: i64) -> Converter {
        Converter::from_factor(ratio(n, d).unwrap()).unwrap()
    }

    #[test]
    fn test_constructors_collapse() {
        assert_eq!(add(0, 1), Converter::Identity);
        assert_eq!(mul(1, 1), Converter::Identity);
        assert!(matches!(
            Converter::from_factor(Ratio::ZERO),
            Err(UnitError::InvalidOperand(_))
        ));
        assert!(matches!(Converter::parse_offset("abc"), Err(UnitError::InvalidOperand(_))));
        assert_eq!(Converter::parse_factor("0.01").unwrap(), mul(1, 100));
        assert_eq!(Converter::parse_factor("1/3").unwrap(), mul(1, 3));
        assert!(matches!(Converter::parse_factor("1/0"), Err(UnitError::InvalidOperand(_))));
    }

    #[test]
    fn test_simplification() {
        assert_eq!(add(2, 1).concatenate(&add(3, 1)), add(5, 1));
        assert_eq!(add(2, 1).concatenate(&add(-2, 1)), Converter::Identity);
        assert_eq!(mul(2, 1).concatenate(&mul(1, 2)), Converter::Identity);
        assert_eq!(mul(2, 1).concatenate(&mul(3, 1)), mul(6, 1));
        assert_eq!(Converter::Identity.concatenate(&add(1, 1)), add(1, 1));
        assert_eq!(mul(4, 1).concatenate(&Converter::Identity), mul(4, 1));
    }

    #[test]
    fn test_mixed_steps_are_combined() {
        let c = mul(2, 1).concatenate(&add(3, 1));
        assert!(matches!(c, Converter::Combine { .. }));
        // (10 + 3) * 2
        assert_eq!(c.convert(&Number::from_i64(10)).unwrap(), Number::from_i64(26));
        assert_eq!(c.conversion_steps(), vec![add(3, 1), mul(2, 1)]);
    }

    #[test]
    fn test_inverse_round_trip() {
        let c = mul(5, 9).concatenate(&add(45967, 100));
        let round = c.inverse().concatenate(&c);
        assert!(round.is_identity());

        let x = <Ratio as NumericAdapter>::from_i64(-40);
        assert_eq!(c.inverse().convert(&c.convert(&x).unwrap()).unwrap(), x);
    }

    #[test]
    fn test_float_round_trip_within_epsilon() {
        let c = mul(1, 3).concatenate(&add(7, 10));
        let back = c.inverse().convert(&c.convert(&12.5_f64).unwrap()).unwrap();
        assert!((back - 12.5).abs() < 1e-12);
    }

    #[test]
    fn test_linear_part() {
        let c = mul(5, 9).concatenate(&add(45967, 100));
        assert!(!c.is_linear());
        assert_eq!(c.linear_part(), mul(5, 9));
        assert!(add(1, 1).linear_part().is_identity());
    }

    #[test]
    fn test_pow() {
        assert_eq!(mul(10, 1).pow(3).unwrap(), mul(1000, 1));
        assert_eq!(mul(10, 1).pow(-2).unwrap(), mul(1, 100));
        assert_eq!(mul(10, 1).pow(0).unwrap(), Converter::Identity);
        assert_eq!(mul(2, 1).pow(10).unwrap(), mul(1024, 1));
        assert_eq!(Converter::Identity.pow(i32::MIN).unwrap(), Converter::Identity);
        assert!(matches!(add(1, 1).pow(2), Err(UnitError::NonLinearConverter(_))));
    }

    #[test]
    fn test_equality_ignores_tree_shape() {
        let a = mul(2, 1).concatenate(&add(1, 1)).concatenate(&mul(3, 1));
        let b = mul(2, 1).concatenate(&add(1, 1).concatenate(&mul(3, 1)));
        assert_eq!(a, b);
    }

    #[test]
    fn test_display() {
        assert_eq!(Converter::Identity.to_string(), "x");
        assert_eq!(mul(100, 1).to_string(), "x * 100");
        assert_eq!(mul(5, 9).concatenate(&add(-3, 1)).to_string(), "(x - 3) * 5/9");
    }
}
