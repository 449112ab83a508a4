//! Dimensional analysis types
//!
//! A dimension is a sparse map from base dimension to a non-zero integer
//! exponent. The empty map is dimensionless.

use std::collections::BTreeMap;
use std::fmt;
use serde::{Serialize, Deserialize};

use crate::UnitError;

/// The base dimensions a system of units is built on
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BaseDimension {
    Length,
    Mass,
    Time,
    Current,
    Temperature,
    Amount,
    Luminosity,
    Currency,
    /// A base dimension outside the SI set, identified by its symbol
    Other(String),
}

impl BaseDimension {
    /// Short symbol used in dimension display
    pub fn symbol(&self) -> &str {
        match self {
            BaseDimension::Length => "L",
            BaseDimension::Mass => "M",
            BaseDimension::Time => "T",
            BaseDimension::Current => "I",
            BaseDimension::Temperature => "Θ",
            BaseDimension::Amount => "N",
            BaseDimension::Luminosity => "J",
            BaseDimension::Currency => "¤",
            BaseDimension::Other(symbol) => symbol,
        }
    }
}

/// Represents the dimensions of a physical quantity as exponents of base dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    exponents: BTreeMap<BaseDimension, i32>,
}

impl Dimension {
    /// Build from (base, exponent) pairs. Zero exponents are dropped; a
    /// repeated base keeps its last exponent.
    pub fn from_exponents<I>(exponents: I) -> Self
    where
        I: IntoIterator<Item = (BaseDimension, i32)>,
    {
        let mut map: BTreeMap<BaseDimension, i32> = exponents.into_iter().collect();
        map.retain(|_, exp| *exp != 0);
        Dimension { exponents: map }
    }

    /// Dimensionless quantity (no exponents)
    pub fn dimensionless() -> Self {
        Dimension::default()
    }

    /// A single base dimension to the first power
    pub fn of(base: BaseDimension) -> Self {
        Self::from_exponents([(base, 1)])
    }

    /// Length dimension [L]
    pub fn length() -> Self {
        Self::of(BaseDimension::Length)
    }

    /// Mass dimension [M]
    pub fn mass() -> Self {
        Self::of(BaseDimension::Mass)
    }

    /// Time dimension [T]
    pub fn time() -> Self {
        Self::of(BaseDimension::Time)
    }

    /// Electric current dimension [I]
    pub fn current() -> Self {
        Self::of(BaseDimension::Current)
    }

    /// Temperature dimension [Θ]
    pub fn temperature() -> Self {
        Self::of(BaseDimension::Temperature)
    }

    /// Amount of substance dimension [N]
    pub fn amount() -> Self {
        Self::of(BaseDimension::Amount)
    }

    /// Luminous intensity dimension [J]
    pub fn luminosity() -> Self {
        Self::of(BaseDimension::Luminosity)
    }

    /// Currency dimension [¤]
    pub fn currency() -> Self {
        Self::of(BaseDimension::Currency)
    }

    /// Velocity [L T^-1]
    pub fn velocity() -> Self {
        Self::from_exponents([(BaseDimension::Length, 1), (BaseDimension::Time, -1)])
    }

    /// Acceleration [L T^-2]
    pub fn acceleration() -> Self {
        Self::from_exponents([(BaseDimension::Length, 1), (BaseDimension::Time, -2)])
    }

    /// Force [M L T^-2]
    pub fn force() -> Self {
        Self::from_exponents([
            (BaseDimension::Length, 1),
            (BaseDimension::Mass, 1),
            (BaseDimension::Time, -2),
        ])
    }

    /// Energy [M L^2 T^-2]
    pub fn energy() -> Self {
        Self::from_exponents([
            (BaseDimension::Length, 2),
            (BaseDimension::Mass, 1),
            (BaseDimension::Time, -2),
        ])
    }

    /// Area [L^2]
    pub fn area() -> Self {
        Self::from_exponents([(BaseDimension::Length, 2)])
    }

    /// Volume [L^3]
    pub fn volume() -> Self {
        Self::from_exponents([(BaseDimension::Length, 3)])
    }

    /// Exponent of one base dimension (0 when absent)
    pub fn exponent(&self, base: &BaseDimension) -> i32 {
        self.exponents.get(base).copied().unwrap_or(0)
    }

    /// Iterate over the non-zero (base, exponent) entries
    pub fn exponents(&self) -> impl Iterator<Item = (&BaseDimension, i32)> {
        self.exponents.iter().map(|(base, exp)| (base, *exp))
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.is_empty()
    }

    /// Multiply dimensions (add exponents)
    pub fn multiply(&self, other: &Dimension) -> Result<Dimension, UnitError> {
        self.combine(other, i32::checked_add)
            .ok_or_else(|| UnitError::ExponentOverflow(format!("{} * {}", self, other)))
    }

    /// Divide dimensions (subtract exponents)
    pub fn divide(&self, other: &Dimension) -> Result<Dimension, UnitError> {
        self.combine(other, i32::checked_sub)
            .ok_or_else(|| UnitError::ExponentOverflow(format!("{} / {}", self, other)))
    }

    fn combine<F>(&self, other: &Dimension, op: F) -> Option<Dimension>
    where
        F: Fn(i32, i32) -> Option<i32>,
    {
        let mut exponents = self.exponents.clone();
        for (base, &exp) in &other.exponents {
            let current = exponents.get(base).copied().unwrap_or(0);
            exponents.insert(base.clone(), op(current, exp)?);
        }
        exponents.retain(|_, exp| *exp != 0);
        Some(Dimension { exponents })
    }

    /// Raise to integer power (multiply exponents)
    pub fn pow(&self, n: i32) -> Result<Dimension, UnitError> {
        let mut exponents = Vec::with_capacity(self.exponents.len());
        for (base, exp) in &self.exponents {
            match exp.checked_mul(n) {
                Some(e) => exponents.push((base.clone(), e)),
                None => return Err(UnitError::ExponentOverflow(format!("({})^{}", self, n))),
            }
        }
        Ok(Self::from_exponents(exponents))
    }

    /// Take the n-th root; every exponent must be divisible by `n`.
    pub fn root(&self, n: i32) -> Result<Dimension, UnitError> {
        if n == 0 {
            return Err(UnitError::ZeroRootOrder);
        }
        let mut exponents = Vec::with_capacity(self.exponents.len());
        for (base, &exp) in &self.exponents {
            match (exp.checked_rem(n), exp.checked_div(n)) {
                (Some(0), Some(q)) => exponents.push((base.clone(), q)),
                (Some(_), _) => {
                    return Err(UnitError::NonIntegerRoot {
                        value: self.to_string(),
                        order: n,
                        exponent: exp,
                    })
                }
                _ => return Err(UnitError::ExponentOverflow(format!("({})^(1/{})", self, n))),
            }
        }
        Ok(Self::from_exponents(exponents))
    }

    /// Exponents keyed by base-dimension symbol
    pub fn symbol_exponents(&self) -> BTreeMap<&str, i32> {
        self.exponents.iter().map(|(base, exp)| (base.symbol(), *exp)).collect()
    }

    /// Equal dimensions, or equal symbol/exponent maps.
    ///
    /// The fallback lets a dimension built on `BaseDimension::Other("L")`
    /// match `BaseDimension::Length`, so independently defined systems can
    /// still convert between each other. It is deliberately permissive.
    pub fn is_compatible(&self, other: &Dimension) -> bool {
        self == other || self.symbol_exponents() == other.symbol_exponents()
    }

    /// Get the dimension name if it matches a common dimension
    pub fn name(&self) -> Option<&'static str> {
        let named: [(Dimension, &'static str); 12] = [
            (Self::dimensionless(), "dimensionless"),
            (Self::length(), "length"),
            (Self::mass(), "mass"),
            (Self::time(), "time"),
            (Self::temperature(), "temperature"),
            (Self::currency(), "currency"),
            (Self::velocity(), "velocity"),
            (Self::acceleration(), "acceleration"),
            (Self::force(), "force"),
            (Self::energy(), "energy"),
            (Self::area(), "area"),
            (Self::volume(), "volume"),
        ];
        named.into_iter().find(|(dim, _)| dim == self).map(|(_, name)| name)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exponents.is_empty() {
            return write!(f, "1");
        }

        let parts: Vec<String> = self.exponents.iter()
            .map(|(base, &exp)| {
                if exp == 1 {
                    base.symbol().to_string()
                } else {
                    format!("{}^{}", base.symbol(), exp)
                }
            })
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}
