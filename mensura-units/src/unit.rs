//! Unit algebra: base, transformed, alternate and product units
//!
//! `Unit` is a cheap-to-clone handle over an immutable `UnitKind`. Every
//! operation builds a new unit; none mutates an existing one.

use std::fmt;
use std::sync::Arc;

use mensura_core::Ratio;

use crate::converter::Converter;
use crate::dimension::Dimension;
use crate::name::{NameTerm, UnitName};
use crate::prefix::MetricPrefix;
use crate::terms::{self, Exponent};
use crate::UnitError;

/// A physical (or currency) unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    kind: Arc<UnitKind>,
}

/// The unit variants
///
/// Handles are built through `Unit`'s constructors, which keep every
/// variant canonical; matching on the kind is for inspection.
#[derive(Debug)]
pub enum UnitKind {
    /// Defines a dimension from scratch; its own system unit
    Base { symbol: String, dimension: Dimension },
    /// `converter` maps values of this unit into `parent`
    Transformed {
        parent: Unit,
        converter: Converter,
        prefix: Option<MetricPrefix>,
        symbol: Option<String>,
    },
    /// A renaming of `parent` with no numeric effect
    Alternate { symbol: String, parent: Unit },
    /// Product of powers and roots of other units
    Product(ProductUnit),
}

/// A canonical product of powers/roots of other units
#[derive(Debug, Clone)]
pub struct ProductUnit {
    terms: Vec<(Unit, Exponent)>,
    dimension: Dimension,
}

impl ProductUnit {
    /// `(unit, exponent)` terms, each unit appearing once
    pub fn terms(&self) -> &[(Unit, Exponent)] {
        &self.terms
    }
}

impl PartialEq for ProductUnit {
    /// Terms form a multiset; order does not matter.
    fn eq(&self, other: &Self) -> bool {
        self.terms.len() == other.terms.len()
            && self.terms.iter().all(|term| other.terms.contains(term))
    }
}

impl PartialEq for UnitKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                UnitKind::Base { symbol: a, dimension: da },
                UnitKind::Base { symbol: b, dimension: db },
            ) => a == b && da == db,
            (
                UnitKind::Transformed { parent: pa, converter: ca, symbol: sa, .. },
                UnitKind::Transformed { parent: pb, converter: cb, symbol: sb, .. },
            ) => pa == pb && ca == cb && sa == sb,
            (
                UnitKind::Alternate { symbol: a, parent: pa },
                UnitKind::Alternate { symbol: b, parent: pb },
            ) => a == b && pa == pb,
            (UnitKind::Product(a), UnitKind::Product(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for UnitKind {}

impl Unit {
    fn from_kind(kind: UnitKind) -> Unit {
        Unit { kind: Arc::new(kind) }
    }

    // ========== Construction ==========

    /// A base unit: its own system unit for `dimension`
    pub fn base(symbol: &str, dimension: Dimension) -> Unit {
        Self::from_kind(UnitKind::Base { symbol: symbol.to_string(), dimension })
    }

    /// The dimensionless unit: an empty product
    pub fn one() -> Unit {
        Self::from_kind(UnitKind::Product(ProductUnit {
            terms: Vec::new(),
            dimension: Dimension::dimensionless(),
        }))
    }

    /// Canonical product from merged terms: a single `x^1` term collapses
    /// to `x`, no terms collapse to `one()`.
    fn product(terms: Vec<(Unit, Exponent)>, dimension: Dimension) -> Unit {
        match terms.as_slice() {
            [] => Unit::one(),
            [(unit, exp)] if exp.is_one() => unit.clone(),
            _ => Self::from_kind(UnitKind::Product(ProductUnit { terms, dimension })),
        }
    }

    /// A unit derived from this one; `converter` maps the new unit's values
    /// into this unit's values. Unnamed transformed units flatten onto their
    /// parent.
    pub fn transform(&self, converter: Converter) -> Unit {
        self.transform_with(converter, None)
    }

    fn transform_with(&self, converter: Converter, prefix: Option<MetricPrefix>) -> Unit {
        if converter.is_identity() && prefix.is_none() {
            return self.clone();
        }
        match self.kind() {
            // a prefix is named against its immediate parent
            UnitKind::Transformed { symbol: Some(_), .. } if prefix.is_some() => {
                self.derive(converter, prefix)
            }
            // flattening loses the parent a prefix would be named against
            UnitKind::Transformed { parent, converter: inner, .. } => {
                let flattened = inner.concatenate(&converter);
                if flattened.is_identity() {
                    parent.clone()
                } else {
                    parent.derive(flattened, None)
                }
            }
            _ => self.derive(converter, prefix),
        }
    }

    fn derive(&self, converter: Converter, prefix: Option<MetricPrefix>) -> Unit {
        Self::from_kind(UnitKind::Transformed {
            parent: self.clone(),
            converter,
            prefix,
            symbol: None,
        })
    }

    /// `new = this + offset`, e.g. kelvin.shift(273.15) is Celsius.
    pub fn shift(&self, offset: Ratio) -> Unit {
        self.transform(Converter::from_offset(offset))
    }

    /// `new = this * factor`, e.g. metre.scale(1/100) is the centimetre.
    pub fn scale(&self, factor: Ratio) -> Result<Unit, UnitError> {
        Ok(self.transform(Converter::from_factor(factor)?))
    }

    /// This unit scaled by a metric prefix and named `prefix:name`.
    ///
    /// Prefixing an unnamed transformed unit folds the prefix factor into
    /// its converter and drops the prefix from the name.
    pub fn prefixed(&self, prefix: MetricPrefix) -> Unit {
        // from_factor only fails on zero; prefix factors are powers of ten
        let converter = Converter::from_factor(prefix.factor()).unwrap_or_default();
        self.transform_with(converter, Some(prefix))
    }

    /// A new name for this unit, with no numeric effect.
    /// Alternates of alternates point at the ultimate non-alternate parent.
    pub fn alternate(&self, symbol: &str) -> Unit {
        let parent = match self.kind() {
            UnitKind::Alternate { parent, .. } => parent.clone(),
            _ => self.clone(),
        };
        Self::from_kind(UnitKind::Alternate { symbol: symbol.to_string(), parent })
    }

    /// This unit under an explicit symbol. Products become alternate units.
    pub fn named(&self, symbol: &str) -> Unit {
        match self.kind() {
            UnitKind::Base { dimension, .. } => Unit::base(symbol, dimension.clone()),
            UnitKind::Transformed { parent, converter, prefix, .. } => {
                Self::from_kind(UnitKind::Transformed {
                    parent: parent.clone(),
                    converter: converter.clone(),
                    prefix: *prefix,
                    symbol: Some(symbol.to_string()),
                })
            }
            UnitKind::Alternate { .. } | UnitKind::Product(_) => self.alternate(symbol),
        }
    }

    // ========== Inspection ==========

    /// The variant behind this handle
    pub fn kind(&self) -> &UnitKind {
        &self.kind
    }

    /// Explicit symbol, if the unit has one
    pub fn symbol(&self) -> Option<&str> {
        match self.kind() {
            UnitKind::Base { symbol, .. } | UnitKind::Alternate { symbol, .. } => Some(symbol),
            UnitKind::Transformed { symbol, .. } => symbol.as_deref(),
            UnitKind::Product(_) => None,
        }
    }

    /// Name in the unit naming grammar; synthesized when there is no symbol.
    ///
    /// An unnamed transformed unit is written `parent[converter]`, with a
    /// compound parent in brackets: `m[x * 3]`, `[m/s][x * 3]`.
    pub fn name(&self) -> String {
        if let Some(symbol) = self.symbol() {
            return symbol.to_string();
        }
        match self.kind() {
            UnitKind::Transformed { parent, prefix: Some(prefix), .. } => {
                format!("{}:{}", prefix.symbol(), parent.term_symbol())
            }
            UnitKind::Transformed { parent, converter, .. } => {
                format!("{}[{}]", parent.term_symbol(), converter)
            }
            _ => self.unit_name().to_string(),
        }
    }

    /// The name as one grammar symbol: compound names go in brackets.
    fn term_symbol(&self) -> String {
        match self.kind() {
            UnitKind::Product(product) if !product.terms.is_empty() => format!("[{}]", self.name()),
            _ => self.name(),
        }
    }

    /// Structured name: one term per product term
    pub fn unit_name(&self) -> UnitName {
        match self.kind() {
            UnitKind::Product(product) => UnitName::from_terms(
                product.terms.iter().map(|(unit, exp)| unit.name_term(*exp)),
            ),
            _ => UnitName::from_terms([self.name_term(Exponent::ONE)]),
        }
    }

    fn name_term(&self, exponent: Exponent) -> NameTerm {
        match self.kind() {
            UnitKind::Transformed { parent, prefix: Some(prefix), symbol: None, .. } => {
                NameTerm::new(Some(prefix.symbol()), &parent.term_symbol(), exponent)
            }
            _ => NameTerm::new(None, &self.name(), exponent),
        }
    }

    /// Dimension of this unit, inherited through transforms and alternates
    pub fn dimension(&self) -> &Dimension {
        match self.kind() {
            UnitKind::Base { dimension, .. } => dimension,
            UnitKind::Transformed { parent, .. } | UnitKind::Alternate { parent, .. } => {
                parent.dimension()
            }
            UnitKind::Product(product) => &product.dimension,
        }
    }

    /// True when the dimension has no exponents
    pub fn is_dimensionless(&self) -> bool {
        self.dimension().is_dimensionless()
    }

    /// Equal dimensions, or equal base-symbol exponent maps
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension().is_compatible(other.dimension())
    }

    /// Term list used by the product algebra; alternates extract through
    /// to their parent.
    fn terms(&self) -> Vec<(Unit, Exponent)> {
        match self.kind() {
            UnitKind::Product(product) => product.terms.clone(),
            UnitKind::Alternate { parent, .. } => parent.terms(),
            _ => vec![(self.clone(), Exponent::ONE)],
        }
    }

    /// The system base units this unit is built on, with their exponents
    pub fn base_units(&self) -> Result<Vec<(Unit, Exponent)>, UnitError> {
        Ok(self.system_unit()?.terms())
    }

    /// Canonical representative for this unit's dimension
    pub fn system_unit(&self) -> Result<Unit, UnitError> {
        match self.kind() {
            UnitKind::Base { .. } => Ok(self.clone()),
            UnitKind::Transformed { parent, .. } | UnitKind::Alternate { parent, .. } => {
                parent.system_unit()
            }
            UnitKind::Product(product) => {
                let overflow = || UnitError::ExponentOverflow(format!("system unit of {}", self));
                let mut terms: Vec<(Unit, Exponent)> = Vec::new();
                for (unit, exp) in &product.terms {
                    let system_terms = unit.system_unit()?
                        .terms()
                        .into_iter()
                        .map(|(u, e)| Some((u, e.checked_times(exp)?)))
                        .collect::<Option<Vec<(Unit, Exponent)>>>()
                        .ok_or_else(overflow)?;
                    terms = terms::merge(&terms, &system_terms).ok_or_else(overflow)?;
                }
                Ok(Self::product(terms, product.dimension.clone()))
            }
        }
    }

    /// Converter from this unit into its system unit
    pub fn system_converter(&self) -> Result<Converter, UnitError> {
        match self.kind() {
            UnitKind::Base { .. } => Ok(Converter::Identity),
            UnitKind::Transformed { parent, converter, .. } => {
                Ok(parent.system_converter()?.concatenate(converter))
            }
            UnitKind::Alternate { parent, .. } => parent.system_converter(),
            UnitKind::Product(product) => {
                let mut converter = Converter::Identity;
                for (unit, exp) in &product.terms {
                    let term_converter = unit.system_converter()?;
                    if !term_converter.is_linear() {
                        return Err(UnitError::NonLinearConverter(unit.name()));
                    }
                    if !exp.is_integer() {
                        return Err(UnitError::FractionalBaseExponent(format!("{}^{}", unit.name(), exp)));
                    }
                    converter = converter.concatenate(&term_converter.pow(exp.pow())?);
                }
                Ok(converter)
            }
        }
    }

    // ========== Algebra ==========
    //
    // Exponents are i32 fractions; an operation whose result leaves that
    // range fails with `ExponentOverflow`.

    /// Canonical product: same-unit terms merge and zero exponents drop.
    pub fn multiply(&self, other: &Unit) -> Result<Unit, UnitError> {
        let merged = terms::merge(&self.terms(), &other.terms())
            .ok_or_else(|| UnitError::ExponentOverflow(format!("{} * {}", self, other)))?;
        Ok(Self::product(merged, self.dimension().multiply(other.dimension())?))
    }

    /// `self * other^-1`
    pub fn divide(&self, other: &Unit) -> Result<Unit, UnitError> {
        let inverted: Vec<(Unit, Exponent)> = other.terms()
            .into_iter()
            .map(|(unit, exp)| (unit, exp.negate()))
            .collect();
        let merged = terms::merge(&self.terms(), &inverted)
            .ok_or_else(|| UnitError::ExponentOverflow(format!("{} / {}", self, other)))?;
        Ok(Self::product(merged, self.dimension().divide(other.dimension())?))
    }

    /// `one / self`
    pub fn inverse(&self) -> Result<Unit, UnitError> {
        Unit::one().divide(self)
    }

    /// `self^n`; zero gives `one()` and a negative `n` gives `one / self^-n`.
    pub fn pow(&self, n: i32) -> Result<Unit, UnitError> {
        if n == 0 {
            return Ok(Unit::one());
        }
        let terms = terms::map_exponents(&self.terms(), |e| e.checked_times_int(n))
            .ok_or_else(|| UnitError::ExponentOverflow(format!("({})^{}", self, n)))?;
        Ok(Self::product(terms, self.dimension().pow(n)?))
    }

    /// `self^(1/n)`; a negative `n` gives `one / self^(1/-n)`.
    pub fn root(&self, n: i32) -> Result<Unit, UnitError> {
        if n == 0 {
            return Err(UnitError::ZeroRootOrder);
        }
        let dimension = self.dimension().root(n)?;
        let terms = terms::map_exponents(&self.terms(), |e| e.checked_nth_root(n))
            .ok_or_else(|| UnitError::ExponentOverflow(format!("({})^(1/{})", self, n)))?;
        Ok(Self::product(terms, dimension))
    }

    // ========== Conversion ==========

    /// Converter taking values of this unit into `other`.
    ///
    /// Fails with `Unconvertible` (wrapping `Incommensurable`) when the
    /// dimensions are not compatible.
    pub fn get_converter_to(&self, other: &Unit) -> Result<Converter, UnitError> {
        if self == other {
            return Ok(Converter::Identity);
        }

        if !self.is_compatible(other) {
            return Err(UnitError::Unconvertible {
                from: self.name(),
                to: other.name(),
                source: Box::new(UnitError::Incommensurable {
                    from: self.name(),
                    to: other.name(),
                    from_dim: self.dimension().to_string(),
                    to_dim: other.dimension().to_string(),
                }),
            });
        }

        if self.system_unit()? != other.system_unit()? {
            tracing::trace!(
                from = %self,
                to = %other,
                "converting across distinct system units of compatible dimension"
            );
        }
        Ok(other.system_converter()?.inverse().concatenate(&self.system_converter()?))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mensura_core::{ratio, Number};
    use crate::BaseDimension;

    fn meter() -> Unit {
        Unit::base("m", Dimension::length())
    }

    fn second() -> Unit {
        Unit::base("s", Dimension::time())
    }

    fn kilogram() -> Unit {
        Unit::base("kg", Dimension::mass())
    }

    fn gram() -> Unit {
        kilogram().scale(ratio(1, 1000).unwrap()).unwrap().named("g")
    }

    fn kilometer() -> Unit {
        meter().prefixed(MetricPrefix::Kilo)
    }

    fn centimeter() -> Unit {
        meter().prefixed(MetricPrefix::Centi)
    }

    fn kelvin() -> Unit {
        Unit::base("K", Dimension::temperature())
    }

    fn newton_parent() -> Unit {
        kilogram().multiply(&meter()).unwrap().divide(&second().pow(2).unwrap()).unwrap()
    }

    #[test]
    fn test_base_unit_is_its_own_system_unit() {
        assert_eq!(meter().system_unit().unwrap(), meter());
        assert_eq!(meter().system_converter().unwrap(), Converter::Identity);
    }

    #[test]
    fn test_product_canonicalization() {
        let m = meter();
        assert_eq!(m.multiply(&m).unwrap(), m.pow(2).unwrap());
        assert_eq!(m.pow(2).unwrap().root(2).unwrap(), m);
        assert_eq!(m.divide(&m).unwrap(), Unit::one());
        assert!(m.divide(&m).unwrap().is_dimensionless());
    }

    #[test]
    fn test_product_equality_ignores_term_order() {
        let a = meter().multiply(&second()).unwrap();
        let b = second().multiply(&meter()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_negative_pow_and_root() {
        let per_second = second().pow(-1).unwrap();
        assert_eq!(per_second, second().inverse().unwrap());
        assert_eq!(per_second.name(), "1/s");
        assert_eq!(meter().pow(-2).unwrap().root(-2).unwrap(), meter());
        assert_eq!(meter().pow(0).unwrap(), Unit::one());
        assert_eq!(meter().root(0), Err(UnitError::ZeroRootOrder));
    }

    #[test]
    fn test_root_of_odd_power_fails() {
        assert!(matches!(meter().root(2), Err(UnitError::NonIntegerRoot { .. })));
    }

    #[test]
    fn test_extreme_exponents_fail_instead_of_overflowing() {
        assert!(matches!(meter().pow(i32::MIN), Err(UnitError::ExponentOverflow(_))));
        assert!(matches!(meter().root(i32::MIN), Err(UnitError::NonIntegerRoot { .. })));
        assert!(matches!(newton_parent().pow(i32::MAX), Err(UnitError::ExponentOverflow(_))));

        let huge = meter().pow(i32::MAX).unwrap();
        assert!(matches!(huge.multiply(&meter()), Err(UnitError::ExponentOverflow(_))));
        assert_eq!(huge.divide(&meter()).unwrap(), meter().pow(i32::MAX - 1).unwrap());
    }

    #[test]
    fn test_compound_names() {
        let velocity = kilometer().divide(&second().pow(2).unwrap()).unwrap();
        assert_eq!(velocity.name(), "k:m/s^2");
        assert_eq!(newton_parent().name(), "kg*m/s^2");
    }

    #[test]
    fn test_prefix_is_named_against_its_parent() {
        let milligram = gram().prefixed(MetricPrefix::Milli);
        assert_eq!(milligram.name(), "m:g");
        assert_ne!(milligram.name(), kilogram().prefixed(MetricPrefix::Milli).name());

        let c = milligram.get_converter_to(&kilogram()).unwrap();
        assert_eq!(c, Converter::from_factor(ratio(1, 1_000_000).unwrap()).unwrap());
        assert_eq!(milligram.system_unit().unwrap(), kilogram());
    }

    #[test]
    fn test_prefix_on_unnamed_transform_folds_into_converter() {
        let unnamed = meter().scale(ratio(3, 1).unwrap()).unwrap();
        let prefixed = unnamed.prefixed(MetricPrefix::Kilo);
        assert_eq!(prefixed.name(), "m[x * 3000]");
        assert_eq!(kilometer().prefixed(MetricPrefix::Milli), meter());
    }

    #[test]
    fn test_synthesized_names_are_single_symbols() {
        let tripled = meter().scale(ratio(3, 1).unwrap()).unwrap();
        assert_eq!(tripled.name(), "m[x * 3]");

        let per_tripled = second().divide(&tripled).unwrap();
        assert_eq!(per_tripled.name(), "s/m[x * 3]");

        let velocity = meter().divide(&second()).unwrap();
        assert_eq!(velocity.prefixed(MetricPrefix::Kilo).name(), "k:[m/s]");
        assert_eq!(velocity.scale(ratio(2, 1).unwrap()).unwrap().name(), "[m/s][x * 2]");
    }

    #[test]
    fn test_compatibility() {
        assert!(kilometer().is_compatible(&meter()));
        assert!(!meter().is_compatible(&second()));
    }

    #[test]
    fn test_transformed_chain_flattens() {
        let a = meter().scale(ratio(10, 1).unwrap()).unwrap().scale(ratio(100, 1).unwrap()).unwrap();
        assert_eq!(a, kilometer());
        assert_eq!(a.system_unit().unwrap(), meter());
    }

    #[test]
    fn test_converter_between_prefixed_units() {
        let c = meter().get_converter_to(&centimeter()).unwrap();
        assert_eq!(c, Converter::from_factor(ratio(100, 1).unwrap()).unwrap());
        let v = c.convert(&Number::from_str("1.5").unwrap()).unwrap();
        assert_eq!(v, Number::from_i64(150));
    }

    #[test]
    fn test_incommensurable_surfaces_as_unconvertible() {
        let err = meter().get_converter_to(&second()).unwrap_err();
        match err {
            UnitError::Unconvertible { source, .. } => {
                assert!(matches!(*source, UnitError::Incommensurable { .. }));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_alternate_flattens_and_delegates() {
        let newton = newton_parent().alternate("N");
        let renamed = newton.alternate("newton");
        match renamed.kind() {
            UnitKind::Alternate { parent, .. } => assert_eq!(parent, &newton_parent()),
            _ => panic!("expected alternate"),
        }
        assert_eq!(newton.dimension(), &Dimension::force());
        assert_eq!(newton.system_unit().unwrap(), newton_parent());
        assert_eq!(newton.get_converter_to(&newton_parent()).unwrap(), Converter::Identity);
    }

    #[test]
    fn test_product_system_converter() {
        let hour = second().scale(ratio(3600, 1).unwrap()).unwrap();
        let km_per_h = kilometer().divide(&hour).unwrap();
        let c = km_per_h.get_converter_to(&meter().divide(&second()).unwrap()).unwrap();
        let v = c.convert(&<Ratio as mensura_core::NumericAdapter>::from_i64(36)).unwrap();
        assert_eq!(v, ratio(10, 1).unwrap());
    }

    #[test]
    fn test_product_of_offset_unit_is_non_linear() {
        let celsius = kelvin().shift(ratio(27315, 100).unwrap());
        let per_celsius = meter().divide(&celsius).unwrap();
        assert!(matches!(per_celsius.system_converter(), Err(UnitError::NonLinearConverter(_))));
    }

    #[test]
    fn test_fractional_exponent_on_transformed_unit() {
        let km2 = kilometer().pow(2).unwrap();
        let km = km2.root(2).unwrap();
        assert_eq!(km, kilometer());

        let ratio_unit = Unit::base("u", Dimension::dimensionless());
        let rooted = km2.multiply(&ratio_unit).unwrap().root(2).unwrap();
        assert_eq!(rooted.dimension(), &Dimension::length());
        assert!(matches!(rooted.system_converter(), Err(UnitError::FractionalBaseExponent(_))));
    }

    #[test]
    fn test_compatible_across_independent_dimensions() {
        let foreign = Unit::base("L", Dimension::of(BaseDimension::Other("L".to_string())));
        assert!(foreign.is_compatible(&meter()));
        let c = foreign.get_converter_to(&meter()).unwrap();
        assert!(c.is_identity());
    }

    #[test]
    fn test_named_transformed_is_distinct() {
        let km = kilometer().named("km");
        assert_eq!(km.name(), "km");
        assert_ne!(km, kilometer());
        assert_eq!(km.get_converter_to(&kilometer()).unwrap(), Converter::Identity);
    }
}
