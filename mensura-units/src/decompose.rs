//! Ladder decomposition of a quantity into whole multiples of descending
//! units, e.g. 1.25 m into 1 m + 25 cm.

use std::cmp::Ordering;

use mensura_core::{NumericAdapter, Ratio};

use crate::{Quantity, Scale, Unit, UnitError};

/// An ordered ladder of mutually compatible units, largest first
#[derive(Debug, Clone)]
pub struct QuantityDecomposer {
    units: Vec<Unit>,
}

impl QuantityDecomposer {
    /// Build a ladder from `units` in any order. Equal units are kept once.
    pub fn new(units: &[Unit]) -> Result<Self, UnitError> {
        let reference = units.first()
            .ok_or_else(|| UnitError::Malformed("empty decomposition ladder".to_string()))?;

        let mut ladder: Vec<(Unit, Ratio)> = Vec::with_capacity(units.len());
        for unit in units {
            if !unit.is_compatible(reference) {
                return Err(incommensurable(unit, reference));
            }
            if ladder.iter().any(|(u, _)| u == unit) {
                continue;
            }
            // Size of one `unit` measured in `reference`
            let magnitude = unit.get_converter_to(reference)?
                .linear_part()
                .convert(&<Ratio as NumericAdapter>::one())?;
            ladder.push((unit.clone(), magnitude));
        }
        ladder.sort_by(|a, b| b.1.cmp(&a.1));

        let units: Vec<Unit> = ladder.into_iter().map(|(unit, _)| unit).collect();
        tracing::debug!(
            ladder = %units.iter().map(|u| u.name()).collect::<Vec<_>>().join(" > "),
            "built quantity decomposer"
        );
        Ok(QuantityDecomposer { units })
    }

    /// The ladder, largest unit first
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Break `quantity` into whole amounts of each unit but the smallest,
    /// which takes the exact remainder. Zero contributions are skipped.
    pub fn decompose<N: NumericAdapter>(&self, quantity: &Quantity<N>) -> Result<Vec<Quantity<N>>, UnitError> {
        if let Some(first) = self.units.first() {
            if !quantity.unit().is_compatible(first) {
                return Err(incommensurable(quantity.unit(), first));
            }
        }
        if quantity.value().is_negative() {
            return Err(UnitError::NegativeAmount(quantity.to_string()));
        }
        if quantity.value().is_zero() {
            return Ok(Vec::new());
        }

        let Some((smallest, larger)) = self.units.split_last() else {
            return Ok(Vec::new());
        };

        // Parts are amounts, not points, so the walk happens on the relative scale
        let mut remainder = quantity.with_scale(Scale::Relative);
        let mut parts = Vec::new();

        for unit in larger {
            let whole = remainder.to(unit)?.value().floor();
            if whole.compare(&N::zero()) == Ordering::Greater {
                let part = Quantity::relative(whole.clone(), unit.clone());
                remainder = remainder.subtract(&part)?;
                parts.push(Quantity::from_parts(whole, unit.clone(), quantity.scale()));
            }
        }

        let rest = remainder.to(smallest)?;
        if rest.value().compare(&N::zero()) == Ordering::Greater {
            parts.push(Quantity::from_parts(rest.value().clone(), smallest.clone(), quantity.scale()));
        }

        tracing::debug!(input = %quantity, parts = parts.len(), "decomposed quantity");
        Ok(parts)
    }
}

fn incommensurable(from: &Unit, to: &Unit) -> UnitError {
    UnitError::Incommensurable {
        from: from.name(),
        to: to.name(),
        from_dim: from.dimension().to_string(),
        to_dim: to.dimension().to_string(),
    }
}
