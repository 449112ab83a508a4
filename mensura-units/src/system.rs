//! Immutable registry of units, indexed by name and by quantity kind

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use crate::{Unit, UnitError};

/// A kind of quantity (length, force, currency, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuantityKind(Cow<'static, str>);

impl QuantityKind {
    /// Kinds the standard system binds; further kinds come from `new`
    pub const DIMENSIONLESS: QuantityKind = QuantityKind(Cow::Borrowed("Dimensionless"));
    pub const LENGTH: QuantityKind = QuantityKind(Cow::Borrowed("Length"));
    pub const MASS: QuantityKind = QuantityKind(Cow::Borrowed("Mass"));
    pub const TIME: QuantityKind = QuantityKind(Cow::Borrowed("Time"));
    pub const ELECTRIC_CURRENT: QuantityKind = QuantityKind(Cow::Borrowed("ElectricCurrent"));
    pub const TEMPERATURE: QuantityKind = QuantityKind(Cow::Borrowed("Temperature"));
    pub const AMOUNT_OF_SUBSTANCE: QuantityKind = QuantityKind(Cow::Borrowed("AmountOfSubstance"));
    pub const LUMINOUS_INTENSITY: QuantityKind = QuantityKind(Cow::Borrowed("LuminousIntensity"));
    pub const AREA: QuantityKind = QuantityKind(Cow::Borrowed("Area"));
    pub const VOLUME: QuantityKind = QuantityKind(Cow::Borrowed("Volume"));
    pub const SPEED: QuantityKind = QuantityKind(Cow::Borrowed("Speed"));
    pub const ACCELERATION: QuantityKind = QuantityKind(Cow::Borrowed("Acceleration"));
    pub const FORCE: QuantityKind = QuantityKind(Cow::Borrowed("Force"));
    pub const ENERGY: QuantityKind = QuantityKind(Cow::Borrowed("Energy"));
    pub const POWER: QuantityKind = QuantityKind(Cow::Borrowed("Power"));
    pub const PRESSURE: QuantityKind = QuantityKind(Cow::Borrowed("Pressure"));
    pub const FREQUENCY: QuantityKind = QuantityKind(Cow::Borrowed("Frequency"));
    pub const ELECTRIC_CHARGE: QuantityKind = QuantityKind(Cow::Borrowed("ElectricCharge"));
    pub const ELECTRIC_POTENTIAL: QuantityKind = QuantityKind(Cow::Borrowed("ElectricPotential"));
    pub const ELECTRIC_RESISTANCE: QuantityKind = QuantityKind(Cow::Borrowed("ElectricResistance"));
    pub const CURRENCY: QuantityKind = QuantityKind(Cow::Borrowed("Currency"));

    /// A kind outside the predefined set
    pub fn new(name: impl Into<String>) -> Self {
        QuantityKind(Cow::Owned(name.into()))
    }

    /// The kind's name, e.g. `Length`
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A built, read-only set of units
#[derive(Debug, Clone)]
pub struct SystemOfUnits {
    name: String,
    units: Vec<Unit>,
    by_name: HashMap<String, usize>,
    aliases: HashMap<String, usize>,
    by_kind: HashMap<QuantityKind, usize>,
}

impl SystemOfUnits {
    /// Start an empty builder for a system called `name`
    pub fn builder(name: &str) -> SystemBuilder {
        SystemBuilder {
            name: name.to_string(),
            units: Vec::new(),
            aliases: Vec::new(),
            kinds: Vec::new(),
        }
    }

    /// The system's name, e.g. `SI`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a unit by exact name or alias
    pub fn unit(&self, name: &str) -> Result<&Unit, UnitError> {
        self.by_name.get(name)
            .or_else(|| self.aliases.get(name))
            .map(|&i| &self.units[i])
            .ok_or_else(|| UnitError::NotFound(format!("unit '{}' in {}", name, self.name)))
    }

    /// Get the canonical unit for a quantity kind
    pub fn unit_for(&self, kind: &QuantityKind) -> Result<&Unit, UnitError> {
        self.by_kind.get(kind)
            .map(|&i| &self.units[i])
            .ok_or_else(|| UnitError::NotFound(format!("quantity kind '{}' in {}", kind, self.name)))
    }

    /// True for registered names and aliases
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name) || self.aliases.contains_key(name)
    }

    /// Units in registration order
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    /// Number of registered units
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// True for a system with no units
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Collects unit definitions; `build` validates them all at once.
#[derive(Debug, Clone)]
pub struct SystemBuilder {
    name: String,
    units: Vec<Unit>,
    aliases: Vec<(String, String)>,
    kinds: Vec<(QuantityKind, String)>,
}

impl SystemBuilder {
    /// Register `unit` under its name
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.units.push(unit);
        self
    }

    /// Register `unit` and make it the canonical unit for `kind`
    pub fn with_unit_for(mut self, kind: QuantityKind, unit: Unit) -> Self {
        self.kinds.push((kind, unit.name()));
        self.units.push(unit);
        self
    }

    /// Make an already registered unit the canonical unit for `kind`
    pub fn with_kind(mut self, kind: QuantityKind, unit_name: &str) -> Self {
        self.kinds.push((kind, unit_name.to_string()));
        self
    }

    /// Another exact name for a registered unit
    pub fn with_alias(mut self, alias: &str, unit_name: &str) -> Self {
        self.aliases.push((alias.to_string(), unit_name.to_string()));
        self
    }

    /// Validate and freeze the registry. Fails on empty or duplicate
    /// names, aliases or kinds that point at unknown units, and kinds bound
    /// twice.
    pub fn build(self) -> Result<SystemOfUnits, UnitError> {
        let mut by_name: HashMap<String, usize> = HashMap::new();
        for (i, unit) in self.units.iter().enumerate() {
            let name = unit.name();
            if name.trim().is_empty() {
                return Err(UnitError::Malformed(format!("unit with empty name in {}", self.name)));
            }
            if by_name.insert(name.clone(), i).is_some() {
                return Err(UnitError::DuplicateUnit(name));
            }
        }

        let mut aliases: HashMap<String, usize> = HashMap::new();
        for (alias, target) in &self.aliases {
            let index = *by_name.get(target).ok_or_else(|| {
                UnitError::Malformed(format!("alias '{}' refers to unknown unit '{}'", alias, target))
            })?;
            if alias.trim().is_empty() {
                return Err(UnitError::Malformed(format!("empty alias for '{}'", target)));
            }
            if by_name.contains_key(alias) || aliases.insert(alias.clone(), index).is_some() {
                return Err(UnitError::DuplicateUnit(alias.clone()));
            }
        }

        let mut by_kind: HashMap<QuantityKind, usize> = HashMap::new();
        for (kind, target) in &self.kinds {
            let index = *by_name.get(target).or_else(|| aliases.get(target)).ok_or_else(|| {
                UnitError::Malformed(format!("kind {} refers to unknown unit '{}'", kind, target))
            })?;
            if by_kind.insert(kind.clone(), index).is_some() {
                return Err(UnitError::DuplicateKind(kind.to_string()));
            }
        }

        tracing::debug!(
            system = %self.name,
            units = self.units.len(),
            aliases = aliases.len(),
            kinds = by_kind.len(),
            "built system of units"
        );

        Ok(SystemOfUnits {
            name: self.name,
            units: self.units,
            by_name,
            aliases,
            by_kind,
        })
    }
}
