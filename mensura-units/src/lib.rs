//! Mensura Units - Unit-of-measure algebra
//!
//! Provides dimension-checked quantities with exact conversions between
//! units, and ladder decomposition of a quantity into descending units.
//!
//! Building blocks, leaves first:
//! - `Dimension`: sparse exponent map over base dimensions
//! - `Converter`: affine transforms (offset, factor) with symbolic composition
//! - `Unit`: base, transformed, alternate and product units
//! - `SystemOfUnits`: immutable registry built once through `SystemBuilder`
//! - `Quantity`: value, unit and scale, generic over `NumericAdapter`
//! - `QuantityDecomposer`: e.g. 1.25 m into 1 m + 25 cm
//!
//! Standard systems:
//! - `si::system()`: SI base and derived units, prefixed and imperial units,
//!   Celsius/Fahrenheit/Rankine
//! - `currency::system(base, rates)`: exchange-rate units over a currency
//!   dimension

mod error;
mod dimension;
mod converter;
mod terms;
mod prefix;
mod name;
mod unit;
mod system;
mod quantity;
mod decompose;

pub mod si;
pub mod currency;

pub use error::UnitError;
pub use dimension::{BaseDimension, Dimension};
pub use converter::Converter;
pub use terms::{gcd, merge, Exponent};
pub use prefix::MetricPrefix;
pub use name::{NameTerm, UnitName};
pub use unit::{ProductUnit, Unit, UnitKind};
pub use system::{QuantityKind, SystemBuilder, SystemOfUnits};
pub use quantity::{Quantity, Scale};
pub use decompose::QuantityDecomposer;

pub use mensura_core::{Number, NumberError, NumericAdapter, Ratio};
