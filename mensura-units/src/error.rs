//! Errors raised by the unit algebra

use mensura_core::NumberError;
use thiserror::Error;

/// Errors that can occur in dimension, unit, converter and quantity operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// Converter built from an operand it cannot carry (zero factor, unparseable literal)
    #[error("invalid operand: {0}")]
    InvalidOperand(String),

    #[error("cannot take root {order} of {value}: exponent {exponent} is not divisible")]
    NonIntegerRoot {
        value: String,
        order: i32,
        exponent: i32,
    },

    #[error("root order must be non-zero")]
    ZeroRootOrder,

    /// A power or root whose exponents leave the i32 range
    #[error("exponent out of range: {0}")]
    ExponentOverflow(String),

    #[error("{from} ({from_dim}) is incommensurable with {to} ({to_dim})")]
    Incommensurable {
        from: String,
        to: String,
        from_dim: String,
        to_dim: String,
    },

    #[error("cannot convert {from} to {to}")]
    Unconvertible {
        from: String,
        to: String,
        #[source]
        source: Box<UnitError>,
    },

    #[error("system converter of {0} is not linear")]
    NonLinearConverter(String),

    #[error("{0} carries a fractional exponent on a transformed unit")]
    FractionalBaseExponent(String),

    #[error("cannot decompose negative amount {0}")]
    NegativeAmount(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("duplicate unit: {0}")]
    DuplicateUnit(String),

    #[error("duplicate quantity kind: {0}")]
    DuplicateKind(String),

    #[error("malformed definition: {0}")]
    Malformed(String),

    #[error(transparent)]
    Number(#[from] NumberError),
}
