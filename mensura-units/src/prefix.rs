//! SI metric prefixes

use std::fmt;
use serde::{Serialize, Deserialize};
use mensura_core::{IBig, Ratio};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricPrefix {
    Yotta,
    Zetta,
    Exa,
    Peta,
    Tera,
    Giga,
    Mega,
    Kilo,
    Hecto,
    Deka,
    Deci,
    Centi,
    Milli,
    Micro,
    Nano,
    Pico,
    Femto,
    Atto,
    Zepto,
    Yocto,
}

impl MetricPrefix {
    /// Symbol written before the `:` in unit names
    pub fn symbol(&self) -> &'static str {
        match self {
            MetricPrefix::Yotta => "Y",
            MetricPrefix::Zetta => "Z",
            MetricPrefix::Exa => "E",
            MetricPrefix::Peta => "P",
            MetricPrefix::Tera => "T",
            MetricPrefix::Giga => "G",
            MetricPrefix::Mega => "M",
            MetricPrefix::Kilo => "k",
            MetricPrefix::Hecto => "h",
            MetricPrefix::Deka => "da",
            MetricPrefix::Deci => "d",
            MetricPrefix::Centi => "c",
            MetricPrefix::Milli => "m",
            MetricPrefix::Micro => "µ",
            MetricPrefix::Nano => "n",
            MetricPrefix::Pico => "p",
            MetricPrefix::Femto => "f",
            MetricPrefix::Atto => "a",
            MetricPrefix::Zepto => "z",
            MetricPrefix::Yocto => "y",
        }
    }

    /// Power of ten this prefix stands for
    pub fn exponent(&self) -> i32 {
        match self {
            MetricPrefix::Yotta => 24,
            MetricPrefix::Zetta => 21,
            MetricPrefix::Exa => 18,
            MetricPrefix::Peta => 15,
            MetricPrefix::Tera => 12,
            MetricPrefix::Giga => 9,
            MetricPrefix::Mega => 6,
            MetricPrefix::Kilo => 3,
            MetricPrefix::Hecto => 2,
            MetricPrefix::Deka => 1,
            MetricPrefix::Deci => -1,
            MetricPrefix::Centi => -2,
            MetricPrefix::Milli => -3,
            MetricPrefix::Micro => -6,
            MetricPrefix::Nano => -9,
            MetricPrefix::Pico => -12,
            MetricPrefix::Femto => -15,
            MetricPrefix::Atto => -18,
            MetricPrefix::Zepto => -21,
            MetricPrefix::Yocto => -24,
        }
    }

    /// Exact scale factor, e.g. 1/100 for centi
    pub fn factor(&self) -> Ratio {
        let magnitude = IBig::from(10u8).pow(self.exponent().unsigned_abs() as usize);
        if self.exponent() >= 0 {
            Ratio::from(magnitude)
        } else {
            Ratio::from_parts_signed(IBig::ONE, magnitude)
        }
    }

    /// Look a prefix up by its symbol
    pub fn from_symbol(symbol: &str) -> Option<MetricPrefix> {
        ALL.iter().copied().find(|p| p.symbol() == symbol)
    }
}

const ALL: [MetricPrefix; 20] = [
    MetricPrefix::Yotta,
    MetricPrefix::Zetta,
    MetricPrefix::Exa,
    MetricPrefix::Peta,
    MetricPrefix::Tera,
    MetricPrefix::Giga,
    MetricPrefix::Mega,
    MetricPrefix::Kilo,
    MetricPrefix::Hecto,
    MetricPrefix::Deka,
    MetricPrefix::Deci,
    MetricPrefix::Centi,
    MetricPrefix::Milli,
    MetricPrefix::Micro,
    MetricPrefix::Nano,
    MetricPrefix::Pico,
    MetricPrefix::Femto,
    MetricPrefix::Atto,
    MetricPrefix::Zepto,
    MetricPrefix::Yocto,
];

impl fmt::Display for MetricPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
