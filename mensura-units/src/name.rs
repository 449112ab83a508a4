//! Unit naming grammar
//!
//! Compound unit names encode their term structure: `k:m*s^2/kg^(1/2)`.
//! Formatting layers parse names back into terms to build localized text.
//! Parsing yields structure only; it never resolves symbols to units.

use std::fmt;

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::terms::Exponent;
use crate::UnitError;

#[derive(Parser)]
#[grammar = "name.pest"]
struct NameParser;

/// One `prefix:symbol^exponent` term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTerm {
    /// Metric prefix symbol, written before a `:`
    pub prefix: Option<String>,
    /// Unit symbol; may contain a bracketed section such as `m[x * 3]`
    pub symbol: String,
    /// Signed exponent; `UnitName` stores denominator terms positive
    pub exponent: Exponent,
}

impl NameTerm {
    /// Build a term from borrowed parts
    pub fn new(prefix: Option<&str>, symbol: &str, exponent: Exponent) -> Self {
        NameTerm {
            prefix: prefix.map(|p| p.to_string()),
            symbol: symbol.to_string(),
            exponent,
        }
    }
}

impl fmt::Display for NameTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref prefix) = self.prefix {
            write!(f, "{}:", prefix)?;
        }
        write!(f, "{}", self.symbol)?;
        if !self.exponent.is_one() {
            write!(f, "^{}", self.exponent)?;
        }
        Ok(())
    }
}

/// A unit name split into numerator and denominator terms. Denominator
/// exponents are stored positive, as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitName {
    /// Terms before the `/`
    pub numerator: Vec<NameTerm>,
    /// Terms after the `/`, with positive exponents
    pub denominator: Vec<NameTerm>,
}

impl UnitName {
    /// Build from terms with signed exponents; negative ones move to the
    /// denominator.
    pub fn from_terms<I: IntoIterator<Item = NameTerm>>(terms: I) -> Self {
        let mut name = UnitName::default();
        for term in terms {
            if term.exponent.pow() < 0 {
                name.denominator.push(NameTerm { exponent: term.exponent.negate(), ..term });
            } else {
                name.numerator.push(term);
            }
        }
        name
    }

    /// All terms with signed exponents
    pub fn terms(&self) -> Vec<NameTerm> {
        self.numerator.iter().cloned()
            .chain(self.denominator.iter().map(|t| NameTerm { exponent: t.exponent.negate(), ..t.clone() }))
            .collect()
    }

    /// True for the dimensionless name `1`
    pub fn is_one(&self) -> bool {
        self.numerator.is_empty() && self.denominator.is_empty()
    }

    /// Parse a name into its terms. Fails with `Malformed` when the text
    /// does not follow the grammar.
    pub fn parse(input: &str) -> Result<UnitName, UnitError> {
        let malformed = |detail: String| UnitError::Malformed(format!("unit name '{}': {}", input, detail));

        let root = NameParser::parse(Rule::name, input)
            .map_err(|e| malformed(e.to_string()))?
            .next()
            .ok_or_else(|| malformed("empty".to_string()))?;

        let mut name = UnitName::default();
        for pair in root.into_inner() {
            match pair.as_rule() {
                Rule::numerator => name.numerator = build_terms(pair).map_err(malformed)?,
                Rule::denominator => name.denominator = build_terms(pair).map_err(malformed)?,
                _ => {}
            }
        }
        Ok(name)
    }
}

fn build_terms(pair: Pair<'_, Rule>) -> Result<Vec<NameTerm>, String> {
    pair.into_inner().map(build_term).collect()
}

fn build_term(pair: Pair<'_, Rule>) -> Result<NameTerm, String> {
    let mut prefix = None;
    let mut symbol = String::new();
    let mut exponent = Exponent::ONE;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::prefix => prefix = Some(inner.as_str().to_string()),
            Rule::symbol => symbol = inner.as_str().to_string(),
            Rule::exponent => exponent = build_exponent(inner)?,
            _ => {}
        }
    }

    Ok(NameTerm { prefix, symbol, exponent })
}

fn build_exponent(pair: Pair<'_, Rule>) -> Result<Exponent, String> {
    let parts = pair.into_inner()
        .map(|p| p.as_str().parse::<i32>().map_err(|e| format!("exponent {}: {}", p.as_str(), e)))
        .collect::<Result<Vec<i32>, String>>()?;

    match parts.as_slice() {
        [pow] => Exponent::integer(*pow).ok_or_else(|| format!("exponent {} out of range", pow)),
        [_, 0] => Err("exponent root cannot be zero".to_string()),
        [pow, root] => Exponent::new(*pow, *root)
            .ok_or_else(|| format!("exponent ({}/{}) out of range", pow, root)),
        _ => Err("bad exponent".to_string()),
    }
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |terms: &[NameTerm]| {
            terms.iter().map(|t| t.to_string()).collect::<Vec<_>>().join("*")
        };

        if self.numerator.is_empty() {
            write!(f, "1")?;
        } else {
            write!(f, "{}", join(&self.numerator))?;
        }
        if !self.denominator.is_empty() {
            write!(f, "/{}", join(&self.denominator))?;
        }
        Ok(())
    }
}
