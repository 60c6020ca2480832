//! Lookup keys.
//!
//! Every textual key is parsed into a [`LookupKey`] before any record is
//! touched, so the resolver matches exhaustively over a tagged variant
//! instead of branching on runtime shapes.

use crate::atomic_data::AtomicNumber;
use crate::error::{DatabaseError, Result};

/// A parsed database key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    /// Canonical element by proton count.
    AtomicNumber(AtomicNumber),
    /// Isotope notation "Symbol-MassNumber" or "Name-MassNumber".
    IsotopeNotation { prefix: String, mass_number: u32 },
    /// Plain symbol or element name, disambiguated by length at match time.
    NameOrSymbol(String),
}

impl LookupKey {
    /// Parse a textual key. A dash marks isotope notation, split on the
    /// first dash only; the fragment after it must be an unsigned integer.
    pub fn parse(key: &str) -> Result<LookupKey> {
        match key.split_once('-') {
            Some((prefix, fragment)) => {
                let mass_number =
                    fragment
                        .parse::<u32>()
                        .map_err(|_| DatabaseError::MassNumber {
                            key: key.to_string(),
                            fragment: fragment.to_string(),
                        })?;
                Ok(LookupKey::IsotopeNotation {
                    prefix: prefix.to_string(),
                    mass_number,
                })
            }
            None => Ok(LookupKey::NameOrSymbol(key.to_string())),
        }
    }
}

impl From<u32> for LookupKey {
    fn from(n: u32) -> LookupKey {
        LookupKey::AtomicNumber(AtomicNumber(n))
    }
}

impl From<AtomicNumber> for LookupKey {
    fn from(n: AtomicNumber) -> LookupKey {
        LookupKey::AtomicNumber(n)
    }
}

/// How a key fragment probes the record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextKind {
    /// Case-sensitive symbol comparison.
    Symbol,
    /// Case-insensitive name comparison.
    Name,
}

/// Anything shorter than three characters is a symbol probe, everything
/// else a name probe. The boundary is exact: a two-character fragment never
/// matches a name, a longer one never matches a symbol.
pub(crate) fn classify(fragment: &str) -> TextKind {
    if fragment.len() < 3 {
        TextKind::Symbol
    } else {
        TextKind::Name
    }
}
