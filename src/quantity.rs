//! Textual physical quantities ("12.011 u", "5730 yr").
//!
//! The backing file stores masses and half-lives as quantity expressions.
//! A [`Quantity`] keeps the parsed magnitude together with its unit text;
//! no unit algebra is performed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DatabaseError, Result};

/// A magnitude attached to a unit string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
}

impl Quantity {
    pub fn new(value: f64, unit: impl Into<String>) -> Quantity {
        Quantity {
            value,
            unit: unit.into(),
        }
    }
}

impl FromStr for Quantity {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Quantity> {
        let text = s.trim();
        let (number, unit) = text
            .split_once(char::is_whitespace)
            .ok_or_else(|| DatabaseError::Parse(format!("quantity {text:?} has no unit")))?;
        let value = number
            .parse::<f64>()
            .map_err(|e| DatabaseError::Parse(format!("bad magnitude in {text:?}: {e}")))?;
        let unit = unit.trim();
        if unit.is_empty() {
            return Err(DatabaseError::Parse(format!("quantity {text:?} has no unit")));
        }
        Ok(Quantity::new(value, unit))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

impl TryFrom<String> for Quantity {
    type Error = DatabaseError;

    fn try_from(s: String) -> Result<Quantity> {
        s.parse()
    }
}

impl From<Quantity> for String {
    fn from(q: Quantity) -> String {
        q.to_string()
    }
}
