//! Record types for the element database.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::quantity::Quantity;

/// Proton count identifying an element. Zero is the free neutron.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AtomicNumber(pub u32);

impl fmt::Display for AtomicNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for AtomicNumber {
    fn from(n: u32) -> AtomicNumber {
        AtomicNumber(n)
    }
}

/// Database citations: a single reference or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Citations {
    One(String),
    Many(Vec<String>),
}

/// One entry of the backing file: a canonical element or one of its isotopes.
///
/// Masses and half-lives are textual quantity expressions in the file
/// ("12.011 u", "5730 yr"); an absent or empty expression stays `None` and
/// is never defaulted to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub atomic_number: AtomicNumber,
    pub symbol: String,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub atomic_mass: Option<Quantity>,
    pub is_isotope: bool,
    #[serde(default)]
    pub is_isotope_stable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_number: Option<u32>,
    pub num_neutrons: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isotopic_abundance: Option<f64>,
    #[serde(
        default,
        deserialize_with = "opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub half_life: Option<Quantity>,
}

impl ElementRecord {
    /// Symbol prefix before any "-MassNumber" suffix ("C-14" yields "C").
    pub fn bare_symbol(&self) -> &str {
        prefix(&self.symbol)
    }

    /// Name prefix before any "-MassNumber" suffix ("carbon-14" yields "carbon").
    pub fn bare_name(&self) -> &str {
        prefix(&self.name)
    }
}

fn prefix(s: &str) -> &str {
    s.split_once('-').map_or(s, |(head, _)| head)
}

// The file marks an absent quantity as null, a missing key, or "".
fn opt_quantity<'de, D>(deserializer: D) -> Result<Option<Quantity>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = Option::<String>::deserialize(deserializer)?;
    match text.as_deref() {
        None | Some("") => Ok(None),
        Some(expr) => expr.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
