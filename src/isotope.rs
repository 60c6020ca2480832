//! Derived isotope values and their canonical table keys.

use crate::atomic_data::{AtomicNumber, ElementRecord};
use crate::error::{DatabaseError, Result};
use crate::quantity::Quantity;

/// Isotope symbols that do not follow the "Symbol-MassNumber" convention
/// and are keyed bare: the free neutron, deuterium and tritium.
pub const NONCOMPLIANT_SYMBOLS: [&str; 3] = ["n", "D", "T"];

/// Physical data for a single isotope, as exposed by the isotope table.
#[derive(Debug, Clone, PartialEq)]
pub struct Isotope {
    pub name: String,
    pub atomic_number: AtomicNumber,
    pub mass_number: u32,
    pub atomic_mass: Quantity,
    pub is_stable: bool,
    pub isotopic_abundance: Option<f64>,
    pub half_life: Option<Quantity>,
}

impl Isotope {
    /// Build an isotope value. An abundance outside the closed interval
    /// [0, 1] is rejected; both endpoints are accepted.
    pub fn new(
        name: impl Into<String>,
        atomic_number: AtomicNumber,
        mass_number: u32,
        atomic_mass: Quantity,
        is_stable: bool,
        isotopic_abundance: Option<f64>,
        half_life: Option<Quantity>,
    ) -> Result<Isotope> {
        if let Some(abundance) = isotopic_abundance {
            if !(0.0..=1.0).contains(&abundance) {
                return Err(DatabaseError::AbundanceRange(abundance));
            }
        }
        Ok(Isotope {
            name: name.into(),
            atomic_number,
            mass_number,
            atomic_mass,
            is_stable,
            isotopic_abundance,
            half_life,
        })
    }

    /// Build from a raw isotope record. The mass is required here even
    /// though element records may omit theirs.
    pub fn from_record(record: &ElementRecord) -> Result<Isotope> {
        let mass_number = record.mass_number.ok_or_else(|| {
            DatabaseError::Parse(format!(
                "isotope record {:?} has no mass number",
                record.symbol
            ))
        })?;
        let atomic_mass = record
            .atomic_mass
            .clone()
            .ok_or_else(|| DatabaseError::MissingMass(record.symbol.clone()))?;
        Isotope::new(
            record.name.clone(),
            record.atomic_number,
            mass_number,
            atomic_mass,
            record.is_isotope_stable,
            record.isotopic_abundance,
            record.half_life.clone(),
        )
    }
}

/// Canonical symbol-based table key for an isotope record: the bare symbol
/// for n/D/T, "Symbol-MassNumber" otherwise.
pub fn symbol_key(record: &ElementRecord) -> String {
    key_for(record, &record.symbol, record.bare_symbol())
}

/// Name-based key, same rules over the record name.
pub fn name_key(record: &ElementRecord) -> String {
    key_for(record, &record.name, record.bare_name())
}

fn key_for(record: &ElementRecord, full: &str, bare: &str) -> String {
    if NONCOMPLIANT_SYMBOLS.contains(&record.bare_symbol()) {
        return bare.to_string();
    }
    // A record loaded with display names already carries the suffix.
    if full.contains('-') {
        return full.to_string();
    }
    match record.mass_number {
        Some(mass_number) => format!("{full}-{mass_number}"),
        None => full.to_string(),
    }
}
