//! Derived lookup tables, built once from a loaded database.

use std::collections::HashMap;

use log::debug;
use once_cell::sync::OnceCell;

use crate::atomic_data::{AtomicNumber, ElementRecord};
use crate::database::ElementDatabase;
use crate::error::{DatabaseError, Result};
use crate::isotope::{self, Isotope};
use crate::quantity::Quantity;

static BUILTIN: OnceCell<PeriodicTable> = OnceCell::new();

/// Canonical per-element entry: the non-isotope representative of an
/// atomic number. The mass is omitted, not zeroed, when the source record
/// has none.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalElement {
    pub atomic_number: AtomicNumber,
    pub symbol: String,
    pub name: String,
    pub atomic_mass: Option<Quantity>,
}

/// Immutable snapshot of the derived index tables.
///
/// Built eagerly in one pass over the record store; there is no reload or
/// invalidation, a new dataset means a new snapshot.
#[derive(Debug, Clone)]
pub struct PeriodicTable {
    by_anum: Vec<ElementRecord>,
    name_to_symbol: HashMap<String, String>,
    elements: HashMap<String, CanonicalElement>,
    isotopes: HashMap<String, Isotope>,
    isotope_names: HashMap<String, String>,
}

impl PeriodicTable {
    /// Build every table from the database. The canonical pass walks the
    /// contiguous range `1..=max(atomic_number)`; a gap is an error, never
    /// a silently absent slot.
    pub fn from_database(db: &ElementDatabase) -> Result<PeriodicTable> {
        let max = db
            .records()
            .iter()
            .map(|r| r.atomic_number.0)
            .max()
            .unwrap_or(0);

        let mut by_anum = Vec::with_capacity(max as usize);
        let mut name_to_symbol = HashMap::new();
        let mut elements = HashMap::new();
        for n in 1..=max {
            let record = db
                .by_atomic_number(n)
                .map_err(|_| DatabaseError::MissingRecord(AtomicNumber(n)))?;
            name_to_symbol.insert(record.name.clone(), record.symbol.clone());
            elements.insert(
                record.symbol.clone(),
                CanonicalElement {
                    atomic_number: record.atomic_number,
                    symbol: record.symbol.clone(),
                    name: record.name.clone(),
                    atomic_mass: record.atomic_mass.clone(),
                },
            );
            by_anum.push(record.clone());
        }

        let mut isotopes = HashMap::new();
        let mut isotope_names = HashMap::new();
        for record in db.records().iter().filter(|r| r.is_isotope) {
            let symbol_key = isotope::symbol_key(record);
            let name_key = isotope::name_key(record);
            let iso = Isotope::from_record(record)?;
            isotope_names.insert(name_key, symbol_key.clone());
            isotopes.insert(symbol_key, iso);
        }

        debug!(
            "built periodic table: {} elements, {} isotopes",
            by_anum.len(),
            isotopes.len()
        );
        Ok(PeriodicTable {
            by_anum,
            name_to_symbol,
            elements,
            isotopes,
            isotope_names,
        })
    }

    /// Snapshot over the bundled default dataset, built once per process.
    pub fn builtin() -> Result<&'static PeriodicTable> {
        BUILTIN.get_or_try_init(|| PeriodicTable::from_database(ElementDatabase::builtin()?))
    }

    pub fn max_atom_num(&self) -> AtomicNumber {
        AtomicNumber(self.by_anum.len() as u32)
    }

    /// Full canonical record for an atomic number.
    pub fn record(&self, n: impl Into<AtomicNumber>) -> Option<&ElementRecord> {
        let n = n.into().0 as usize;
        n.checked_sub(1).and_then(|i| self.by_anum.get(i))
    }

    pub fn element_symbol(&self, n: impl Into<AtomicNumber>) -> Option<&str> {
        self.record(n).map(|r| r.symbol.as_str())
    }

    pub fn atomic_weight(&self, n: impl Into<AtomicNumber>) -> Option<&Quantity> {
        self.record(n).and_then(|r| r.atomic_mass.as_ref())
    }

    /// Symbol for an element name, as spelled in the data file.
    pub fn symbol_for_name(&self, name: &str) -> Option<&str> {
        self.name_to_symbol.get(name).map(String::as_str)
    }

    /// Canonical element entry by symbol.
    pub fn element(&self, symbol: &str) -> Option<&CanonicalElement> {
        self.elements.get(symbol)
    }

    /// Isotope by its canonical key ("C-14", or bare "n"/"D"/"T").
    pub fn isotope(&self, key: &str) -> Option<&Isotope> {
        self.isotopes.get(key)
    }

    /// Isotope by its name-based key ("carbon-14", "deuterium").
    pub fn isotope_by_name(&self, key: &str) -> Option<&Isotope> {
        self.isotope_names
            .get(key)
            .and_then(|symbol_key| self.isotopes.get(symbol_key))
    }

    pub fn isotopes(&self) -> impl Iterator<Item = (&str, &Isotope)> {
        self.isotopes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn elements(&self) -> impl Iterator<Item = &CanonicalElement> {
        self.elements.values()
    }
}
