//! The element database: loading, key resolution and export.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use log::{info, warn};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::atomic_data::{AtomicNumber, Citations, ElementRecord};
use crate::error::{DatabaseError, Result};
use crate::isotope::NONCOMPLIANT_SYMBOLS;
use crate::key::{classify, LookupKey, TextKind};

/// Fixed CSV column order.
const CSV_COLUMNS: [&str; 10] = [
    "atomic_number",
    "symbol",
    "name",
    "atomic_mass",
    "is_isotope",
    "is_isotope_stable",
    "mass_number",
    "num_neutrons",
    "isotopic_abundance",
    "half_life",
];

/// Bundled default dataset, same shape as any caller-supplied file.
const DEFAULT_JSON: &str = include_str!("../data/element_default.json");

static BUILTIN: OnceCell<ElementDatabase> = OnceCell::new();

/// Loader knobs, mirroring the database constructor parameters.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Run [`ElementDatabase::validate`] after loading.
    pub validate: bool,
    /// Append "-MassNumber" to the symbol and name of isotope records,
    /// except the noncompliant symbols n, D and T.
    pub use_isotope_name: bool,
}

impl Default for LoadOptions {
    fn default() -> LoadOptions {
        LoadOptions {
            validate: false,
            use_isotope_name: true,
        }
    }
}

/// Top-level shape of the backing file.
#[derive(Debug, Serialize, Deserialize)]
struct DatabaseFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    citations: Option<Citations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    compilation_date: Option<String>,
    data: Vec<ElementRecord>,
}

/// An immutable store of element and isotope records with key-based lookup.
///
/// Populated once at load time; no mutation path exists afterwards, so a
/// shared reference may be used freely across threads.
#[derive(Debug, Clone)]
pub struct ElementDatabase {
    citations: Option<Citations>,
    author: Option<String>,
    compilation_date: Option<String>,
    records: Vec<ElementRecord>,
}

impl ElementDatabase {
    /// Load a database file. Any I/O or parse failure propagates; the
    /// store is never silently left empty.
    pub fn load(path: impl AsRef<Path>) -> Result<ElementDatabase> {
        ElementDatabase::load_with(path, LoadOptions::default())
    }

    pub fn load_with(path: impl AsRef<Path>, options: LoadOptions) -> Result<ElementDatabase> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let parsed: DatabaseFile = serde_json::from_reader(BufReader::new(file))?;
        let db = ElementDatabase::from_file(parsed, options)?;
        info!("loaded {} records from {}", db.records.len(), path.display());
        Ok(db)
    }

    /// Parse a database from JSON text.
    pub fn from_json(text: &str) -> Result<ElementDatabase> {
        ElementDatabase::from_json_with(text, LoadOptions::default())
    }

    pub fn from_json_with(text: &str, options: LoadOptions) -> Result<ElementDatabase> {
        let parsed: DatabaseFile = serde_json::from_str(text)?;
        ElementDatabase::from_file(parsed, options)
    }

    /// The bundled default dataset, parsed once per process.
    pub fn builtin() -> Result<&'static ElementDatabase> {
        BUILTIN.get_or_try_init(|| ElementDatabase::from_json(DEFAULT_JSON))
    }

    fn from_file(parsed: DatabaseFile, options: LoadOptions) -> Result<ElementDatabase> {
        let mut records = parsed.data;
        if options.use_isotope_name {
            apply_isotope_names(&mut records);
        }
        let db = ElementDatabase {
            citations: parsed.citations,
            author: parsed.author,
            compilation_date: parsed.compilation_date,
            records,
        };
        if options.validate {
            db.validate()?;
        }
        Ok(db)
    }

    pub fn records(&self) -> &[ElementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn citations(&self) -> Option<&Citations> {
        self.citations.as_ref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn compilation_date(&self) -> Option<&str> {
        self.compilation_date.as_deref()
    }

    /// Resolve a parsed key to the single matching record, in store order.
    pub fn lookup(&self, key: &LookupKey) -> Result<&ElementRecord> {
        match key {
            LookupKey::AtomicNumber(n) => self
                .records
                .iter()
                .find(|r| r.atomic_number == *n && !r.is_isotope)
                .ok_or_else(|| DatabaseError::KeyNotFound(n.to_string())),
            LookupKey::IsotopeNotation {
                prefix,
                mass_number,
            } => {
                // The prefix is compared against the record's own prefix
                // before the first dash, so "C" finds a record stored as
                // either "C" or "C-14"; the mass number narrows the rest.
                let matches_prefix = |r: &ElementRecord| match classify(prefix) {
                    TextKind::Symbol => r.bare_symbol() == prefix,
                    TextKind::Name => r.bare_name().eq_ignore_ascii_case(prefix),
                };
                self.records
                    .iter()
                    .filter(|r| matches_prefix(r))
                    .find(|r| r.mass_number == Some(*mass_number))
                    .ok_or_else(|| {
                        DatabaseError::KeyNotFound(format!("{prefix}-{mass_number}"))
                    })
            }
            LookupKey::NameOrSymbol(text) => self
                .records
                .iter()
                .filter(|r| !r.is_isotope || r.symbol == "D" || r.symbol == "T")
                .find(|r| match classify(text) {
                    TextKind::Symbol => r.symbol == *text,
                    TextKind::Name => r.name.eq_ignore_ascii_case(text),
                })
                .ok_or_else(|| DatabaseError::KeyNotFound(text.clone())),
        }
    }

    /// Parse-then-lookup convenience for textual keys.
    pub fn get(&self, key: &str) -> Result<&ElementRecord> {
        self.lookup(&LookupKey::parse(key)?)
    }

    /// Canonical element record for an atomic number.
    pub fn by_atomic_number(&self, n: impl Into<AtomicNumber>) -> Result<&ElementRecord> {
        self.lookup(&LookupKey::AtomicNumber(n.into()))
    }

    /// Export all records as CSV, one header line plus one line per record.
    /// Absent optional fields export as empty strings.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        self.write_csv_to(BufWriter::new(file))
    }

    pub fn write_csv_to<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(CSV_COLUMNS)?;
        for rec in &self.records {
            out.write_record([
                rec.atomic_number.to_string(),
                rec.symbol.clone(),
                rec.name.clone(),
                rec.atomic_mass
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                rec.is_isotope.to_string(),
                rec.is_isotope_stable.to_string(),
                rec.mass_number
                    .map(|m| m.to_string())
                    .unwrap_or_default(),
                rec.num_neutrons.to_string(),
                rec.isotopic_abundance
                    .map(|a| a.to_string())
                    .unwrap_or_default(),
                rec.half_life
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            ])?;
        }
        out.flush()?;
        Ok(())
    }

    /// Write the database back out as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let view = DatabaseFileRef {
            citations: self.citations.as_ref(),
            author: self.author.as_deref(),
            compilation_date: self.compilation_date.as_deref(),
            data: &self.records,
        };
        serde_json::to_writer_pretty(BufWriter::new(file), &view)?;
        Ok(())
    }

    /// Check structural invariants of the loaded data.
    ///
    /// Hard failures: a duplicate canonical record for an atomic number,
    /// a gap inside `1..=max`, or an abundance outside [0, 1]. Incomplete
    /// isotope records only warn.
    pub fn validate(&self) -> Result<()> {
        let mut canonical = HashSet::new();
        let mut max = 0u32;
        for rec in &self.records {
            max = max.max(rec.atomic_number.0);
            if !rec.is_isotope && !canonical.insert(rec.atomic_number) {
                return Err(DatabaseError::DuplicateRecord(rec.atomic_number));
            }
        }
        for n in 1..=max {
            if !canonical.contains(&AtomicNumber(n)) {
                return Err(DatabaseError::MissingRecord(AtomicNumber(n)));
            }
        }
        for rec in self.records.iter().filter(|r| r.is_isotope) {
            if rec.mass_number.is_none() {
                warn!("isotope record {:?} has no mass number", rec.symbol);
            }
            if rec.atomic_mass.is_none() {
                warn!("isotope record {:?} has no atomic mass", rec.symbol);
            }
            if let Some(abundance) = rec.isotopic_abundance {
                if !(0.0..=1.0).contains(&abundance) {
                    return Err(DatabaseError::AbundanceRange(abundance));
                }
            }
        }
        Ok(())
    }
}

/// Borrowed serialization view, so `save` does not clone the record list.
#[derive(Serialize)]
struct DatabaseFileRef<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    citations: Option<&'a Citations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    compilation_date: Option<&'a str>,
    data: &'a [ElementRecord],
}

fn apply_isotope_names(records: &mut [ElementRecord]) {
    for rec in records.iter_mut() {
        if !rec.is_isotope
            || NONCOMPLIANT_SYMBOLS.contains(&rec.symbol.as_str())
            || rec.symbol.contains('-')
        {
            continue;
        }
        if let Some(mass_number) = rec.mass_number {
            rec.symbol = format!("{}-{}", rec.symbol, mass_number);
            if !rec.name.contains('-') {
                rec.name = format!("{}-{}", rec.name, mass_number);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Hydrogen and carbon plus their isotopes, isotopes listed before the
    // canonical carbon to pin down store-order behavior.
    const FIXTURE: &str = r#"{
        "citations": "synthetic fixture",
        "author": "tests",
        "compilation_date": "2026-08-05",
        "data": [
            {"atomic_number": 1, "symbol": "H", "name": "hydrogen",
             "atomic_mass": "1.008 u", "is_isotope": false, "num_neutrons": 0},
            {"atomic_number": 1, "symbol": "D", "name": "deuterium",
             "atomic_mass": "2.0141017778 u", "is_isotope": true,
             "is_isotope_stable": true, "mass_number": 2, "num_neutrons": 1,
             "isotopic_abundance": 0.000115},
            {"atomic_number": 1, "symbol": "T", "name": "tritium",
             "atomic_mass": "3.0160492777 u", "is_isotope": true,
             "mass_number": 3, "num_neutrons": 2, "half_life": "12.32 yr"},
            {"atomic_number": 6, "symbol": "C", "name": "carbon",
             "atomic_mass": "12.011 u", "is_isotope": true,
             "is_isotope_stable": true, "mass_number": 12, "num_neutrons": 6,
             "isotopic_abundance": 0.9893},
            {"atomic_number": 6, "symbol": "C", "name": "carbon",
             "atomic_mass": "14.0032419887 u", "is_isotope": true,
             "mass_number": 14, "num_neutrons": 8, "half_life": "5730 yr"},
            {"atomic_number": 6, "symbol": "C", "name": "carbon",
             "atomic_mass": "12.011 u", "is_isotope": false, "num_neutrons": 6}
        ]
    }"#;

    fn fixture() -> ElementDatabase {
        ElementDatabase::from_json(FIXTURE).unwrap()
    }

    #[test]
    fn metadata_is_carried() {
        let db = fixture();
        assert_eq!(db.author(), Some("tests"));
        assert_eq!(db.compilation_date(), Some("2026-08-05"));
        assert_eq!(
            db.citations(),
            Some(&Citations::One("synthetic fixture".into()))
        );
    }

    #[test]
    fn integer_key_skips_isotopes() {
        let db = fixture();
        let rec = db.by_atomic_number(6).unwrap();
        assert!(!rec.is_isotope);
        assert_eq!(rec.symbol, "C");

        let h = db.by_atomic_number(1).unwrap();
        assert_eq!(h.symbol, "H");
    }

    #[test]
    fn integer_key_without_canonical_record_fails() {
        let db = fixture();
        assert!(matches!(
            db.by_atomic_number(7),
            Err(DatabaseError::KeyNotFound(_))
        ));
    }

    #[test]
    fn isotope_names_are_suffixed_by_default() {
        let db = fixture();
        let c14 = db.get("C-14").unwrap();
        assert_eq!(c14.symbol, "C-14");
        assert_eq!(c14.name, "carbon-14");
        assert_eq!(c14.mass_number, Some(14));

        // Noncompliant symbols stay bare.
        let d = db.get("D").unwrap();
        assert_eq!(d.symbol, "D");
        assert_eq!(d.name, "deuterium");
    }

    #[test]
    fn isotope_names_stay_bare_when_disabled() {
        let db = ElementDatabase::from_json_with(
            FIXTURE,
            LoadOptions {
                validate: false,
                use_isotope_name: false,
            },
        )
        .unwrap();
        let c14 = db.get("C-14").unwrap();
        assert_eq!(c14.symbol, "C");
        assert_eq!(c14.mass_number, Some(14));
    }

    #[test]
    fn dashed_name_keys_match_case_insensitively() {
        let db = fixture();
        let c14 = db.get("Carbon-14").unwrap();
        assert_eq!(c14.mass_number, Some(14));
        assert_eq!(
            c14 as *const ElementRecord,
            db.get("CARBON-14").unwrap() as *const ElementRecord
        );
    }

    #[test]
    fn plain_key_excludes_isotopes_except_d_and_t() {
        // With display names off the carbon isotopes keep the symbol "C"
        // and precede the canonical record in store order; a plain key
        // must still resolve to the canonical one.
        let db = ElementDatabase::from_json_with(
            FIXTURE,
            LoadOptions {
                validate: false,
                use_isotope_name: false,
            },
        )
        .unwrap();
        let c = db.get("C").unwrap();
        assert!(!c.is_isotope);

        let carbon = db.get("carbon").unwrap();
        assert!(!carbon.is_isotope);

        // D and T are the only isotopes reachable by plain key.
        assert!(db.get("T").unwrap().is_isotope);
        assert!(db.get("tritium").unwrap().is_isotope);
    }

    #[test]
    fn unknown_keys_are_not_found() {
        let db = fixture();
        for key in ["Xx", "unobtainium", "C-13", "hydrogen-9"] {
            assert!(matches!(
                db.get(key),
                Err(DatabaseError::KeyNotFound(_))
            ));
        }
    }

    #[test]
    fn malformed_mass_number_is_a_parse_error() {
        let db = fixture();
        assert!(matches!(
            db.get("C-fourteen"),
            Err(DatabaseError::MassNumber { .. })
        ));
    }

    // The length-3 boundary is exact: two characters always probe symbols,
    // three or more always probe names, even against coincidences.
    #[test]
    fn length_boundary_beats_coincidences() {
        let db = ElementDatabase::from_json(
            r#"{"data": [
                {"atomic_number": 1, "symbol": "Q", "name": "He",
                 "is_isotope": false, "num_neutrons": 0},
                {"atomic_number": 2, "symbol": "He", "name": "helium",
                 "is_isotope": false, "num_neutrons": 2},
                {"atomic_number": 3, "symbol": "Uut", "name": "ununtrium",
                 "is_isotope": false, "num_neutrons": 4},
                {"atomic_number": 4, "symbol": "Zz", "name": "Uut",
                 "is_isotope": false, "num_neutrons": 5}
            ]}"#,
        )
        .unwrap();

        // "He" is two characters: symbol probe wins over the name "He".
        assert_eq!(db.get("He").unwrap().atomic_number, AtomicNumber(2));
        // "Uut" is three characters: name probe wins over the symbol "Uut".
        assert_eq!(db.get("Uut").unwrap().atomic_number, AtomicNumber(4));
    }

    #[test]
    fn validate_accepts_fixture_and_flags_gaps() {
        // Fixture has canonical records only for 1 and 6: a gap at 2.
        let db = fixture();
        assert!(matches!(
            db.validate(),
            Err(DatabaseError::MissingRecord(AtomicNumber(2)))
        ));

        let dense = ElementDatabase::from_json(
            r#"{"data": [
                {"atomic_number": 1, "symbol": "H", "name": "hydrogen",
                 "is_isotope": false, "num_neutrons": 0},
                {"atomic_number": 2, "symbol": "He", "name": "helium",
                 "is_isotope": false, "num_neutrons": 2}
            ]}"#,
        )
        .unwrap();
        assert!(dense.validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicates_and_bad_abundance() {
        let dup = ElementDatabase::from_json(
            r#"{"data": [
                {"atomic_number": 1, "symbol": "H", "name": "hydrogen",
                 "is_isotope": false, "num_neutrons": 0},
                {"atomic_number": 1, "symbol": "H", "name": "hydrogen",
                 "is_isotope": false, "num_neutrons": 0}
            ]}"#,
        )
        .unwrap();
        assert!(matches!(
            dup.validate(),
            Err(DatabaseError::DuplicateRecord(AtomicNumber(1)))
        ));

        let bad = ElementDatabase::from_json(
            r#"{"data": [
                {"atomic_number": 1, "symbol": "H", "name": "hydrogen",
                 "is_isotope": false, "num_neutrons": 0},
                {"atomic_number": 1, "symbol": "H", "name": "hydrogen",
                 "atomic_mass": "1.008 u", "is_isotope": true,
                 "mass_number": 1, "num_neutrons": 0,
                 "isotopic_abundance": 1.5}
            ]}"#,
        )
        .unwrap();
        assert!(matches!(
            bad.validate(),
            Err(DatabaseError::AbundanceRange(_))
        ));
    }

    #[test]
    fn load_failures_propagate() {
        assert!(matches!(
            ElementDatabase::load("/nonexistent/element_default.json"),
            Err(DatabaseError::Io(_))
        ));
        assert!(matches!(
            ElementDatabase::from_json("{ not json"),
            Err(DatabaseError::Json(_))
        ));
    }
}
