//! In-memory reference store for chemical-element and isotope data.
//!
//! A database is loaded once from a JSON file (atomic numbers, masses,
//! stability, abundances, half-lives) and queried by heterogeneous natural
//! keys: atomic number, chemical symbol, element name, or isotope notation
//! such as "C-14" / "carbon-14", with the short names n, D and T for the
//! free neutron, deuterium and tritium. Derived lookup tables are built
//! eagerly into an immutable [`PeriodicTable`] snapshot.
//!
//! ```no_run
//! use elementdb::{ElementDatabase, PeriodicTable};
//!
//! # fn main() -> elementdb::Result<()> {
//! let db = ElementDatabase::load("element_default.json")?;
//! let iron = db.get("iron")?;
//! assert_eq!(iron.symbol, "Fe");
//!
//! let table = PeriodicTable::from_database(&db)?;
//! let c14 = table.isotope("C-14").unwrap();
//! assert_eq!(c14.mass_number, 14);
//! # Ok(())
//! # }
//! ```

pub mod atomic_data;
pub mod database;
pub mod error;
pub mod isotope;
pub mod key;
pub mod periodic_table;
pub mod quantity;

pub use atomic_data::{AtomicNumber, Citations, ElementRecord};
pub use database::{ElementDatabase, LoadOptions};
pub use error::{DatabaseError, Result};
pub use isotope::Isotope;
pub use key::LookupKey;
pub use periodic_table::{CanonicalElement, PeriodicTable};
pub use quantity::Quantity;
