//! Structured error types for the element database.

use thiserror::Error;

use crate::atomic_data::AtomicNumber;

/// Unified error type for all database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// I/O error while reading or writing a database file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in the backing file
    #[error("parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed quantity text or file shape
    #[error("parse error: {0}")]
    Parse(String),

    /// A lookup key matched no record
    #[error("key {0:?} was not found in the database")]
    KeyNotFound(String),

    /// The fragment after the dash in isotope notation is not a number
    #[error("malformed mass number {fragment:?} in key {key:?}")]
    MassNumber { key: String, fragment: String },

    /// Isotopic abundance outside the closed interval [0, 1]
    #[error("isotopic abundance {0} outside [0, 1]")]
    AbundanceRange(f64),

    /// No canonical record for an atomic number inside 1..=max
    #[error("no canonical record for atomic number {0}")]
    MissingRecord(AtomicNumber),

    /// More than one canonical record claims the same atomic number
    #[error("duplicate canonical record for atomic number {0}")]
    DuplicateRecord(AtomicNumber),

    /// An isotope record carries no atomic mass
    #[error("isotope {0:?} has no atomic mass")]
    MissingMass(String),

    /// CSV export failure
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DatabaseError>;
