//! AVR Template Fix-up
//!
//! Rewrites the requirement rows of an AVR template seed-data file in place:
//! descriptions move into the `required` column and empty
//! `proposedGuaranteed` values receive a placeholder. A second pass leaves the
//! file unchanged, except for rows whose description is itself a digit-only
//! value: those qualify for the move again.

pub mod domain;
pub use domain::{Config, DataRow, Document, Finding, Line, LineKind, Report, Rules};

/// Loading and atomically saving template files.
pub mod storage;
pub use storage::{LoadError, SaveError, Template};
