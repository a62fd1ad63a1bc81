//! Domain models for the template fix-up.
//!
//! This module contains the line classifier, the data-row rewriter and the
//! configuration that parameterises them. Nothing here touches the
//! filesystem except [`Config`] loading.

mod config;
pub use config::{Config, ConfigError};

pub mod document;
pub use document::Document;

pub mod inspect;
pub use inspect::{Finding, FindingKind};

pub mod line;
pub use line::{Line, LineKind};

pub mod report;
pub use report::Report;

pub mod row;
pub use row::{DataRow, RowChange};

mod rules;
pub use rules::Rules;
