//! Line classification.

use serde::Serialize;

use super::{Rules, row::DataRow};

/// The category a line falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Trimmed content starts with the comment marker.
    Comment,
    /// Contains the header fragment (a section title record).
    Header,
    /// Carries `unit:`, `required:` and `proposedGuaranteed:`.
    Data,
    /// Anything else: blank lines, brackets, module boilerplate.
    Other,
}

/// A single classified line of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A comment line, never modified.
    Comment(String),
    /// A section header line, never modified.
    Header(String),
    /// A requirement row subject to rewriting.
    Data(DataRow),
    /// Any other line, never modified.
    Other(String),
}

impl Line {
    /// Classifies a line of text.
    ///
    /// Comment and header checks take precedence over the data markers, so a
    /// header record that happens to carry all three data keys is still left
    /// alone.
    #[must_use]
    pub fn classify(text: &str, rules: &Rules) -> Self {
        if text.trim().starts_with(rules.comment_marker()) {
            Self::Comment(text.to_string())
        } else if text.contains(rules.header_marker()) {
            Self::Header(text.to_string())
        } else if let Some(row) = DataRow::parse(text) {
            Self::Data(row)
        } else {
            Self::Other(text.to_string())
        }
    }

    /// Returns the category of this line.
    #[must_use]
    pub const fn kind(&self) -> LineKind {
        match self {
            Self::Comment(_) => LineKind::Comment,
            Self::Header(_) => LineKind::Header,
            Self::Data(_) => LineKind::Data,
            Self::Other(_) => LineKind::Other,
        }
    }

    /// Returns the line text exactly as it would be written out.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Comment(text) | Self::Header(text) | Self::Other(text) => text,
            Self::Data(row) => row.as_str(),
        }
    }

    /// Returns the data row, if this is a data line.
    #[must_use]
    pub const fn as_data(&self) -> Option<&DataRow> {
        match self {
            Self::Data(row) => Some(row),
            _ => None,
        }
    }
}
