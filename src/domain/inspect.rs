//! Shape checks for data rows.
//!
//! These do not validate the template grammar. They flag rows that are
//! missing one of the columns the seed loader expects, and rows that a fix
//! pass would still change.

use serde::Serialize;

use super::Document;

/// Keys every data row is expected to carry.
pub const EXPECTED_KEYS: [&str; 4] = ["unit", "required", "proposedGuaranteed", "remarks"];

/// A problem found on one data row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// 1-based line number.
    pub line: usize,
    /// The row's `id` value, when present.
    pub id: Option<String>,
    /// What is wrong with the row.
    pub kind: FindingKind,
}

/// The kinds of problem [`inspect`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "key", rename_all = "snake_case")]
pub enum FindingKind {
    /// The row lacks one of [`EXPECTED_KEYS`].
    MissingKey(&'static str),
    /// `proposedGuaranteed` is still empty.
    EmptyProposedGuaranteed,
    /// The description would still move into `required`.
    PendingMove,
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingKey(key) => write!(f, "missing `{key}`"),
            Self::EmptyProposedGuaranteed => write!(f, "empty `proposedGuaranteed`"),
            Self::PendingMove => write!(f, "description not yet moved to `required`"),
        }
    }
}

/// Inspects every data row of the document.
///
/// Findings are ordered by line, then in the order listed on [`FindingKind`].
#[must_use]
pub fn inspect(document: &Document) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (index, line) in document.lines().enumerate() {
        let Some(row) = line.as_data() else {
            continue;
        };

        let mut push = |kind| {
            findings.push(Finding {
                line: index + 1,
                id: row.id().map(str::to_string),
                kind,
            });
        };

        for key in EXPECTED_KEYS {
            if !row.has_key(key) {
                push(FindingKind::MissingKey(key));
            }
        }
        if row.has_empty_proposed_guaranteed() {
            push(FindingKind::EmptyProposedGuaranteed);
        }
        if row.has_pending_move() {
            push(FindingKind::PendingMove);
        }
    }

    findings
}
