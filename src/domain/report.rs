//! Summary of a rewrite pass.

use serde::Serialize;

use super::{LineKind, row::RowChange};

/// Counters collected while rewriting a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Total number of lines, unchanged by the rewrite.
    pub lines: usize,
    /// Comment lines passed through.
    pub comments: usize,
    /// Section header lines passed through.
    pub headers: usize,
    /// Data rows examined.
    pub data_rows: usize,
    /// Other lines passed through.
    pub other: usize,
    /// Data rows whose description moved into `required`.
    pub rows_moved: usize,
    /// Empty `proposedGuaranteed` values filled with the placeholder.
    pub placeholders_filled: usize,
    /// Data rows where `description` or `required` could not be extracted.
    pub unextracted: usize,
    /// 1-based numbers of the lines that changed.
    pub changed_lines: Vec<usize>,
}

impl Report {
    pub(crate) const fn count(&mut self, kind: LineKind) {
        self.lines += 1;
        match kind {
            LineKind::Comment => self.comments += 1,
            LineKind::Header => self.headers += 1,
            LineKind::Data => self.data_rows += 1,
            LineKind::Other => self.other += 1,
        }
    }

    pub(crate) fn record(&mut self, line_number: usize, change: RowChange) {
        if change.moved {
            self.rows_moved += 1;
        }
        self.placeholders_filled += change.placeholders_filled;
        if !change.is_unchanged() {
            self.changed_lines.push(line_number);
        }
    }

    /// True when the rewrite changed nothing.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.changed_lines.is_empty()
    }
}
