//! An in-memory template: an ordered sequence of classified lines.

use super::{Line, Report, Rules, inspect};

/// A template document.
///
/// Lines are split on `\n` only. A trailing newline yields a final empty line
/// and a carriage return stays part of its line, so [`Document::render`]
/// reproduces the input byte-for-byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
}

impl Document {
    /// Splits and classifies the content.
    #[must_use]
    pub fn parse(content: &str, rules: &Rules) -> Self {
        let lines = content
            .split('\n')
            .map(|line| Line::classify(line, rules))
            .collect();
        Self { lines }
    }

    /// The classified lines, in order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines.
    ///
    /// Parsing always produces at least one (possibly empty) line, so this is
    /// only true for a default-constructed document.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Rejoins the lines.
    #[must_use]
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(Line::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Rewrites every data row, passing all other lines through.
    ///
    /// The result always has the same number of lines as `self`.
    #[must_use]
    pub fn rewrite(&self, rules: &Rules) -> (Self, Report) {
        let mut report = Report::default();

        let lines = self
            .lines
            .iter()
            .enumerate()
            .map(|(index, line)| {
                report.count(line.kind());
                let Line::Data(row) = line else {
                    return line.clone();
                };

                if !row.is_extracted() {
                    report.unextracted += 1;
                }

                let (rewritten, change) = row.apply(rules);
                if !change.is_unchanged() {
                    tracing::trace!(line = index + 1, ?change, "rewrote data row");
                }
                report.record(index + 1, change);
                Line::Data(rewritten)
            })
            .collect();

        (Self { lines }, report)
    }

    /// Lists data rows that are malformed or not yet converged.
    #[must_use]
    pub fn inspect(&self) -> Vec<inspect::Finding> {
        inspect::inspect(self)
    }
}
