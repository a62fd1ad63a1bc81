//! Tolerant parsing and rewriting of requirement data rows.
//!
//! A data row is a single-line record literal such as
//!
//! ```text
//! { id: "1.4-9", description: "i. Watchdog", unit: "-", required: "Yes", proposedGuaranteed: "", remarks: "" },
//! ```
//!
//! The row is never parsed as a full object literal. Only the quoted values of
//! `description` and `required` are extracted, and rewriting substitutes the
//! exact quoted text, so everything else on the line is emitted byte-for-byte.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use super::Rules;

/// Substrings that must all be present for a line to count as a data row.
const DATA_MARKERS: [&str; 3] = ["unit:", "required:", "proposedGuaranteed:"];

static DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| quoted_field("description"));
static REQUIRED: LazyLock<Regex> = LazyLock::new(|| quoted_field("required"));
static ID: LazyLock<Regex> = LazyLock::new(|| quoted_field(r"\bid"));
static EMPTY_PROPOSED_GUARANTEED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"proposedGuaranteed:\s*"""#).expect("static pattern is valid")
});

/// Builds a pattern capturing the first double-quoted value after `name:`.
fn quoted_field(name: &str) -> Regex {
    Regex::new(&format!(r#"{name}:\s*"([^"]*)""#)).expect("static pattern is valid")
}

fn capture<'a>(regex: &Regex, text: &'a str) -> Option<&'a str> {
    regex
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|found| found.as_str())
}

fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Whether the description text should move into the `required` column.
///
/// `"No"` qualifies on its own, even with an empty description. `"Yes"`
/// requires a non-empty description. Digit-only values always qualify.
#[must_use]
pub fn qualifies_for_move(description: &str, required: &str) -> bool {
    (!description.is_empty() && required == "Yes") || required == "No" || is_all_digits(required)
}

/// What a rewrite did to one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowChange {
    /// The description moved into `required`.
    pub moved: bool,
    /// Number of empty `proposedGuaranteed` values replaced by the placeholder.
    pub placeholders_filled: usize,
}

impl RowChange {
    /// True when the rewrite left the row untouched.
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        !self.moved && self.placeholders_filled == 0
    }
}

/// A requirement data row, holding its original text and the extracted
/// `description` and `required` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRow {
    text: String,
    description: Option<String>,
    required: Option<String>,
}

impl DataRow {
    /// Parses a line as a data row.
    ///
    /// Returns `None` unless the line carries all of `unit:`, `required:` and
    /// `proposedGuaranteed:`. Comment and header detection is the caller's
    /// concern (see [`Line::classify`](super::Line::classify)).
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        DATA_MARKERS
            .iter()
            .all(|marker| line.contains(marker))
            .then(|| Self::from_text(line.to_string()))
    }

    fn from_text(text: String) -> Self {
        let description = capture(&DESCRIPTION, &text).map(str::to_string);
        let required = capture(&REQUIRED, &text).map(str::to_string);
        Self {
            text,
            description,
            required,
        }
    }

    /// The row as it would be written out.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The quoted `description` value, if one could be extracted.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The quoted `required` value, if one could be extracted.
    #[must_use]
    pub fn required(&self) -> Option<&str> {
        self.required.as_deref()
    }

    /// The quoted `id` value, if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        capture(&ID, &self.text)
    }

    /// Whether both `description` and `required` were extracted.
    #[must_use]
    pub const fn is_extracted(&self) -> bool {
        self.description.is_some() && self.required.is_some()
    }

    /// Whether the row mentions `key:` anywhere.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.text.contains(&format!("{key}:"))
    }

    /// Whether any `proposedGuaranteed` value is still empty.
    #[must_use]
    pub fn has_empty_proposed_guaranteed(&self) -> bool {
        EMPTY_PROPOSED_GUARANTEED.is_match(&self.text)
    }

    /// Whether the next rewrite would move the description.
    #[must_use]
    pub fn has_pending_move(&self) -> bool {
        self.moved_text().is_some()
    }

    /// Text after moving the description into `required`, if the move
    /// applies and actually alters the line.
    ///
    /// Both substitutions replace only the first literal occurrence, written
    /// with exactly one space after the colon.
    fn moved_text(&self) -> Option<String> {
        let (description, required) = (self.description()?, self.required()?);
        if !qualifies_for_move(description, required) {
            return None;
        }

        let text = self
            .text
            .replacen(&format!("description: \"{description}\""), "description: \"\"", 1)
            .replacen(
                &format!("required: \"{required}\""),
                &format!("required: \"{description}\""),
                1,
            );

        (text != self.text).then_some(text)
    }

    /// Applies the move rule, then fills empty `proposedGuaranteed` values.
    ///
    /// The placeholder fill runs regardless of whether extraction succeeded.
    #[must_use]
    pub fn apply(&self, rules: &Rules) -> (Self, RowChange) {
        let mut change = RowChange::default();

        let moved = self.moved_text();
        change.moved = moved.is_some();
        let mut text = moved.unwrap_or_else(|| self.text.clone());

        let replacement = format!("proposedGuaranteed: \"{}\"", rules.placeholder());
        change.placeholders_filled = EMPTY_PROPOSED_GUARANTEED
            .find_iter(&text)
            .filter(|found| found.as_str() != replacement)
            .count();
        if change.placeholders_filled > 0 {
            text = EMPTY_PROPOSED_GUARANTEED
                .replace_all(&text, NoExpand(&replacement))
                .into_owned();
        }

        if change.is_unchanged() {
            (self.clone(), change)
        } else {
            (Self::from_text(text), change)
        }
    }
}
