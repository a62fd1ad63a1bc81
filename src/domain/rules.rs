use super::Config;

/// The markers and placeholder that drive a rewrite.
///
/// This is the subset of [`Config`] the rewriter needs, detached from the
/// file path so that in-memory documents can be rewritten directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    comment_marker: String,
    header_marker: String,
    placeholder: String,
}

impl Rules {
    /// Creates a rule set from its parts.
    #[must_use]
    pub fn new(
        comment_marker: impl Into<String>,
        header_marker: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            comment_marker: comment_marker.into(),
            header_marker: header_marker.into(),
            placeholder: placeholder.into(),
        }
    }

    /// Prefix (after trimming) that marks a comment line.
    #[must_use]
    pub fn comment_marker(&self) -> &str {
        &self.comment_marker
    }

    /// Fragment that marks a section header line.
    #[must_use]
    pub fn header_marker(&self) -> &str {
        &self.header_marker
    }

    /// Value written into empty `proposedGuaranteed` fields.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for Rules {
    fn from(config: &Config) -> Self {
        Self::new(
            config.comment_marker(),
            config.header_marker(),
            config.placeholder(),
        )
    }
}
