use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::domain::{Document, Finding, Report, Rules};

/// A template file loaded into memory.
///
/// The file is read once in [`Template::load`]. Rewrites happen on the
/// in-memory [`Document`] and reach disk only through [`Template::flush`].
#[derive(Debug)]
pub struct Template {
    path: PathBuf,
    document: Document,
    dirty: bool,
}

impl Template {
    /// Reads and classifies the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or is not
    /// valid UTF-8.
    #[instrument(level = "debug", skip(rules))]
    pub fn load(path: &Path, rules: &Rules) -> Result<Self, LoadError> {
        let bytes = fs::read(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        tracing::debug!(bytes = bytes.len(), "read template");

        let content = String::from_utf8(bytes).map_err(|_| LoadError::Encoding {
            path: path.to_path_buf(),
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            document: Document::parse(&content, rules),
            dirty: false,
        })
    }

    /// The path the template was loaded from and will be saved to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current in-memory document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Whether in-memory changes have not been flushed yet.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rewrites the document in memory.
    pub fn fix(&mut self, rules: &Rules) -> Report {
        let (document, report) = self.document.rewrite(rules);
        if !report.is_clean() {
            self.document = document;
            self.dirty = true;
        }
        tracing::info!(
            rows_moved = report.rows_moved,
            placeholders_filled = report.placeholders_filled,
            "rewrote {} of {} data rows",
            report.changed_lines.len(),
            report.data_rows
        );
        report
    }

    /// Lists data rows that are malformed or not yet converged.
    #[must_use]
    pub fn inspect(&self) -> Vec<Finding> {
        self.document.inspect()
    }

    /// Writes pending changes back to [`Template::path`].
    ///
    /// Returns `false` without touching the file if there is nothing to write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be replaced. The original file is
    /// left intact in that case.
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn flush(&mut self) -> Result<bool, SaveError> {
        if !self.dirty {
            tracing::debug!("nothing to write");
            return Ok(false);
        }
        write_atomic(&self.path, &self.document.render())?;
        self.dirty = false;
        Ok(true)
    }
}

/// Replaces `path` with `content` via a temporary sibling and a rename.
///
/// The temporary file is removed if any step fails, and the original file's
/// permissions are carried over.
fn write_atomic(path: &Path, content: &str) -> Result<(), SaveError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let io_error = |source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = tempfile::Builder::new()
        .prefix(".avr-fix")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(io_error)?;

    if let Ok(metadata) = fs::metadata(path) {
        file.as_file()
            .set_permissions(metadata.permissions())
            .map_err(io_error)?;
    }

    file.write_all(content.as_bytes()).map_err(io_error)?;
    file.as_file().sync_all().map_err(io_error)?;

    file.persist(path).map_err(|e| SaveError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    tracing::debug!(bytes = content.len(), "wrote template");

    Ok(())
}

/// Errors raised while loading a template.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file does not exist.
    #[error("template not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read.
    #[error("failed to read template {}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The file is not valid UTF-8.
    #[error("template {} is not valid UTF-8", path.display())]
    Encoding {
        /// The file being read.
        path: PathBuf,
    },
}

/// Errors raised while saving a template.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The temporary file could not be created or written.
    #[error("failed to write template {}", path.display())]
    Io {
        /// The file being replaced.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The temporary file could not be renamed over the original.
    #[error("failed to replace template {}", path.display())]
    Persist {
        /// The file being replaced.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}
