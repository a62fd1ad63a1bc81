use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for the template fix-up.
///
/// Every field has a default, so an absent or empty configuration file
/// reproduces the stock behaviour against `prisma/avr-template-data.cjs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The seed-data file to rewrite, relative to the working directory.
    path: PathBuf,

    /// Lines whose trimmed content starts with this marker are comments.
    comment_marker: String,

    /// Lines containing this fragment are section headers.
    ///
    /// Header records carry an identifier ending in `-0`, so the default
    /// fragment is `-0"` (the id followed by its closing quote).
    header_marker: String,

    /// The value written into empty `proposedGuaranteed` fields.
    placeholder: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: default_path(),
            comment_marker: default_comment_marker(),
            header_marker: default_header_marker(),
            placeholder: default_placeholder(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        Ok(toml::from_str(&content)?)
    }

    /// Loads the configuration, falling back to the defaults if the file does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Read(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(ConfigError::Write)
    }

    /// Returns the path of the seed-data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overrides the path of the seed-data file.
    pub fn set_path(&mut self, path: PathBuf) {
        self.path = path;
    }

    /// Returns the comment marker.
    #[must_use]
    pub fn comment_marker(&self) -> &str {
        &self.comment_marker
    }

    /// Returns the header fragment.
    #[must_use]
    pub fn header_marker(&self) -> &str {
        &self.header_marker
    }

    /// Returns the placeholder for empty `proposedGuaranteed` values.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

/// Errors raised while loading or saving a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file: {0}")]
    Read(#[source] std::io::Error),

    /// The file could not be written.
    #[error("Failed to write config file: {0}")]
    Write(#[source] std::io::Error),

    /// The file is not valid TOML or does not match the schema.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

fn default_path() -> PathBuf {
    PathBuf::from("prisma/avr-template-data.cjs")
}

fn default_comment_marker() -> String {
    "//".to_string()
}

fn default_header_marker() -> String {
    "-0\"".to_string()
}

fn default_placeholder() -> String {
    "Harus diisi oleh vendor".to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_path")]
        path: PathBuf,

        #[serde(default = "default_comment_marker")]
        comment_marker: String,

        #[serde(default = "default_header_marker")]
        header_marker: String,

        #[serde(default = "default_placeholder")]
        placeholder: String,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                path,
                comment_marker,
                header_marker,
                placeholder,
            } => Self {
                path,
                comment_marker,
                header_marker,
                placeholder,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            path: config.path,
            comment_marker: config.comment_marker,
            header_marker: config.header_marker,
            placeholder: config.placeholder,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\npath = \"seed/avr.cjs\"\ncomment_marker = \"#\"\nplaceholder = \"TBD\"\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.path(), Path::new("seed/avr.cjs"));
        assert_eq!(config.comment_marker(), "#");
        assert_eq!(config.header_marker(), "-0\"");
        assert_eq!(config.placeholder(), "TBD");
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.to_string().starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let config = Config::load_or_default(&missing).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nplaceholder = 3\n").unwrap();

        let error = Config::load_or_default(file.path()).unwrap_err();
        assert!(error.to_string().starts_with("Failed to parse config file:"));
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("avr-fix.toml");

        let mut config = Config::default();
        config.set_path(PathBuf::from("other.cjs"));
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn empty_file_returns_default() {
        // Tests that deserialising an empty file returns the default configuration.
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }
}
