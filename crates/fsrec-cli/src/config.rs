//! Store configuration: a TOML file describing one record type.
//!
//! ```toml
//! base = "records"
//! segments = ["scripts", "*", ":name"]
//! extension = "rb"        # or ":ext" to capture it, or omit entirely
//! directory = false        # true for types that store directories
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use fsrec_spec::LocationSpec;
use fsrec_store::{Schema, Store};

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base directory all record paths are relative to.
    pub base: PathBuf,
    /// Location tokens: literals, `*`, `**`, or `:name` placeholders.
    pub segments: Vec<String>,
    /// Extension token: a literal suffix or `:name` placeholder.
    #[serde(default)]
    pub extension: Option<String>,
    /// The type stores directories instead of files.
    #[serde(default)]
    pub directory: bool,
}

impl StoreConfig {
    pub fn load(path: &Path) -> anyhow::Result<StoreConfig> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading store config {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("parsing store config {}", path.display()))
    }

    /// Register the schema and open a store over it.
    pub fn open(&self) -> anyhow::Result<Store> {
        let spec =
            LocationSpec::from_tokens(&self.segments, self.extension.as_deref(), self.directory)?;
        let schema = Schema::register(&self.base, &spec)?;
        Ok(Store::new(schema))
    }

    /// A starter configuration for `fsrec init --sample`.
    pub fn sample() -> &'static str {
        "\
# fsrec store configuration.
# Paths are relative to the directory this file lives in when you run fsrec
# from there.

base = \"records\"

# Location tokens: literal components, \"*\" (any one component),
# \"**\" (any run of components, at most once), \":name\" (captured attribute).
segments = [\":project\", \":title\"]

# Extension: a literal like \"txt\", or \":ext\" to capture it as an attribute.
# Omit for none; set directory = true for types that store directories.
extension = \":ext\"
"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_minimal_config() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("fsrec.toml");
        fs::write(
            &path,
            "base = \"records\"\nsegments = [\"scripts\", \"*\", \":name\"]\nextension = \"rb\"\n",
        )
        .unwrap();

        let config = StoreConfig::load(&path).unwrap();
        assert_eq!(config.base, PathBuf::from("records"));
        assert_eq!(config.segments, vec!["scripts", "*", ":name"]);
        assert_eq!(config.extension.as_deref(), Some("rb"));
        assert!(!config.directory);
    }

    #[test]
    fn load_directory_mode_config() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("fsrec.toml");
        fs::write(
            &path,
            "base = \"projects\"\nsegments = [\":name\"]\ndirectory = true\n",
        )
        .unwrap();

        let config = StoreConfig::load(&path).unwrap();
        assert!(config.directory);
        assert!(config.extension.is_none());
    }

    #[test]
    fn load_missing_file_fails() {
        assert!(StoreConfig::load(Path::new("/nonexistent/fsrec.toml")).is_err());
    }

    #[test]
    fn sample_parses_and_opens() {
        let tmp = tempfile::tempdir().unwrap();
        let config: StoreConfig = toml::from_str(StoreConfig::sample()).unwrap();
        let config = StoreConfig {
            base: tmp.path().join(config.base),
            ..config
        };
        let store = config.open().unwrap();
        assert_eq!(store.schema().attribute_names(), ["project", "title", "ext"]);
    }

    #[test]
    fn open_rejects_bad_tokens() {
        let config = StoreConfig {
            base: PathBuf::from("/tmp/unused"),
            segments: vec![":".into()],
            extension: None,
            directory: false,
        };
        assert!(config.open().is_err());
    }
}
