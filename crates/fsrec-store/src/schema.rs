//! Schema registration: binding a compiled location to a base directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fsrec_spec::{CompiledLocation, LocationSpec};
use tracing::info;

use crate::error::{StoreError, StoreResult};

/// An immutable record-type definition.
///
/// Produced once at registration and shared (via `Arc`) by every store
/// operation and every record. There is no global registry and no mutation
/// after registration.
#[derive(Debug)]
pub struct Schema {
    base: PathBuf,
    location: CompiledLocation,
}

impl Schema {
    /// Register a record type: compile the specification and prepare the base
    /// directory.
    ///
    /// The base directory is created (recursively) if absent. Registration
    /// fails with [`StoreError::InvalidBaseDirectory`] if the path exists and
    /// is not a directory.
    pub fn register(base: impl Into<PathBuf>, spec: &LocationSpec) -> StoreResult<Arc<Schema>> {
        let base = base.into();
        if base.exists() && !base.is_dir() {
            return Err(StoreError::InvalidBaseDirectory(base));
        }
        fs::create_dir_all(&base)?;

        let location = CompiledLocation::compile(spec)?;
        info!(
            base = %base.display(),
            glob = %location.glob(),
            "record type registered"
        );
        Ok(Arc::new(Schema { base, location }))
    }

    /// The base directory all record paths are relative to.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// The compiled location specification.
    pub fn location(&self) -> &CompiledLocation {
        &self.location
    }

    /// Attribute names declared by the specification, in capture-group order.
    pub fn attribute_names(&self) -> &[String] {
        self.location.attribute_names()
    }

    /// `true` if this type stores directories instead of files.
    pub fn is_directory(&self) -> bool {
        self.location.is_directory()
    }

    /// Absolute path for a record path relative to the base directory.
    pub fn full_path(&self, relative: &str) -> PathBuf {
        self.base.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsrec_spec::LocationSpec;

    fn spec() -> LocationSpec {
        LocationSpec::from_tokens(&[":name"], Some("txt"), false).unwrap()
    }

    #[test]
    fn register_creates_base_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("records/nested");
        assert!(!base.exists());

        let schema = Schema::register(&base, &spec()).unwrap();
        assert!(base.is_dir());
        assert_eq!(schema.base(), base);
        assert_eq!(schema.attribute_names(), ["name"]);
    }

    #[test]
    fn register_rejects_non_directory_base() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("occupied");
        std::fs::write(&base, b"not a directory").unwrap();

        let result = Schema::register(&base, &spec());
        assert!(matches!(result, Err(StoreError::InvalidBaseDirectory(_))));
    }

    #[test]
    fn register_accepts_existing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let schema = Schema::register(tmp.path(), &spec()).unwrap();
        assert!(!schema.is_directory());
    }

    #[test]
    fn full_path_joins_base() {
        let tmp = tempfile::tempdir().unwrap();
        let schema = Schema::register(tmp.path(), &spec()).unwrap();
        assert_eq!(schema.full_path("a.txt"), tmp.path().join("a.txt"));
    }
}
