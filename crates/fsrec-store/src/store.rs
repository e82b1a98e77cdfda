//! The CRUD/find engine over a base directory.

use std::fs;
use std::io;
use std::sync::Arc;
use std::time::SystemTime;

use fsrec_spec::Attributes;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{StoreError, StoreResult};
use crate::record::Record;
use crate::schema::Schema;

/// Find surface: which records to return.
#[derive(Clone, Debug)]
pub enum Selector {
    /// Every record of the type, in filesystem-listing order.
    All,
    /// The first record in enumeration order, if any.
    First,
    /// The last record in enumeration order, if any.
    Last,
    /// Records whose attributes equal every given value (conjunctive
    /// equality; unknown keys never match).
    Where(Attributes),
    /// A literal path or identifier fragment. A single enumerated record
    /// whose path contains the literal wins; otherwise the literal must
    /// match the pattern exactly and is fetched directly.
    Key(String),
}

/// Outcome of [`Store::save`].
///
/// A collision is a recoverable validation result, not an error: saving a new
/// record whose target path is already occupied is rejected without touching
/// the disk, and the record is handed back unchanged.
#[derive(Debug)]
pub enum SaveOutcome {
    Saved(Record),
    Collision(Record),
}

/// The record store: every operation is a direct, blocking filesystem call.
///
/// There is no internal caching and no locking. Individual filesystem
/// operations are as atomic as the platform makes them, but check-then-write
/// sequences (`create`, `save` collision checks) are not composed atomically:
/// the store assumes a single writer per path at a time.
pub struct Store {
    schema: Arc<Schema>,
}

impl Store {
    /// Create a store for a registered record type.
    pub fn new(schema: Arc<Schema>) -> Store {
        Store { schema }
    }

    /// The record type this store operates on.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// `true` iff a file or directory exists at `base/path`.
    pub fn exists_at(&self, path: &str) -> bool {
        self.schema.full_path(path).exists()
    }

    /// Last modification time of the backing file or directory.
    pub fn modified_at(&self, path: &str) -> StoreResult<SystemTime> {
        let meta = fs::metadata(self.schema.full_path(path)).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                StoreError::NotFound(path.to_string())
            } else {
                StoreError::Io(e)
            }
        })?;
        Ok(meta.modified()?)
    }

    /// Read the record at `path`.
    ///
    /// Fails with [`StoreError::NotFound`] if nothing backs the path. The
    /// returned record's attributes are derived purely from the path.
    pub fn get(&self, path: &str) -> StoreResult<Record> {
        if !self.exists_at(path) {
            return Err(StoreError::NotFound(path.to_string()));
        }
        let mut record = Record::new(Arc::clone(&self.schema));
        record.assign_path(path)?;
        if !self.schema.is_directory() {
            record.replace_body(fs::read(self.schema.full_path(path))?);
        }
        record.commit_path(path);
        Ok(record)
    }

    /// Find records by selector. `First`/`Last`/`Key` yield at most one
    /// element; enumeration order is filesystem-listing order, which callers
    /// must not assume to be lexical.
    pub fn find(&self, selector: Selector) -> StoreResult<Vec<Record>> {
        match selector {
            Selector::All => {
                let mut records = Vec::new();
                for path in self.list_paths()? {
                    records.push(self.get(&path)?);
                }
                Ok(records)
            }
            Selector::First => {
                let mut records = self.find(Selector::All)?;
                records.truncate(1);
                Ok(records)
            }
            Selector::Last => {
                let mut records = self.find(Selector::All)?;
                if records.len() > 1 {
                    records.drain(..records.len() - 1);
                }
                Ok(records)
            }
            Selector::Where(conditions) => {
                let mut records = self.find(Selector::All)?;
                records.retain(|record| {
                    conditions
                        .iter()
                        .all(|(name, value)| record.attribute(name) == Some(value.as_str()))
                });
                Ok(records)
            }
            Selector::Key(key) => {
                let hits: Vec<Record> = self
                    .find(Selector::All)?
                    .into_iter()
                    .filter(|record| record.path().is_some_and(|p| p.contains(&key)))
                    .collect();
                if hits.len() == 1 {
                    Ok(hits)
                } else if self.schema.location().pattern().is_match(&key) {
                    Ok(vec![self.get(&key)?])
                } else {
                    Ok(Vec::new())
                }
            }
        }
    }

    /// Number of records of this type.
    pub fn count(&self) -> StoreResult<usize> {
        Ok(self.find(Selector::All)?.len())
    }

    /// Create a record: a blank record at `path` (or pathless when `path` is
    /// empty), the attributes applied, then persisted.
    ///
    /// Fails with [`StoreError::AlreadyExists`] if a record already occupies
    /// the resolved path.
    pub fn create(&self, path: &str, attributes: &Attributes) -> StoreResult<Record> {
        let mut record = Record::new(Arc::clone(&self.schema));
        if !path.is_empty() {
            record.assign_path(path)?;
            if self.exists_at(path) {
                return Err(StoreError::AlreadyExists(path.to_string()));
            }
        }
        for (name, value) in attributes {
            record.set_attribute(name, value)?;
        }
        match self.save(record)? {
            SaveOutcome::Saved(record) => Ok(record),
            SaveOutcome::Collision(record) => Err(StoreError::AlreadyExists(
                record.path().unwrap_or_default().to_string(),
            )),
        }
    }

    /// Persist a record's body at its resolved path.
    ///
    /// The path is kept current at attribute-write time, so resolution here
    /// is: the record's path if assigned, else a synthesized one, else
    /// [`StoreError::UngeneratablePath`]. A *new* record whose target is
    /// already occupied comes back as [`SaveOutcome::Collision`] with the
    /// disk untouched. Saving never removes an old path; rename cleanup is
    /// [`Store::update_attributes`]' job.
    pub fn save(&self, mut record: Record) -> StoreResult<SaveOutcome> {
        let target = match record.path() {
            Some(path) => path.to_string(),
            None => fsrec_codec::synthesize(self.schema.location(), record.attributes())
                .ok_or(StoreError::UngeneratablePath)?,
        };

        if record.is_new() && self.exists_at(&target) {
            debug!(path = %target, "save rejected, path occupied");
            return Ok(SaveOutcome::Collision(record));
        }

        let full = self.schema.full_path(&target);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        if self.schema.is_directory() {
            if !full.exists() {
                fs::create_dir(&full)?;
            }
        } else {
            fs::write(&full, record.body())?;
        }

        record.commit_path(&target);
        debug!(path = %target, "record saved");
        Ok(SaveOutcome::Saved(record))
    }

    /// Apply attributes and persist, removing the old backing file when the
    /// resolved path changed.
    pub fn update_attributes(
        &self,
        mut record: Record,
        attributes: &Attributes,
    ) -> StoreResult<Record> {
        let old_path = record.path().map(str::to_string);
        for (name, value) in attributes {
            record.set_attribute(name, value)?;
        }

        if let Some(old) = old_path {
            let moved = record.path() != Some(old.as_str());
            if moved && self.exists_at(&old) {
                let full = self.schema.full_path(&old);
                if self.schema.is_directory() {
                    fs::remove_dir(full)?;
                } else {
                    fs::remove_file(full)?;
                }
                debug!(from = %old, to = ?record.path(), "record relocated");
            }
        }

        match self.save(record)? {
            SaveOutcome::Saved(record) => Ok(record),
            SaveOutcome::Collision(record) => Err(StoreError::AlreadyExists(
                record.path().unwrap_or_default().to_string(),
            )),
        }
    }

    /// Remove the record at `path` and return it as it was before removal.
    ///
    /// Directory-mode removal is non-recursive and fails on a non-empty
    /// directory. Fails with [`StoreError::NotFound`] if nothing exists.
    pub fn delete(&self, path: &str) -> StoreResult<Record> {
        let record = self.get(path)?;
        let full = self.schema.full_path(path);
        if self.schema.is_directory() {
            fs::remove_dir(full)?;
        } else {
            fs::remove_file(full)?;
        }
        debug!(path = %path, "record deleted");
        Ok(record)
    }

    /// Re-read the record's body from disk. Path and attributes are never
    /// touched; directory-mode bodies stay empty.
    pub fn refresh(&self, mut record: Record) -> StoreResult<Record> {
        let Some(path) = record.path().map(str::to_string) else {
            return Err(StoreError::MissingPath);
        };
        if !self.exists_at(&path) {
            return Err(StoreError::NotFound(path));
        }
        if !self.schema.is_directory() {
            record.replace_body(fs::read(self.schema.full_path(&path))?);
        }
        Ok(record)
    }

    /// Enumerate relative paths under the base directory that match the
    /// compiled pattern, in filesystem-listing order.
    fn list_paths(&self) -> StoreResult<Vec<String>> {
        let want_directories = self.schema.is_directory();
        let mut paths = Vec::new();
        for entry in WalkDir::new(self.schema.base()).min_depth(1) {
            let entry = entry.map_err(io::Error::from)?;
            if entry.file_type().is_dir() != want_directories {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(self.schema.base()) else {
                continue;
            };
            let relative: Vec<_> = relative
                .iter()
                .map(|part| part.to_string_lossy())
                .collect();
            let relative = relative.join("/");
            if self.schema.location().pattern().is_match(&relative) {
                paths.push(relative);
            }
        }
        Ok(paths)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("base", &self.schema.base())
            .field("glob", &self.schema.location().glob())
            .finish()
    }
}
