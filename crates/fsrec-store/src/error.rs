use std::path::PathBuf;

use fsrec_codec::CodecError;
use fsrec_spec::SpecError;

/// Errors from record store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The operation targets a path with no backing file or directory.
    #[error("no record at path: {0}")]
    NotFound(String),

    /// A record already exists at the target path.
    #[error("record already exists at path: {0}")]
    AlreadyExists(String),

    /// The attribute name is not declared by the location specification.
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    /// No path could be synthesized: the specification contains wildcards and
    /// no explicit path was supplied.
    #[error("cannot generate a path for this specification without an explicit path")]
    UngeneratablePath,

    /// The record has no path assigned yet.
    #[error("record has no path assigned")]
    MissingPath,

    /// The registered base path exists and is not a directory.
    #[error("base path exists and is not a directory: {0}")]
    InvalidBaseDirectory(PathBuf),

    /// Specification error surfaced during registration.
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// Codec error (path mismatch) surfaced during parse or patch.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// I/O error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
