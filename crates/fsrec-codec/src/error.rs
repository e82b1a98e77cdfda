/// Errors from path codec operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The path does not satisfy the type's match pattern.
    #[error("path {path:?} does not match pattern {pattern}")]
    PathMismatch { path: String, pattern: String },
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
