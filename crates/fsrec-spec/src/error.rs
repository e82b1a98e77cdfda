/// Errors from building or compiling a location specification.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// A token could not be understood as a segment or extension rule.
    #[error("invalid location token {token:?}: {reason}")]
    InvalidToken { token: String, reason: String },

    /// A specification must contain at least one segment.
    #[error("location specification has no segments")]
    EmptySpec,

    /// Only one recursive wildcard (`**`) is allowed per specification.
    #[error("location specification contains more than one recursive wildcard")]
    MultipleRecursiveWildcards,

    /// Placeholder names must be unique within one specification.
    #[error("duplicate attribute name: {0}")]
    DuplicateAttribute(String),

    /// A directory-mode specification cannot also declare an extension.
    #[error("directory marker cannot be combined with an extension")]
    DirectoryWithExtension,

    /// The generated match pattern failed to compile.
    #[error("invalid generated pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result alias for specification operations.
pub type SpecResult<T> = Result<T, SpecError>;
