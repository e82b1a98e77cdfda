//! Segment and extension rules, plus the token surface used by callers.
//!
//! The external configuration surface describes a specification as an ordered
//! list of string tokens: `"*"` (wildcard), `"**"` (recursive wildcard),
//! `":name"` (named placeholder), anything else a literal component. The
//! extension token follows the same placeholder convention, or is replaced by
//! the directory marker for types that store directories instead of files.

use serde::{Deserialize, Serialize};

use crate::error::{SpecError, SpecResult};

/// One path component rule in a location specification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// Matches exactly this text.
    Literal(String),
    /// `*` — matches any single path component, binds nothing.
    Wildcard,
    /// `**` — matches zero or more path components, binds nothing.
    /// At most one per specification.
    RecursiveWildcard,
    /// Matches one component and binds it to the named attribute.
    Placeholder(String),
}

impl Segment {
    /// Parse a single segment token.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsrec_spec::Segment;
    ///
    /// assert_eq!(Segment::from_token("*").unwrap(), Segment::Wildcard);
    /// assert_eq!(
    ///     Segment::from_token(":name").unwrap(),
    ///     Segment::Placeholder("name".into())
    /// );
    /// assert!(Segment::from_token("").is_err());
    /// ```
    pub fn from_token(token: &str) -> SpecResult<Segment> {
        match token {
            "" => Err(SpecError::InvalidToken {
                token: token.to_string(),
                reason: "token must not be empty".into(),
            }),
            "*" => Ok(Segment::Wildcard),
            "**" => Ok(Segment::RecursiveWildcard),
            t if t.starts_with(':') => {
                let name = &t[1..];
                validate_name(token, name)?;
                Ok(Segment::Placeholder(name.to_string()))
            }
            t => {
                if t.contains('/') {
                    return Err(SpecError::InvalidToken {
                        token: t.to_string(),
                        reason: "literal segment must not contain '/'".into(),
                    });
                }
                Ok(Segment::Literal(t.to_string()))
            }
        }
    }

    /// Returns `true` for `*` and `**` segments, which block path synthesis.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard | Segment::RecursiveWildcard)
    }
}

/// The terminal extension rule of a location specification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extension {
    /// No suffix rule.
    #[default]
    None,
    /// A fixed `.<ext>` suffix.
    Literal(String),
    /// A `.<value>` suffix captured as the named attribute.
    Placeholder(String),
    /// The type stores directories, not files. No suffix, no body.
    Directory,
}

impl Extension {
    /// Parse the extension surface: an optional token plus the directory flag.
    pub fn from_token(token: Option<&str>, directory: bool) -> SpecResult<Extension> {
        if directory {
            if token.is_some() {
                return Err(SpecError::DirectoryWithExtension);
            }
            return Ok(Extension::Directory);
        }
        match token {
            None => Ok(Extension::None),
            Some(t) if t.starts_with(':') => {
                let name = &t[1..];
                validate_name(t, name)?;
                Ok(Extension::Placeholder(name.to_string()))
            }
            Some(t) => {
                if t.is_empty() || t.contains('/') || t.contains('.') {
                    return Err(SpecError::InvalidToken {
                        token: t.to_string(),
                        reason: "extension must be a bare suffix without '/' or '.'".into(),
                    });
                }
                Ok(Extension::Literal(t.to_string()))
            }
        }
    }
}

fn validate_name(token: &str, name: &str) -> SpecResult<()> {
    if name.is_empty() {
        return Err(SpecError::InvalidToken {
            token: token.to_string(),
            reason: "placeholder name must not be empty".into(),
        });
    }
    if name.contains('/') || name.contains('.') || name.contains('*') {
        return Err(SpecError::InvalidToken {
            token: token.to_string(),
            reason: "placeholder name must not contain '/', '.' or '*'".into(),
        });
    }
    Ok(())
}

/// An uncompiled location specification: ordered segments plus the terminal
/// extension rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSpec {
    pub segments: Vec<Segment>,
    pub extension: Extension,
}

impl LocationSpec {
    /// Build a specification from already-constructed parts.
    pub fn new(segments: Vec<Segment>, extension: Extension) -> LocationSpec {
        LocationSpec {
            segments,
            extension,
        }
    }

    /// Build a specification from the token surface.
    ///
    /// `extension` is the extension token (literal or `":name"`), mutually
    /// exclusive with the `directory` marker.
    pub fn from_tokens<S: AsRef<str>>(
        tokens: &[S],
        extension: Option<&str>,
        directory: bool,
    ) -> SpecResult<LocationSpec> {
        let segments = tokens
            .iter()
            .map(|t| Segment::from_token(t.as_ref()))
            .collect::<SpecResult<Vec<_>>>()?;
        let extension = Extension::from_token(extension, directory)?;
        Ok(LocationSpec::new(segments, extension))
    }

    /// Returns `true` if the specification contains no wildcard segments and
    /// therefore supports path synthesis from attributes alone.
    pub fn is_concrete(&self) -> bool {
        !self.segments.iter().any(Segment::is_wildcard)
    }
}
