//! Location specifications for fsrec.
//!
//! A *location specification* declares where a record type's files live: an
//! ordered sequence of path segments (literals, wildcards, and named
//! placeholders) followed by a terminal extension rule. Compiling a
//! specification produces a [`CompiledLocation`] holding everything the rest
//! of the system needs:
//!
//! - a glob pattern for enumerating candidate paths,
//! - an anchored capturing regex for parsing a path into attributes,
//! - the ordered list of attribute names bound by the placeholders,
//! - whether the type stores directories instead of files.
//!
//! # Key Types
//!
//! - [`Segment`] — one path component rule
//! - [`Extension`] — the terminal extension/directory rule
//! - [`LocationSpec`] — an uncompiled specification
//! - [`CompiledLocation`] — the immutable compiled product
//! - [`Attributes`] — the shared name→value map type

pub mod compile;
pub mod error;
pub mod segment;

use std::collections::BTreeMap;

pub use compile::CompiledLocation;
pub use error::{SpecError, SpecResult};
pub use segment::{Extension, LocationSpec, Segment};

/// Map from attribute name to string value.
///
/// Attribute values are always derived from a path by the codec; the map is
/// never independently authoritative once a record has a path.
pub type Attributes = BTreeMap<String, String>;
