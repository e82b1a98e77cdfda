//! Path codec for fsrec.
//!
//! The codec is the bridge between a path string and an attribute map, using
//! the patterns produced by the location compiler:
//!
//! - [`parse`] — path → attributes, via the anchored match pattern
//! - [`synthesize`] — attributes → path, only for wildcard-free specifications
//! - [`patch`] — relocate an existing path by substituting only the
//!   placeholder spans whose attributes are explicitly set
//!
//! `synthesize` and `patch` are deliberately asymmetric: a missing attribute
//! becomes an empty segment when synthesizing, but preserves the original
//! captured text when patching. Both behaviors are part of the contract.

pub mod error;
pub mod generate;
pub mod parse;

pub use error::{CodecError, CodecResult};
pub use generate::{patch, synthesize};
pub use parse::parse;
