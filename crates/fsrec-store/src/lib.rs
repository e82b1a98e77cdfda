//! Record store for fsrec.
//!
//! A [`Store`] treats a base directory as a structured record store. The
//! schema — a compiled location specification plus the base directory — is
//! registered once and is immutable afterwards; every operation derives
//! paths and attributes through it.
//!
//! # Key Types
//!
//! - [`Schema`] — immutable record-type definition (base dir + compiled spec)
//! - [`Record`] — one file or directory on disk: path, body, derived attributes
//! - [`Store`] — the CRUD/find engine
//! - [`Selector`] — find surface: all/first/last/conditions/literal key
//! - [`SaveOutcome`] — saved, or rejected as a collision
//! - [`Association`] — declarative to-one/to-many link between record types
//!
//! # Consistency Rules
//!
//! 1. Whenever a record has a path, its attributes are exactly the result of
//!    parsing that path. The map never silently diverges.
//! 2. Writing an attribute re-derives the path immediately; renaming is
//!    attribute-write-triggered, not save-triggered.
//! 3. Saving a new record never overwrites an existing path: that is a
//!    recoverable [`SaveOutcome::Collision`], not an error.
//! 4. Records are transient, detached views. Nothing caches them; every find
//!    or get re-reads from disk.

pub mod error;
pub mod ident;
pub mod record;
pub mod relations;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use record::Record;
pub use relations::{resolve, Association, AssociationKind};
pub use schema::Schema;
pub use store::{SaveOutcome, Selector, Store};
