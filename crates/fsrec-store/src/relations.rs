//! Declarative associations between record types.
//!
//! No code generation and no method injection: an [`Association`] is plain
//! data (kind, source attribute, target attribute) interpreted by
//! [`resolve`], which issues the equivalent conditions-based find against the
//! target store.

use fsrec_spec::Attributes;

use crate::error::StoreResult;
use crate::record::Record;
use crate::store::{Selector, Store};

/// Cardinality of an association.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssociationKind {
    /// At most one related record.
    ToOne,
    /// Any number of related records.
    ToMany,
}

/// A declarative link from one record type to another.
#[derive(Clone, Debug)]
pub struct Association {
    pub kind: AssociationKind,
    /// Attribute read from the source record.
    pub from: String,
    /// Attribute matched on the target type.
    pub to: String,
}

impl Association {
    pub fn to_one(from: impl Into<String>, to: impl Into<String>) -> Association {
        Association {
            kind: AssociationKind::ToOne,
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn to_many(from: impl Into<String>, to: impl Into<String>) -> Association {
        Association {
            kind: AssociationKind::ToMany,
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Resolve an association for one source record.
///
/// Reads the `from` attribute off the record and finds target records whose
/// `to` attribute equals it. A source record without the attribute resolves
/// to no records. `ToOne` keeps at most the first match in enumeration order.
pub fn resolve(
    association: &Association,
    record: &Record,
    target: &Store,
) -> StoreResult<Vec<Record>> {
    let Some(value) = record.attribute(&association.from) else {
        return Ok(Vec::new());
    };

    let mut conditions = Attributes::new();
    conditions.insert(association.to.clone(), value.to_string());
    let mut found = target.find(Selector::Where(conditions))?;
    if association.kind == AssociationKind::ToOne {
        found.truncate(1);
    }
    Ok(found)
}
