//! The in-memory record entity.

use std::sync::Arc;

use fsrec_codec::CodecError;
use fsrec_spec::Attributes;

use crate::error::{StoreError, StoreResult};
use crate::ident;
use crate::schema::Schema;

/// One record: a path relative to the schema's base directory, an opaque body
/// blob, and the attribute map derived from the path.
///
/// Records are transient, detached views of disk state. A record starts out
/// unpersisted (`is_new`); its path may be pre-assigned or derived from
/// attributes. Writing an attribute re-derives the path immediately, so a
/// rename is decided at attribute-write time and committed by the store on
/// save.
#[derive(Clone, Debug)]
pub struct Record {
    schema: Arc<Schema>,
    path: Option<String>,
    body: Vec<u8>,
    attributes: Attributes,
    is_new: bool,
}

impl Record {
    /// Construct a blank, unpersisted record for the given schema.
    pub fn new(schema: Arc<Schema>) -> Record {
        Record {
            schema,
            path: None,
            body: Vec::new(),
            attributes: Attributes::new(),
            is_new: true,
        }
    }

    /// The schema this record belongs to.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Path relative to the base directory, if assigned.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Raw body content. Always empty for directory-mode records.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Replace the body content. Ignored on save for directory-mode types.
    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) {
        self.body = body.into();
    }

    /// The attribute map derived from the path.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Read one attribute. Unknown names return `None`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// `true` until the first successful persist.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Write one attribute and immediately re-derive the path.
    ///
    /// If a path is already assigned it is patched in place (only this
    /// attribute's span moves); otherwise, for a concrete specification, a
    /// fresh path is synthesized. Fails with [`StoreError::UnknownAttribute`]
    /// for names the specification does not declare.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> StoreResult<()> {
        if !self.schema.attribute_names().iter().any(|n| n == name) {
            return Err(StoreError::UnknownAttribute(name.to_string()));
        }
        self.attributes.insert(name.to_string(), value.to_string());
        self.rederive_path()
    }

    /// Assign an explicit path and derive attributes from it.
    ///
    /// The path must satisfy the schema's match pattern; the attribute map is
    /// replaced wholesale so it cannot diverge from the path.
    pub fn assign_path(&mut self, path: &str) -> StoreResult<()> {
        let attrs = fsrec_codec::parse(self.schema.location(), path)?;
        self.attributes = attrs;
        self.path = Some(path.to_string());
        Ok(())
    }

    /// External identifier for URL consumers: the path with its trailing
    /// extension dot rewritten, so content negotiation is never triggered.
    pub fn external_id(&self) -> Option<String> {
        self.path.as_deref().map(ident::encode)
    }

    fn rederive_path(&mut self) -> StoreResult<()> {
        if let Some(old) = &self.path {
            match fsrec_codec::patch(self.schema.location(), old, &self.attributes) {
                Ok(patched) => {
                    self.path = Some(patched);
                    return Ok(());
                }
                // An unpersisted record can carry an incomplete synthesized
                // path (blank segments do not re-match); resynthesize below.
                Err(CodecError::PathMismatch { .. }) if self.is_new => {}
                Err(err) => return Err(err.into()),
            }
        }
        if let Some(synthesized) = fsrec_codec::synthesize(self.schema.location(), &self.attributes)
        {
            self.path = Some(synthesized);
        }
        Ok(())
    }

    /// Commit the record to `path` after a successful persist.
    ///
    /// Re-parses the attributes from the final path. A synthesized path
    /// containing a blank segment cannot re-parse; in that case the map the
    /// record already carries is kept.
    pub(crate) fn commit_path(&mut self, path: &str) {
        if let Ok(attrs) = fsrec_codec::parse(self.schema.location(), path) {
            self.attributes = attrs;
        }
        self.path = Some(path.to_string());
        self.is_new = false;
    }

    pub(crate) fn replace_body(&mut self, body: Vec<u8>) {
        self.body = body;
    }
}
