//! Producing paths from attributes: full synthesis and span patching.

use fsrec_spec::{Attributes, CompiledLocation, Extension, Segment};

use crate::error::{CodecError, CodecResult};

/// Synthesize a path from attributes alone.
///
/// Only possible for a fully concrete specification: returns `None` when any
/// wildcard segment is present, since no path can be derived for it. A
/// missing attribute becomes an empty segment; a missing extension attribute
/// falls back to the placeholder's own name. Both are preserved source
/// behaviors, not validation failures.
pub fn synthesize(location: &CompiledLocation, attrs: &Attributes) -> Option<String> {
    if !location.is_concrete() {
        return None;
    }
    let spec = location.spec();

    let mut parts: Vec<&str> = Vec::with_capacity(spec.segments.len());
    for segment in &spec.segments {
        match segment {
            Segment::Literal(s) => parts.push(s),
            Segment::Placeholder(name) => {
                parts.push(attrs.get(name).map(String::as_str).unwrap_or(""))
            }
            Segment::Wildcard | Segment::RecursiveWildcard => return None,
        }
    }

    let mut path = parts.join("/");
    match &spec.extension {
        Extension::Literal(ext) => {
            path.push('.');
            path.push_str(ext);
        }
        Extension::Placeholder(name) => {
            path.push('.');
            path.push_str(attrs.get(name).map(String::as_str).unwrap_or(name));
        }
        Extension::None | Extension::Directory => {}
    }
    Some(path)
}

/// Rebuild `old_path`, substituting only the placeholder spans whose
/// attributes are present in `attrs`.
///
/// The old path is re-matched to locate each capture span; all text between
/// spans (literals, wildcard matches, separators) is copied verbatim, so an
/// attribute that is absent from `attrs` keeps its original bytes. This is
/// what relocates a record when an identifying attribute changes while
/// leaving unmodeled wildcard text intact.
pub fn patch(location: &CompiledLocation, old_path: &str, attrs: &Attributes) -> CodecResult<String> {
    let caps = location
        .pattern()
        .captures(old_path)
        .ok_or_else(|| CodecError::PathMismatch {
            path: old_path.to_string(),
            pattern: location.pattern_source().to_string(),
        })?;

    let mut out = String::with_capacity(old_path.len());
    let mut cursor = 0;
    for (i, name) in location.attribute_names().iter().enumerate() {
        let Some(span) = caps.get(i + 1) else {
            continue;
        };
        out.push_str(&old_path[cursor..span.start()]);
        match attrs.get(name) {
            Some(value) => out.push_str(value),
            None => out.push_str(span.as_str()),
        }
        cursor = span.end();
    }
    out.push_str(&old_path[cursor..]);
    Ok(out)
}
