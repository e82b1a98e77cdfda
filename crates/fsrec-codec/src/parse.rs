//! Parsing a path into its attribute map.

use fsrec_spec::{Attributes, CompiledLocation};

use crate::error::{CodecError, CodecResult};

/// Parse `path` against the location's match pattern.
///
/// Capture groups are zipped, in order, to the location's attribute names.
/// The pattern is anchored, so the whole path must satisfy the specification.
pub fn parse(location: &CompiledLocation, path: &str) -> CodecResult<Attributes> {
    let caps = location
        .pattern()
        .captures(path)
        .ok_or_else(|| CodecError::PathMismatch {
            path: path.to_string(),
            pattern: location.pattern_source().to_string(),
        })?;

    let mut attrs = Attributes::new();
    for (i, name) in location.attribute_names().iter().enumerate() {
        if let Some(group) = caps.get(i + 1) {
            attrs.insert(name.clone(), group.as_str().to_string());
        }
    }
    Ok(attrs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsrec_spec::LocationSpec;

    fn location(tokens: &[&str], ext: Option<&str>, dir: bool) -> CompiledLocation {
        let spec = LocationSpec::from_tokens(tokens, ext, dir).unwrap();
        CompiledLocation::compile(&spec).unwrap()
    }

    #[test]
    fn parse_extracts_named_attributes() {
        let loc = location(&["scripts", "*", ":name"], Some("rb"), false);
        let attrs = parse(&loc, "scripts/util/helper.rb").unwrap();
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs["name"], "helper");
    }

    #[test]
    fn parse_extension_placeholder() {
        let loc = location(&[":project", ":title"], Some(":ext"), false);
        let attrs = parse(&loc, "p1/t1.txt").unwrap();
        assert_eq!(attrs["project"], "p1");
        assert_eq!(attrs["title"], "t1");
        assert_eq!(attrs["ext"], "txt");
    }

    #[test]
    fn parse_rejects_mismatched_path() {
        let loc = location(&["scripts", ":name"], Some("rb"), false);
        let err = parse(&loc, "elsewhere/helper.rb").unwrap_err();
        assert!(matches!(err, CodecError::PathMismatch { .. }));
    }

    #[test]
    fn parse_rejects_longer_path() {
        // Anchoring: a nested path must not match a flat specification.
        let loc = location(&[":name"], Some("rb"), false);
        assert!(parse(&loc, "sub/dir/helper.rb").is_err());
    }

    #[test]
    fn parse_directory_mode_path() {
        let loc = location(&["projects", ":name"], None, true);
        let attrs = parse(&loc, "projects/alpha").unwrap();
        assert_eq!(attrs["name"], "alpha");
    }

    #[test]
    fn recursive_wildcard_binds_nothing() {
        let loc = location(&["data", "**", ":name"], None, false);
        let attrs = parse(&loc, "data/deep/nested/item").unwrap();
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs["name"], "item");
    }
}
