//! The location compiler: specification → glob + anchored match pattern.
//!
//! Compilation happens once per record type, at schema registration. The
//! product is immutable and deterministic: the same specification always
//! yields byte-identical glob and pattern text, independent of call order.

use regex::Regex;

use crate::error::{SpecError, SpecResult};
use crate::segment::{Extension, LocationSpec, Segment};

/// The immutable product of compiling a [`LocationSpec`].
#[derive(Clone, Debug)]
pub struct CompiledLocation {
    spec: LocationSpec,
    glob: String,
    pattern: Regex,
    pattern_source: String,
    attribute_names: Vec<String>,
    is_directory: bool,
}

impl CompiledLocation {
    /// Compile a specification.
    ///
    /// Fails if the specification is empty, contains more than one `**`
    /// segment, or binds the same attribute name twice (the extension
    /// placeholder counts).
    pub fn compile(spec: &LocationSpec) -> SpecResult<CompiledLocation> {
        validate(spec)?;

        let glob = build_glob(spec);
        let (pattern_source, attribute_names) = build_pattern(spec);
        let pattern = Regex::new(&pattern_source)?;
        let is_directory = spec.extension == Extension::Directory;

        Ok(CompiledLocation {
            spec: spec.clone(),
            glob,
            pattern,
            pattern_source,
            attribute_names,
            is_directory,
        })
    }

    /// The source specification.
    pub fn spec(&self) -> &LocationSpec {
        &self.spec
    }

    /// Glob pattern for enumerating candidate paths under the base directory.
    pub fn glob(&self) -> &str {
        &self.glob
    }

    /// Anchored match pattern. Capture groups appear in the order of
    /// [`CompiledLocation::attribute_names`].
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Text of the match pattern (stable across recompiles).
    pub fn pattern_source(&self) -> &str {
        &self.pattern_source
    }

    /// Attribute names in capture-group order. The extension placeholder, if
    /// any, is always last.
    pub fn attribute_names(&self) -> &[String] {
        &self.attribute_names
    }

    /// `true` if the type stores directories instead of files.
    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// `true` if the specification supports path synthesis (no wildcards).
    pub fn is_concrete(&self) -> bool {
        self.spec.is_concrete()
    }
}

fn validate(spec: &LocationSpec) -> SpecResult<()> {
    if spec.segments.is_empty() {
        return Err(SpecError::EmptySpec);
    }

    let recursive = spec
        .segments
        .iter()
        .filter(|s| matches!(s, Segment::RecursiveWildcard))
        .count();
    if recursive > 1 {
        return Err(SpecError::MultipleRecursiveWildcards);
    }

    let mut seen: Vec<&str> = Vec::new();
    let placeholders = spec.segments.iter().filter_map(|s| match s {
        Segment::Placeholder(name) => Some(name.as_str()),
        _ => None,
    });
    let extension = match &spec.extension {
        Extension::Placeholder(name) => Some(name.as_str()),
        _ => None,
    };
    for name in placeholders.chain(extension) {
        if seen.contains(&name) {
            return Err(SpecError::DuplicateAttribute(name.to_string()));
        }
        seen.push(name);
    }

    Ok(())
}

fn build_glob(spec: &LocationSpec) -> String {
    let parts: Vec<&str> = spec
        .segments
        .iter()
        .map(|seg| match seg {
            Segment::Literal(s) => s.as_str(),
            Segment::Wildcard | Segment::Placeholder(_) => "*",
            Segment::RecursiveWildcard => "**",
        })
        .collect();

    let mut glob = parts.join("/");
    match &spec.extension {
        Extension::Placeholder(_) => glob.push_str(".*"),
        Extension::Literal(ext) => {
            glob.push('.');
            glob.push_str(ext);
        }
        Extension::None | Extension::Directory => {}
    }
    glob
}

fn build_pattern(spec: &LocationSpec) -> (String, Vec<String>) {
    let mut pattern = String::from("^");
    let mut names = Vec::new();

    // A recursive wildcard may match zero components, so the separator that
    // follows it must be optional.
    let mut separator_optional = false;
    for (i, seg) in spec.segments.iter().enumerate() {
        if i > 0 {
            pattern.push_str(if separator_optional { "/?" } else { "/" });
        }
        separator_optional = false;
        match seg {
            Segment::Literal(s) => pattern.push_str(&regex::escape(s)),
            Segment::Placeholder(name) => {
                pattern.push_str("([^/]+)");
                names.push(name.clone());
            }
            Segment::Wildcard => pattern.push_str("(?:[^/]+)"),
            Segment::RecursiveWildcard => {
                pattern.push_str("(?:.*)");
                separator_optional = true;
            }
        }
    }

    match &spec.extension {
        Extension::Placeholder(name) => {
            pattern.push_str(r"\.([^/.]+)");
            names.push(name.clone());
        }
        Extension::Literal(ext) => {
            pattern.push_str(r"\.");
            pattern.push_str(&regex::escape(ext));
        }
        Extension::None | Extension::Directory => {}
    }

    // Anchoring is load-bearing: without it, a longer unrelated path could
    // falsely match a shorter specification and corrupt attribute extraction.
    pattern.push('$');
    (pattern, names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::LocationSpec;

    fn compile_tokens(tokens: &[&str], ext: Option<&str>, dir: bool) -> CompiledLocation {
        let spec = LocationSpec::from_tokens(tokens, ext, dir).unwrap();
        CompiledLocation::compile(&spec).unwrap()
    }

    // -----------------------------------------------------------------------
    // Glob derivation
    // -----------------------------------------------------------------------

    #[test]
    fn glob_mixes_literals_and_wildcards() {
        let loc = compile_tokens(&["scripts", "*", ":name"], Some("rb"), false);
        assert_eq!(loc.glob(), "scripts/*/*.rb");
    }

    #[test]
    fn glob_for_extension_placeholder() {
        let loc = compile_tokens(&[":project", ":title"], Some(":ext"), false);
        assert_eq!(loc.glob(), "*/*.*");
    }

    #[test]
    fn glob_for_recursive_wildcard() {
        let loc = compile_tokens(&["data", "**", ":name"], None, false);
        assert_eq!(loc.glob(), "data/**/*");
    }

    #[test]
    fn glob_for_directory_mode_has_no_suffix() {
        let loc = compile_tokens(&["projects", ":name"], None, true);
        assert_eq!(loc.glob(), "projects/*");
        assert!(loc.is_directory());
    }

    // -----------------------------------------------------------------------
    // Match pattern derivation
    // -----------------------------------------------------------------------

    #[test]
    fn pattern_captures_placeholders_in_order() {
        let loc = compile_tokens(&[":project", ":title"], Some(":ext"), false);
        assert_eq!(loc.attribute_names(), ["project", "title", "ext"]);

        let caps = loc.pattern().captures("p1/t1.txt").unwrap();
        assert_eq!(&caps[1], "p1");
        assert_eq!(&caps[2], "t1");
        assert_eq!(&caps[3], "txt");
    }

    #[test]
    fn pattern_is_anchored() {
        let loc = compile_tokens(&[":name"], Some("rb"), false);
        assert!(loc.pattern().is_match("helper.rb"));
        // A longer unrelated path must not match a shorter specification.
        assert!(!loc.pattern().is_match("deep/helper.rb"));
        assert!(!loc.pattern().is_match("helper.rb.bak"));
        assert!(!loc.pattern().is_match("prefix/helper.rb/suffix"));
    }

    #[test]
    fn wildcard_matches_one_component_without_capturing() {
        let loc = compile_tokens(&["scripts", "*", ":name"], Some("rb"), false);
        assert_eq!(loc.attribute_names(), ["name"]);

        let caps = loc.pattern().captures("scripts/util/helper.rb").unwrap();
        assert_eq!(&caps[1], "helper");
        assert!(!loc.pattern().is_match("scripts/a/b/helper.rb"));
    }

    #[test]
    fn recursive_wildcard_matches_zero_components() {
        let loc = compile_tokens(&["a", "**", ":name"], None, false);
        assert!(loc.pattern().is_match("a/x"));
        assert!(loc.pattern().is_match("a/b/x"));
        assert!(loc.pattern().is_match("a/b/c/x"));
        assert!(!loc.pattern().is_match("b/x"));
    }

    #[test]
    fn literal_segments_are_escaped() {
        let loc = compile_tokens(&["release-1.0", ":name"], None, false);
        assert!(loc.pattern().is_match("release-1.0/notes"));
        // The '.' in the literal must not act as a metacharacter.
        assert!(!loc.pattern().is_match("release-1x0/notes"));
    }

    #[test]
    fn extension_literal_is_required() {
        let loc = compile_tokens(&[":name"], Some("rb"), false);
        assert!(!loc.pattern().is_match("helper"));
        assert!(!loc.pattern().is_match("helper.py"));
    }

    // -----------------------------------------------------------------------
    // Determinism
    // -----------------------------------------------------------------------

    #[test]
    fn recompile_is_deterministic() {
        let spec =
            LocationSpec::from_tokens(&["scripts", "**", ":name"], Some(":ext"), false).unwrap();
        let a = CompiledLocation::compile(&spec).unwrap();
        let b = CompiledLocation::compile(&spec).unwrap();
        assert_eq!(a.glob(), b.glob());
        assert_eq!(a.pattern_source(), b.pattern_source());
        assert_eq!(a.attribute_names(), b.attribute_names());
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    #[test]
    fn reject_empty_spec() {
        let spec = LocationSpec::new(vec![], Extension::None);
        assert!(matches!(
            CompiledLocation::compile(&spec),
            Err(SpecError::EmptySpec)
        ));
    }

    #[test]
    fn reject_two_recursive_wildcards() {
        let spec = LocationSpec::from_tokens(&["**", "a", "**"], None, false).unwrap();
        assert!(matches!(
            CompiledLocation::compile(&spec),
            Err(SpecError::MultipleRecursiveWildcards)
        ));
    }

    #[test]
    fn reject_duplicate_placeholder() {
        let spec = LocationSpec::from_tokens(&[":name", ":name"], None, false).unwrap();
        assert!(matches!(
            CompiledLocation::compile(&spec),
            Err(SpecError::DuplicateAttribute(_))
        ));
    }

    #[test]
    fn reject_extension_duplicating_segment() {
        let spec = LocationSpec::from_tokens(&[":ext"], Some(":ext"), false).unwrap();
        assert!(matches!(
            CompiledLocation::compile(&spec),
            Err(SpecError::DuplicateAttribute(_))
        ));
    }
}
