//! External identifier encoding.
//!
//! A record's external identifier is its path with the single trailing
//! `.ext` dot rewritten to `~`, so a consumer embedding the identifier in a
//! URL never triggers file-extension content negotiation. Decoding reverses
//! the substitution. Paths without an extension pass through unchanged.

/// Separator standing in for the extension dot in external identifiers.
pub const EXTENSION_SEPARATOR: char = '~';

/// Encode a record path as an external identifier.
///
/// # Examples
///
/// ```
/// assert_eq!(fsrec_store::ident::encode("p1/t1.txt"), "p1/t1~txt");
/// assert_eq!(fsrec_store::ident::encode("projects/alpha"), "projects/alpha");
/// ```
pub fn encode(path: &str) -> String {
    match extension_dot(path, '.') {
        Some(index) => replace_at(path, index, EXTENSION_SEPARATOR),
        None => path.to_string(),
    }
}

/// Decode an external identifier back into a record path.
pub fn decode(id: &str) -> String {
    match extension_dot(id, EXTENSION_SEPARATOR) {
        Some(index) => replace_at(id, index, '.'),
        None => id.to_string(),
    }
}

/// Byte index of the separator introducing a trailing extension in the final
/// path component, if any. The separator must not lead the component (a
/// leading dot is a hidden file, not an extension).
fn extension_dot(path: &str, separator: char) -> Option<usize> {
    let component_start = path.rfind('/').map_or(0, |i| i + 1);
    let component = &path[component_start..];
    match component.rfind(separator) {
        Some(i) if i > 0 && i + separator.len_utf8() < component.len() => {
            Some(component_start + i)
        }
        _ => None,
    }
}

fn replace_at(text: &str, index: usize, replacement: char) -> String {
    let mut out = String::with_capacity(text.len() + replacement.len_utf8());
    out.push_str(&text[..index]);
    out.push(replacement);
    let skip = text[index..]
        .chars()
        .next()
        .map_or(0, char::len_utf8);
    out.push_str(&text[index + skip..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_rewrites_trailing_extension() {
        assert_eq!(encode("p1/t1.txt"), "p1/t1~txt");
        assert_eq!(encode("helper.rb"), "helper~rb");
    }

    #[test]
    fn encode_only_touches_final_component() {
        assert_eq!(encode("release-1.0/notes.txt"), "release-1.0/notes~txt");
    }

    #[test]
    fn encode_rewrites_only_the_last_dot() {
        assert_eq!(encode("a/archive.tar.gz"), "a/archive.tar~gz");
    }

    #[test]
    fn encode_passes_through_without_extension() {
        assert_eq!(encode("projects/alpha"), "projects/alpha");
    }

    #[test]
    fn encode_ignores_leading_dot() {
        // A hidden file has no extension to rewrite.
        assert_eq!(encode("conf/.hidden"), "conf/.hidden");
    }

    #[test]
    fn encode_ignores_trailing_dot() {
        assert_eq!(encode("odd/name."), "odd/name.");
    }

    #[test]
    fn decode_reverses_encode() {
        for path in ["p1/t1.txt", "helper.rb", "a/archive.tar.gz", "plain"] {
            assert_eq!(decode(&encode(path)), path);
        }
    }
}
