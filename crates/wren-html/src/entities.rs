//! Character reference decoding for text runs.
//!
//! Only the references documents commonly rely on are known by name;
//! numeric references (`&#169;`, `&#xA9;`) cover the rest. An unknown or
//! malformed reference is left in the text untouched.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Maps reference names (without `&` and `;`) to their replacement text.
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("amp", "&"),
        ("lt", "<"),
        ("gt", ">"),
        ("quot", "\""),
        ("apos", "'"),
        ("nbsp", "\u{00A0}"),
        ("copy", "\u{00A9}"),
        ("reg", "\u{00AE}"),
        ("trade", "\u{2122}"),
        ("mdash", "\u{2014}"),
        ("ndash", "\u{2013}"),
        ("hellip", "\u{2026}"),
        ("bull", "\u{2022}"),
        ("middot", "\u{00B7}"),
        ("laquo", "\u{00AB}"),
        ("raquo", "\u{00BB}"),
        ("euro", "\u{20AC}"),
        ("pound", "\u{00A3}"),
        ("times", "\u{00D7}"),
        ("deg", "\u{00B0}"),
    ])
});

/// Longest name in [`NAMED_ENTITIES`]; bounds the search for `;`.
const MAX_REFERENCE_LEN: usize = 8;

/// Look up a named character reference, `name` without `&` or `;`.
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(name).copied()
}

/// Replace `&name;`, `&#NNN;` and `&#xHH;` references in `text`.
///
/// Borrows when the text contains no `&`.
#[must_use]
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        match after
            .char_indices()
            .take(MAX_REFERENCE_LEN + 2)
            .find(|&(_, c)| c == ';')
            .and_then(|(semi, _)| resolve(&after[..semi]).map(|r| (semi, r)))
        {
            Some((semi, replacement)) => {
                out.push_str(&replacement);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn resolve(reference: &str) -> Option<Cow<'static, str>> {
    if let Some(numeric) = reference.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(|c| Cow::Owned(c.to_string()));
    }
    lookup_entity(reference).map(Cow::Borrowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(decode_entities("no refs"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_named_and_numeric() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;p&gt;"), "<p>");
        assert_eq!(decode_entities("&#65;&#x42;"), "AB");
        assert_eq!(decode_entities("x&nbsp;y"), "x\u{00A0}y");
    }

    #[test]
    fn test_unknown_reference_kept() {
        assert_eq!(decode_entities("&bogus; & done"), "&bogus; & done");
        assert_eq!(decode_entities("tail &"), "tail &");
    }
}
