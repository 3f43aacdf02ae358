use std::fmt;

/// Elements that never take content, so tree construction attaches them
/// without descending.
const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "basefont", "br", "col", "frame", "hr", "img", "input", "isindex", "link",
    "meta", "param",
];

/// One `name=value` pair from a tag.
///
/// Names are lower-cased; values keep their case with surrounding quotes
/// removed. A bare attribute (`nowrap`) has an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lower-cased attribute name.
    pub name: String,
    /// Unquoted attribute value.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// A start or end tag as it appeared in the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
    attributes: Vec<Attribute>,
    closing: bool,
    self_closing: bool,
}

impl Tag {
    /// A start tag with no attributes.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attributes: Vec::new(),
            closing: false,
            self_closing: false,
        }
    }

    /// Builder-style attribute insertion; an attribute already present keeps
    /// its first value.
    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.push_attribute(name.to_ascii_lowercase(), value.to_string());
        self
    }

    /// Parse the raw text of a tag, angle brackets included.
    ///
    /// ```ignore
    /// let tag = Tag::parse("<TD colspan=2 class=\"x\">");
    /// assert_eq!(tag.name(), "td");
    /// assert_eq!(tag.attribute("colspan"), Some("2"));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let inner = raw.strip_prefix('<').unwrap_or(raw);
        let inner = inner.strip_suffix('>').unwrap_or(inner);

        let mut self_closing = false;
        let inner = match inner.strip_suffix('/') {
            // `<!-- x -->`-style declarations end in anything; only a real
            // element name gets the self-closing treatment.
            Some(rest) if !inner.starts_with('!') => {
                self_closing = true;
                rest
            }
            _ => inner,
        };

        let name_end = inner
            .find(char::is_whitespace)
            .unwrap_or(inner.len());
        let (raw_name, rest) = inner.split_at(name_end);

        let (closing, name) = match raw_name.strip_prefix('/') {
            Some(name) => (true, name),
            None => (false, raw_name),
        };

        let mut tag = Self {
            name: name.to_ascii_lowercase(),
            attributes: Vec::new(),
            closing,
            self_closing,
        };
        for (name, value) in AttributeScanner::new(rest) {
            tag.push_attribute(name, value);
        }
        tag
    }

    fn push_attribute(&mut self, name: String, value: String) {
        if !self.has_attribute(&name) {
            self.attributes.push(Attribute::new(name, value));
        }
    }

    /// Lower-cased tag name, without the leading `/` of a closing tag.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True for `</name>`.
    #[must_use]
    pub const fn is_closing(&self) -> bool {
        self.closing
    }

    /// True if the tag never contains children: one of the HTML void
    /// elements, a markup declaration (`<!...>`), or written as `<x/>`.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.self_closing || self.name.starts_with('!') || VOID_ELEMENTS.contains(&self.name.as_str())
    }

    /// Attributes in document order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Value of the named attribute. `name` must be lower-case.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Whether the named attribute is present. `name` must be lower-case.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.closing {
            write!(f, "</{}>", self.name)
        } else {
            write!(f, "<{}>", self.name)
        }
    }
}

/// Walks the attribute portion of a tag: `name`, `name=value`,
/// `name="value"` or `name='value'`, separated by whitespace.
struct AttributeScanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> AttributeScanner<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            let _ = self.consume();
        }
    }

    /// Consume characters until `stop` matches, returning the consumed slice.
    fn take_until(&mut self, stop: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(|c| !stop(c)) {
            let _ = self.consume();
        }
        &self.input[start..self.pos]
    }
}

impl Iterator for AttributeScanner<'_> {
    type Item = (String, String);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.skip_whitespace();
            let _ = self.peek()?;

            let name = self.take_until(|c| c.is_whitespace() || c == '=');
            self.skip_whitespace();

            if self.peek() != Some('=') {
                if name.is_empty() {
                    // Stray character that cannot start a name.
                    let _ = self.consume();
                    continue;
                }
                return Some((name.to_ascii_lowercase(), String::new()));
            }
            let _ = self.consume();
            self.skip_whitespace();

            let value = match self.peek() {
                Some(quote @ ('"' | '\'')) => {
                    let _ = self.consume();
                    let value = self.take_until(|c| c == quote);
                    let _ = self.consume();
                    value
                }
                _ => self.take_until(char::is_whitespace),
            };

            if name.is_empty() {
                continue;
            }
            return Some((name.to_ascii_lowercase(), value.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> Vec<(String, String)> {
        AttributeScanner::new(input).collect()
    }

    #[test]
    fn test_scanner_mixed_forms() {
        assert_eq!(
            scan(r#" a=1 b="two words" c='x' nowrap"#),
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "two words".to_string()),
                ("c".to_string(), "x".to_string()),
                ("nowrap".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_scanner_spaces_around_equals() {
        assert_eq!(scan("width = 50"), vec![("width".to_string(), "50".to_string())]);
    }

    #[test]
    fn test_scanner_value_with_equals() {
        assert_eq!(
            scan("href=\"a?b=c\""),
            vec![("href".to_string(), "a?b=c".to_string())]
        );
    }

    #[test]
    fn test_scanner_skips_nameless_value() {
        assert_eq!(scan("=oops x=1"), vec![("x".to_string(), "1".to_string())]);
    }
}
