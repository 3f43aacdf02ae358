//! Integration tests for the markup scanner.

use wren_html::{DocumentTokenizer, MarkupScanner, MarkupToken, Tag};

/// Helper to tokenize a string
fn tokenize(input: &str) -> Vec<MarkupToken> {
    MarkupScanner::new().tokenize(input)
}

/// Helper to render tokens compactly: tags as `<name>`/`</name>`, text quoted
fn describe(tokens: &[MarkupToken]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| match t {
            MarkupToken::Tag(tag) => tag.to_string(),
            MarkupToken::Text(text) => format!("{text:?}"),
        })
        .collect()
}

#[test]
fn test_plain_text() {
    assert_eq!(
        tokenize("Hello"),
        vec![MarkupToken::Text("Hello".to_string())]
    );
}

#[test]
fn test_empty_document() {
    assert!(tokenize("").is_empty());
}

#[test]
fn test_tags_and_text_interleave() {
    let tokens = tokenize("<p>Hello <b>you</b></p>");
    assert_eq!(
        describe(&tokens),
        vec!["<p>", "\"Hello \"", "<b>", "\"you\"", "</b>", "</p>"]
    );
}

#[test]
fn test_whitespace_runs_are_kept() {
    let tokens = tokenize("<div>\n  <p>x</p>\n</div>");
    assert_eq!(
        describe(&tokens),
        vec!["<div>", "\"\\n  \"", "<p>", "\"x\"", "</p>", "\"\\n\"", "</div>"]
    );
}

#[test]
fn test_comments_dropped() {
    let tokens = tokenize("a<!-- <b>not a tag</b> -->b");
    assert_eq!(tokens, vec![MarkupToken::Text("ab".to_string())]);
}

#[test]
fn test_lone_lt_is_text() {
    let tokens = tokenize("1 < 2");
    assert_eq!(tokens, vec![MarkupToken::Text("1 < 2".to_string())]);
}

#[test]
fn test_entities_decoded_in_text() {
    let tokens = tokenize("<p>a &amp; b</p>");
    assert_eq!(tokens[1], MarkupToken::Text("a & b".to_string()));
}

#[test]
fn test_style_content_is_raw() {
    let tokens = tokenize("<style>p > b { color: red } /* &amp; */</style><p>x</p>");
    assert_eq!(
        describe(&tokens),
        vec![
            "<style>",
            "\"p > b { color: red } /* &amp; */\"",
            "</style>",
            "<p>",
            "\"x\"",
            "</p>"
        ]
    );
}

#[test]
fn test_tag_with_attributes_parsed() {
    let tokens = tokenize(r#"<td rowspan="2">A</td>"#);
    match &tokens[0] {
        MarkupToken::Tag(tag) => {
            assert_eq!(tag.name(), "td");
            assert_eq!(tag.attribute("rowspan"), Some("2"));
        }
        MarkupToken::Text(_) => panic!("Expected Tag token"),
    }
}

#[test]
fn test_unterminated_tag_becomes_text() {
    let tokens = tokenize("x<p class");
    assert_eq!(tokens, vec![MarkupToken::Text("x<p class".to_string())]);
}

#[test]
fn test_void_tag_token() {
    let tokens = tokenize("a<br>b");
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1], MarkupToken::Tag(Tag::parse("<br>")));
}
