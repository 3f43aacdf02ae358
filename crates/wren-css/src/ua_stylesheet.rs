//! User-Agent Stylesheet
//!
//! [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
//!
//! "User agents are expected to have a default style sheet that presents elements
//! of HTML documents in ways consistent with general user expectations."
//!
//! Every container is fed this sheet before the document's own rules, so a
//! document rule for the same selector merges over it property by property.

use std::sync::OnceLock;

use crate::cascade::StyleSheet;

/// [WHATWG HTML § 15.3 Rendering: Suggested default style sheet](https://html.spec.whatwg.org/multipage/rendering.html#the-css-user-agent-style-sheet-and-presentational-hints)
///
/// Default CSS rules for HTML elements. Only tag selectors are used, since
/// those are the only selectors the cascade matches besides classes.
pub const DEFAULT_STYLE_SHEET: &str = r"
/* [§ 15.3.1 Hidden elements](https://html.spec.whatwg.org/multipage/rendering.html#hidden-elements) */
/* The following elements must have their 'display' property set to 'none'. */
area, base, basefont, head, link, meta, noembed, noframes, param,
script, style, template, title {
    display: none;
}

/* [§ 15.3.3 Flow content](https://html.spec.whatwg.org/multipage/rendering.html#flow-content-3) */
address, blockquote, body, center, dd, div, dl, dt, fieldset,
form, h1, h2, h3, h4, h5, h6, hr, html, ol, p, pre, ul {
    display: block;
}

body {
    margin: 8px;
}

p, blockquote, dl, ol, ul {
    margin-top: 1em;
    margin-bottom: 1em;
}

blockquote {
    margin-left: 40px;
    margin-right: 40px;
}

dd {
    margin-left: 40px;
}

center {
    text-align: center;
}

pre {
    white-space: pre;
    font-family: monospace;
}

hr {
    border: 1px inset gray;
    margin-top: 0.5em;
    margin-bottom: 0.5em;
}

/* [§ 15.3.6 Sections and headings](https://html.spec.whatwg.org/multipage/rendering.html#sections-and-headings) */
h1 { font-size: 2em; font-weight: bold; margin-top: 0.67em; margin-bottom: 0.67em; }
h2 { font-size: 1.5em; font-weight: bold; margin-top: 0.83em; margin-bottom: 0.83em; }
h3 { font-size: 1.17em; font-weight: bold; margin-top: 1em; margin-bottom: 1em; }
h4 { font-weight: bold; margin-top: 1.33em; margin-bottom: 1.33em; }
h5 { font-size: 0.83em; font-weight: bold; margin-top: 1.67em; margin-bottom: 1.67em; }
h6 { font-size: 0.67em; font-weight: bold; margin-top: 2.33em; margin-bottom: 2.33em; }

/* [§ 15.3.7 Lists](https://html.spec.whatwg.org/multipage/rendering.html#lists) */
li {
    display: list-item;
}

ol, ul {
    margin-left: 40px;
}

ol {
    list-style-type: decimal;
}

ul {
    list-style-type: disc;
}

/* [§ 15.3.8 Tables](https://html.spec.whatwg.org/multipage/rendering.html#tables-2) */
table {
    display: table;
    border-spacing: 2px;
    border-collapse: separate;
}

caption { display: table-caption; }
colgroup { display: table-column-group; }
col { display: table-column; }
thead { display: table-header-group; }
tbody { display: table-row-group; }
tfoot { display: table-footer-group; }
tr { display: table-row; }

td, th {
    display: table-cell;
    padding: 1px;
}

th {
    font-weight: bold;
    text-align: center;
}

/* [§ 15.3.4 Phrasing content](https://html.spec.whatwg.org/multipage/rendering.html#phrasing-content-3) */
b, strong { font-weight: bold; }
i, em, cite, var, dfn { font-style: italic; }
u, ins { text-decoration: underline; }
s, strike, del { text-decoration: line-through; }
code, kbd, samp, tt { font-family: monospace; }
big { font-size: larger; }
small { font-size: smaller; }
sub { vertical-align: sub; font-size: smaller; }
sup { vertical-align: super; font-size: smaller; }
nobr { white-space: nowrap; }

a {
    color: blue;
    text-decoration: underline;
}
";

/// The parsed [`DEFAULT_STYLE_SHEET`], built once.
pub fn default_style_sheet() -> &'static StyleSheet {
    static SHEET: OnceLock<StyleSheet> = OnceLock::new();
    SHEET.get_or_init(|| {
        let mut sheet = StyleSheet::new();
        sheet.feed(DEFAULT_STYLE_SHEET);
        sheet
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cascade::ALL_MEDIA;

    #[test]
    fn test_default_sheet_parses() {
        let sheet = default_style_sheet();
        let td = sheet.block(ALL_MEDIA, "td").unwrap();
        assert_eq!(td.get("display"), Some("table-cell"));
        let h1 = sheet.block(ALL_MEDIA, "h1").unwrap();
        assert_eq!(h1.get("font-weight"), Some("bold"));
        assert_eq!(sheet.block(ALL_MEDIA, "script").unwrap().get("display"), Some("none"));
    }
}
