use expect_test::expect;

use super::*;
use crate::{
    index::SemanticLink,
    location::DeclLocation,
    render::DEFAULT_STYLESHEETS,
    token::{LexicalKind, RawToken, TokenCategory},
};

fn render(
    source: &[u8],
    tokens: &TokenMap,
    options: &HtmlOptions,
) -> String {
    let mut out = Vec::new();
    render_html(source, tokens, options, &mut out).expect("render to memory");
    String::from_utf8(out).expect("utf-8 output")
}

fn fragment() -> HtmlOptions {
    HtmlOptions {
        style: HtmlStyle::Fragment,
        stylesheets: Vec::new(),
    }
}

/// `int x = 1;\n` with `x` linked into a header.
fn linked_declaration() -> (&'static [u8], TokenMap) {
    let source = b"int x = 1;\n";
    let raw = [
        RawToken::new(0, 3, LexicalKind::RawIdentifier),
        RawToken::new(4, 1, LexicalKind::RawIdentifier),
        RawToken::new(6, 1, LexicalKind::Punctuator),
        RawToken::new(8, 1, LexicalKind::NumericConstant),
        RawToken::new(9, 1, LexicalKind::Punctuator),
    ];
    let mut tokens = TokenMap::populate(source, &raw).unwrap();
    let record = tokens.get_mut(4).unwrap();
    record.category = TokenCategory::Variable;
    record.link = Some(SemanticLink::new("x", "ns::x", &DeclLocation::new("/inc/lib.h", 3, 12)));
    (source, tokens)
}

#[test]
fn fragment_wraps_tokens_in_spans_and_anchors() {
    let (source, tokens) = linked_declaration();
    let html = render(source, &tokens, &fragment());
    expect![[r#"
        <pre class="m-code"><span class="k">int</span> <span class="nv"><a href="file:///inc/lib.h#3_x">x</a></span> <span class="o">=</span> <span class="m">1</span><span class="p">;</span>
        </pre>
    "#]]
    .assert_eq(&html);
}

#[test]
fn document_has_head_and_body() {
    let source = b"a<b\n";
    let raw = [
        RawToken::new(0, 1, LexicalKind::RawIdentifier),
        RawToken::new(1, 1, LexicalKind::Punctuator),
        RawToken::new(2, 1, LexicalKind::RawIdentifier),
    ];
    let tokens = TokenMap::populate(source, &raw).unwrap();
    let options = HtmlOptions {
        style: HtmlStyle::Document,
        stylesheets: vec!["s.css".to_string()],
    };

    let html = render(source, &tokens, &options);
    expect![[r#"
        <!doctype html>
        <html>
            <head>
                <meta charset="UTF-8" />
                <link rel="stylesheet" href="s.css" />
                <style>
                    .m-code a {
                        color: inherit;
                        text-decoration: none;
                    }
                    .m-code a:hover {
                        text-decoration: underline;
                    }
                </style>
            </head>
            <body>
        <pre class="m-code"><span class="n">a</span><span class="o">&lt;</span><span class="n">b</span>
        </pre>
            </body>
        </html>
    "#]]
    .assert_eq(&html);
}

#[test]
fn default_document_links_default_stylesheets() {
    let (source, tokens) = linked_declaration();
    let html = render(source, &tokens, &HtmlOptions::default());
    for stylesheet in DEFAULT_STYLESHEETS {
        let escaped = stylesheet.replace('&', "&amp;");
        assert!(html.contains(&format!("<link rel=\"stylesheet\" href=\"{escaped}\" />")), "{stylesheet}");
    }
}

#[test]
fn other_category_has_no_span() {
    let source = b"@ x";
    let raw = [RawToken::new(0, 1, LexicalKind::Unknown), RawToken::new(2, 1, LexicalKind::RawIdentifier)];
    let tokens = TokenMap::populate(source, &raw).unwrap();
    let html = render(source, &tokens, &fragment());
    assert_eq!(html, "<pre class=\"m-code\">@ <span class=\"n\">x</span></pre>\n");
}

#[test]
fn escape_html_replaces_special_characters() {
    let mut out = Vec::new();
    escape_html(b"a&b<c>d\"e'f/g", &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "a&amp;b&lt;c&gt;d&quot;e&#x27;f&#x2F;g");
}

fn strip_tags(html: &str) -> String {
    let mut text = String::new();
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {},
        }
    }
    text
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#x2F;", "/")
        .replace("&amp;", "&")
}

#[test]
fn stripping_markup_gives_back_the_source() {
    let source = "#include <a/b.h>\nint f() { return 1 < 2 && '\\'' != \"x/y\"; } // a&b\n";
    let raw = crate::frontend::lexer::tokenize(source);
    let mut tokens = TokenMap::populate(source.as_bytes(), &raw).unwrap();
    tokens.replace_range(0, 16, TokenRecord::new(0, 16, TokenCategory::Preprocessor)).unwrap();

    let html = render(source.as_bytes(), &tokens, &fragment());
    let text = unescape(&strip_tags(&html));
    assert_eq!(text, format!("{source}\n"));
}
