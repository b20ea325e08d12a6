use std::io::{self, Write};

use super::{HtmlOptions, HtmlStyle};
use crate::index::{Segment, TokenMap, TokenRecord};

const STYLE: &str = r#"        <style>
            .m-code a {
                color: inherit;
                text-decoration: none;
            }
            .m-code a:hover {
                text-decoration: underline;
            }
        </style>
"#;

/// Render `source` as highlighted, linked HTML.
///
/// Every byte of `source` is written exactly once, escaped; removing the
/// tags and unescaping the output gives back `source`.
pub fn render_html<W: Write>(
    source: &[u8],
    tokens: &TokenMap,
    options: &HtmlOptions,
    out: &mut W,
) -> io::Result<()> {
    if options.style == HtmlStyle::Document {
        write_document_head(options, out)?;
    }

    out.write_all(b"<pre class=\"m-code\">")?;
    for segment in tokens.segments() {
        match segment {
            Segment::Gap(range) => escape_html(slice(source, range.start, range.end)?, out)?,
            Segment::Token(record) => write_record(source, record, out)?,
        }
    }
    out.write_all(b"</pre>")?;

    if options.style == HtmlStyle::Document {
        out.write_all(b"\n    </body>\n</html>")?;
    }
    out.write_all(b"\n")
}

fn write_document_head<W: Write>(
    options: &HtmlOptions,
    out: &mut W,
) -> io::Result<()> {
    out.write_all(b"<!doctype html>\n<html>\n    <head>\n        <meta charset=\"UTF-8\" />\n")?;
    for stylesheet in &options.stylesheets {
        out.write_all(b"        <link rel=\"stylesheet\" href=\"")?;
        escape_attribute(stylesheet.as_bytes(), out)?;
        out.write_all(b"\" />\n")?;
    }
    out.write_all(STYLE.as_bytes())?;
    out.write_all(b"    </head>\n    <body>\n")
}

fn write_record<W: Write>(
    source: &[u8],
    record: &TokenRecord,
    out: &mut W,
) -> io::Result<()> {
    let css = record.category.css_class();

    if let Some(css) = css {
        write!(out, "<span class=\"{css}\">")?;
    }
    if let Some(link) = record.link.as_ref() {
        out.write_all(b"<a href=\"file://")?;
        escape_attribute(link.file.as_bytes(), out)?;
        write!(out, "#{}_", link.line)?;
        escape_attribute(link.name.as_bytes(), out)?;
        out.write_all(b"\">")?;
    }

    escape_html(slice(source, record.start, record.end())?, out)?;

    if record.link.is_some() {
        out.write_all(b"</a>")?;
    }
    if css.is_some() {
        out.write_all(b"</span>")?;
    }
    Ok(())
}

fn slice(
    source: &[u8],
    start: usize,
    end: usize,
) -> io::Result<&[u8]> {
    source.get(start..end).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("token [{start}, {end}) exceeds the {}-byte source buffer", source.len()),
        )
    })
}

/// Write `bytes` with `& < > " ' /` replaced by character references.
/// Every other byte is copied verbatim.
pub fn escape_html<W: Write>(
    bytes: &[u8],
    out: &mut W,
) -> io::Result<()> {
    escape_with(bytes, out, |byte| match byte {
        b'/' => Some(b"&#x2F;".as_slice()),
        _ => reference_for(byte),
    })
}

/// Attribute values keep `/` so `file://` URLs stay readable.
fn escape_attribute<W: Write>(
    bytes: &[u8],
    out: &mut W,
) -> io::Result<()> {
    escape_with(bytes, out, reference_for)
}

fn reference_for(byte: u8) -> Option<&'static [u8]> {
    match byte {
        b'&' => Some(b"&amp;".as_slice()),
        b'<' => Some(b"&lt;".as_slice()),
        b'>' => Some(b"&gt;".as_slice()),
        b'"' => Some(b"&quot;".as_slice()),
        b'\'' => Some(b"&#x27;".as_slice()),
        _ => None,
    }
}

fn escape_with<W: Write>(
    bytes: &[u8],
    out: &mut W,
    escape: impl Fn(u8) -> Option<&'static [u8]>,
) -> io::Result<()> {
    let mut pending = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        let Some(escaped) = escape(byte) else {
            continue;
        };
        out.write_all(&bytes[pending..i])?;
        out.write_all(escaped)?;
        pending = i + 1;
    }
    out.write_all(&bytes[pending..])
}

#[cfg(test)]
#[path = "../../tests/src/render/html_tests.rs"]
mod tests;
