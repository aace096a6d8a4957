//! HTML chunk consumer with escaping

use crate::helpers::Link;
use crate::render::Chunk;

use super::text::value_text;

/// Flatten rendered chunks into HTML
///
/// Every piece of text is escaped on the way out; `Link` values become
/// anchor tags with both fields escaped.
pub fn to_html(chunks: &[Chunk]) -> String {
    let mut out = String::new();

    for chunk in chunks {
        match chunk {
            Chunk::Text(text) => out.push_str(&escape_html(text)),
            Chunk::Value(value) => match Link::from_value(value) {
                Some(link) => {
                    out.push_str("<a href=\"");
                    out.push_str(&escape_html(&link.url));
                    out.push_str("\">");
                    out.push_str(&escape_html(&link.text));
                    out.push_str("</a>");
                }
                None => out.push_str(&escape_html(&value_text(value))),
            },
        }
    }

    out
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
