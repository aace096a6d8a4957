//! Plain-text chunk consumer

use serde_json::Value;

use crate::helpers::Link;
use crate::render::Chunk;

/// Flatten rendered chunks into plain text
pub fn to_text(chunks: &[Chunk]) -> String {
    let mut out = String::new();

    for chunk in chunks {
        match chunk {
            Chunk::Text(text) => out.push_str(text),
            Chunk::Value(value) => out.push_str(&value_text(value)),
        }
    }

    out
}

/// Plain-text rendition of a rich chunk value
///
/// Links collapse to their visible text, nulls vanish, arrays and other
/// objects fall back to their JSON form.
pub(crate) fn value_text(value: &Value) -> String {
    if let Some(link) = Link::from_value(value) {
        return link.text;
    }

    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
