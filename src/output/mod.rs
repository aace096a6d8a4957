//! Chunk array consumers.
//!
//! Rendering leaves formatting decisions to the consumer: `to_text` flattens
//! chunks into plain text, `to_html` escapes on the way out and turns rich
//! link values into anchor tags. Both are pure functions over the chunk
//! array; nothing is re-parsed.

mod html;
mod text;

pub use html::to_html;
pub use text::to_text;
