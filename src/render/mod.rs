//! Template rendering core.
//!
//! This module provides:
//! - A single-pass character scanner for `{{ ... }}` template blocks
//! - Word resolution against helper and variable tables
//! - Chunked output with adjacent strings merged
//!
//! Rendering is a pure synchronous function: no I/O, no shared state, and
//! deterministic output for a given template and context. Helpers can
//! return rich values (links, payload fragments) that survive as standalone
//! chunks, so consumers choose the final text or HTML formatting without
//! re-parsing anything.
//!
//! # Example
//!
//! ```ignore
//! let context = RenderContext::new(RenderMode::Text)
//!     .with_variable("customer", "Jan")
//!     .with_variable("order_id", "ORD-123")
//!     .with_helpers(default_helpers());
//!
//! let chunks = render("Hi {{customer}}, order {{order_id}} shipped", &context)?;
//!
//! assert_eq!(to_text(&chunks), "Hi Jan, order ORD-123 shipped");
//! ```

mod scanner;
mod types;

pub use scanner::render;
pub use types::{Chunk, Helper, RenderContext, RenderError, RenderMode, RenderResult};
