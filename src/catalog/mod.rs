//! Message template catalog.
//!
//! This module provides:
//! - Template definitions bound to event types
//! - In-memory registry with concurrent access
//! - Event rendering that glues events, templates, and helpers together
//!
//! # Example
//!
//! ```ignore
//! let catalog = MessageCatalog::new();
//!
//! catalog.register(MessageTemplate::new(
//!     "invoice.sent",
//!     "Invoice {{invoice_id}} for {{money amount currency}} sent on {{date occurred_at}}",
//! ))?;
//!
//! let event = DomainEvent::new("invoice.sent", json!({
//!     "invoice_id": "INV-0042",
//!     "amount": 125000,
//!     "currency": "EUR"
//! }));
//!
//! let message = catalog.render_event(&event, RenderMode::Html)?;
//! let html = message.to_html();
//! ```

mod store;
mod types;

pub use store::{create_message_catalog, MessageCatalog};
pub use types::{CatalogError, CatalogResult, MessageTemplate, RenderedMessage};
