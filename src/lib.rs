// Rendering core (scanner, context, chunks)
pub mod render;

// Built-in helpers and chunk consumers
pub mod helpers;
pub mod output;

// Domain layer (events and the template catalog)
pub mod catalog;
pub mod event;

// Re-export the primary API surface
pub use catalog::{
    create_message_catalog, CatalogError, CatalogResult, MessageCatalog, MessageTemplate,
    RenderedMessage,
};
pub use event::DomainEvent;
pub use helpers::default_helpers;
pub use output::{to_html, to_text};
pub use render::{render, Chunk, Helper, RenderContext, RenderError, RenderMode, RenderResult};
