//! Catalog types and error definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::output;
use crate::render::{Chunk, RenderError, RenderMode};

/// Catalog-specific error type
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("No message template for event type: {0}")]
    NotFound(String),

    #[error("Message template already registered for event type: {0}")]
    AlreadyExists(String),

    #[error("Invalid message template: {0}")]
    InvalidTemplate(String),

    #[error("Invalid event data: {0}")]
    InvalidEventData(String),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// A message template bound to an event type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageTemplate {
    /// Event type this template renders (e.g., "invoice.sent")
    pub event_type: String,

    /// Template body with `{{ ... }}` blocks
    pub body: String,

    /// Template description (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl MessageTemplate {
    /// Create a template for an event type
    pub fn new(event_type: impl Into<String>, body: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            event_type: event_type.into(),
            body: body.into(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validate the template
    pub fn validate(&self) -> CatalogResult<()> {
        if self.event_type.is_empty() || self.event_type.len() > 128 {
            return Err(CatalogError::InvalidTemplate(
                "Event type must be 1-128 characters".to_string(),
            ));
        }

        if self.body.is_empty() {
            return Err(CatalogError::InvalidTemplate(
                "Body must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// A rendered message ready for delivery
#[derive(Debug, Clone)]
pub struct RenderedMessage {
    /// Event type the message was rendered for
    pub event_type: String,

    /// Mode the render ran in
    pub mode: RenderMode,

    /// Rendered output chunks
    pub chunks: Vec<Chunk>,
}

impl RenderedMessage {
    /// Flatten to plain text
    pub fn to_text(&self) -> String {
        output::to_text(&self.chunks)
    }

    /// Flatten to HTML
    pub fn to_html(&self) -> String {
        output::to_html(&self.chunks)
    }
}
