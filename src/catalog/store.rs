//! Message catalog storage and event rendering

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;

use crate::event::DomainEvent;
use crate::helpers::default_helpers;
use crate::render::{render, Helper, RenderContext, RenderMode};

use super::types::{CatalogError, CatalogResult, MessageTemplate, RenderedMessage};

/// In-memory catalog of message templates keyed by event type
pub struct MessageCatalog {
    templates: DashMap<String, MessageTemplate>,
    helpers: HashMap<String, Arc<dyn Helper>>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageCatalog {
    /// Create a catalog with the built-in helper table
    pub fn new() -> Self {
        Self {
            templates: DashMap::new(),
            helpers: default_helpers(),
        }
    }

    /// Create a catalog with a custom helper table
    pub fn with_helpers(helpers: HashMap<String, Arc<dyn Helper>>) -> Self {
        Self {
            templates: DashMap::new(),
            helpers,
        }
    }

    /// Register a template under its event type
    pub fn register(&self, template: MessageTemplate) -> CatalogResult<()> {
        template.validate()?;

        if self.templates.contains_key(&template.event_type) {
            return Err(CatalogError::AlreadyExists(template.event_type));
        }

        self.templates
            .insert(template.event_type.clone(), template);

        Ok(())
    }

    /// Get the template for an event type
    pub fn get(&self, event_type: &str) -> CatalogResult<MessageTemplate> {
        self.templates
            .get(event_type)
            .map(|t| t.clone())
            .ok_or_else(|| CatalogError::NotFound(event_type.to_string()))
    }

    /// Remove the template for an event type
    pub fn remove(&self, event_type: &str) -> CatalogResult<()> {
        self.templates
            .remove(event_type)
            .map(|_| ())
            .ok_or_else(|| CatalogError::NotFound(event_type.to_string()))
    }

    /// Whether a template is registered for an event type
    pub fn exists(&self, event_type: &str) -> bool {
        self.templates.contains_key(event_type)
    }

    /// List all registered templates
    pub fn list(&self) -> Vec<MessageTemplate> {
        self.templates
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Number of registered templates
    pub fn count(&self) -> usize {
        self.templates.len()
    }

    /// Render the message for an event
    ///
    /// The template sees `event_type` and RFC 3339 `occurred_at` variables
    /// plus every entry of the event's data object; data entries win on
    /// collision.
    pub fn render_event(
        &self,
        event: &DomainEvent,
        mode: RenderMode,
    ) -> CatalogResult<RenderedMessage> {
        let template = self.get(&event.event_type)?;
        let variables = event_variables(event)?;

        let context = RenderContext {
            mode,
            variables,
            helpers: self.helpers.clone(),
        };

        let chunks = render(&template.body, &context)?;

        tracing::debug!(
            event_type = %event.event_type,
            event_id = %event.id,
            chunks = chunks.len(),
            "Rendered event message"
        );

        Ok(RenderedMessage {
            event_type: template.event_type,
            mode,
            chunks,
        })
    }
}

/// Create an Arc-wrapped message catalog
pub fn create_message_catalog() -> Arc<MessageCatalog> {
    Arc::new(MessageCatalog::new())
}

/// Build the variable table for an event
fn event_variables(
    event: &DomainEvent,
) -> CatalogResult<serde_json::Map<String, serde_json::Value>> {
    let mut variables = serde_json::Map::new();
    variables.insert(
        "event_type".to_string(),
        serde_json::Value::String(event.event_type.clone()),
    );
    variables.insert(
        "occurred_at".to_string(),
        serde_json::Value::String(event.occurred_at.to_rfc3339()),
    );

    match &event.data {
        serde_json::Value::Null => {}
        serde_json::Value::Object(data) => {
            for (key, value) in data {
                variables.insert(key.clone(), value.clone());
            }
        }
        _ => {
            return Err(CatalogError::InvalidEventData(
                "Event data must be a JSON object".to_string(),
            ));
        }
    }

    Ok(variables)
}
