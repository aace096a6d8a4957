//! Domain events that messages are rendered for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A domain event carrying the data a message template renders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique identifier for this event
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Type of event (e.g., "order.created", "invoice.sent")
    pub event_type: String,
    /// When the event occurred
    #[serde(default = "Utc::now")]
    pub occurred_at: DateTime<Utc>,
    /// Event data; must be a JSON object or null to be rendered
    #[serde(default)]
    pub data: serde_json::Value,
}

impl DomainEvent {
    /// Create an event occurring now
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type: event_type.into(),
            occurred_at: Utc::now(),
            data,
        }
    }

    /// Override the occurrence timestamp
    pub fn with_occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }
}
