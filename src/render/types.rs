//! Render types and error definitions

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Render-specific error type
///
/// Any error aborts the render; there is no partial output.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Malformed string literal {literal} at position {position}")]
    MalformedLiteral {
        literal: String,
        position: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown reference '{word}' at position {position}: no helper or variable with that name")]
    UnknownReference { word: String, position: usize },

    #[error("Unexpected block end at position {position}: block names no helper and has no content")]
    UnexpectedBlockEnd { position: usize },

    #[error("Helper '{name}' failed at position {position}: {source}")]
    Helper {
        name: String,
        position: usize,
        source: anyhow::Error,
    },
}

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Output shape of a render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Plain text, no escaping on output
    #[default]
    Text,

    /// HTML, text chunks are escaped on output
    Html,
}

impl RenderMode {
    /// Whether output is destined for HTML
    pub fn is_html(&self) -> bool {
        matches!(self, RenderMode::Html)
    }
}

/// One element of a rendered message
///
/// Adjacent string output is merged into a single `Text` chunk; every
/// non-string value a helper produces stays a standalone `Value` chunk so
/// consumers can format it without re-parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Chunk {
    /// Literal text, possibly merged from several sources
    Text(String),

    /// An opaque helper-produced value, never merged with neighbors
    Value(serde_json::Value),
}

impl Chunk {
    /// The chunk's text, if it is a `Text` chunk
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Chunk::Text(text) => Some(text),
            Chunk::Value(_) => None,
        }
    }

    /// The chunk's value, if it is a `Value` chunk
    pub fn as_value(&self) -> Option<&serde_json::Value> {
        match self {
            Chunk::Text(_) => None,
            Chunk::Value(value) => Some(value),
        }
    }
}

impl From<&str> for Chunk {
    fn from(text: &str) -> Self {
        Chunk::Text(text.to_string())
    }
}

impl From<String> for Chunk {
    fn from(text: String) -> Self {
        Chunk::Text(text)
    }
}

/// A named block formatter
///
/// Helpers receive the active context and the block's already-resolved
/// arguments, and return the values to append to the output. Returning an
/// error aborts the whole render.
pub trait Helper: Send + Sync {
    fn call(
        &self,
        context: &RenderContext,
        args: &[serde_json::Value],
    ) -> anyhow::Result<Vec<serde_json::Value>>;
}

impl<F> Helper for F
where
    F: Fn(&RenderContext, &[serde_json::Value]) -> anyhow::Result<Vec<serde_json::Value>>
        + Send
        + Sync,
{
    fn call(
        &self,
        context: &RenderContext,
        args: &[serde_json::Value],
    ) -> anyhow::Result<Vec<serde_json::Value>> {
        self(context, args)
    }
}

/// Everything a render reads: output mode, variables, helpers
///
/// Helper names and variable names are independent namespaces; inside a
/// block the first word checks helpers before variables. The context is
/// immutable for the duration of a render.
#[derive(Default)]
pub struct RenderContext {
    /// Output shape the consumer intends
    pub mode: RenderMode,

    /// Variable table for bare-word arguments
    pub variables: serde_json::Map<String, serde_json::Value>,

    /// Helper table for block-leading words
    pub helpers: HashMap<String, Arc<dyn Helper>>,
}

impl RenderContext {
    /// Create an empty context for the given mode
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            variables: serde_json::Map::new(),
            helpers: HashMap::new(),
        }
    }

    /// Add a single variable
    pub fn with_variable(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Merge in a variable map
    pub fn with_variables(mut self, variables: serde_json::Map<String, serde_json::Value>) -> Self {
        self.variables.extend(variables);
        self
    }

    /// Register a single helper
    pub fn with_helper(mut self, name: impl Into<String>, helper: impl Helper + 'static) -> Self {
        self.helpers.insert(name.into(), Arc::new(helper));
        self
    }

    /// Merge in a helper table
    pub fn with_helpers(mut self, helpers: HashMap<String, Arc<dyn Helper>>) -> Self {
        self.helpers.extend(helpers);
        self
    }
}
