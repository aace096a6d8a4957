//! Hyperlink helper with mode-aware output

use anyhow::bail;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::render::{Helper, RenderContext};

/// A hyperlink produced by the `link` helper in HTML mode
///
/// Survives rendering as a standalone chunk value; the HTML consumer turns
/// it into an anchor tag with both fields escaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    /// Visible link text
    pub text: String,

    /// Target URL
    pub url: String,
}

impl Link {
    /// Recover a link from a chunk value, if it is one
    pub fn from_value(value: &Value) -> Option<Link> {
        serde_json::from_value(value.clone()).ok()
    }

    /// The link as a chunk value
    pub fn to_value(&self) -> Value {
        serde_json::json!({ "text": self.text, "url": self.url })
    }
}

/// Produces a hyperlink from text and URL arguments
///
/// In `Html` mode the result is a rich [`Link`] value; in `Text` mode only
/// the visible text survives. With a single argument the URL doubles as
/// the text.
pub struct LinkHelper;

impl Helper for LinkHelper {
    fn call(&self, context: &RenderContext, args: &[Value]) -> anyhow::Result<Vec<Value>> {
        let (text, url) = match args {
            [url] => (string_arg("url", url)?, string_arg("url", url)?),
            [text, url] => (string_arg("text", text)?, string_arg("url", url)?),
            _ => bail!("link expects text and URL arguments, got {}", args.len()),
        };

        if context.mode.is_html() {
            Ok(vec![Link { text, url }.to_value()])
        } else {
            Ok(vec![Value::String(text)])
        }
    }
}

fn string_arg(name: &str, value: &Value) -> anyhow::Result<String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        other => bail!("link {} must be a string, got {}", name, other),
    }
}
