//! Built-in helper catalog.
//!
//! This module provides:
//! - `date` / `datetime` for timestamp formatting
//! - `money` for minor-unit currency amounts
//! - `link` for mode-aware hyperlinks
//!
//! All built-ins validate their arguments and fail the render on misuse
//! rather than emitting partial output.
//!
//! # Example
//!
//! ```ignore
//! let context = RenderContext::new(RenderMode::Html)
//!     .with_variable("amount", 125000)
//!     .with_variable("paid_at", "2026-02-07T09:30:00Z")
//!     .with_helpers(default_helpers());
//!
//! let chunks = render("Paid {{money amount \"EUR\"}} on {{date paid_at}}", &context)?;
//! ```

mod datetime;
mod link;
mod money;

pub use datetime::{DateHelper, DateTimeHelper};
pub use link::{Link, LinkHelper};
pub use money::MoneyHelper;

use std::collections::HashMap;
use std::sync::Arc;

use crate::render::Helper;

/// The standard helper table
///
/// New catalogs start from this table; hand-built contexts can merge it in
/// with the context builder.
pub fn default_helpers() -> HashMap<String, Arc<dyn Helper>> {
    let mut helpers: HashMap<String, Arc<dyn Helper>> = HashMap::new();
    helpers.insert("date".to_string(), Arc::new(DateHelper));
    helpers.insert("datetime".to_string(), Arc::new(DateTimeHelper));
    helpers.insert("money".to_string(), Arc::new(MoneyHelper));
    helpers.insert("link".to_string(), Arc::new(LinkHelper));
    helpers
}
