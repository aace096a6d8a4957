//! Date and time formatting helpers

use std::fmt::Write;

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::render::{Helper, RenderContext};

/// Default format for the `date` helper
const DATE_FORMAT: &str = "%B %-d, %Y";

/// Default format for the `datetime` helper
const DATETIME_FORMAT: &str = "%B %-d, %Y %H:%M";

/// Formats a timestamp as a calendar date
///
/// Accepts an RFC 3339 string or integer Unix seconds; an optional second
/// argument overrides the chrono format string.
pub struct DateHelper;

impl Helper for DateHelper {
    fn call(&self, _context: &RenderContext, args: &[Value]) -> anyhow::Result<Vec<Value>> {
        format_timestamp("date", DATE_FORMAT, args)
    }
}

/// Formats a timestamp as a calendar date with wall-clock time, in UTC
pub struct DateTimeHelper;

impl Helper for DateTimeHelper {
    fn call(&self, _context: &RenderContext, args: &[Value]) -> anyhow::Result<Vec<Value>> {
        format_timestamp("datetime", DATETIME_FORMAT, args)
    }
}

fn format_timestamp(
    name: &str,
    default_format: &str,
    args: &[Value],
) -> anyhow::Result<Vec<Value>> {
    if args.is_empty() || args.len() > 2 {
        bail!(
            "{} expects a timestamp and an optional format, got {} arguments",
            name,
            args.len()
        );
    }

    let timestamp = parse_timestamp(&args[0])
        .with_context(|| format!("{} could not parse its first argument", name))?;

    let format = match args.get(1) {
        None => default_format,
        Some(Value::String(format)) => format.as_str(),
        Some(other) => bail!("{} expects a format string, got {}", name, other),
    };

    // A bad format specifier surfaces as a fmt::Error here, not a panic.
    let mut rendered = String::new();
    if write!(rendered, "{}", timestamp.format(format)).is_err() {
        bail!("{} given an invalid format string: {}", name, format);
    }

    Ok(vec![Value::String(rendered)])
}

/// Parse an RFC 3339 string or integer Unix seconds into a UTC timestamp
fn parse_timestamp(value: &Value) -> anyhow::Result<DateTime<Utc>> {
    match value {
        Value::String(text) => {
            let parsed = DateTime::parse_from_rfc3339(text)
                .with_context(|| format!("not an RFC 3339 timestamp: {}", text))?;
            Ok(parsed.with_timezone(&Utc))
        }
        Value::Number(number) => {
            let seconds = number
                .as_i64()
                .context("Unix timestamp must be an integer")?;
            DateTime::from_timestamp(seconds, 0).context("Unix timestamp out of range")
        }
        other => bail!("expected an RFC 3339 string or Unix seconds, got {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderMode;
    use serde_json::json;

    fn context() -> RenderContext {
        RenderContext::new(RenderMode::Text)
    }

    #[test]
    fn test_date_formats_rfc3339() {
        let values = DateHelper
            .call(&context(), &[json!("2026-02-07T09:30:00Z")])
            .unwrap();
        assert_eq!(values, vec![json!("February 7, 2026")]);
    }

    #[test]
    fn test_date_accepts_offset_timestamps() {
        let values = DateHelper
            .call(&context(), &[json!("2026-02-07T01:30:00-05:00")])
            .unwrap();
        assert_eq!(values, vec![json!("February 7, 2026")]);
    }

    #[test]
    fn test_date_accepts_unix_seconds() {
        let values = DateHelper.call(&context(), &[json!(1770456600)]).unwrap();
        assert_eq!(values, vec![json!("February 7, 2026")]);
    }

    #[test]
    fn test_datetime_includes_time() {
        let values = DateTimeHelper
            .call(&context(), &[json!("2026-02-07T09:30:00Z")])
            .unwrap();
        assert_eq!(values, vec![json!("February 7, 2026 09:30")]);
    }

    #[test]
    fn test_date_custom_format() {
        let values = DateHelper
            .call(&context(), &[json!("2026-02-07T09:30:00Z"), json!("%Y-%m-%d")])
            .unwrap();
        assert_eq!(values, vec![json!("2026-02-07")]);
    }

    #[test]
    fn test_date_rejects_unparseable_timestamp() {
        let err = DateHelper
            .call(&context(), &[json!("yesterday")])
            .unwrap_err();
        assert!(err.to_string().contains("date"));
    }

    #[test]
    fn test_date_rejects_invalid_format_without_panicking() {
        let err = DateHelper
            .call(&context(), &[json!("2026-02-07T09:30:00Z"), json!("%")])
            .unwrap_err();
        assert!(err.to_string().contains("invalid format string"));
    }

    #[test]
    fn test_date_requires_arguments() {
        assert!(DateHelper.call(&context(), &[]).is_err());
    }

    #[test]
    fn test_date_rejects_non_timestamp_values() {
        assert!(DateHelper.call(&context(), &[json!(true)]).is_err());
    }
}
