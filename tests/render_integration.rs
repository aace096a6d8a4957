//! Cross-module integration tests
//!
//! These tests drive the full path from registered templates and domain
//! events through rendering to the text and HTML consumers, using the
//! built-in helper table.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use ara_message_template::{
    create_message_catalog, default_helpers, render, CatalogError, Chunk, DomainEvent, Helper,
    MessageCatalog, MessageTemplate, RenderContext, RenderError, RenderMode,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

/// Create a catalog preloaded with the templates the tests render
fn invoice_catalog() -> MessageCatalog {
    init_tracing();

    let catalog = MessageCatalog::new();

    catalog
        .register(MessageTemplate::new(
            "invoice.sent",
            "Invoice {{link invoice_id invoice_url}} for {{money amount currency}} sent on {{date occurred_at}}",
        ))
        .unwrap();

    catalog
        .register(MessageTemplate::new(
            "payment.received",
            "{{event_type}}: {{money amount}} at {{datetime occurred_at}}",
        ))
        .unwrap();

    catalog
        .register(
            MessageTemplate::new("customer.welcome", "Hi {{customer}}")
                .with_description("Greets a new customer by name"),
        )
        .unwrap();

    catalog
}

fn invoice_event() -> DomainEvent {
    DomainEvent::new(
        "invoice.sent",
        json!({
            "invoice_id": "INV-0042",
            "invoice_url": "https://ara.dev/inv/42",
            "amount": 125000,
            "currency": "EUR"
        }),
    )
    .with_occurred_at(Utc.with_ymd_and_hms(2026, 2, 7, 9, 30, 0).unwrap())
}

// =============================================================================
// End-to-End Rendering Tests
// =============================================================================

mod end_to_end_tests {
    use super::*;

    #[test]
    fn test_invoice_rendered_as_text() {
        let catalog = invoice_catalog();

        let message = catalog
            .render_event(&invoice_event(), RenderMode::Text)
            .unwrap();

        // In text mode every built-in produces strings, so the whole
        // message merges into one chunk.
        assert_eq!(message.chunks.len(), 1);
        assert_eq!(
            message.to_text(),
            "Invoice INV-0042 for €1250.00 sent on February 7, 2026"
        );
    }

    #[test]
    fn test_invoice_rendered_as_html() {
        let catalog = invoice_catalog();

        let message = catalog
            .render_event(&invoice_event(), RenderMode::Html)
            .unwrap();

        assert_eq!(message.chunks.len(), 3);
        assert!(message.chunks[1].as_value().is_some());
        assert_eq!(
            message.to_html(),
            "Invoice <a href=\"https://ara.dev/inv/42\">INV-0042</a> for €1250.00 sent on February 7, 2026"
        );
    }

    #[test]
    fn test_payment_uses_standard_variables() {
        let catalog = invoice_catalog();

        let event = DomainEvent::new("payment.received", json!({"amount": 4999}))
            .with_occurred_at(Utc.with_ymd_and_hms(2026, 2, 7, 9, 30, 0).unwrap());

        let message = catalog.render_event(&event, RenderMode::Text).unwrap();
        assert_eq!(
            message.to_text(),
            "payment.received: $49.99 at February 7, 2026 09:30"
        );
    }

    #[test]
    fn test_event_data_is_escaped_in_html_only() {
        let catalog = invoice_catalog();

        let event = DomainEvent::new("customer.welcome", json!({"customer": "A <&> Co"}));

        let text = catalog.render_event(&event, RenderMode::Text).unwrap();
        assert_eq!(text.to_text(), "Hi A <&> Co");

        let html = catalog.render_event(&event, RenderMode::Html).unwrap();
        assert_eq!(html.to_html(), "Hi A &lt;&amp;&gt; Co");
    }

    #[test]
    fn test_catalog_shared_across_threads() {
        let catalog = create_message_catalog();
        catalog
            .register(MessageTemplate::new("order.shipped", "Order {{order_id}}"))
            .unwrap();

        let mut handles = Vec::new();
        for i in 0..4 {
            let catalog = Arc::clone(&catalog);
            handles.push(std::thread::spawn(move || {
                let event =
                    DomainEvent::new("order.shipped", json!({"order_id": format!("ORD-{}", i)}));
                catalog
                    .render_event(&event, RenderMode::Text)
                    .unwrap()
                    .to_text()
            }));
        }

        let mut rendered: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        rendered.sort();
        assert_eq!(rendered, vec!["Order ORD-0", "Order ORD-1", "Order ORD-2", "Order ORD-3"]);
    }
}

// =============================================================================
// Output Format Tests
// =============================================================================

mod output_format_tests {
    use super::*;

    #[test]
    fn test_rich_values_stay_standalone_chunks() {
        let catalog = invoice_catalog();
        catalog
            .register(MessageTemplate::new("report.ready", "Data: {{payload}}"))
            .unwrap();

        let event = DomainEvent::new("report.ready", json!({"payload": {"rows": 3}}));
        let message = catalog.render_event(&event, RenderMode::Text).unwrap();

        assert_eq!(message.chunks.len(), 2);
        assert_eq!(message.chunks[0], Chunk::Text("Data: ".to_string()));
        assert_eq!(message.chunks[1], Chunk::Value(json!({"rows": 3})));
        assert_eq!(message.to_text(), "Data: {\"rows\":3}");
    }

    #[test]
    fn test_numeric_values_stringify_late() {
        let catalog = invoice_catalog();
        catalog
            .register(MessageTemplate::new("seats.low", "Seats left: {{seats}}"))
            .unwrap();

        let event = DomainEvent::new("seats.low", json!({"seats": 3}));
        let message = catalog.render_event(&event, RenderMode::Text).unwrap();

        assert_eq!(message.chunks[1], Chunk::Value(json!(3)));
        assert_eq!(message.to_text(), "Seats left: 3");
        assert_eq!(message.to_html(), "Seats left: 3");
    }

    #[test]
    fn test_render_is_deterministic_across_modes() {
        let catalog = invoice_catalog();
        let event = invoice_event();

        for mode in [RenderMode::Text, RenderMode::Html] {
            let first = catalog.render_event(&event, mode).unwrap();
            let second = catalog.render_event(&event, mode).unwrap();
            assert_eq!(first.chunks, second.chunks);
        }
    }
}

// =============================================================================
// Error Path Tests
// =============================================================================

mod error_path_tests {
    use super::*;

    #[test]
    fn test_unknown_variable_aborts_render() {
        let catalog = invoice_catalog();

        // invoice.sent needs invoice data this event does not carry.
        let event = DomainEvent::new("invoice.sent", json!({}));

        let err = catalog.render_event(&event, RenderMode::Text).unwrap_err();
        match err {
            CatalogError::Render(RenderError::UnknownReference { word, .. }) => {
                assert_eq!(word, "invoice_id");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_helper_failure_aborts_render() {
        let catalog = invoice_catalog();
        catalog
            .register(MessageTemplate::new("bad.date", "on {{date when}}"))
            .unwrap();

        let event = DomainEvent::new("bad.date", json!({"when": "not a date"}));

        let err = catalog.render_event(&event, RenderMode::Text).unwrap_err();
        match err {
            CatalogError::Render(RenderError::Helper { name, .. }) => assert_eq!(name, "date"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_literal_reports_position() {
        let catalog = invoice_catalog();
        catalog
            .register(MessageTemplate::new("bad.literal", "{{date \"unclosed}}"))
            .unwrap();

        let event = DomainEvent::new("bad.literal", json!(null));

        let err = catalog.render_event(&event, RenderMode::Text).unwrap_err();
        match err {
            CatalogError::Render(RenderError::MalformedLiteral { literal, position, .. }) => {
                assert_eq!(literal, "\"unclosed");
                assert_eq!(position, 17);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let catalog = invoice_catalog();
        let err = catalog
            .register(MessageTemplate::new("invoice.sent", "other body"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::AlreadyExists(_)));
    }
}

// =============================================================================
// Custom Helper Tests
// =============================================================================

mod custom_helper_tests {
    use super::*;

    #[test]
    fn test_catalog_with_custom_helper() {
        init_tracing();

        let mut helpers: HashMap<String, Arc<dyn Helper>> = default_helpers();
        helpers.insert(
            "upper".to_string(),
            Arc::new(
                |_: &RenderContext, args: &[Value]| -> anyhow::Result<Vec<Value>> {
                    let mut out = Vec::new();
                    for arg in args {
                        match arg {
                            Value::String(s) => out.push(Value::String(s.to_uppercase())),
                            other => anyhow::bail!("upper expects strings, got {}", other),
                        }
                    }
                    Ok(out)
                },
            ),
        );

        let catalog = MessageCatalog::with_helpers(helpers);
        catalog
            .register(MessageTemplate::new("customer.welcome", "Hi {{upper customer}}"))
            .unwrap();

        let event = DomainEvent::new("customer.welcome", json!({"customer": "acme"}));
        let message = catalog.render_event(&event, RenderMode::Text).unwrap();
        assert_eq!(message.to_text(), "Hi ACME");
    }

    #[test]
    fn test_direct_render_without_catalog() {
        init_tracing();

        let context = RenderContext::new(RenderMode::Text)
            .with_variable("customer", "Jan")
            .with_variable("amount", 125000)
            .with_helpers(default_helpers());

        let chunks = render("Hi {{customer}}, you owe {{money amount}}", &context).unwrap();
        assert_eq!(
            chunks,
            vec![Chunk::Text("Hi Jan, you owe $1250.00".to_string())]
        );
    }
}
