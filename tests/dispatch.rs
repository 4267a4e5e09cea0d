//! Dispatcher registry behavior: seeding, override, unknown formats.

use serde_json::json;
use trackout::{Dispatcher, Envelope, RenderError, RenderOptions, Renderer};

struct Upper;

impl Renderer for Upper {
    fn format(&self, envelope: &Envelope, options: &RenderOptions) -> trackout::Result<String> {
        // Piggyback on the plain renderer and shout the result.
        let inner = trackout::PlainRenderer.format(envelope, options)?;
        Ok(inner.to_uppercase())
    }
}

#[test]
fn builtin_formats_are_seeded() {
    let dispatcher = Dispatcher::new();
    assert_eq!(
        dispatcher.formats(),
        vec!["csv", "json", "plain", "table", "xml"]
    );
}

#[test]
fn unknown_format_names_the_offender() {
    let dispatcher = Dispatcher::new();
    let env = Envelope::data(json!(null));
    let err = dispatcher
        .render(&env, "toml", &RenderOptions::plain())
        .unwrap_err();
    assert!(err.to_string().contains("'toml'"));
    assert!(err.to_string().contains("table"));
    assert!(matches!(err, RenderError::UnknownFormat { .. }));
}

#[test]
fn registering_a_new_format_extends_the_registry() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register("upper", Upper);

    let env = Envelope::data(json!({"key": "proj-1"}));
    let out = dispatcher
        .render(&env, "upper", &RenderOptions::plain())
        .unwrap();
    assert_eq!(out, "KEY: PROJ-1");
    assert_eq!(dispatcher.formats().len(), 6);
}

#[test]
fn registering_over_a_builtin_replaces_it() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register("plain", Upper);

    let env = Envelope::data(json!({"key": "proj-1"}));
    let out = dispatcher
        .render(&env, "plain", &RenderOptions::plain())
        .unwrap();
    assert_eq!(out, "KEY: PROJ-1");
    assert_eq!(dispatcher.formats().len(), 5);
}

#[test]
fn render_and_print_share_the_lookup_path() {
    let dispatcher = Dispatcher::new();
    let env = Envelope::data(json!(null));
    let err = dispatcher
        .print(&env, "nope", &RenderOptions::plain())
        .unwrap_err();
    assert!(matches!(err, RenderError::UnknownFormat { .. }));
}
