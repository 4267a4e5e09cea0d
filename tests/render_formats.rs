//! End-to-end rendering scenarios across all five built-in formats.
//!
//! Exercises the public surface the way a command would: build an
//! envelope from a remote call's outcome, pick a format name, render.

use serde_json::json;
use trackout::{Dispatcher, Envelope, Meta, RenderOptions};

fn dispatcher() -> Dispatcher {
    Dispatcher::new()
}

fn plain_options() -> RenderOptions {
    RenderOptions::plain()
}

#[test]
fn csv_of_flat_records() {
    let env = Envelope::data(json!([
        {"key": "PROJ-1", "status": "Open"},
        {"key": "PROJ-2", "status": "Closed"}
    ]));
    let out = dispatcher().render(&env, "csv", &plain_options()).unwrap();
    assert_eq!(out, "key,status\nPROJ-1,Open\nPROJ-2,Closed");
}

#[test]
fn csv_quotes_embedded_commas() {
    let env = Envelope::data(json!([{"name": "Doe, John"}]));
    let out = dispatcher().render(&env, "csv", &plain_options()).unwrap();
    assert_eq!(out.lines().nth(1).unwrap(), "\"Doe, John\"");
}

#[test]
fn plain_error_is_exact() {
    let env = Envelope::error("ERR", "Something went wrong");
    let out = dispatcher().render(&env, "plain", &plain_options()).unwrap();
    assert_eq!(out, "Error: Something went wrong");
}

#[test]
fn table_column_filter() {
    let env = Envelope::data(json!({"key": "PROJ-1", "status": "Open"}));
    let options = plain_options().with_columns(vec!["key".to_string()]);
    let out = dispatcher().render(&env, "table", &options).unwrap();
    assert!(out.contains("Key"));
    assert!(out.contains("PROJ-1"));
    assert!(!out.contains("status"));
    assert!(!out.contains("Status"));
}

#[test]
fn table_empty_data_has_no_header_row() {
    let env = Envelope::data(json!([]));
    let out = dispatcher().render(&env, "table", &plain_options()).unwrap();
    assert!(out.contains("No results"));
    assert_eq!(out.lines().count(), 1);
}

#[test]
fn list_separators_differ_between_csv_and_table() {
    let env = Envelope::data(json!([{"tags": ["a", "b", "c"]}]));

    let csv = dispatcher().render(&env, "csv", &plain_options()).unwrap();
    assert_eq!(csv.lines().nth(1).unwrap(), "a;b;c");

    let table = dispatcher().render(&env, "table", &plain_options()).unwrap();
    assert!(table.contains("a, b, c"));
}

#[test]
fn every_format_represents_the_error_and_hides_data() {
    let mut env = Envelope::error("ERR-42", "Credentials rejected");
    env.data = json!([{"secret": "SHOULD-NOT-APPEAR"}]);

    let dispatcher = dispatcher();
    for format in dispatcher.formats() {
        let out = dispatcher.render(&env, &format, &plain_options()).unwrap();
        assert!(
            out.contains("Credentials rejected"),
            "{format} output lost the error message: {out}"
        );
        // JSON is the lossless canonical format and keeps the whole
        // envelope; every presentation format must drop the data.
        if format != "json" {
            assert!(
                !out.contains("SHOULD-NOT-APPEAR"),
                "{format} output rendered data on an error: {out}"
            );
        }
    }
}

#[test]
fn malformed_error_envelope_still_renders() {
    let env = Envelope::error("E500", "");
    let dispatcher = dispatcher();
    for format in dispatcher.formats() {
        let out = dispatcher.render(&env, &format, &plain_options()).unwrap();
        assert!(!out.is_empty(), "{format} rendered nothing for an error");
        if format != "json" {
            assert!(
                out.contains("Unknown error"),
                "{format} lost the generic error label: {out}"
            );
        }
    }
}

#[test]
fn json_round_trips_the_envelope() {
    let env = Envelope::data(json!([
        {"key": "PROJ-1", "summary": "Fix login", "votes": 3}
    ]))
    .with_meta(Meta {
        total: Some(1),
        is_last: Some(true),
        ..Meta::default()
    });

    let out = dispatcher().render(&env, "json", &plain_options()).unwrap();
    let back: Envelope = serde_json::from_str(&out).unwrap();
    assert_eq!(back.data, env.data);
    assert_eq!(back.meta.as_ref().unwrap().total, Some(1));
    assert_eq!(back.meta.as_ref().unwrap().is_last, Some(true));
    assert!(back.error.is_none());
}

#[test]
fn xml_declares_and_wraps_in_response() {
    let env = Envelope::data(json!({"key": "PROJ-1"}));
    let out = dispatcher().render(&env, "xml", &plain_options()).unwrap();
    assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(out.contains("<response>"));
    assert!(out.contains("<data><key>PROJ-1</key></data>"));
}

#[test]
fn csv_field_count_matches_header_for_homogeneous_records() {
    let env = Envelope::data(json!([
        {"key": "PROJ-1", "status": "Open", "assignee": "alice"},
        {"key": "PROJ-2", "status": "Closed", "assignee": "bob"},
        {"key": "PROJ-3", "status": "Open", "assignee": "carol"}
    ]));
    let out = dispatcher().render(&env, "csv", &plain_options()).unwrap();
    let mut lines = out.lines();
    let header_fields = lines.next().unwrap().split(',').count();
    assert_eq!(header_fields, 3);
    for line in lines {
        assert_eq!(line.split(',').count(), header_fields, "ragged row: {line}");
    }
}

#[test]
fn nested_name_bearing_objects_render_as_labels() {
    let env = Envelope::data(json!([{
        "key": "PROJ-1",
        "status": {"name": "In Progress", "id": 3},
        "assignee": {"displayName": "John Doe", "accountId": "x"}
    }]));

    let csv = dispatcher().render(&env, "csv", &plain_options()).unwrap();
    assert_eq!(
        csv,
        "key,status,assignee\nPROJ-1,In Progress,John Doe"
    );

    let table = dispatcher().render(&env, "table", &plain_options()).unwrap();
    assert!(table.contains("In Progress"));
    assert!(table.contains("John Doe"));
}
