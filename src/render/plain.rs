//! Plain-text rendering.
//!
//! A minimal, greppable, non-delimited format for scripting: one
//! `key: value` line per field, indented two spaces per nesting level.
//! Nested objects print their key as a header line followed by their own
//! block; arrays print inline, comma-joined. Top-level records concatenate
//! with no separator token, so downstream tooling can rely on top-level
//! field lines starting at column zero.

use super::{RenderOptions, Renderer};
use crate::envelope::Envelope;
use crate::error::Result;
use crate::extract::{Coercion, coerce};
use serde_json::Value;

const INDENT: &str = "  ";

#[derive(Debug, Default)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn format(&self, envelope: &Envelope, options: &RenderOptions) -> Result<String> {
        if let Some(error) = &envelope.error {
            return Ok(format!("Error: {}", error.display_message()));
        }

        let mut lines = Vec::new();
        for record in envelope.rows() {
            write_value(&mut lines, record, 0, options);
        }
        Ok(lines.join("\n"))
    }
}

fn write_value(lines: &mut Vec<String>, value: &Value, depth: usize, options: &RenderOptions) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if depth == 0 && !column_selected(key, options) {
                    continue;
                }
                let indent = INDENT.repeat(depth);
                if let Value::Object(_) = child {
                    lines.push(format!("{indent}{key}:"));
                    write_value(lines, child, depth + 1, options);
                } else {
                    let display = coerce(Some(child), Coercion::TABLE);
                    lines.push(format!("{indent}{key}: {display}"));
                }
            }
        }
        other => {
            let indent = INDENT.repeat(depth);
            lines.push(format!("{indent}{}", coerce(Some(other), Coercion::TABLE)));
        }
    }
}

fn column_selected(key: &str, options: &RenderOptions) -> bool {
    options
        .columns
        .as_ref()
        .is_none_or(|wanted| wanted.iter().any(|w| w == key))
}
