//! XML rendering.
//!
//! Wraps the envelope in a `<response>` root behind a standard XML
//! declaration. The tree is built directly from the data shape: objects
//! become child elements keyed by field name, scalars become element text,
//! and an array under element name `n` becomes one `<n>` element per item
//! (no extra `item` wrapper). Arrays have no canonical XML equivalent, so
//! this mapping is not lossless: a nested array repeats its parent's name,
//! flattening one level.
//!
//! Error envelopes emit only the `<error>` subtree; `data` is omitted.

use super::{RenderOptions, Renderer};
use crate::envelope::Envelope;
use crate::error::Result;
use serde_json::Value;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

#[derive(Debug, Default)]
pub struct XmlRenderer;

impl Renderer for XmlRenderer {
    fn format(&self, envelope: &Envelope, _options: &RenderOptions) -> Result<String> {
        let mut body = String::new();

        if let Some(error) = &envelope.error {
            write_element(&mut body, "error", &serde_json::json!({
                "code": error.code,
                "message": error.display_message(),
            }));
        } else {
            write_element(&mut body, "data", &envelope.data);
            if let Some(meta) = &envelope.meta {
                write_element(&mut body, "meta", &serde_json::to_value(meta)?);
            }
        }

        Ok(format!("{XML_DECLARATION}\n<response>{body}</response>"))
    }
}

/// Write `<name>..</name>`, expanding arrays into repeated siblings.
fn write_element(out: &mut String, name: &str, value: &Value) {
    let name = sanitize_name(name);
    match value {
        Value::Array(items) => {
            for item in items {
                write_element(out, &name, item);
            }
        }
        Value::Null => {
            out.push_str(&format!("<{name}/>"));
        }
        Value::Object(map) => {
            out.push_str(&format!("<{name}>"));
            for (key, child) in map {
                write_element(out, key, child);
            }
            out.push_str(&format!("</{name}>"));
        }
        Value::String(s) => {
            out.push_str(&format!("<{name}>{}</{name}>", escape_text(s)));
        }
        other => {
            out.push_str(&format!("<{name}>{other}</{name}>"));
        }
    }
}

/// Escape element text content.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Coerce an arbitrary field key into a valid XML element name.
fn sanitize_name(key: &str) -> String {
    let mut name: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}
