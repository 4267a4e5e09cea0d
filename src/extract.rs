//! Dotted-path field extraction and display coercion.
//!
//! The extractor is a generic interpreter over path segments; no renderer
//! carries per-field accessor code. The coercion policy is shared by the
//! table and CSV renderers, which differ only in placeholder and list
//! separator (CSV uses `;` so list items never collide with its own comma
//! delimiter).

use serde_json::Value;

/// Resolve a dotted path (e.g. `"user.name"`) against a record.
///
/// Returns `None` if any segment along the path is missing, or the current
/// value stops being an object before the path is exhausted. Never panics.
#[must_use]
pub fn resolve<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Format-specific knobs for value-to-display coercion.
#[derive(Debug, Clone, Copy)]
pub struct Coercion {
    /// Stand-in for missing/null values.
    pub placeholder: &'static str,
    /// Separator for sequence values.
    pub list_separator: &'static str,
}

impl Coercion {
    /// Table cells: visible dash placeholder, readable comma-space lists.
    pub const TABLE: Self = Self {
        placeholder: "-",
        list_separator: ", ",
    };

    /// CSV fields: empty placeholder, semicolon lists.
    pub const CSV: Self = Self {
        placeholder: "",
        list_separator: ";",
    };
}

/// Coerce a resolved value into a display string.
///
/// Ordered fallback: missing/null takes the placeholder; sequences join
/// their coerced elements; name-bearing objects (`name`, then `displayName`)
/// render as their label; any other object falls back to its compact JSON
/// text; scalars render in their plain string form. Many upstream record
/// shapes (assignee, status, issue type) are name-bearing objects, so the
/// generic renderers produce sensible labels without per-field knowledge.
#[must_use]
pub fn coerce(value: Option<&Value>, policy: Coercion) -> String {
    let Some(value) = value else {
        return policy.placeholder.to_string();
    };

    match value {
        Value::Null => policy.placeholder.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| coerce(Some(item), policy))
            .collect::<Vec<_>>()
            .join(policy.list_separator),
        Value::Object(map) => {
            if let Some(Value::String(name)) = map.get("name") {
                name.clone()
            } else if let Some(Value::String(name)) = map.get("displayName") {
                name.clone()
            } else {
                // Last resort, not meant to be parsed back.
                Value::Object(map.clone()).to_string()
            }
        }
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
    }
}

/// Resolve a path and coerce the result in one step.
#[must_use]
pub fn field_display(record: &Value, path: &str, policy: Coercion) -> String {
    coerce(resolve(record, path), policy)
}
