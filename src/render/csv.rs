//! CSV rendering.
//!
//! RFC-4180-like with intentionally simplified escaping: a field is quoted
//! (doubling interior quotes) if and only if it contains a comma, a double
//! quote, or a newline. The header row comes from the same column-key
//! resolution policy as the table renderer. List values join with `;` so
//! they never collide with the comma delimiter.

use super::{ColumnDescriptor, RenderOptions, Renderer, resolve_keys};
use crate::envelope::Envelope;
use crate::error::{RenderError, Result};
use crate::extract::{Coercion, coerce, resolve};
use serde_json::Value;

#[derive(Debug, Default)]
pub struct CsvRenderer {
    columns: Option<Vec<ColumnDescriptor>>,
}

impl CsvRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer with a fixed column list, set once and never mutated.
    #[must_use]
    pub fn with_columns(columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            columns: Some(columns),
        }
    }

    fn descriptor(&self, key: &str) -> Option<&ColumnDescriptor> {
        self.columns
            .as_ref()
            .and_then(|cols| cols.iter().find(|c| c.key == key))
    }

    fn cell(&self, record: &Value, key: &str) -> Result<String> {
        if let Some(formatter) = self.descriptor(key).and_then(|d| d.formatter.as_ref()) {
            let value = resolve(record, key).cloned().unwrap_or(Value::Null);
            return formatter(&value).map_err(|source| RenderError::ColumnFormat {
                column: key.to_string(),
                source,
            });
        }
        Ok(coerce(resolve(record, key), Coercion::CSV))
    }
}

impl Renderer for CsvRenderer {
    fn format(&self, envelope: &Envelope, options: &RenderOptions) -> Result<String> {
        if let Some(error) = &envelope.error {
            return Ok(format!("error,{}", escape_field(error.display_message())));
        }

        let rows = envelope.rows();
        if rows.is_empty() {
            return Ok(String::new());
        }

        // Non-record data carries no header, one escaped value per line.
        if !rows[0].is_object() {
            let lines: Vec<String> = rows
                .iter()
                .map(|value| escape_field(&coerce(Some(value), Coercion::CSV)))
                .collect();
            return Ok(lines.join("\n"));
        }

        let keys = resolve_keys(self.columns.as_deref(), Some(rows[0]), options);
        if keys.is_empty() {
            return Ok(String::new());
        }

        // Header keys go through the same escaping as data cells, so a key
        // containing a delimiter cannot desync the field counts.
        let header = keys
            .iter()
            .map(|key| escape_field(key))
            .collect::<Vec<_>>()
            .join(",");
        let mut lines = vec![header];
        for record in &rows {
            let cells = keys
                .iter()
                .map(|key| Ok(escape_field(&self.cell(record, key)?)))
                .collect::<Result<Vec<_>>>()?;
            lines.push(cells.join(","));
        }
        Ok(lines.join("\n"))
    }
}

/// Escape a CSV field value.
///
/// Wraps in double quotes if the value contains commas, quotes, or newlines.
/// Doubles any existing quotes within the value.
#[must_use]
pub fn escape_field(value: &str) -> String {
    let needs_quoting = value.contains(',')
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r');

    if needs_quoting {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}
