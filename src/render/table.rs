//! Table rendering.
//!
//! Human-readable fixed-width columns with optional ANSI emphasis (bold
//! headers, dimmed separators). Width accounting happens on the plain cell
//! text before any styling is applied, so escape sequences never skew
//! alignment. Handles wide characters (emojis, CJK) correctly using
//! `unicode-width`.

use super::{ColumnDescriptor, RenderOptions, Renderer};
use crate::envelope::Envelope;
use crate::error::{RenderError, Result};
use crate::extract::{Coercion, coerce, resolve};
use colored::Colorize;
use serde_json::Value;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const COLUMN_GAP: &str = "  ";
const NO_RESULTS: &str = "No results found.";

#[derive(Debug, Default)]
pub struct TableRenderer {
    columns: Option<Vec<ColumnDescriptor>>,
}

impl TableRenderer {
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

    /// Resolve the effective column descriptors for this render call.
    ///
    /// Order: constructor descriptors, else the first record's own keys,
    /// else one synthetic `Value` column for bare scalars. `options.columns`
    /// filters but never reorders.
    fn effective_columns(&self, first: &Value, options: &RenderOptions) -> Vec<ColumnDescriptor> {
        let keys: Vec<ColumnDescriptor> = match (&self.columns, first.as_object()) {
            (Some(list), _) => list
                .iter()
                .map(|d| ColumnDescriptor {
                    key: d.key.clone(),
                    header: d.header.clone(),
                    width: d.width,
                    formatter: None,
                })
                .collect(),
            (None, Some(map)) => map.keys().map(|key| ColumnDescriptor::new(key.clone())).collect(),
            (None, None) => return vec![ColumnDescriptor::new("value").header("Value")],
        };

        match &options.columns {
            Some(wanted) => keys
                .into_iter()
                .filter(|col| wanted.iter().any(|w| *w == col.key))
                .collect(),
            None => keys,
        }
    }

    fn cell(&self, record: &Value, column: &ColumnDescriptor, synthetic: bool) -> Result<String> {
        // Formatters live on the constructor descriptors; effective_columns
        // drops them, so look the original up by key.
        let formatter = self
            .columns
            .as_ref()
            .and_then(|cols| cols.iter().find(|c| c.key == column.key))
            .and_then(|c| c.formatter.as_ref());

        if let Some(formatter) = formatter {
            let value = if synthetic {
                record.clone()
            } else {
                resolve(record, &column.key).cloned().unwrap_or(Value::Null)
            };
            return formatter(&value).map_err(|source| RenderError::ColumnFormat {
                column: column.key.clone(),
                source,
            });
        }

        if synthetic {
            Ok(coerce(Some(record), Coercion::TABLE))
        } else {
            Ok(coerce(resolve(record, &column.key), Coercion::TABLE))
        }
    }
}

impl Renderer for TableRenderer {
    fn format(&self, envelope: &Envelope, options: &RenderOptions) -> Result<String> {
        if let Some(error) = &envelope.error {
            let line = format!("Error: {}", error.display_message());
            return Ok(if options.colors {
                line.red().to_string()
            } else {
                line
            });
        }

        let rows = envelope.rows();
        if rows.is_empty() {
            return Ok(if options.colors {
                NO_RESULTS.dimmed().to_string()
            } else {
                NO_RESULTS.to_string()
            });
        }

        let synthetic = !rows[0].is_object();
        let columns = self.effective_columns(rows[0], options);
        if columns.is_empty() {
            return Ok(if options.colors {
                NO_RESULTS.dimmed().to_string()
            } else {
                NO_RESULTS.to_string()
            });
        }

        // Fixed-width columns clip their header like any cell, so an
        // over-wide header cannot shift the row out of alignment.
        let headers: Vec<String> = columns
            .iter()
            .map(|col| {
                let text = col.header_text();
                match col.width {
                    Some(width) => truncate_cell(&text, width),
                    None => text,
                }
            })
            .collect();

        let mut body: Vec<Vec<String>> = Vec::with_capacity(rows.len());
        for record in &rows {
            let mut cells = Vec::with_capacity(columns.len());
            for column in &columns {
                let mut text = self.cell(record, column, synthetic)?;
                if let Some(width) = column.width {
                    text = truncate_cell(&text, width);
                }
                cells.push(text);
            }
            body.push(cells);
        }

        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                col.width.unwrap_or_else(|| {
                    body.iter()
                        .map(|cells| UnicodeWidthStr::width(cells[i].as_str()))
                        .chain(std::iter::once(UnicodeWidthStr::width(headers[i].as_str())))
                        .max()
                        .unwrap_or(0)
                })
            })
            .collect();

        let mut lines = Vec::with_capacity(body.len() + 2);

        let header_line = join_row(&headers, &widths, |text| {
            if options.colors {
                text.bold().to_string()
            } else {
                text
            }
        });
        lines.push(header_line);

        let separators: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
        let separator_line = join_row(&separators, &widths, |text| {
            if options.colors {
                text.dimmed().to_string()
            } else {
                text
            }
        });
        lines.push(separator_line);

        for cells in &body {
            lines.push(join_row(cells, &widths, |text| text));
        }

        Ok(lines.join("\n"))
    }
}

/// Pad each cell to its column width, style it, and join with the gap.
///
/// Styling runs after padding so ANSI escapes never enter the width math.
fn join_row<F>(cells: &[String], widths: &[usize], style: F) -> String
where
    F: Fn(String) -> String,
{
    let last = cells.len().saturating_sub(1);
    let styled: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, width))| {
            // The last column stays unpadded so rows never carry trailing
            // spaces, styled or not.
            let pad = if i == last {
                0
            } else {
                width.saturating_sub(UnicodeWidthStr::width(cell.as_str()))
            };
            style(format!("{cell}{}", " ".repeat(pad)))
        })
        .collect();
    styled.join(COLUMN_GAP)
}

/// Truncate a cell to fit within `max_len` visible columns, appending `...`
/// when anything was cut.
fn truncate_cell(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }

    if UnicodeWidthStr::width(text) <= max_len {
        return text.to_string();
    }

    // Below four columns there is no room for an ellipsis; hard-cut.
    let target = if max_len <= 3 { max_len } else { max_len - 3 };
    let mut width = 0;
    let mut out = String::new();
    for c in text.chars() {
        let cw = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + cw > target {
            break;
        }
        width += cw;
        out.push(c);
    }
    if max_len > 3 {
        out.push_str("...");
    }
    out
}
