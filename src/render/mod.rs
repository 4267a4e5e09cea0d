//! Renderers for `trackout`.
//!
//! Each output format is one [`Renderer`] implementation; the dispatcher
//! keys them by name. Extending the set means registering another
//! implementation, never branching on format names inside a renderer.
//!
//! # Formats
//!
//! - [`JsonRenderer`] - lossless machine-readable envelope (canonical)
//! - [`XmlRenderer`] - `<response>` element tree with XML declaration
//! - [`PlainRenderer`] - greppable `key: value` blocks for scripting
//! - [`TableRenderer`] - fixed-width columns with optional ANSI emphasis
//! - [`CsvRenderer`] - RFC-4180-like rows with simplified quoting

pub mod csv;
mod json;
mod plain;
mod table;
mod xml;

pub use csv::CsvRenderer;
pub use json::JsonRenderer;
pub use plain::PlainRenderer;
pub use table::TableRenderer;
pub use xml::XmlRenderer;

use crate::envelope::Envelope;
use crate::error::Result;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Shared rendering contract.
///
/// Renderers are pure functions of `(envelope, options)`; the only
/// per-instance state is an optional fixed column list supplied at
/// construction on the table and CSV renderers.
pub trait Renderer: Send + Sync {
    /// Render the envelope into this format's string form.
    ///
    /// # Errors
    ///
    /// Returns an error when a custom column formatter fails; renderers
    /// themselves never fail on well-formed envelopes.
    fn format(&self, envelope: &Envelope, options: &RenderOptions) -> Result<String>;
}

/// Caller-supplied rendering knobs.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Apply ANSI emphasis (headers, borders, error lines). On by default.
    pub colors: bool,
    /// When given, filters which fields/columns are emitted. Never reorders.
    pub columns: Option<Vec<String>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            colors: true,
            columns: None,
        }
    }
}

impl RenderOptions {
    /// Options with colors disabled (piped/scripted output).
    #[must_use]
    pub fn plain() -> Self {
        Self {
            colors: false,
            columns: None,
        }
    }

    /// Restrict output to the given field keys.
    #[must_use]
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }
}

/// Custom per-column cell formatter. Takes precedence over the shared
/// coercion policy; a failure aborts the whole render call.
pub type Formatter = Box<dyn Fn(&Value) -> anyhow::Result<String> + Send + Sync>;

/// Metadata describing one output column for the table and CSV renderers.
///
/// `key` may be a dotted path into nested records (e.g. `"user.name"`).
pub struct ColumnDescriptor {
    pub key: String,
    pub header: Option<String>,
    pub width: Option<usize>,
    pub formatter: Option<Formatter>,
}

impl std::fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("formatter", &self.formatter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl ColumnDescriptor {
    /// Descriptor with derived header and natural width.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: None,
            width: None,
            formatter: None,
        }
    }

    /// Override the derived header text.
    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Fix the column to a maximum display width.
    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Attach a custom cell formatter.
    #[must_use]
    pub fn formatter(
        mut self,
        f: impl Fn(&Value) -> anyhow::Result<String> + Send + Sync + 'static,
    ) -> Self {
        self.formatter = Some(Box::new(f));
        self
    }

    /// Header text: the explicit override, or one derived from the key.
    #[must_use]
    pub fn header_text(&self) -> String {
        self.header
            .clone()
            .unwrap_or_else(|| derive_header(&self.key))
    }
}

static CAMEL_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("camel boundary regex"));

/// Derive a human header from a field key.
///
/// camelCase boundaries split into words and each word is capitalized:
/// `"projectType"` becomes `"Project Type"`. Dotted paths use their last
/// segment, so `"user.name"` becomes `"Name"`.
#[must_use]
pub fn derive_header(key: &str) -> String {
    let segment = key.rsplit('.').next().unwrap_or(key);
    let spaced = CAMEL_BOUNDARY_RE.replace_all(segment, "$1 $2");
    spaced
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve the column keys shared by the table and CSV renderers.
///
/// Order: explicit descriptors filtered by `options.columns`, then the first
/// record's own keys filtered likewise. Filtering never reorders.
pub(crate) fn resolve_keys(
    descriptors: Option<&[ColumnDescriptor]>,
    first_record: Option<&Value>,
    options: &RenderOptions,
) -> Vec<String> {
    let keys: Vec<String> = match descriptors {
        Some(list) => list.iter().map(|d| d.key.clone()).collect(),
        None => first_record
            .and_then(Value::as_object)
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default(),
    };

    match &options.columns {
        Some(wanted) => keys
            .into_iter()
            .filter(|key| wanted.iter().any(|w| w == key))
            .collect(),
        None => keys,
    }
}
