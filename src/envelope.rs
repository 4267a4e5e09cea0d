//! The result envelope shared by every renderer.
//!
//! Commands build an [`Envelope`] from a remote call's outcome and hand it to
//! the dispatcher; renderers only ever borrow it. By convention `data` and
//! `error` never both carry meaningful content, though the type does not
//! enforce this.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform `{data, meta?, error?}` container passed into every renderer.
///
/// `data` holds whatever the remote endpoint returned: a single record, an
/// ordered sequence of records, or bare primitives. Field order here fixes
/// the key order of the JSON output shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// Pagination/summary facts attached by list endpoints.
///
/// Purely informational; renderers ignore fields they do not support.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_last: Option<bool>,
}

/// Remote error reported by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl ApiError {
    /// Message to render, falling back to a generic label when the upstream
    /// envelope arrived without one. Error paths must never themselves fail
    /// to render.
    #[must_use]
    pub fn display_message(&self) -> &str {
        if self.message.trim().is_empty() {
            "Unknown error"
        } else {
            &self.message
        }
    }
}

impl Envelope {
    /// Envelope for a successful payload.
    #[must_use]
    pub fn data(data: Value) -> Self {
        Self {
            data,
            meta: None,
            error: None,
        }
    }

    /// Envelope for a failed remote call.
    #[must_use]
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            data: Value::Null,
            meta: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }

    /// Attach pagination metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Records to render: a sequence as-is, anything else as a single row.
    ///
    /// `Null` data yields an empty slice-like view so renderers can treat
    /// "nothing" and "empty list" uniformly.
    #[must_use]
    pub fn rows(&self) -> Vec<&Value> {
        match &self.data {
            Value::Array(items) => items.iter().collect(),
            Value::Null => Vec::new(),
            other => vec![other],
        }
    }
}
