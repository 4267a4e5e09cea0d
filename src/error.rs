//! Error types for `trackout`.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Custom column formatters surface their failures through `anyhow`, so
//!   callers can attach whatever context they like without this crate
//!   knowing their error types
//! - Rendering is presentation-only: any error here is fatal to the render
//!   call, never retried

use thiserror::Error;

/// Primary error type for `trackout` operations.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Caller requested a format key that is not in the dispatcher registry.
    #[error("Unknown output format '{format}' (available: {})", .available.join(", "))]
    UnknownFormat {
        format: String,
        available: Vec<String>,
    },

    /// A custom column formatter failed; propagated uncaught.
    #[error("Formatter for column '{column}' failed: {source}")]
    ColumnFormat {
        column: String,
        #[source]
        source: anyhow::Error,
    },

    /// Writing rendered output to the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Envelope serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RenderError {
    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::UnknownFormat { available, .. } => Some(format!(
                "Use one of the registered formats: {}",
                available.join(", ")
            )),
            _ => None,
        }
    }

    /// Get the exit code for this error.
    ///
    /// The consuming CLI treats any render failure as fatal to the command
    /// invocation; there is no partial-output contract.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        1
    }
}

/// Result type using `RenderError`.
pub type Result<T> = std::result::Result<T, RenderError>;
