//! Multi-format result rendering for issue-tracker CLI clients.
//!
//! `trackout` turns the uniform result envelope a remote issue-tracking
//! service hands back — success payload, optional pagination metadata,
//! optional error — into one of five output formats: table, plain text,
//! JSON, XML, or CSV. Commands pick the format by name through a
//! [`Dispatcher`]; everything else (HTTP, auth, argument parsing,
//! configuration) stays outside this crate and talks to it only through
//! [`Envelope`].
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use trackout::{Dispatcher, Envelope, RenderOptions};
//!
//! let dispatcher = Dispatcher::new();
//! let envelope = Envelope::data(json!([
//!     {"key": "PROJ-1", "status": "Open"},
//!     {"key": "PROJ-2", "status": "Closed"},
//! ]));
//!
//! let csv = dispatcher
//!     .render(&envelope, "csv", &RenderOptions::plain())
//!     .unwrap();
//! assert_eq!(csv, "key,status\nPROJ-1,Open\nPROJ-2,Closed");
//! ```
//!
//! Renderers are pure functions of `(envelope, options)`: no I/O, no
//! state across calls beyond the optional fixed column lists the table and
//! CSV renderers take at construction. Error envelopes always win over
//! `data`, in every format.

pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod logging;
pub mod render;

pub use dispatch::Dispatcher;
pub use envelope::{ApiError, Envelope, Meta};
pub use error::{RenderError, Result};
pub use render::{
    ColumnDescriptor, CsvRenderer, JsonRenderer, PlainRenderer, RenderOptions, Renderer,
    TableRenderer, XmlRenderer,
};
