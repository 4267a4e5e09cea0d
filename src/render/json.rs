//! JSON rendering.
//!
//! The canonical machine-readable format: the full envelope (data + meta +
//! error, whichever are present) is serialized verbatim with two-space
//! indentation and stable key ordering. Everything in the envelope survives
//! a round-trip.

use super::{RenderOptions, Renderer};
use crate::envelope::Envelope;
use crate::error::Result;

#[derive(Debug, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn format(&self, envelope: &Envelope, _options: &RenderOptions) -> Result<String> {
        Ok(serde_json::to_string_pretty(envelope)?)
    }
}
