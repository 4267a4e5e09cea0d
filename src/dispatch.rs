//! Format dispatch for `trackout`.
//!
//! A [`Dispatcher`] maps format names to renderers and is the single print
//! entry point used by every command. Format selection is a data-driven
//! string (from a CLI flag), so tests and extensions inject renderers by
//! registering them rather than branching on names.
//!
//! The registry is an explicitly passed object, not process-global state.
//! Mutation is a startup-time concern; the dispatcher is read-only once
//! commands start rendering, and is not safe for concurrent registration.

use crate::envelope::Envelope;
use crate::error::{RenderError, Result};
use crate::render::{
    CsvRenderer, JsonRenderer, PlainRenderer, RenderOptions, Renderer, TableRenderer, XmlRenderer,
};
use std::collections::HashMap;
use std::io::Write;
use tracing::{debug, warn};

pub struct Dispatcher {
    renderers: HashMap<String, Box<dyn Renderer>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Dispatcher seeded with the five built-in formats.
    #[must_use]
    pub fn new() -> Self {
        let mut dispatcher = Self {
            renderers: HashMap::new(),
        };
        dispatcher.register("table", TableRenderer::new());
        dispatcher.register("plain", PlainRenderer);
        dispatcher.register("json", JsonRenderer);
        dispatcher.register("xml", XmlRenderer);
        dispatcher.register("csv", CsvRenderer::new());
        dispatcher
    }

    /// Add or replace the renderer for a format name.
    pub fn register(&mut self, format: impl Into<String>, renderer: impl Renderer + 'static) {
        let format = format.into();
        debug!(format = %format, "registering renderer");
        self.renderers.insert(format, Box::new(renderer));
    }

    /// Sorted list of registered format names.
    #[must_use]
    pub fn formats(&self) -> Vec<String> {
        let mut names: Vec<String> = self.renderers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Render the envelope in the named format.
    ///
    /// # Errors
    ///
    /// [`RenderError::UnknownFormat`] when the format name is not
    /// registered; renderer failures (custom column formatters) propagate
    /// unchanged.
    pub fn render(
        &self,
        envelope: &Envelope,
        format: &str,
        options: &RenderOptions,
    ) -> Result<String> {
        let renderer = self
            .renderers
            .get(format)
            .ok_or_else(|| RenderError::UnknownFormat {
                format: format.to_string(),
                available: self.formats(),
            })?;

        debug!(format = %format, "rendering envelope");
        if let Some(error) = &envelope.error {
            if error.message.trim().is_empty() {
                warn!(code = %error.code, "error envelope arrived without a message");
            }
        }

        renderer.format(envelope, options)
    }

    /// Render and write to standard output with a trailing newline.
    ///
    /// # Errors
    ///
    /// Render failures as for [`Self::render`], plus I/O errors from the
    /// write itself.
    pub fn print(&self, envelope: &Envelope, format: &str, options: &RenderOptions) -> Result<()> {
        let rendered = self.render(envelope, format, options)?;
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{rendered}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn seeds_five_builtins() {
        let dispatcher = Dispatcher::new();
        assert_eq!(
            dispatcher.formats(),
            vec!["csv", "json", "plain", "table", "xml"]
        );
    }

    #[test]
    fn unknown_format_fails_loudly() {
        let dispatcher = Dispatcher::new();
        let env = Envelope::data(json!([]));
        let err = dispatcher
            .render(&env, "yaml", &RenderOptions::plain())
            .unwrap_err();
        match err {
            RenderError::UnknownFormat { format, available } => {
                assert_eq!(format, "yaml");
                assert_eq!(available.len(), 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn dispatches_by_name() {
        let dispatcher = Dispatcher::new();
        let env = Envelope::data(json!([{"key": "PROJ-1"}]));
        let csv = dispatcher
            .render(&env, "csv", &RenderOptions::plain())
            .unwrap();
        assert_eq!(csv, "key\nPROJ-1");
    }

    #[test]
    fn register_replaces_builtin() {
        struct Fixed;
        impl Renderer for Fixed {
            fn format(&self, _: &Envelope, _: &RenderOptions) -> Result<String> {
                Ok("fixed".to_string())
            }
        }

        let mut dispatcher = Dispatcher::new();
        dispatcher.register("csv", Fixed);
        let env = Envelope::data(json!([{"key": "PROJ-1"}]));
        let out = dispatcher
            .render(&env, "csv", &RenderOptions::plain())
            .unwrap();
        assert_eq!(out, "fixed");
        // Replacing never grows the registry.
        assert_eq!(dispatcher.formats().len(), 5);
    }
}
