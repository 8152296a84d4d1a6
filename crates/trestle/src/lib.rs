//! Trestle - Railroad (syntax) diagrams as SVG.
//!
//! Decoding, layout, and rendering for railroad diagrams. Diagrams are
//! described as JSON or YAML definitions, or built directly with the
//! [`Railroad`] factory.

pub mod config;

mod error;

pub use trestle_core::{
    ConstructionError, Diagram, FormattedDiagram, Node, Railroad, diagram, draw, geometry, node,
};
pub use trestle_parser::{DeserializationError, InputFormat};

pub use error::TrestleError;

use log::{debug, info, trace};

use config::AppConfig;

/// Builder for decoding and rendering Trestle diagrams.
///
/// # Examples
///
/// ```rust
/// use trestle::{DiagramBuilder, InputFormat, config::AppConfig};
///
/// let source = r#"["SELECT", {"type": "NonTerminal", "text": "column"}]"#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Decode a definition into a measured diagram
/// let diagram = builder.parse(source, InputFormat::Json)
///     .expect("Failed to parse");
///
/// // Place and serialize it
/// let svg = builder.render_svg(&diagram);
/// assert!(svg.starts_with("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including style and output settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder renders with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// A node factory using this builder's style, for building diagrams in
    /// code instead of decoding them.
    pub fn railroad(&self) -> Railroad {
        Railroad::new(self.config.style().clone())
    }

    /// Decode a definition into a diagram.
    ///
    /// # Arguments
    ///
    /// * `source` - Definition text
    /// * `format` - Format `source` is written in
    ///
    /// # Errors
    ///
    /// Returns `TrestleError::Deserialize` for malformed text, unknown node
    /// types, missing or invalid fields, and nodes that fail construction.
    pub fn parse(&self, source: &str, format: InputFormat) -> Result<Diagram, TrestleError> {
        info!(format:%; "Parsing definition");

        let diagram = trestle_parser::parse(source, format, &self.railroad())
            .map_err(|err| TrestleError::new_deserialize_error(err, source))?;

        debug!(items = diagram.items().len(); "Definition parsed successfully");
        trace!(diagram:?; "Parsed diagram");

        Ok(diagram)
    }

    /// Render a diagram to SVG text.
    ///
    /// Standalone output embeds the configured stylesheet (or the default
    /// one) and namespace declarations; otherwise the bare markup is
    /// returned for embedding in a page that styles it.
    pub fn render_svg(&self, diagram: &Diagram) -> String {
        let formatted = diagram.format(self.config.style());
        info!(
            width = formatted.width(),
            height = formatted.height();
            "Diagram formatted"
        );

        let output = self.config.output();
        if output.standalone() {
            formatted.to_standalone(output.stylesheet())
        } else {
            formatted.to_markup()
        }
    }

    /// Decode and render in one step.
    ///
    /// # Errors
    ///
    /// As [`DiagramBuilder::parse`].
    pub fn render(&self, source: &str, format: InputFormat) -> Result<String, TrestleError> {
        let diagram = self.parse(source, format)?;
        Ok(self.render_svg(&diagram))
    }
}
