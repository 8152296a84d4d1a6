//! Configuration types for Trestle diagram rendering.
//!
//! All types implement [`serde::Deserialize`] with every field optional, so a
//! configuration file only needs to name what it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining style and output settings.
//! - [`StyleConfig`] - Layout constants, re-exported from `trestle_core`.
//! - [`OutputConfig`] - How the rendered diagram is serialized.
//!
//! # Example
//!
//! ```
//! # use trestle::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [style]
//!     arc_radius = 12
//!
//!     [output]
//!     standalone = false
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.style().arc_radius(), 12.0);
//! assert!(!config.output().standalone());
//! ```

use serde::Deserialize;

pub use trestle_core::StyleConfig;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    ///
    /// # Arguments
    ///
    /// * `style` - Layout constants used for construction and formatting.
    /// * `output` - Serialization options.
    pub fn new(style: StyleConfig, output: OutputConfig) -> Self {
        Self { style, output }
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Returns the style configuration for modification.
    pub fn style_mut(&mut self) -> &mut StyleConfig {
        &mut self.style
    }

    /// Returns the output configuration for modification.
    pub fn output_mut(&mut self) -> &mut OutputConfig {
        &mut self.output
    }
}

/// How a rendered diagram is serialized.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Embed the stylesheet and namespace declarations.
    standalone: bool,

    /// Stylesheet used instead of the default one in standalone output.
    stylesheet: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            standalone: true,
            stylesheet: None,
        }
    }
}

impl OutputConfig {
    pub fn standalone(&self) -> bool {
        self.standalone
    }

    pub fn stylesheet(&self) -> Option<&str> {
        self.stylesheet.as_deref()
    }

    pub fn set_standalone(&mut self, standalone: bool) {
        self.standalone = standalone;
    }

    pub fn with_stylesheet(mut self, stylesheet: impl Into<String>) -> Self {
        self.stylesheet = Some(stylesheet.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.output().standalone());
        assert_eq!(config.output().stylesheet(), None);
        assert_eq!(config.style(), &StyleConfig::default());
    }

    #[test]
    fn test_empty_sections_keep_defaults() {
        let config: AppConfig = toml::from_str("[style]\n[output]\n").unwrap();
        assert!(config.output().standalone());
        assert_eq!(config.style().min_vertical_separation(), 8.0);
    }

    #[test]
    fn test_partial_style() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            debug_annotations = true
            horizontal_alignment = "left"
            "#,
        )
        .unwrap();
        assert!(config.style().debug_annotations());
        assert_eq!(
            config.style().horizontal_alignment(),
            trestle_core::Alignment::Left
        );
        assert_eq!(config.style().arc_radius(), 10.0);
    }
}
