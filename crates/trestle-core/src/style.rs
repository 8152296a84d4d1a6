//! Layout constants shared by construction and formatting.
//!
//! A [`StyleConfig`] is passed explicitly to every constructor (through
//! [`Railroad`](crate::Railroad)) and to [`Diagram::format`](crate::Diagram::format).
//! Nothing is read from process-wide state, so diagrams built with different
//! styles can coexist.
//!
//! All fields implement [`serde::Deserialize`] with defaults, so a style can
//! be loaded from a configuration file section:
//!
//! ```
//! # use trestle_core::{Alignment, StyleConfig};
//! let style = StyleConfig::default()
//!     .with_arc_radius(12.0)
//!     .with_horizontal_alignment(Alignment::Left);
//! assert_eq!(style.arc_radius(), 12.0);
//! assert_eq!(style.gaps(30.0, 10.0), (0.0, 20.0));
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

/// How an item is positioned when its slot is wider than the item itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// All spare width goes after the item
    Left,
    /// All spare width goes before the item
    Right,
    /// Spare width is split evenly (default)
    #[default]
    Center,
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "center" => Ok(Self::Center),
            _ => Err(format!(
                "invalid alignment `{s}`, valid values: left, right, center"
            )),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Center => write!(f, "center"),
        }
    }
}

/// Layout and rendering constants.
///
/// | Field | Default |
/// |-------|---------|
/// | `debug_annotations` | `false` |
/// | `min_vertical_separation` | `8` |
/// | `arc_radius` | `10` |
/// | `root_css_class` | `"railroad-diagram"` |
/// | `odd_pixel_stroke` | `true` |
/// | `horizontal_alignment` | `center` |
/// | `terminal_char_width` | `8.5` |
/// | `comment_char_width` | `7` |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Write `data-updown`/`data-type` attributes on every node.
    debug_annotations: bool,

    /// Minimum vertical gap between stacked lanes. For a 3px stroke this
    /// must be at least 4.
    min_vertical_separation: f64,

    /// Radius of every quarter and eighth arc.
    arc_radius: f64,

    /// Class placed on the root `<svg>` element.
    root_css_class: String,

    /// Shift the drawing by half a pixel so odd stroke widths land on pixel
    /// boundaries.
    odd_pixel_stroke: bool,

    /// Placement of items inside slots wider than themselves.
    horizontal_alignment: Alignment,

    /// Advance of one character in terminal and non-terminal labels.
    terminal_char_width: f64,

    /// Advance of one character in comments.
    comment_char_width: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            debug_annotations: false,
            min_vertical_separation: 8.0,
            arc_radius: 10.0,
            root_css_class: String::from("railroad-diagram"),
            odd_pixel_stroke: true,
            horizontal_alignment: Alignment::Center,
            terminal_char_width: 8.5,
            comment_char_width: 7.0,
        }
    }
}

impl StyleConfig {
    /// Creates a style with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debug_annotations(&self) -> bool {
        self.debug_annotations
    }

    pub fn min_vertical_separation(&self) -> f64 {
        self.min_vertical_separation
    }

    pub fn arc_radius(&self) -> f64 {
        self.arc_radius
    }

    pub fn root_css_class(&self) -> &str {
        &self.root_css_class
    }

    pub fn odd_pixel_stroke(&self) -> bool {
        self.odd_pixel_stroke
    }

    pub fn horizontal_alignment(&self) -> Alignment {
        self.horizontal_alignment
    }

    pub fn terminal_char_width(&self) -> f64 {
        self.terminal_char_width
    }

    pub fn comment_char_width(&self) -> f64 {
        self.comment_char_width
    }

    /// Sets whether debug attributes are emitted.
    pub fn set_debug_annotations(&mut self, enabled: bool) {
        self.debug_annotations = enabled;
    }

    pub fn with_debug_annotations(mut self, enabled: bool) -> Self {
        self.debug_annotations = enabled;
        self
    }

    pub fn with_min_vertical_separation(mut self, separation: f64) -> Self {
        self.min_vertical_separation = separation;
        self
    }

    pub fn with_arc_radius(mut self, radius: f64) -> Self {
        self.arc_radius = radius;
        self
    }

    pub fn with_root_css_class(mut self, class: impl Into<String>) -> Self {
        self.root_css_class = class.into();
        self
    }

    pub fn with_odd_pixel_stroke(mut self, enabled: bool) -> Self {
        self.odd_pixel_stroke = enabled;
        self
    }

    pub fn with_horizontal_alignment(mut self, alignment: Alignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }

    pub fn with_terminal_char_width(mut self, width: f64) -> Self {
        self.terminal_char_width = width;
        self
    }

    pub fn with_comment_char_width(mut self, width: f64) -> Self {
        self.comment_char_width = width;
        self
    }

    /// Splits the spare width of a slot into `(before, after)` gaps.
    ///
    /// # Arguments
    ///
    /// * `outer` - Width of the slot the item is formatted into
    /// * `inner` - Intrinsic width of the item
    pub fn gaps(&self, outer: f64, inner: f64) -> (f64, f64) {
        let diff = outer - inner;
        match self.horizontal_alignment {
            Alignment::Left => (0.0, diff),
            Alignment::Right => (diff, 0.0),
            Alignment::Center => (diff / 2.0, diff / 2.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_defaults() {
        let style = StyleConfig::default();
        assert!(!style.debug_annotations());
        assert_eq!(style.min_vertical_separation(), 8.0);
        assert_eq!(style.arc_radius(), 10.0);
        assert_eq!(style.root_css_class(), "railroad-diagram");
        assert!(style.odd_pixel_stroke());
        assert_eq!(style.horizontal_alignment(), Alignment::Center);
        assert_eq!(style.terminal_char_width(), 8.5);
        assert_eq!(style.comment_char_width(), 7.0);
    }

    #[test]
    fn test_gaps_follow_alignment() {
        let style = StyleConfig::default();
        assert_eq!(style.gaps(40.0, 20.0), (10.0, 10.0));

        let style = style.with_horizontal_alignment(Alignment::Left);
        assert_eq!(style.gaps(40.0, 20.0), (0.0, 20.0));

        let style = style.with_horizontal_alignment(Alignment::Right);
        assert_eq!(style.gaps(40.0, 20.0), (20.0, 0.0));
    }

    #[test]
    fn test_alignment_from_str() {
        assert_eq!("left".parse::<Alignment>().unwrap(), Alignment::Left);
        assert_eq!("right".parse::<Alignment>().unwrap(), Alignment::Right);
        assert_eq!("center".parse::<Alignment>().unwrap(), Alignment::Center);

        let result = "middle".parse::<Alignment>();
        assert!(result.unwrap_err().contains("invalid alignment"));
    }

    #[test]
    fn test_builder_setters() {
        let mut style = StyleConfig::new()
            .with_min_vertical_separation(4.0)
            .with_root_css_class("grammar")
            .with_odd_pixel_stroke(false)
            .with_terminal_char_width(9.0)
            .with_comment_char_width(6.0);
        style.set_debug_annotations(true);

        assert!(style.debug_annotations());
        assert_eq!(style.min_vertical_separation(), 4.0);
        assert_eq!(style.root_css_class(), "grammar");
        assert!(!style.odd_pixel_stroke());
        assert_eq!(style.terminal_char_width(), 9.0);
        assert_eq!(style.comment_char_width(), 6.0);
    }
}
