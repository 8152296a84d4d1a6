//! Drawing primitives shared by every node.
//!
//! - [`PathBuilder`] accumulates the instructions of one connector line.
//! - [`Element`] is a positioned render-tree node that serializes to markup
//!   or converts into an [`svg`] DOM node.

mod element;
mod path;

pub use element::{AttrValue, Content, Element, escape_text, fmt_num};
pub use path::{Compass, PathBuilder, Rotation, Sweep};
