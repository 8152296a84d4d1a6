//! Trestle Core Types and Layout
//!
//! This crate provides the layout engine for Trestle railroad (syntax)
//! diagrams. It includes:
//!
//! - **Geometry**: Points and padding insets ([`geometry`] module)
//! - **Style**: Layout constants threaded through construction and formatting ([`style`] module)
//! - **Draw**: Path building and the positioned render tree ([`draw`] module)
//! - **Node**: The diagram element variants and their size algebra ([`node`] module)
//! - **Diagram**: The root container and its serialization ([`diagram`] module)
//!
//! Construction measures every node bottom-up; [`Diagram::format`] then
//! places the tree top-down and returns a [`FormattedDiagram`] that can be
//! written as markup or converted into an [`svg::Document`].
//!
//! # Example
//!
//! ```
//! use trestle_core::{Railroad, StyleConfig};
//!
//! let rr = Railroad::new(StyleConfig::default());
//! let diagram = rr.diagram([
//!     rr.terminal("SELECT"),
//!     rr.zero_or_more(rr.non_terminal("column"), Some(rr.comment(",").into()), false)?,
//! ]);
//!
//! let markup = diagram.format(rr.style()).to_markup();
//! assert!(markup.starts_with("<svg"));
//! # Ok::<(), trestle_core::ConstructionError>(())
//! ```

pub mod diagram;
pub mod draw;
pub mod geometry;
pub mod node;
pub mod style;

mod error;
mod railroad;

pub use diagram::{Diagram, FormattedDiagram};
pub use error::ConstructionError;
pub use node::{Child, Layout, Metrics, Node};
pub use railroad::Railroad;
pub use style::{Alignment, StyleConfig};
