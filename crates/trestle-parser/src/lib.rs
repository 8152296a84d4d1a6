//! Definition reader and writer for Trestle railroad diagrams.
//!
//! A definition is a plain data tree in which every node is a mapping with a
//! `type` discriminator, and a bare string stands for a terminal. The same
//! tree is accepted as JSON or YAML.
//!
//! # Overview
//!
//! - [`parse`], [`parse_json`], [`parse_yaml`] - Text to [`Diagram`](trestle_core::Diagram)
//! - [`from_definition`], [`node_from_definition`] - Already parsed trees
//! - [`to_definition`], [`diagram_to_definition`] - The reverse direction
//! - [`DeserializationError`] - What went wrong, and where in the tree
//!
//! # Example
//!
//! ```
//! # use trestle_core::Railroad;
//! let rr = Railroad::default();
//! let diagram = trestle_parser::parse_yaml(
//!     "type: Diagram
//! items:
//!   - type: Choice
//!     normal: 0
//!     items: [ASC, DESC]
//! ",
//!     &rr,
//! )?;
//! assert_eq!(diagram.items()[1].type_name(), "Choice");
//! # Ok::<(), trestle_parser::DeserializationError>(())
//! ```

mod decode;
mod encode;
mod error;
mod format;

pub use decode::{from_definition, node_from_definition, parse, parse_json, parse_yaml};
pub use encode::{diagram_to_definition, to_definition};
pub use error::DeserializationError;
pub use format::InputFormat;
