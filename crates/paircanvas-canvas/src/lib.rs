//! # paircanvas Canvas
//!
//! Document model for the [JSON Canvas](https://jsoncanvas.org) format. This
//! crate loads a `.canvas` document, exposes its nodes for lookup and
//! insertion, and serializes it back deterministically.
//!
//! Keys this crate does not model (for example metadata written by other
//! tools) are kept on each node and edge and written back unchanged.
//!
//! ## Usage
//!
//! ```
//! # use paircanvas_canvas::{Canvas, Node, NodeKind, ParseError};
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = r#"{"nodes": [], "edges": []}"#;
//!
//!     let mut canvas = Canvas::parse(source)?;
//!     canvas.add_node(Node::new("note", NodeKind::Text, 0.0, 0.0, 304.0, 92.0).with_text("hello"));
//!
//!     let json = canvas.to_json()?;
//!     assert!(json.contains("\"width\": 304"));
//!     Ok(())
//! }
//! ```

mod document;
mod error;
mod node;

pub use document::Canvas;
pub use error::{ParseError, SerializeError};
pub use node::{Edge, Node, NodeKind};
