//! The canvas document: an ordered list of nodes plus edges.

use std::{collections::HashSet, str::FromStr};

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::{ParseError, SerializeError},
    node::{Edge, Node},
};

/// A JSON Canvas document.
///
/// Node order is preserved from the loaded text and new nodes are appended
/// at the end, so serializing the same document twice yields the same text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    #[serde(default)]
    nodes: Vec<Node>,

    #[serde(default)]
    edges: Vec<Edge>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Canvas {
    /// Creates an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a canvas document from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Syntax`] if the text is not a canvas document and
    /// [`ParseError::DuplicateNodeId`] if two nodes share an id.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let canvas: Canvas = serde_json::from_str(source)?;

        let mut seen = HashSet::with_capacity(canvas.nodes.len());
        for node in &canvas.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(ParseError::DuplicateNodeId(node.id.clone()));
            }
        }

        debug!(nodes = canvas.nodes.len(), edges = canvas.edges.len(); "Canvas document loaded");
        Ok(canvas)
    }

    /// Returns all nodes in document order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the node at `index`, if any.
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Returns the node at `index` for in-place edits, if any.
    pub fn node_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    /// Appends a node and returns its index.
    pub fn add_node(&mut self, node: Node) -> usize {
        trace!(id = node.id; "Adding canvas node");
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Returns all edges in document order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns true if the canvas has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serializes the document as pretty-printed JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`] if a preserved value cannot be written.
    pub fn to_json(&self) -> Result<String, SerializeError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

impl FromStr for Canvas {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    #[test]
    fn test_empty_object_is_empty_canvas() {
        let canvas = Canvas::parse("{}").expect("valid document");
        assert!(canvas.is_empty());
        assert!(canvas.edges().is_empty());
    }

    #[test]
    fn test_add_node_appends_in_order() {
        let mut canvas = Canvas::new();
        let first = canvas.add_node(Node::new("a", NodeKind::Group, 0.0, 0.0, 1.0, 1.0));
        let second = canvas.add_node(Node::new("b", NodeKind::Text, 0.0, 0.0, 1.0, 1.0));

        assert_eq!(first, 0);
        assert_eq!(second, 1);
        assert_eq!(canvas.node(1).map(|node| node.id.as_str()), Some("b"));
        assert_eq!(canvas.nodes().len(), 2);
    }

    #[test]
    fn test_node_mut_edits_in_place() {
        let mut canvas = Canvas::new();
        let index = canvas.add_node(Node::new("a", NodeKind::Text, 0.0, 0.0, 1.0, 1.0));

        if let Some(node) = canvas.node_mut(index) {
            node.text = Some("edited".to_string());
        }

        assert_eq!(canvas.nodes()[0].text.as_deref(), Some("edited"));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let source = r#"{"nodes": [
            {"id": "a", "type": "text", "text": "", "x": 0, "y": 0, "width": 1, "height": 1},
            {"id": "a", "type": "group", "x": 0, "y": 0, "width": 1, "height": 1}
        ]}"#;

        assert!(matches!(
            Canvas::parse(source),
            Err(ParseError::DuplicateNodeId(id)) if id == "a"
        ));
    }

    #[test]
    fn test_malformed_documents_are_rejected() {
        for source in ["", "not json", "[]", r#"{"nodes": [{"id": "a"}]}"#] {
            assert!(
                matches!(Canvas::parse(source), Err(ParseError::Syntax(_))),
                "{source:?} should fail to parse"
            );
        }
    }

    #[test]
    fn test_unknown_node_type_is_rejected() {
        let source = r#"{"nodes": [
            {"id": "a", "type": "sticker", "x": 0, "y": 0, "width": 1, "height": 1}
        ]}"#;

        assert!(Canvas::parse(source).is_err());
    }

    #[test]
    fn test_to_json_ends_with_newline() {
        let json = Canvas::new().to_json().expect("serializable");
        assert!(json.ends_with("}\n"));
    }
}
