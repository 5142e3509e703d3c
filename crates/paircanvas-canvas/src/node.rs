//! Canvas nodes and edges.

use serde::{Deserialize, Serialize, Serializer, ser::Error as _};
use serde_json::{Map, Value};

/// The `type` of a JSON Canvas node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Text,
    File,
    Link,
    Group,
}

/// A single node in a canvas document.
///
/// The geometry fields use the document's own coordinate space. Every key
/// that has no dedicated field is collected into [`Node::extra`] so it
/// survives a load/save cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subpath: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_style: Option<String>,

    #[serde(serialize_with = "serialize_coordinate")]
    pub x: f64,

    #[serde(serialize_with = "serialize_coordinate")]
    pub y: f64,

    #[serde(serialize_with = "serialize_coordinate")]
    pub width: f64,

    #[serde(serialize_with = "serialize_coordinate")]
    pub height: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Keys not modelled above, in document order.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    /// Creates a node of the given kind with its top-left corner at `(x, y)`.
    pub fn new(
        id: impl Into<String>,
        kind: NodeKind,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            text: None,
            file: None,
            subpath: None,
            url: None,
            label: None,
            background: None,
            background_style: None,
            x,
            y,
            width,
            height,
            color: None,
            extra: Map::new(),
        }
    }

    /// Sets the markdown text of a text node (builder style).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the label of a group node (builder style).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Stores an additional string-valued key on the node (builder style).
    pub fn with_extra(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set_extra(key, value);
        self
    }

    /// Returns an additional key as a string, if present and a string.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }

    /// Inserts or replaces an additional string-valued key.
    pub fn set_extra(&mut self, key: &str, value: impl Into<String>) {
        self.extra.insert(key.to_string(), Value::String(value.into()));
    }

    /// Returns the y-coordinate of the node's lower edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// A connection between two nodes. Only the endpoints are modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub from_node: String,
    pub to_node: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Writes whole-valued coordinates as JSON integers, as canvas editors do.
///
/// Fails on a non-finite value, which JSON cannot represent.
fn serialize_coordinate<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    if !value.is_finite() {
        return Err(S::Error::custom(format!(
            "canvas coordinate {value} is not finite"
        )));
    }
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
