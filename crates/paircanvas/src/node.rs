//! Typed view of the canvas nodes paircanvas creates.
//!
//! A [`DiagramNode`] is converted into a plain canvas node at insertion time.
//! Its identity and provenance travel in extra keys on that node
//! (`originalId`, `fileType`, `pluginName`, `moduleName`, `fileName`, and
//! `links` for leaves), which is how a later run finds it again.

use paircanvas_canvas::{Node, NodeKind};
use paircanvas_core::{
    geometry::{Bounds, Point, Size},
    identifier::OriginalId,
};

use crate::links::LinkPair;

pub const ORIGINAL_ID_KEY: &str = "originalId";
pub const FILE_TYPE_KEY: &str = "fileType";
pub const PLUGIN_NAME_KEY: &str = "pluginName";
pub const MODULE_NAME_KEY: &str = "moduleName";
pub const FILE_NAME_KEY: &str = "fileName";
pub const LINKS_KEY: &str = "links";

/// Variant-specific content of a [`DiagramNode`].
#[derive(Debug, Clone, PartialEq)]
enum NodePayload {
    PluginGroup {
        plugin: String,
    },
    ModuleGroup {
        plugin: String,
        module: String,
    },
    FileLeaf {
        plugin: String,
        module: String,
        basename: String,
        links: LinkPair,
    },
}

/// A plugin group, module group, or file leaf with its placement.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramNode {
    original_id: OriginalId,
    bounds: Bounds,
    payload: NodePayload,
}

impl DiagramNode {
    pub fn plugin_group(plugin: &str, bounds: Bounds) -> Self {
        Self {
            original_id: OriginalId::plugin(plugin),
            bounds,
            payload: NodePayload::PluginGroup {
                plugin: plugin.to_string(),
            },
        }
    }

    pub fn module_group(plugin: &str, module: &str, bounds: Bounds) -> Self {
        Self {
            original_id: OriginalId::module(plugin, module),
            bounds,
            payload: NodePayload::ModuleGroup {
                plugin: plugin.to_string(),
                module: module.to_string(),
            },
        }
    }

    pub fn file_leaf(
        plugin: &str,
        module: &str,
        basename: &str,
        links: LinkPair,
        bounds: Bounds,
    ) -> Self {
        Self {
            original_id: OriginalId::file(plugin, module, basename),
            bounds,
            payload: NodePayload::FileLeaf {
                plugin: plugin.to_string(),
                module: module.to_string(),
                basename: basename.to_string(),
                links,
            },
        }
    }

    pub fn original_id(&self) -> &OriginalId {
        &self.original_id
    }

    /// Returns the leaf's links, or `None` for group nodes.
    pub fn links(&self) -> Option<&LinkPair> {
        match &self.payload {
            NodePayload::FileLeaf { links, .. } => Some(links),
            _ => None,
        }
    }

    /// Converts into a canvas node whose `id` is `id`.
    pub fn into_canvas_node(self, id: String) -> Node {
        let bounds = self.bounds;
        let node = Node::new(
            id,
            NodeKind::Group,
            bounds.min_x(),
            bounds.min_y(),
            bounds.width(),
            bounds.height(),
        );
        let original_id = self.original_id.as_str().to_string();
        let file_type = self.original_id.kind().as_str();

        match self.payload {
            NodePayload::PluginGroup { plugin } => node
                .with_label(format!("Plugin: {plugin}"))
                .with_extra(ORIGINAL_ID_KEY, original_id)
                .with_extra(FILE_TYPE_KEY, file_type)
                .with_extra(PLUGIN_NAME_KEY, plugin),
            NodePayload::ModuleGroup { plugin, module } => node
                .with_label(format!("Module: {module}"))
                .with_extra(ORIGINAL_ID_KEY, original_id)
                .with_extra(FILE_TYPE_KEY, file_type)
                .with_extra(PLUGIN_NAME_KEY, plugin)
                .with_extra(MODULE_NAME_KEY, module),
            NodePayload::FileLeaf {
                plugin,
                module,
                basename,
                links,
            } => {
                let links = links.to_string();
                Node {
                    kind: NodeKind::Text,
                    ..node
                }
                .with_text(leaf_text(&basename, &links))
                .with_extra(ORIGINAL_ID_KEY, original_id)
                .with_extra(FILE_TYPE_KEY, file_type)
                .with_extra(PLUGIN_NAME_KEY, plugin)
                .with_extra(MODULE_NAME_KEY, module)
                .with_extra(FILE_NAME_KEY, basename)
                .with_extra(LINKS_KEY, links)
            }
        }
    }
}

/// Initial text of a file leaf: the bold basename above its links.
pub fn leaf_text(basename: &str, links: &str) -> String {
    format!("**{basename}**\n{links}")
}

/// Reads the merge key of a canvas node, if it was created by paircanvas.
pub fn original_id_of(node: &Node) -> Option<OriginalId> {
    node.extra_str(ORIGINAL_ID_KEY)?.parse().ok()
}

/// Returns the rectangle a canvas node occupies.
pub fn bounds_of(node: &Node) -> Bounds {
    Bounds::new_from_top_left(
        Point::new(node.x, node.y),
        Size::new(node.width, node.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(x: f64, y: f64, width: f64, height: f64) -> Bounds {
        Bounds::new_from_top_left(Point::new(x, y), Size::new(width, height))
    }

    #[test]
    fn test_plugin_group_node() {
        let node = DiagramNode::plugin_group("Game", bounds(0.0, 0.0, 364.0, 227.0))
            .into_canvas_node("plugin-Game".to_string());

        assert_eq!(node.kind, NodeKind::Group);
        assert_eq!(node.label.as_deref(), Some("Plugin: Game"));
        assert_eq!(node.extra_str(FILE_TYPE_KEY), Some("plugin"));
        assert_eq!(node.extra_str(PLUGIN_NAME_KEY), Some("Game"));
        assert_eq!(original_id_of(&node), Some(OriginalId::plugin("Game")));
        assert_eq!(bounds_of(&node), bounds(0.0, 0.0, 364.0, 227.0));
    }

    #[test]
    fn test_module_group_node() {
        let node = DiagramNode::module_group("Game", "Core", bounds(15.0, 60.0, 334.0, 122.0))
            .into_canvas_node("module-Game::Core".to_string());

        assert_eq!(node.kind, NodeKind::Group);
        assert_eq!(node.label.as_deref(), Some("Module: Core"));
        assert_eq!(node.extra_str(MODULE_NAME_KEY), Some("Core"));
        assert_eq!(original_id_of(&node), Some(OriginalId::module("Game", "Core")));
    }

    #[test]
    fn test_file_leaf_node() {
        let links = LinkPair::new(Some("h-uri".into()), Some("cpp-uri".into()));
        let leaf =
            DiagramNode::file_leaf("Game", "Core", "Foo", links, bounds(30.0, 75.0, 304.0, 92.0));
        assert_eq!(
            leaf.links().map(ToString::to_string).as_deref(),
            Some("[H](h-uri) [CPP](cpp-uri)")
        );

        let node = leaf.into_canvas_node("file-Game::Core::Foo".to_string());

        assert_eq!(node.kind, NodeKind::Text);
        assert_eq!(node.text.as_deref(), Some("**Foo**\n[H](h-uri) [CPP](cpp-uri)"));
        assert_eq!(node.extra_str(LINKS_KEY), Some("[H](h-uri) [CPP](cpp-uri)"));
        assert_eq!(node.extra_str(FILE_NAME_KEY), Some("Foo"));
        assert_eq!(node.label, None);
        assert_eq!(original_id_of(&node), Some(OriginalId::file("Game", "Core", "Foo")));
    }

    #[test]
    fn test_foreign_nodes_have_no_original_id() {
        let plain = Node::new("note", NodeKind::Text, 0.0, 0.0, 10.0, 10.0);
        let garbled = plain.clone().with_extra(ORIGINAL_ID_KEY, "not-an-id");

        assert_eq!(original_id_of(&plain), None);
        assert_eq!(original_id_of(&garbled), None);
    }
}
