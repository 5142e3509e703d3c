//! Lookup of previously created nodes by their original id.

use std::{
    collections::{HashMap, HashSet, hash_map::Entry},
    sync::LazyLock,
};

use log::{debug, warn};
use regex::Regex;

use paircanvas_canvas::{Canvas, Node, NodeKind};
use paircanvas_core::{geometry::Bounds, identifier::OriginalId};

use crate::node::{DiagramNode, LINKS_KEY, bounds_of, original_id_of};

/// Matches a rendered link pair when the stored `links` value is stale.
static LINK_MARKER: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?:\[H\]\([^()\s]*\) *)?\[CPP\]\([^()\s]*\)|\[H\]\([^()\s]*\)").ok()
});

/// Result of [`NodeIndex::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// The node was new and has been appended to the canvas.
    Inserted,
    /// An existing file leaf received new links.
    Updated,
    /// The node already existed and nothing changed.
    Kept,
}

/// Maps original ids to node positions in a canvas.
///
/// Built once per merge and kept current as nodes are inserted. Node ids are
/// tracked too so inserted nodes never collide with a node the user created.
#[derive(Debug, Default)]
pub struct NodeIndex {
    positions: HashMap<OriginalId, usize>,
    ids: HashSet<String>,
}

impl NodeIndex {
    /// Indexes every node of `canvas` that carries an original id.
    ///
    /// When two nodes claim the same original id the first one wins.
    pub fn build(canvas: &Canvas) -> Self {
        let mut index = Self::default();

        for (position, node) in canvas.nodes().iter().enumerate() {
            index.ids.insert(node.id.clone());
            let Some(original_id) = original_id_of(node) else {
                continue;
            };
            match index.positions.entry(original_id) {
                Entry::Vacant(entry) => {
                    entry.insert(position);
                }
                Entry::Occupied(entry) => {
                    debug!(original_id = entry.key().as_str(), node = node.id; "Ignoring node with duplicate original id");
                }
            }
        }

        debug!(indexed = index.positions.len(), nodes = canvas.nodes().len(); "Node index built");
        index
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, original_id: &OriginalId) -> bool {
        self.positions.contains_key(original_id)
    }

    /// Returns the canvas position of the node with this original id.
    pub fn get(&self, original_id: &OriginalId) -> Option<usize> {
        self.positions.get(original_id).copied()
    }

    /// Returns the persisted rectangle of a node, or `default` if it is unknown.
    pub fn rect_or(&self, canvas: &Canvas, original_id: &OriginalId, default: Bounds) -> Bounds {
        match self.get(original_id).and_then(|position| canvas.node(position)) {
            Some(node) => bounds_of(node),
            None => {
                debug!(original_id = original_id.as_str(); "Node rect not found, using default placement");
                default
            }
        }
    }

    /// Inserts `node` or refreshes its existing counterpart.
    ///
    /// An existing file leaf gets its `links` value replaced and the links
    /// inside its text rewritten, leaving any other text untouched. Existing
    /// groups and their rectangles are never modified.
    pub fn upsert(&mut self, canvas: &mut Canvas, node: DiagramNode) -> Upsert {
        let Some(position) = self.get(node.original_id()) else {
            self.insert(canvas, node);
            return Upsert::Inserted;
        };
        let (Some(existing), Some(links)) = (canvas.node_mut(position), node.links()) else {
            return Upsert::Kept;
        };
        if existing.kind != NodeKind::Text {
            return Upsert::Kept;
        }

        let links = links.to_string();
        let previous = existing.extra_str(LINKS_KEY).map(str::to_string);
        if previous.as_deref() == Some(links.as_str()) {
            return Upsert::Kept;
        }

        refresh_links(existing, previous.as_deref(), &links);
        Upsert::Updated
    }

    /// Right edge of the module groups already placed for `plugin`.
    pub fn module_groups_right_edge(&self, canvas: &Canvas, plugin: &str) -> Option<f64> {
        self.nodes_where(canvas, |id| id.is_module_of(plugin))
            .map(|node| node.x + node.width)
            .reduce(f64::max)
    }

    /// Lower edge of the file leaves already placed for `plugin`/`module`.
    pub fn file_leaves_bottom(&self, canvas: &Canvas, plugin: &str, module: &str) -> Option<f64> {
        self.nodes_where(canvas, |id| id.is_within_module(plugin, module))
            .map(Node::bottom)
            .reduce(f64::max)
    }

    fn nodes_where<'c>(
        &'c self,
        canvas: &'c Canvas,
        predicate: impl Fn(&OriginalId) -> bool + 'c,
    ) -> impl Iterator<Item = &'c Node> + 'c {
        self.positions
            .iter()
            .filter(move |(original_id, _)| predicate(*original_id))
            .filter_map(|(_, &position)| canvas.node(position))
    }

    fn insert(&mut self, canvas: &mut Canvas, node: DiagramNode) {
        let original_id = node.original_id().clone();
        let id = self.allocate_id(original_id.as_str());
        let position = canvas.add_node(node.into_canvas_node(id));
        self.positions.insert(original_id, position);
    }

    /// Returns `base`, or `base-<n>` if a node already uses that id.
    fn allocate_id(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut suffix = 1;
        while self.ids.contains(&candidate) {
            candidate = format!("{base}-{suffix}");
            suffix += 1;
        }
        self.ids.insert(candidate.clone());
        candidate
    }
}

fn refresh_links(node: &mut Node, previous: Option<&str>, links: &str) {
    let text = node.text.as_deref().unwrap_or_default();
    match splice_links(text, previous, links) {
        Some(text) => node.text = Some(text),
        None => {
            warn!(node = node.id; "No link marker found in file leaf text, leaving text unchanged");
        }
    }
    node.set_extra(LINKS_KEY, links);
}

/// Replaces the rendered links inside `text`.
///
/// The previously stored links value is replaced literally when present.
/// Otherwise the first `[H](..) [CPP](..)` marker (or either half alone) is
/// replaced. Returns `None` when the text contains neither.
pub fn splice_links(text: &str, previous: Option<&str>, links: &str) -> Option<String> {
    if let Some(previous) = previous.filter(|previous| !previous.is_empty()) {
        if text.contains(previous) {
            return Some(text.replacen(previous, links, 1));
        }
    }

    let found = LINK_MARKER.as_ref()?.find(text)?;
    let mut spliced = String::with_capacity(text.len() + links.len());
    spliced.push_str(&text[..found.start()]);
    spliced.push_str(links);
    spliced.push_str(&text[found.end()..]);
    Some(spliced)
}

#[cfg(test)]
mod tests {
    use paircanvas_core::geometry::{Point, Size};

    use super::*;
    use crate::links::LinkPair;

    fn bounds(x: f64, y: f64) -> Bounds {
        Bounds::new_from_top_left(Point::new(x, y), Size::new(304.0, 92.0))
    }

    fn leaf(header: &str) -> DiagramNode {
        DiagramNode::file_leaf(
            "Game",
            "Core",
            "Foo",
            LinkPair::new(Some(header.to_string()), Some("c".to_string())),
            bounds(30.0, 75.0),
        )
    }

    #[test]
    fn test_splice_replaces_previous_links_literally() {
        let text = "**Foo**\n[H](old) [CPP](c)\nnotes stay";
        let spliced = splice_links(text, Some("[H](old) [CPP](c)"), "[H](new) [CPP](c)");

        assert_eq!(spliced.as_deref(), Some("**Foo**\n[H](new) [CPP](c)\nnotes stay"));
    }

    #[test]
    fn test_splice_falls_back_to_marker() {
        let text = "intro [H](a) [CPP](b) outro";
        assert_eq!(
            splice_links(text, Some("[H](gone)"), "[H](x)").as_deref(),
            Some("intro [H](x) outro")
        );

        let header_only = "**Foo**\n[H](a)";
        assert_eq!(
            splice_links(header_only, None, "[H](a) [CPP](b)").as_deref(),
            Some("**Foo**\n[H](a) [CPP](b)")
        );
    }

    #[test]
    fn test_splice_without_marker() {
        assert_eq!(splice_links("just notes", None, "[H](a)"), None);
        assert_eq!(splice_links("see [docs](url)", Some(""), "[H](a)"), None);
    }

    #[test]
    fn test_upsert_inserts_then_keeps() {
        let mut canvas = Canvas::new();
        let mut index = NodeIndex::build(&canvas);

        assert_eq!(index.upsert(&mut canvas, leaf("h")), Upsert::Inserted);
        assert_eq!(index.upsert(&mut canvas, leaf("h")), Upsert::Kept);
        assert_eq!(canvas.nodes().len(), 1);
        assert_eq!(index.len(), 1);
        assert_eq!(canvas.nodes()[0].id, "file-Game::Core::Foo");
    }

    #[test]
    fn test_upsert_refreshes_links_only() {
        let mut canvas = Canvas::new();
        let mut index = NodeIndex::build(&canvas);
        index.upsert(&mut canvas, leaf("old"));
        canvas.node_mut(0).expect("inserted").text =
            Some("**Foo**\n[H](old) [CPP](c)\nmy notes".to_string());

        let moved = DiagramNode::file_leaf(
            "Game",
            "Core",
            "Foo",
            LinkPair::new(Some("new".to_string()), Some("c".to_string())),
            bounds(900.0, 900.0),
        );
        assert_eq!(index.upsert(&mut canvas, moved), Upsert::Updated);

        let node = &canvas.nodes()[0];
        assert_eq!(node.text.as_deref(), Some("**Foo**\n[H](new) [CPP](c)\nmy notes"));
        assert_eq!(node.extra_str(LINKS_KEY), Some("[H](new) [CPP](c)"));
        assert_eq!(bounds_of(node), bounds(30.0, 75.0));
    }

    #[test]
    fn test_upsert_never_touches_groups() {
        let mut canvas = Canvas::new();
        let mut index = NodeIndex::build(&canvas);
        let group = DiagramNode::plugin_group("Game", bounds(0.0, 0.0));

        index.upsert(&mut canvas, group.clone());
        let before = canvas.clone();

        assert_eq!(index.upsert(&mut canvas, group), Upsert::Kept);
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_inserted_id_avoids_foreign_node() {
        let mut canvas = Canvas::new();
        canvas.add_node(Node::new("file-Game::Core::Foo", NodeKind::Text, 0.0, 0.0, 1.0, 1.0));
        let mut index = NodeIndex::build(&canvas);

        index.upsert(&mut canvas, leaf("h"));

        assert_eq!(canvas.nodes()[1].id, "file-Game::Core::Foo-1");
        assert_eq!(index.get(&OriginalId::file("Game", "Core", "Foo")), Some(1));
    }

    #[test]
    fn test_rect_or() {
        let mut canvas = Canvas::new();
        let mut index = NodeIndex::build(&canvas);
        index.upsert(&mut canvas, leaf("h"));

        let fallback = bounds(1.0, 2.0);
        assert_eq!(
            index.rect_or(&canvas, &OriginalId::file("Game", "Core", "Foo"), fallback),
            bounds(30.0, 75.0)
        );
        assert_eq!(
            index.rect_or(&canvas, &OriginalId::file("Game", "Core", "Bar"), fallback),
            fallback
        );
    }

    #[test]
    fn test_existing_extents() {
        let mut canvas = Canvas::new();
        let mut index = NodeIndex::build(&canvas);
        index.upsert(&mut canvas, DiagramNode::module_group("Game", "Core", bounds(15.0, 60.0)));
        index.upsert(&mut canvas, leaf("h"));

        assert_eq!(index.module_groups_right_edge(&canvas, "Game"), Some(319.0));
        assert_eq!(index.module_groups_right_edge(&canvas, "Other"), None);
        assert_eq!(index.file_leaves_bottom(&canvas, "Game", "Core"), Some(167.0));
        assert_eq!(index.file_leaves_bottom(&canvas, "Game", "Editor"), None);
    }
}
