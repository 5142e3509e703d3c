//! Layout and merge of a project tree into a canvas document.
//!
//! Plugins become group nodes holding one group per module, and each module
//! stacks its file leaves vertically. A merge never moves or resizes a node
//! that already exists in the canvas:
//!
//! - plugins already present keep their place and only gain what is missing
//! - new plugins are laid out in a row below all existing content
//! - new modules of an existing plugin go to the right of its module groups
//! - new files of an existing module are appended below its lowest leaf
//!
//! Anything newly placed is pushed further down if it would overlap a node
//! it does not belong to.
//!
//! # Re-exports
//!
//! - [`NodeIndex`] and [`Upsert`] - original id lookup used by the merge

mod index;

use log::{debug, info};

use paircanvas_canvas::Canvas;
use paircanvas_core::{
    geometry::{Bounds, Point, Size},
    identifier::{ElementKind, OriginalId},
};

use crate::{
    config::LayoutConfig,
    links::LinkPair,
    node::{DiagramNode, bounds_of},
    project::{ModuleGroup, PluginGroup, ProjectTree},
    scanner::FilePairRecord,
};

pub use index::{NodeIndex, Upsert, splice_links};

/// Counts of what a merge changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    plugins_added: usize,
    modules_added: usize,
    files_added: usize,
    files_updated: usize,
}

impl MergeReport {
    pub fn plugins_added(&self) -> usize {
        self.plugins_added
    }

    pub fn modules_added(&self) -> usize {
        self.modules_added
    }

    pub fn files_added(&self) -> usize {
        self.files_added
    }

    pub fn files_updated(&self) -> usize {
        self.files_updated
    }

    /// Returns true if the merge left the canvas as it was.
    pub fn is_unchanged(&self) -> bool {
        *self == Self::default()
    }

    fn record(&mut self, kind: ElementKind, outcome: Upsert) {
        match (kind, outcome) {
            (ElementKind::Plugin, Upsert::Inserted) => self.plugins_added += 1,
            (ElementKind::Module, Upsert::Inserted) => self.modules_added += 1,
            (ElementKind::File, Upsert::Inserted) => self.files_added += 1,
            (ElementKind::File, Upsert::Updated) => self.files_updated += 1,
            _ => {}
        }
    }
}

/// Places plugin groups, module groups, and file leaves on a canvas.
///
/// # Examples
///
/// ```
/// # use paircanvas::{config::LayoutConfig, layout::LayoutEngine};
/// let engine = LayoutEngine::new(LayoutConfig::default());
/// assert_eq!(engine.file_size().width(), 304.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Size of a single file leaf.
    pub fn file_size(&self) -> Size {
        Size::new(self.config.node_width(), self.config.node_height())
    }

    /// Size of a module group holding `files` leaves.
    pub fn module_size(&self, files: usize) -> Size {
        let m = self.config.margin();
        Size::new(
            self.config.node_width() + 2.0 * m,
            files as f64 * (self.config.node_height() + m) + m,
        )
    }

    /// Size of a plugin group laid out from scratch.
    pub fn plugin_size(&self, plugin: &PluginGroup<'_>) -> Size {
        let m = self.config.margin();
        Size::new(
            plugin.module_count() as f64 * (self.config.node_width() + 3.0 * m) + 2.0 * m,
            plugin.max_file_count() as f64 * (self.config.node_height() + m) + 6.0 * m,
        )
    }

    /// Merges `tree` into `canvas`.
    ///
    /// `links` produces the link pair of each file leaf. Existing nodes are
    /// matched by original id; their rectangles are never changed.
    pub fn merge<F>(&self, canvas: &mut Canvas, tree: &ProjectTree<'_>, links: F) -> MergeReport
    where
        F: Fn(&FilePairRecord) -> LinkPair,
    {
        let index = NodeIndex::build(canvas);
        let mut merge = Merge {
            engine: self,
            canvas,
            index,
            links,
            report: MergeReport::default(),
        };

        let (existing, fresh): (Vec<_>, Vec<_>) = tree
            .plugins()
            .partition(|plugin| merge.index.contains(&OriginalId::plugin(plugin.name())));

        for plugin in existing {
            let id = OriginalId::plugin(plugin.name());
            let bounds = merge.index.rect_or(merge.canvas, &id, Bounds::default());
            merge.plugin(plugin, bounds.min_point());
        }

        let m = self.config.margin();
        let mut cursor = Point::new(
            0.0,
            content_bounds(merge.canvas).map_or(0.0, |content| content.max_y() + m),
        );
        for plugin in fresh {
            if let Some(width) = merge.plugin(plugin, cursor) {
                cursor = cursor.with_x(cursor.x() + width + 2.0 * m);
            }
        }

        let report = merge.report;
        info!(
            plugins_added = report.plugins_added,
            modules_added = report.modules_added,
            files_added = report.files_added,
            files_updated = report.files_updated;
            "Merge complete"
        );
        report
    }
}

/// State of one merge pass.
struct Merge<'e, 'c, F> {
    engine: &'e LayoutEngine,
    canvas: &'c mut Canvas,
    index: NodeIndex,
    links: F,
    report: MergeReport,
}

impl<F> Merge<'_, '_, F>
where
    F: Fn(&FilePairRecord) -> LinkPair,
{
    fn margin(&self) -> f64 {
        self.engine.config.margin()
    }

    /// Merges one plugin anchored at `top_left`.
    ///
    /// Returns the plugin width if the plugin gained any node.
    fn plugin(&mut self, plugin: &PluginGroup<'_>, top_left: Point) -> Option<f64> {
        let m = self.margin();
        let id = OriginalId::plugin(plugin.name());
        let mut planned = Bounds::new_from_top_left(top_left, self.engine.plugin_size(plugin));

        let mut added = false;
        if !self.index.contains(&id) {
            planned = self.settle(planned, &[]);
            let node = DiagramNode::plugin_group(plugin.name(), planned);
            added = self.upsert(node) == Upsert::Inserted;
        }
        let bounds = self.index.rect_or(self.canvas, &id, planned);
        let ancestors: Vec<usize> = self.index.get(&id).into_iter().collect();

        let mut cursor_x = bounds.min_x() + m;
        if let Some(edge) = self.index.module_groups_right_edge(self.canvas, plugin.name()) {
            cursor_x = cursor_x.max(edge + m);
        }
        debug!(plugin = plugin.name(), x = bounds.min_x(), y = bounds.min_y(); "Merging plugin");

        for module in plugin.modules() {
            let module_id = OriginalId::module(plugin.name(), module.name());
            if self.index.contains(&module_id) {
                added |= self.append_files(plugin.name(), module, &ancestors);
                continue;
            }

            let slot = Point::new(cursor_x, bounds.min_y() + 4.0 * m);
            let width = self.new_module(plugin.name(), module, slot, &ancestors);
            cursor_x += width + m;
            added = true;
        }

        added.then_some(bounds.width())
    }

    /// Places a module group that did not exist yet, with all its files.
    ///
    /// Returns the module width.
    fn new_module(
        &mut self,
        plugin: &str,
        module: &ModuleGroup<'_>,
        slot: Point,
        ancestors: &[usize],
    ) -> f64 {
        let m = self.margin();
        let id = OriginalId::module(plugin, module.name());
        let planned = Bounds::new_from_top_left(slot, self.engine.module_size(module.file_count()));
        let planned = self.settle(planned, ancestors);

        self.upsert(DiagramNode::module_group(plugin, module.name(), planned));
        let bounds = self.index.rect_or(self.canvas, &id, planned);

        let step = self.engine.config.node_height() + m;
        let mut y = bounds.min_y() + m;
        for record in module.files() {
            let rect = Bounds::new_from_top_left(
                Point::new(bounds.min_x() + m, y),
                self.engine.file_size(),
            );
            self.upsert_file(plugin, module.name(), record, rect);
            y += step;
        }

        bounds.width()
    }

    /// Appends the missing files of an existing module below its content.
    ///
    /// Returns true if any file was inserted or updated.
    fn append_files(
        &mut self,
        plugin: &str,
        module: &ModuleGroup<'_>,
        ancestors: &[usize],
    ) -> bool {
        let m = self.margin();
        let module_id = OriginalId::module(plugin, module.name());
        let module_bounds = self.index.rect_or(self.canvas, &module_id, Bounds::default());

        let mut ancestors = ancestors.to_vec();
        ancestors.extend(self.index.get(&module_id));

        let mut next_y = module_bounds.max_y();
        if let Some(bottom) = self.index.file_leaves_bottom(self.canvas, plugin, module.name()) {
            next_y = next_y.max(bottom);
        }
        next_y += m;

        let mut changed = false;
        for record in module.files() {
            let id = OriginalId::file(plugin, module.name(), record.basename());
            if self.index.contains(&id) {
                let rect = self.index.rect_or(self.canvas, &id, Bounds::default());
                changed |= self.upsert_file(plugin, module.name(), record, rect) != Upsert::Kept;
                continue;
            }

            let planned = Bounds::new_from_top_left(
                Point::new(module_bounds.min_x() + m, next_y),
                self.engine.file_size(),
            );
            let rect = self.settle(planned, &ancestors);
            self.upsert_file(plugin, module.name(), record, rect);
            next_y = rect.max_y() + m;
            changed = true;
        }

        changed
    }

    fn upsert_file(
        &mut self,
        plugin: &str,
        module: &str,
        record: &FilePairRecord,
        rect: Bounds,
    ) -> Upsert {
        let links = (self.links)(record);
        self.upsert(DiagramNode::file_leaf(
            plugin,
            module,
            record.basename(),
            links,
            rect,
        ))
    }

    fn upsert(&mut self, node: DiagramNode) -> Upsert {
        let kind = node.original_id().kind();
        let outcome = self.index.upsert(self.canvas, node);
        self.report.record(kind, outcome);
        outcome
    }

    /// Moves `planned` down until it overlaps no node except its `ancestors`.
    fn settle(&self, planned: Bounds, ancestors: &[usize]) -> Bounds {
        // A negative gap would never clear the obstacle.
        let m = self.margin().max(0.0);
        let mut rect = planned;
        loop {
            let obstacle_bottom = self
                .canvas
                .nodes()
                .iter()
                .enumerate()
                .filter(|(position, _)| !ancestors.contains(position))
                .map(|(_, node)| bounds_of(node))
                .filter(|other| other.intersects(&rect))
                .map(|other| other.max_y())
                .reduce(f64::max);

            match obstacle_bottom {
                Some(bottom) => {
                    rect = Bounds::new_from_top_left(
                        rect.min_point().with_y(bottom + m),
                        rect.to_size(),
                    );
                }
                None => return rect,
            }
        }
    }
}

/// Extent of every node in the canvas, or `None` for an empty canvas.
fn content_bounds(canvas: &Canvas) -> Option<Bounds> {
    canvas
        .nodes()
        .iter()
        .map(bounds_of)
        .reduce(|content, rect| content.merge(&rect))
}
