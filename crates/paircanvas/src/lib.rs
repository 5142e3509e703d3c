//! paircanvas - Header/implementation pairs of an Unreal-style project on a canvas
//!
//! This library scans the `Source` trees of a project and its plugins, pairs
//! header and implementation files by basename, and merges the result into a
//! [JSON Canvas](https://jsoncanvas.org) document. Each plugin becomes a
//! group, each module a nested group, and each pair a text leaf linking to
//! both files. Re-running against an edited canvas only adds what is new.

pub mod config;
pub mod document;
pub mod layout;
pub mod links;
pub mod node;
pub mod project;
pub mod scanner;

mod error;

pub use paircanvas_canvas as canvas;
pub use paircanvas_core::{geometry, identifier};

pub use error::PairCanvasError;

use std::path::Path;

use log::{debug, info};

use paircanvas_canvas::Canvas;

use config::AppConfig;
use document::LoadedDocument;
use layout::{LayoutEngine, MergeReport};
use links::LinkPair;
use project::ProjectTree;
use scanner::{ModuleSelection, PairMap, ScanOptions, Scanner};

/// Builder for scanning a project and merging it into a canvas.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use paircanvas::{CanvasBuilder, config::AppConfig, scanner::ModuleSelection};
///
/// let root = Path::new("/work/Game");
/// let builder = CanvasBuilder::new(AppConfig::default());
///
/// // Pair files of every module under <root>/Source
/// let pairs = builder
///     .scan(root, &[ModuleSelection::root_all()])
///     .expect("Failed to scan");
///
/// // Merge into the existing document, if any
/// let mut canvas = builder.load(Path::new("Game.canvas")).into_canvas();
/// builder.build(root, "Game", &pairs, &mut canvas);
/// builder
///     .save(&canvas, Path::new("Game.canvas"))
///     .expect("Failed to save");
/// ```
#[derive(Debug, Default)]
pub struct CanvasBuilder {
    config: AppConfig,
}

impl CanvasBuilder {
    /// Create a new canvas builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration with scan, layout, and link settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Scan each selection under `root` into one set of file pairs.
    ///
    /// Selections are scanned in order into the same accumulator, so a
    /// basename split across two selected modules stays two records.
    ///
    /// # Errors
    ///
    /// Returns `PairCanvasError::DirectoryUnreadable` if a selected directory
    /// does not exist or cannot be read. No partial result is returned.
    pub fn scan(
        &self,
        root: &Path,
        selections: &[ModuleSelection],
    ) -> Result<PairMap, PairCanvasError> {
        let scanner = Scanner::new(ScanOptions::from(self.config.scan()));
        let mut pairs = PairMap::new();

        for selection in selections {
            debug!(selection:?; "Scanning selection");
            scanner.scan(root, selection, &mut pairs)?;
        }

        let complete = pairs.records().filter(|record| record.is_complete()).count();
        info!(records = pairs.len(), complete; "Scan finished");
        Ok(pairs)
    }

    /// Group `pairs` and merge them into `canvas`.
    ///
    /// Root-level pairs are attributed to `project_name`, which also
    /// identifies the project in editor links.
    pub fn build(
        &self,
        root: &Path,
        project_name: &str,
        pairs: &PairMap,
        canvas: &mut Canvas,
    ) -> MergeReport {
        let tree = ProjectTree::from_records(pairs.records(), project_name);
        debug!(plugins = tree.plugins().count(), files = tree.file_count(); "Project grouped");

        let ide = self.config.links().ide();
        let engine = LayoutEngine::new(*self.config.layout());
        engine.merge(canvas, &tree, |record| {
            LinkPair::for_record(record, root, project_name, ide)
        })
    }

    /// Load the canvas at `path`, or an empty one if it is missing or invalid.
    pub fn load(&self, path: &Path) -> LoadedDocument {
        document::load_document(path)
    }

    /// Write `canvas` to `path`.
    ///
    /// # Errors
    ///
    /// Returns `PairCanvasError` if the document cannot be serialized or
    /// written.
    pub fn save(&self, canvas: &Canvas, path: &Path) -> Result<(), PairCanvasError> {
        document::save_document(canvas, path)
    }
}
