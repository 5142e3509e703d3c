//! Configuration types for scanning and layout.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field has a default, so an empty file is valid.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`ScanConfig`] - Which file extensions are paired and in which role.
//! - [`LayoutConfig`] - Leaf dimensions and spacing used by the layout engine.
//! - [`LinkConfig`] - Which editor the file links open in.
//!
//! # Example
//!
//! ```
//! # use paircanvas::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().margin(), 15.0);
//! assert!(config.scan().extensions().contains(&".cpp".to_string()));
//! ```

use serde::Deserialize;

use crate::links::IdeKind;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Scanner configuration section.
    #[serde(default)]
    scan: ScanConfig,

    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Link formatting section.
    #[serde(default)]
    links: LinkConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(scan: ScanConfig, layout: LayoutConfig, links: LinkConfig) -> Self {
        Self {
            scan,
            layout,
            links,
        }
    }

    /// Returns the scanner configuration.
    pub fn scan(&self) -> &ScanConfig {
        &self.scan
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the link configuration.
    pub fn links(&self) -> &LinkConfig {
        &self.links
    }

    /// Replaces the scanned extensions, keeping the other scan settings.
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.scan.extensions = extensions;
        self
    }

    /// Replaces the editor used for file links.
    pub fn with_ide(mut self, ide: IdeKind) -> Self {
        self.links.ide = ide;
        self
    }
}

/// File classification settings for the scanner.
///
/// Extensions are written with their leading dot and matched
/// case-insensitively.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Extensions of files to pair. Anything else is ignored.
    #[serde(default = "default_extensions")]
    extensions: Vec<String>,

    /// Extensions that mark the implementation half of a pair.
    #[serde(default = "default_implementation_extensions")]
    implementation_extensions: Vec<String>,

    /// Capture size, modification time, and file identity per paired file.
    #[serde(default)]
    include_stats: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            implementation_extensions: default_implementation_extensions(),
            include_stats: false,
        }
    }
}

impl ScanConfig {
    /// Creates a new [`ScanConfig`].
    pub fn new(
        extensions: Vec<String>,
        implementation_extensions: Vec<String>,
        include_stats: bool,
    ) -> Self {
        Self {
            extensions,
            implementation_extensions,
            include_stats,
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn implementation_extensions(&self) -> &[String] {
        &self.implementation_extensions
    }

    pub fn include_stats(&self) -> bool {
        self.include_stats
    }
}

fn default_extensions() -> Vec<String> {
    [".h", ".hpp", ".cpp"].map(String::from).to_vec()
}

fn default_implementation_extensions() -> Vec<String> {
    vec![".cpp".to_string()]
}

/// Dimensions used when placing new nodes.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LayoutConfig {
    /// Width of a file leaf.
    #[serde(default = "default_node_width")]
    node_width: f64,

    /// Height of a file leaf.
    #[serde(default = "default_node_height")]
    node_height: f64,

    /// Gap between siblings and between a group's edge and its children.
    #[serde(default = "default_margin")]
    margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: default_node_width(),
            node_height: default_node_height(),
            margin: default_margin(),
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    pub fn new(node_width: f64, node_height: f64, margin: f64) -> Self {
        Self {
            node_width,
            node_height,
            margin,
        }
    }

    pub fn node_width(&self) -> f64 {
        self.node_width
    }

    pub fn node_height(&self) -> f64 {
        self.node_height
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }
}

fn default_node_width() -> f64 {
    304.0
}

fn default_node_height() -> f64 {
    92.0
}

fn default_margin() -> f64 {
    15.0
}

/// Link formatting settings.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LinkConfig {
    #[serde(default)]
    ide: IdeKind,
}

impl LinkConfig {
    /// Creates a new [`LinkConfig`].
    pub fn new(ide: IdeKind) -> Self {
        Self { ide }
    }

    /// Returns the editor file links are formatted for.
    pub fn ide(&self) -> IdeKind {
        self.ide
    }
}
