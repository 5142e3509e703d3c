//! Header/implementation pairing over an Unreal-style source tree.
//!
//! The [`Scanner`] walks `Source/<Module>` directories, either at the project
//! root or under `Plugins/<Plugin>`, and groups every matching file by its
//! basename into a [`FilePairRecord`]. Results accumulate in a caller-owned
//! [`PairMap`], so several selections compose into one result set.

use std::{
    collections::BTreeMap,
    fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
    time::SystemTime,
};

use log::{debug, info, trace};
use thiserror::Error;
use walkdir::WalkDir;

use crate::{config::ScanConfig, error::PairCanvasError};

const SOURCE_DIR: &str = "Source";
const PLUGINS_DIR: &str = "Plugins";
const ROOT_PARENT: &str = "root";

/// Which half of a pair a file provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Header,
    Implementation,
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => f.write_str("header"),
            Self::Implementation => f.write_str("implementation"),
        }
    }
}

/// Filesystem facts captured for a paired file when stats are enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStats {
    size: u64,
    modified: Option<SystemTime>,
    file_id: Option<u64>,
}

impl FileStats {
    fn from_metadata(metadata: &fs::Metadata) -> Self {
        Self {
            size: metadata.len(),
            modified: metadata.modified().ok(),
            file_id: file_id(metadata),
        }
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Platform file identity (the inode number on Unix).
    pub fn file_id(&self) -> Option<u64> {
        self.file_id
    }
}

#[cfg(unix)]
fn file_id(metadata: &fs::Metadata) -> Option<u64> {
    use std::os::unix::fs::MetadataExt;

    Some(metadata.ino())
}

#[cfg(not(unix))]
fn file_id(_metadata: &fs::Metadata) -> Option<u64> {
    None
}

/// One file of a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedFile {
    path: PathBuf,
    stats: Option<FileStats>,
}

impl PairedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stats(&self) -> Option<&FileStats> {
        self.stats.as_ref()
    }
}

/// Header and implementation files sharing a basename within one module.
///
/// At least one of the two roles is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePairRecord {
    basename: String,
    plugin: Option<String>,
    module: String,
    header: Option<PairedFile>,
    implementation: Option<PairedFile>,
}

impl FilePairRecord {
    fn new(key: &PairKey, role: FileRole, file: PairedFile) -> Self {
        let mut record = Self {
            basename: key.basename.clone(),
            plugin: key.plugin.clone(),
            module: key.module.clone(),
            header: None,
            implementation: None,
        };
        record.attach(role, file);
        record
    }

    /// Fills `role` if it is still empty. Returns false if it was already set.
    fn attach(&mut self, role: FileRole, file: PairedFile) -> bool {
        let slot = match role {
            FileRole::Header => &mut self.header,
            FileRole::Implementation => &mut self.implementation,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(file);
        true
    }

    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// The plugin the files came from, or `None` for the project root.
    pub fn plugin(&self) -> Option<&str> {
        self.plugin.as_deref()
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn header(&self) -> Option<&PairedFile> {
        self.header.as_ref()
    }

    pub fn implementation(&self) -> Option<&PairedFile> {
        self.implementation.as_ref()
    }

    pub fn header_path(&self) -> Option<&Path> {
        self.header.as_ref().map(PairedFile::path)
    }

    pub fn implementation_path(&self) -> Option<&Path> {
        self.implementation.as_ref().map(PairedFile::path)
    }

    /// Returns true if both halves of the pair were found.
    pub fn is_complete(&self) -> bool {
        self.header.is_some() && self.implementation.is_some()
    }
}

/// Accumulator key: a basename is only unique within its plugin and module.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    pub plugin: Option<String>,
    pub module: String,
    pub basename: String,
}

impl PairKey {
    pub fn new(plugin: Option<&str>, module: &str, basename: &str) -> Self {
        Self {
            plugin: plugin.map(str::to_string),
            module: module.to_string(),
            basename: basename.to_string(),
        }
    }
}

/// Scan results shared across scans of several plugins and modules.
///
/// Iteration follows key order, so two maps filled from the same tree
/// compare and iterate identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairMap {
    records: BTreeMap<PairKey, FilePairRecord>,
}

impl PairMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, key: &PairKey) -> Option<&FilePairRecord> {
        self.records.get(key)
    }

    /// Returns the records in key order.
    pub fn records(&self) -> impl Iterator<Item = &FilePairRecord> {
        self.records.values()
    }

    pub fn into_records(self) -> Vec<FilePairRecord> {
        self.records.into_values().collect()
    }

    /// Records a file found by other means than a scan, without stats.
    pub fn add_file(&mut self, key: PairKey, role: FileRole, path: impl Into<PathBuf>) {
        self.insert(
            key,
            role,
            PairedFile {
                path: path.into(),
                stats: None,
            },
        );
    }

    fn insert(&mut self, key: PairKey, role: FileRole, file: PairedFile) {
        match self.records.get_mut(&key) {
            Some(record) => {
                if !record.attach(role, file) {
                    debug!(
                        basename = key.basename,
                        module = key.module,
                        role = role.to_string();
                        "Ignoring second file for an already paired role"
                    );
                }
            }
            None => {
                let record = FilePairRecord::new(&key, role, file);
                self.records.insert(key, record);
            }
        }
    }
}

/// Which modules of a parent to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleSelector {
    /// Every immediate subdirectory of the parent's `Source` directory.
    All,
    Named(String),
}

/// A plugin (or the project root) and the modules to scan inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSelection {
    plugin: Option<String>,
    module: ModuleSelector,
}

impl ModuleSelection {
    pub fn new(plugin: Option<String>, module: ModuleSelector) -> Self {
        Self { plugin, module }
    }

    /// Every module under `<root>/Source`.
    pub fn root_all() -> Self {
        Self::new(None, ModuleSelector::All)
    }

    pub fn plugin(&self) -> Option<&str> {
        self.plugin.as_deref()
    }

    pub fn module(&self) -> &ModuleSelector {
        &self.module
    }
}

/// Error returned for a module selection that is not `<Parent>[/<Module>]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid module selection `{0}`: expected <Plugin|Root>/<Module|*>")]
pub struct InvalidSelection(String);

impl FromStr for ModuleSelection {
    type Err = InvalidSelection;

    /// Parses `Root/*`, `Root/<Module>`, `<Plugin>/*`, `<Plugin>/<Module>`,
    /// or a bare parent meaning all of its modules.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (parent, module) = match s.split_once('/') {
            Some((parent, module)) => (parent.trim(), Some(module.trim())),
            None => (s.trim(), None),
        };
        if parent.is_empty() || module.is_some_and(|module| module.contains('/')) {
            return Err(InvalidSelection(s.to_string()));
        }

        let plugin = (!parent.eq_ignore_ascii_case(ROOT_PARENT)).then(|| parent.to_string());
        let module = match module {
            None | Some("") | Some("*") => ModuleSelector::All,
            Some(name) => ModuleSelector::Named(name.to_string()),
        };

        Ok(Self { plugin, module })
    }
}

/// Normalized scanner settings.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    extensions: Vec<String>,
    implementation_extensions: Vec<String>,
    include_stats: bool,
}

impl ScanOptions {
    /// Creates options, normalizing extensions to lowercase with a leading dot.
    pub fn new<I, J, S, T>(extensions: I, implementation_extensions: J, include_stats: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            extensions: extensions.into_iter().map(normalize_extension).collect(),
            implementation_extensions: implementation_extensions
                .into_iter()
                .map(normalize_extension)
                .collect(),
            include_stats,
        }
    }

    /// Classifies a file name, or returns `None` if its extension is not scanned.
    fn classify<'a>(&self, file_name: &'a str) -> Option<(&'a str, FileRole)> {
        let (basename, extension) = file_name.rsplit_once('.')?;
        if basename.is_empty() {
            return None;
        }
        let extension = format!(".{}", extension.to_lowercase());
        if !self.extensions.contains(&extension) {
            return None;
        }

        let role = if self.implementation_extensions.contains(&extension) {
            FileRole::Implementation
        } else {
            FileRole::Header
        };
        Some((basename, role))
    }
}

impl From<&ScanConfig> for ScanOptions {
    fn from(config: &ScanConfig) -> Self {
        Self::new(
            config.extensions(),
            config.implementation_extensions(),
            config.include_stats(),
        )
    }
}

fn normalize_extension(extension: impl AsRef<str>) -> String {
    let extension = extension.as_ref().trim().to_lowercase();
    if extension.starts_with('.') {
        extension
    } else {
        format!(".{extension}")
    }
}

/// Walks module directories and pairs files by basename.
#[derive(Debug, Clone)]
pub struct Scanner {
    options: ScanOptions,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// Scans one selection under `root`, merging the results into `pairs`.
    ///
    /// # Errors
    ///
    /// Returns [`PairCanvasError::DirectoryUnreadable`] if the resolved
    /// directory (or, for [`ModuleSelector::All`], its `Source` directory)
    /// does not exist or cannot be read.
    pub fn scan(
        &self,
        root: &Path,
        selection: &ModuleSelection,
        pairs: &mut PairMap,
    ) -> Result<(), PairCanvasError> {
        let plugin = selection.plugin();
        match selection.module() {
            ModuleSelector::Named(module) => self.scan_module(root, plugin, module, pairs),
            ModuleSelector::All => {
                let source_dir = parent_dir(root, plugin).join(SOURCE_DIR);
                for module in list_modules(&source_dir)? {
                    debug!(plugin = plugin.unwrap_or(ROOT_PARENT), module; "Scanning discovered module");
                    self.scan_module(root, plugin, &module, pairs)?;
                }
                Ok(())
            }
        }
    }

    fn scan_module(
        &self,
        root: &Path,
        plugin: Option<&str>,
        module: &str,
        pairs: &mut PairMap,
    ) -> Result<(), PairCanvasError> {
        let target = parent_dir(root, plugin).join(SOURCE_DIR).join(module);
        info!(
            path = target.display().to_string(),
            plugin = plugin.unwrap_or(ROOT_PARENT),
            module;
            "Starting walk"
        );

        ensure_directory(&target)?;

        let before = pairs.len();
        for entry in WalkDir::new(&target).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|err| walk_error(&target, err))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(file_name) = entry.file_name().to_str() else {
                debug!(path = entry.path().display().to_string(); "Skipping non UTF-8 file name");
                continue;
            };
            let Some((basename, role)) = self.options.classify(file_name) else {
                continue;
            };

            let stats = if self.options.include_stats {
                let metadata = entry.metadata().map_err(|err| walk_error(&target, err))?;
                Some(FileStats::from_metadata(&metadata))
            } else {
                None
            };

            trace!(path = entry.path().display().to_string(), role = role.to_string(); "Paired file");
            pairs.insert(
                PairKey::new(plugin, module, basename),
                role,
                PairedFile {
                    path: entry.into_path(),
                    stats,
                },
            );
        }

        debug!(module, new_records = pairs.len() - before; "Finished walk");
        Ok(())
    }
}

/// `<root>` for the project itself, `<root>/Plugins/<plugin>` otherwise.
fn parent_dir(root: &Path, plugin: Option<&str>) -> PathBuf {
    match plugin {
        Some(plugin) => root.join(PLUGINS_DIR).join(plugin),
        None => root.to_path_buf(),
    }
}

/// Lists the immediate subdirectories of `source_dir`, sorted by name.
fn list_modules(source_dir: &Path) -> Result<Vec<String>, PairCanvasError> {
    let unreadable = |err| PairCanvasError::directory_unreadable(source_dir, err);

    let mut modules = Vec::new();
    for entry in fs::read_dir(source_dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        if !fs::metadata(entry.path()).map_err(unreadable)?.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => modules.push(name),
            Err(name) => debug!(name:? = name; "Skipping non UTF-8 module directory"),
        }
    }
    modules.sort();
    Ok(modules)
}

fn ensure_directory(path: &Path) -> Result<(), PairCanvasError> {
    let metadata =
        fs::metadata(path).map_err(|err| PairCanvasError::directory_unreadable(path, err))?;
    if metadata.is_dir() {
        Ok(())
    } else {
        Err(PairCanvasError::directory_unreadable(
            path,
            io::Error::other("not a directory"),
        ))
    }
}

fn walk_error(target: &Path, err: walkdir::Error) -> PairCanvasError {
    let path = err.path().unwrap_or(target).to_path_buf();
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other(message));
    PairCanvasError::directory_unreadable(path, source)
}
