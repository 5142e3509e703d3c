//! Plugin → module → file grouping of scan results.

use indexmap::{IndexMap, map::Entry};
use log::warn;

use crate::scanner::FilePairRecord;

/// Scan results regrouped by plugin, then module, then basename.
///
/// Root-level records are attributed to the project name. Groups keep the
/// order in which their first record appeared. When a plugin shares the
/// project name, a record whose module and basename are already taken is
/// dropped with a warning, since both would map to the same file leaf.
#[derive(Debug, Default)]
pub struct ProjectTree<'a> {
    plugins: IndexMap<String, PluginGroup<'a>>,
}

impl<'a> ProjectTree<'a> {
    /// Groups `records`, attributing root-level ones to `project_name`.
    pub fn from_records(
        records: impl IntoIterator<Item = &'a FilePairRecord>,
        project_name: &str,
    ) -> Self {
        let mut plugins: IndexMap<String, PluginGroup<'a>> = IndexMap::new();

        for record in records {
            let plugin_name = match record.plugin() {
                Some(plugin) if !plugin.trim().eq_ignore_ascii_case("root") => plugin,
                _ => project_name,
            };

            let files = &mut plugins
                .entry(plugin_name.to_string())
                .or_insert_with(|| PluginGroup::new(plugin_name))
                .modules
                .entry(record.module().to_string())
                .or_insert_with(|| ModuleGroup::new(record.module()))
                .files;

            match files.entry(record.basename().to_string()) {
                Entry::Vacant(entry) => {
                    entry.insert(record);
                }
                Entry::Occupied(entry) => {
                    let kept = entry.get();
                    let kept_path = kept.header_path().or(kept.implementation_path());
                    warn!(
                        plugin = plugin_name,
                        module = record.module(),
                        file = record.basename(),
                        kept = kept_path.map(|path| path.display().to_string()).unwrap_or_default();
                        "Two records map to the same file leaf, keeping the first"
                    );
                }
            }
        }

        Self { plugins }
    }

    pub fn plugins(&self) -> impl Iterator<Item = &PluginGroup<'a>> {
        self.plugins.values()
    }

    pub fn plugin(&self, name: &str) -> Option<&PluginGroup<'a>> {
        self.plugins.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Total number of file records across all plugins.
    pub fn file_count(&self) -> usize {
        self.plugins()
            .flat_map(PluginGroup::modules)
            .map(ModuleGroup::file_count)
            .sum()
    }
}

/// The modules of one plugin.
#[derive(Debug)]
pub struct PluginGroup<'a> {
    name: String,
    modules: IndexMap<String, ModuleGroup<'a>>,
}

impl<'a> PluginGroup<'a> {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            modules: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn modules(&self) -> impl Iterator<Item = &ModuleGroup<'a>> {
        self.modules.values()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Number of files in the fullest module, which drives the plugin height.
    pub fn max_file_count(&self) -> usize {
        self.modules()
            .map(ModuleGroup::file_count)
            .max()
            .unwrap_or(0)
    }
}

/// The file records of one module, keyed by basename.
#[derive(Debug)]
pub struct ModuleGroup<'a> {
    name: String,
    files: IndexMap<String, &'a FilePairRecord>,
}

impl<'a> ModuleGroup<'a> {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            files: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> impl Iterator<Item = &'a FilePairRecord> + '_ {
        self.files.values().copied()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{FileRole, PairKey, PairMap};

    fn pairs(entries: &[(Option<&str>, &str, &str)]) -> PairMap {
        let mut map = PairMap::new();
        for &(plugin, module, basename) in entries {
            let dir = plugin.unwrap_or("Root");
            map.add_file(
                PairKey::new(plugin, module, basename),
                FileRole::Header,
                format!("{dir}/{module}/{basename}.h"),
            );
        }
        map
    }

    #[test]
    fn test_root_records_use_project_name() {
        let map = pairs(&[(None, "Core", "Foo"), (Some("root"), "Editor", "Bar")]);
        let tree = ProjectTree::from_records(map.records(), "Game");

        let names: Vec<&str> = tree.plugins().map(PluginGroup::name).collect();
        assert_eq!(names, ["Game"]);
        let game = tree.plugin("Game").expect("project plugin");
        assert_eq!(game.module_count(), 2);
        assert_eq!(tree.file_count(), 2);
    }

    #[test]
    fn test_groups_keep_first_appearance_order() {
        let map = pairs(&[
            (Some("Econ"), "Market", "B"),
            (Some("Econ"), "Market", "A"),
            (Some("Econ"), "Trade", "C"),
        ]);
        let tree = ProjectTree::from_records(map.records(), "Game");

        let econ = tree.plugin("Econ").expect("plugin exists");
        let modules: Vec<&str> = econ.modules().map(ModuleGroup::name).collect();
        assert_eq!(modules, ["Market", "Trade"]);
        assert_eq!(econ.max_file_count(), 2);
        assert!(tree.plugin("Game").is_none());
    }

    #[test]
    fn test_plugin_named_like_project_keeps_first_record() {
        let map = pairs(&[(None, "Core", "Foo"), (Some("Game"), "Core", "Foo")]);
        let tree = ProjectTree::from_records(map.records(), "Game");

        assert_eq!(tree.file_count(), 1);
        let kept: Vec<_> = tree
            .plugins()
            .flat_map(PluginGroup::modules)
            .flat_map(ModuleGroup::files)
            .filter_map(FilePairRecord::header_path)
            .collect();
        assert_eq!(kept, [std::path::Path::new("Root/Core/Foo.h")]);
    }
}
