//! Stable identities for diagram nodes.
//!
//! This module provides [`OriginalId`], the merge key that lets a later run
//! recognise the plugin groups, module groups, and file leaves it created in
//! an earlier run. Ids are derived purely from names, so the same project
//! always resolves to the same set of ids.

use std::{fmt, str::FromStr};

use thiserror::Error;

const PLUGIN_PREFIX: &str = "plugin-";
const MODULE_PREFIX: &str = "module-";
const FILE_PREFIX: &str = "file-";
const SEPARATOR: &str = "::";

/// The level of the project hierarchy an [`OriginalId`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Plugin,
    Module,
    File,
}

impl ElementKind {
    /// Returns the `fileType` tag stored alongside nodes of this kind
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plugin => "plugin",
            Self::Module => "module",
            Self::File => "file",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a well-formed [`OriginalId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid original id `{0}`")]
pub struct InvalidOriginalId(pub String);

/// Deterministic identity of a node created by paircanvas.
///
/// # Examples
///
/// ```
/// use paircanvas_core::identifier::{ElementKind, OriginalId};
///
/// let plugin = OriginalId::plugin("EconModel");
/// assert_eq!(plugin, "plugin-EconModel");
///
/// let file = OriginalId::file("EconModel", "EconModel", "EconResource");
/// assert_eq!(file, "file-EconModel::EconModel::EconResource");
/// assert_eq!(file.kind(), ElementKind::File);
///
/// let parsed: OriginalId = "module-EconModel::EconModel".parse().unwrap();
/// assert_eq!(parsed, OriginalId::module("EconModel", "EconModel"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OriginalId {
    kind: ElementKind,
    value: String,
}

impl OriginalId {
    /// Id of the group node for a plugin (or the project root).
    pub fn plugin(plugin: &str) -> Self {
        Self {
            kind: ElementKind::Plugin,
            value: format!("{PLUGIN_PREFIX}{plugin}"),
        }
    }

    /// Id of the group node for a module inside a plugin.
    pub fn module(plugin: &str, module: &str) -> Self {
        Self {
            kind: ElementKind::Module,
            value: format!("{MODULE_PREFIX}{plugin}{SEPARATOR}{module}"),
        }
    }

    /// Id of the leaf node for a header/implementation pair.
    pub fn file(plugin: &str, module: &str, basename: &str) -> Self {
        Self {
            kind: ElementKind::File,
            value: format!("{FILE_PREFIX}{plugin}{SEPARATOR}{module}{SEPARATOR}{basename}"),
        }
    }

    /// Returns the hierarchy level this id refers to
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Returns the textual form stored in the canvas document
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns true if this is a module id belonging to the given plugin.
    pub fn is_module_of(&self, plugin: &str) -> bool {
        self.kind == ElementKind::Module
            && self.value[MODULE_PREFIX.len()..]
                .strip_prefix(plugin)
                .and_then(|rest| rest.strip_prefix(SEPARATOR))
                .is_some_and(|module| !module.is_empty())
    }

    /// Returns true if this is a file id belonging to the given module.
    pub fn is_within_module(&self, plugin: &str, module: &str) -> bool {
        self.kind == ElementKind::File
            && self.value[FILE_PREFIX.len()..]
                .strip_prefix(plugin)
                .and_then(|rest| rest.strip_prefix(SEPARATOR))
                .and_then(|rest| rest.strip_prefix(module))
                .and_then(|rest| rest.strip_prefix(SEPARATOR))
                .is_some_and(|basename| !basename.is_empty())
    }
}

impl fmt::Display for OriginalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for OriginalId {
    type Err = InvalidOriginalId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidOriginalId(s.to_string());

        let (kind, rest, parts) = if let Some(rest) = s.strip_prefix(PLUGIN_PREFIX) {
            (ElementKind::Plugin, rest, 1)
        } else if let Some(rest) = s.strip_prefix(MODULE_PREFIX) {
            (ElementKind::Module, rest, 2)
        } else if let Some(rest) = s.strip_prefix(FILE_PREFIX) {
            (ElementKind::File, rest, 3)
        } else {
            return Err(invalid());
        };

        if rest.is_empty() {
            return Err(invalid());
        }
        // Plugin names are free-form; nested ids need exactly their separators.
        if kind != ElementKind::Plugin {
            let segments: Vec<&str> = rest.split(SEPARATOR).collect();
            if segments.len() != parts || segments.iter().any(|segment| segment.is_empty()) {
                return Err(invalid());
            }
        }

        Ok(Self {
            kind,
            value: s.to_string(),
        })
    }
}

impl PartialEq<str> for OriginalId {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for OriginalId {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic() {
        assert_eq!(OriginalId::plugin("Econ"), OriginalId::plugin("Econ"));
        assert_eq!(
            OriginalId::file("Econ", "Core", "Foo"),
            OriginalId::file("Econ", "Core", "Foo")
        );
        assert_ne!(
            OriginalId::file("Econ", "Core", "Foo"),
            OriginalId::file("Econ", "Editor", "Foo")
        );
    }

    #[test]
    fn test_textual_forms() {
        assert_eq!(OriginalId::plugin("Game").as_str(), "plugin-Game");
        assert_eq!(OriginalId::module("Game", "Core").as_str(), "module-Game::Core");
        assert_eq!(
            OriginalId::file("Game", "Core", "Foo").to_string(),
            "file-Game::Core::Foo"
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(OriginalId::plugin("Game").kind(), ElementKind::Plugin);
        assert_eq!(OriginalId::module("Game", "Core").kind(), ElementKind::Module);
        assert_eq!(OriginalId::file("Game", "Core", "Foo").kind(), ElementKind::File);
        assert_eq!(ElementKind::Module.to_string(), "module");
    }

    #[test]
    fn test_parse_round_trips_each_kind() {
        for id in [
            OriginalId::plugin("Game"),
            OriginalId::module("Game", "Core"),
            OriginalId::file("Game", "Core", "Foo"),
        ] {
            let parsed: OriginalId = id.as_str().parse().expect("valid id");
            assert_eq!(parsed, id);
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "",
            "plugin-",
            "group-Game",
            "module-Game",
            "module-Game::",
            "file-Game::Core",
            "file-Game::::Foo",
        ] {
            assert_eq!(
                bad.parse::<OriginalId>(),
                Err(InvalidOriginalId(bad.to_string())),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_is_within_module() {
        let id = OriginalId::file("Game", "Core", "Foo");
        assert!(id.is_within_module("Game", "Core"));
        assert!(!id.is_within_module("Game", "Cor"));
        assert!(!id.is_within_module("Gam", "Core"));
        assert!(!OriginalId::module("Game", "Core").is_within_module("Game", "Core"));
    }

    #[test]
    fn test_is_module_of() {
        let id = OriginalId::module("Game", "Core");
        assert!(id.is_module_of("Game"));
        assert!(!id.is_module_of("Gam"));
        assert!(!OriginalId::plugin("Game").is_module_of("Game"));
        assert!(!OriginalId::file("Game", "Core", "Foo").is_module_of("Game"));
    }
}
