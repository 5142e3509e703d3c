//! Editor links for paired files.
//!
//! File leaves carry a markdown link to each half of their pair. The link
//! scheme depends on the editor the canvas reader uses.

use std::{fmt, path::Path, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

use crate::scanner::FilePairRecord;

/// Editor the generated links open files in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdeKind {
    /// JetBrains Rider, via the Toolbox `jetbrains://` handler.
    #[default]
    Rider,
    #[serde(alias = "vs-code")]
    VsCode,
    /// Plain `file://` URLs.
    Raw,
}

/// Error returned for an editor name other than rider, vscode, or raw.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown IDE `{0}` (expected rider, vscode, or raw)")]
pub struct InvalidIde(String);

impl FromStr for IdeKind {
    type Err = InvalidIde;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rider" => Ok(Self::Rider),
            "vscode" | "vs-code" => Ok(Self::VsCode),
            "raw" => Ok(Self::Raw),
            _ => Err(InvalidIde(s.trim().to_string())),
        }
    }
}

/// Formats a link that opens `path` in the given editor.
///
/// # Examples
///
/// ```
/// # use std::path::Path;
/// # use paircanvas::links::{IdeKind, format_link};
/// let root = Path::new("/work/Game");
/// let header = root.join("Source/Core/Public/Foo.h");
///
/// assert_eq!(
///     format_link(&header, root, "Game", IdeKind::Rider),
///     "jetbrains://rd/navigate/reference?project=Game&path=Source/Core/Public/Foo.h"
/// );
/// assert_eq!(
///     format_link(&header, root, "Game", IdeKind::Raw),
///     "file:///work/Game/Source/Core/Public/Foo.h"
/// );
/// ```
pub fn format_link(path: &Path, project_root: &Path, project_name: &str, ide: IdeKind) -> String {
    match ide {
        IdeKind::Rider => {
            let relative = path.strip_prefix(project_root).unwrap_or(path);
            format!(
                "jetbrains://rd/navigate/reference?project={}&path={}",
                encode(project_name),
                url_path(relative)
            )
        }
        IdeKind::VsCode => format!("vscode://file/{}", absolute_url_path(path)),
        IdeKind::Raw => format!("file:///{}", absolute_url_path(path)),
    }
}

/// The header/implementation links of one file leaf.
///
/// Rendered as `[H](<header>) [CPP](<implementation>)`; a missing half is
/// left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPair {
    header: Option<String>,
    implementation: Option<String>,
}

impl LinkPair {
    pub fn new(header: Option<String>, implementation: Option<String>) -> Self {
        Self {
            header,
            implementation,
        }
    }

    /// Builds the links for a scanned record.
    pub fn for_record(
        record: &FilePairRecord,
        project_root: &Path,
        project_name: &str,
        ide: IdeKind,
    ) -> Self {
        let link = |path: &Path| format_link(path, project_root, project_name, ide);
        Self {
            header: record.header_path().map(link),
            implementation: record.implementation_path().map(link),
        }
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn implementation(&self) -> Option<&str> {
        self.implementation.as_deref()
    }
}

impl fmt::Display for LinkPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.header, &self.implementation) {
            (Some(header), Some(implementation)) => {
                write!(f, "[H]({header}) [CPP]({implementation})")
            }
            (Some(header), None) => write!(f, "[H]({header})"),
            (None, Some(implementation)) => write!(f, "[CPP]({implementation})"),
            (None, None) => Ok(()),
        }
    }
}

/// Joins path components with `/`, whatever the host separator.
fn url_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            std::path::Component::Normal(part) => Some(encode(&part.to_string_lossy())),
            std::path::Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Like [`url_path`] but keeps a Windows drive prefix (`C:`).
fn absolute_url_path(path: &Path) -> String {
    let prefix = path.components().find_map(|component| match component {
        std::path::Component::Prefix(prefix) => {
            Some(prefix.as_os_str().to_string_lossy().into_owned())
        }
        _ => None,
    });
    match prefix {
        Some(prefix) => format!("{prefix}/{}", url_path(path)),
        None => url_path(path),
    }
}

/// Escapes characters that would end a markdown link target.
fn encode(part: &str) -> String {
    part.replace('%', "%25")
        .replace(' ', "%20")
        .replace('(', "%28")
        .replace(')', "%29")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_ide_kind_from_str() {
        assert_eq!("rider".parse(), Ok(IdeKind::Rider));
        assert_eq!("VSCode".parse(), Ok(IdeKind::VsCode));
        assert_eq!("raw".parse(), Ok(IdeKind::Raw));
        assert_eq!(
            " Emacs ".parse::<IdeKind>(),
            Err(InvalidIde("Emacs".to_string()))
        );
        assert_eq!(
            InvalidIde("Emacs".to_string()).to_string(),
            "unknown IDE `Emacs` (expected rider, vscode, or raw)"
        );
    }

    #[test]
    fn test_vscode_link_is_absolute() {
        let root = PathBuf::from("/work/Game");
        let path = root.join("Plugins/Econ/Source/Econ/Private/Econ.cpp");

        assert_eq!(
            format_link(&path, &root, "Game", IdeKind::VsCode),
            "vscode://file/work/Game/Plugins/Econ/Source/Econ/Private/Econ.cpp"
        );
    }

    #[test]
    fn test_spaces_and_parentheses_are_escaped() {
        let root = PathBuf::from("/work/My Game");
        let path = root.join("Source/Core/Foo (old).h");

        assert_eq!(
            format_link(&path, &root, "My Game", IdeKind::Rider),
            "jetbrains://rd/navigate/reference?project=My%20Game&path=Source/Core/Foo%20%28old%29.h"
        );
    }

    #[test]
    fn test_link_pair_rendering() {
        let both = LinkPair::new(Some("h".into()), Some("c".into()));
        let header_only = LinkPair::new(Some("h".into()), None);
        let implementation_only = LinkPair::new(None, Some("c".into()));

        assert_eq!(both.to_string(), "[H](h) [CPP](c)");
        assert_eq!(header_only.to_string(), "[H](h)");
        assert_eq!(implementation_only.to_string(), "[CPP](c)");
    }
}
