//! Loading and saving the persisted canvas document.

use std::{fs, io, path::Path};

use log::{info, warn};

use paircanvas_canvas::Canvas;

use crate::error::PairCanvasError;

/// How the starting document of a run was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStatus {
    /// An existing document was loaded; this run merges into it.
    Loaded,
    /// No document could be read; this run starts from an empty canvas.
    Missing,
    /// A file exists but is not a canvas document; it is replaced on save.
    Unparseable,
}

/// The document a run starts from.
#[derive(Debug)]
pub struct LoadedDocument {
    canvas: Canvas,
    status: DocumentStatus,
}

impl LoadedDocument {
    /// A fresh, empty document.
    pub fn empty(status: DocumentStatus) -> Self {
        Self {
            canvas: Canvas::new(),
            status,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn status(&self) -> DocumentStatus {
        self.status
    }

    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }
}

/// Loads the canvas at `path`, falling back to an empty one.
///
/// A missing or unparseable document is not an error: it is logged and the
/// run continues as a fresh generation.
pub fn load_document(path: &Path) -> LoadedDocument {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            if err.kind() == io::ErrorKind::NotFound {
                info!(path = path.display().to_string(); "No existing canvas, starting empty");
            } else {
                warn!(path = path.display().to_string(), error = err.to_string(); "Cannot read existing canvas, starting empty");
            }
            return LoadedDocument::empty(DocumentStatus::Missing);
        }
    };

    match Canvas::parse(&source) {
        Ok(canvas) => {
            info!(path = path.display().to_string(), nodes = canvas.nodes().len(); "Loaded existing canvas");
            LoadedDocument {
                canvas,
                status: DocumentStatus::Loaded,
            }
        }
        Err(err) => {
            warn!(
                path = path.display().to_string(),
                error = err.to_string();
                "Existing canvas is unparseable and will be replaced"
            );
            LoadedDocument::empty(DocumentStatus::Unparseable)
        }
    }
}

/// Serializes `canvas` and writes it to `path`.
///
/// # Errors
///
/// Returns `PairCanvasError` if the document cannot be serialized or written.
pub fn save_document(canvas: &Canvas, path: &Path) -> Result<(), PairCanvasError> {
    let json = canvas.to_json()?;
    fs::write(path, json)?;
    info!(path = path.display().to_string(), nodes = canvas.nodes().len(); "Canvas saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_document_starts_empty() {
        let dir = tempdir().expect("Failed to create temp directory");
        let loaded = load_document(&dir.path().join("absent.canvas"));

        assert_eq!(loaded.status(), DocumentStatus::Missing);
        assert!(loaded.canvas().is_empty());
    }

    #[test]
    fn test_unparseable_document_starts_empty() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("broken.canvas");
        fs::write(&path, "{ not json").expect("Failed to write file");

        let loaded = load_document(&path);

        assert_eq!(loaded.status(), DocumentStatus::Unparseable);
        assert!(loaded.canvas().is_empty());
    }

    #[test]
    fn test_saved_document_loads_back() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("out.canvas");

        save_document(&Canvas::new(), &path).expect("Failed to save");
        let loaded = load_document(&path);

        assert_eq!(loaded.status(), DocumentStatus::Loaded);
        assert_eq!(loaded.into_canvas(), Canvas::new());
    }
}
