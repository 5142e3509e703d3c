//! CLI logic for the paircanvas tool.
//!
//! This module contains the core CLI logic: resolve the project, scan the
//! selected modules, and merge the pairs into the output canvas.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    io,
    path::{self, Path, PathBuf},
};

use log::info;

use paircanvas::{
    CanvasBuilder, PairCanvasError,
    canvas::Canvas,
    links::IdeKind,
    scanner::ModuleSelection,
};

/// Run the paircanvas CLI application
///
/// Scans the selected modules of the project and merges the resulting pairs
/// into the canvas document at `args.output`. Without an output path the
/// merge runs against an empty canvas and only a summary is logged.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `PairCanvasError` for:
/// - Configuration loading errors and invalid `--modules` or `--ide` values
/// - Missing or unreadable project directories
/// - Errors writing the output document
pub fn run(args: &Args) -> Result<(), PairCanvasError> {
    let root = project_root(&args.directory)?;
    let project_name = match &args.name {
        Some(name) => name.clone(),
        None => project_name_for(&root),
    };
    info!(
        directory = root.display().to_string(),
        project = project_name;
        "Processing project"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if !args.extensions.is_empty() {
        app_config = app_config.with_extensions(args.extensions.clone());
    }
    if let Some(ide) = &args.ide {
        let ide = ide
            .parse::<IdeKind>()
            .map_err(|err| PairCanvasError::Config(err.to_string()))?;
        app_config = app_config.with_ide(ide);
    }

    let selections = args
        .modules
        .iter()
        .map(|module| {
            module
                .parse::<ModuleSelection>()
                .map_err(|err| PairCanvasError::Config(err.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let builder = CanvasBuilder::new(app_config);
    let pairs = builder.scan(&root, &selections)?;

    let Some(output) = &args.output else {
        let mut canvas = Canvas::new();
        let report = builder.build(&root, &project_name, &pairs, &mut canvas);
        info!(
            records = pairs.len(),
            plugins = report.plugins_added(),
            files = report.files_added();
            "No output path given, nothing written"
        );
        return Ok(());
    };

    let output = Path::new(output);
    let mut canvas = builder.load(output).into_canvas();
    builder.build(&root, &project_name, &pairs, &mut canvas);
    builder.save(&canvas, output)?;

    info!(output_file = output.display().to_string(); "Canvas exported successfully");

    Ok(())
}

/// Absolute form of the project directory, so links never depend on the
/// working directory.
fn project_root(directory: &str) -> Result<PathBuf, PairCanvasError> {
    let directory = Path::new(directory);
    if !directory.is_dir() {
        return Err(PairCanvasError::directory_unreadable(
            directory,
            io::Error::from(io::ErrorKind::NotFound),
        ));
    }
    path::absolute(directory).map_err(|err| PairCanvasError::directory_unreadable(directory, err))
}

/// Final component of the project root, resolving `..` if needed.
fn project_name_for(root: &Path) -> String {
    let name = match root.file_name() {
        Some(name) => Some(name.to_os_string()),
        None => root
            .canonicalize()
            .ok()
            .and_then(|resolved| resolved.file_name().map(ToOwned::to_owned)),
    };
    name.map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Project".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name_from_directory() {
        assert_eq!(project_name_for(Path::new("/work/Game")), "Game");
        assert_eq!(project_name_for(Path::new("/work/Game/")), "Game");
    }

    #[test]
    fn test_project_root_must_exist() {
        let result = project_root("/definitely/not/a/project");

        assert!(matches!(
            result,
            Err(PairCanvasError::DirectoryUnreadable { .. })
        ));
    }
}
