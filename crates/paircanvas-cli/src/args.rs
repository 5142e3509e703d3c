//! Command-line argument definitions for the paircanvas CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the project and modules to scan, the
//! canvas document to merge into, configuration file selection, and logging
//! verbosity.

use clap::Parser;

/// Command-line arguments for the paircanvas tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Project root containing `Source/` and `Plugins/`
    #[arg(short, long, default_value = ".")]
    pub directory: String,

    /// Project name for root-level modules and editor links
    /// [default: name of the project directory]
    #[arg(short, long)]
    pub name: Option<String>,

    /// File extensions to pair, e.g. `-e .h .cpp` (overrides the config file)
    #[arg(short, long, num_args = 1..)]
    pub extensions: Vec<String>,

    /// Canvas document to merge into; without it nothing is written
    #[arg(short, long)]
    pub output: Option<String>,

    /// Modules to scan as `<Plugin|Root>/<Module|*>`
    #[arg(short, long, num_args = 1.., default_value = "Root/*")]
    pub modules: Vec<String>,

    /// Editor the file links open in (rider, vscode, raw)
    #[arg(long)]
    pub ide: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["paircanvas"]);

        assert_eq!(args.directory, ".");
        assert_eq!(args.modules, ["Root/*"]);
        assert!(args.extensions.is_empty());
        assert!(args.output.is_none());
        assert!(args.name.is_none());
    }

    #[test]
    fn test_repeated_values() {
        let args = Args::parse_from([
            "paircanvas",
            "-d",
            "/work/Game",
            "-m",
            "Root/Game",
            "Econ/*",
            "-e",
            ".h",
            ".cpp",
            "--ide",
            "vscode",
            "-o",
            "Game.canvas",
        ]);

        assert_eq!(args.modules, ["Root/Game", "Econ/*"]);
        assert_eq!(args.extensions, [".h", ".cpp"]);
        assert_eq!(args.ide.as_deref(), Some("vscode"));
        assert_eq!(args.output.as_deref(), Some("Game.canvas"));
    }
}
