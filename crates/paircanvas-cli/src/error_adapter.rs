//! Error adapter for converting PairCanvasError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's report formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use paircanvas::PairCanvasError;

/// Adapter giving a [`PairCanvasError`] a diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a PairCanvasError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            PairCanvasError::Io(_) => "paircanvas::io",
            PairCanvasError::DirectoryUnreadable { .. } => "paircanvas::scan",
            PairCanvasError::Serialize(_) => "paircanvas::serialize",
            PairCanvasError::Config(_) => "paircanvas::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            PairCanvasError::DirectoryUnreadable { .. } => {
                "modules are looked up under <directory>/Source/<Module> or \
                 <directory>/Plugins/<Plugin>/Source/<Module>; check --directory and --modules"
            }
            PairCanvasError::Config(_) => {
                "selections take the form <Plugin|Root>/<Module|*> and --ide accepts rider, vscode, or raw"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_codes() {
        let scan = PairCanvasError::directory_unreadable(
            "/work/Game/Source/Missing",
            io::Error::from(io::ErrorKind::NotFound),
        );
        let config = PairCanvasError::Config("bad".to_string());

        let adapter = ErrorAdapter(&scan);
        assert_eq!(
            adapter.code().map(|code| code.to_string()).as_deref(),
            Some("paircanvas::scan")
        );
        assert!(adapter.help().is_some());
        assert!(adapter.to_string().contains("/work/Game/Source/Missing"));

        let adapter = ErrorAdapter(&config);
        assert_eq!(
            adapter.code().map(|code| code.to_string()).as_deref(),
            Some("paircanvas::config")
        );
        assert_eq!(adapter.to_string(), "Configuration error: bad");
    }

    #[test]
    fn test_io_has_no_help() {
        let err = PairCanvasError::Io(io::Error::other("disk full"));
        let adapter = ErrorAdapter(&err);

        assert!(adapter.help().is_none());
        assert!(adapter.labels().is_none());
    }
}
