//! Fatal error types for a scan run.
//!
//! Anything that stops a run before a report can be produced lands here.
//! Findings are never errors.

use std::path::PathBuf;

/// Result alias for operations that can abort a run.
pub type Result<T> = std::result::Result<T, FatalError>;

/// Conditions that terminate a run with no partial output.
#[derive(Debug, thiserror::Error)]
pub enum FatalError {
    /// The book text does not exist
    #[error("file {} not found", .0.display())]
    InputNotFound(PathBuf),

    /// The wordlist does not exist
    #[error("wordlist file {} not found", .0.display())]
    WordlistNotFound(PathBuf),

    /// The file exists but could not be read or is not valid UTF-8
    #[error("file {} failed to load ({source})", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A rule pattern failed to compile
    #[error("rule '{label}' has an invalid pattern: {source}")]
    InvalidPattern {
        label: &'static str,
        #[source]
        source: Box<regex_automata::meta::BuildError>,
    },
}

impl FatalError {
    pub(crate) fn pattern(label: &'static str, source: regex_automata::meta::BuildError) -> Self {
        FatalError::InvalidPattern {
            label,
            source: Box::new(source),
        }
    }
}
