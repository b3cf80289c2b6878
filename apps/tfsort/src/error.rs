//! Error type shared by the library.
//!
//! Ordering violations are never errors; they are reported as
//! `models::Violation`. Everything here aborts the run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid file pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to parse {}:\n{source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: hcl_edit::parser::Error,
    },

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<glob::GlobError> for Error {
    fn from(err: glob::GlobError) -> Self {
        let path = err.path().to_path_buf();
        Error::io(path, err.into_error())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
