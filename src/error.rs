use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by every tidyfs action.
#[derive(Debug, Error)]
pub enum Error {
    /// A filesystem call failed on `path`
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A planned operation would touch something outside the selected folder
    #[error("Operation outside the selected folder: {}", .0.display())]
    OutsideWorkspace(PathBuf),

    /// Clustering, classification or OCR backend failure
    #[error("Library error: {0}")]
    Library(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The user declined a previewed plan
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Failed to read user input: {0}")]
    Prompt(String),
}

impl Error {
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub fn library<S: Into<String>>(message: S) -> Self {
        Error::Library(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
