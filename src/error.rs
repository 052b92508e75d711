use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// All errors produced while packing assets or running the dev loop.
#[derive(Debug, Error)]
pub enum PackError {
    /// A file could not be read, or the artifact could not be written.
    #[error("cannot access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The directory walk itself failed (unreadable directory, loop, ...).
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// The asset root does not exist or is a plain file.
    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The tuning file is not valid JSON for `GameTuning`.
    #[error("invalid tuning file '{}': {source}", path.display())]
    Tuning {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The dev server could not bind its port or watch the asset root.
    #[error("dev server: {0}")]
    Serve(String),
}

pub type Result<T> = std::result::Result<T, PackError>;

/// Shorthand constructors.
impl PackError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn serve(msg: impl std::fmt::Display) -> Self {
        Self::Serve(msg.to_string())
    }
}
