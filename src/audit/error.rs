use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that abort an `analyze` call before or during traversal
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("invalid root {}: {reason}", path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    #[error("invalid size threshold {0}: must be a positive number of bytes")]
    InvalidThreshold(i64),

    #[error("a worker thread panicked; no report was produced")]
    WorkerPanic,
}

/// Per-file failure while reading metadata. Never fatal to a run.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("File or directory does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Permission denied for file: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("Unexpected error with file {}: {source}", path.display())]
    Other {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProbeError {
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => ProbeError::NotFound { path },
            io::ErrorKind::PermissionDenied => ProbeError::PermissionDenied { path },
            _ => ProbeError::Other { path, source: err },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ProbeError::NotFound { path }
            | ProbeError::PermissionDenied { path }
            | ProbeError::Other { path, .. } => path,
        }
    }
}
