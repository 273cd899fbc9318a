use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the merge pipeline.
///
/// Every variant is fatal for the run that produced it. Read failures while
/// building the table of contents never surface here; those files simply
/// contribute no entries.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("failed to scan directory {}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("no markdown files found in directory: {}", .0.display())]
    NoFiles(PathBuf),

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid merge option: {0}")]
    Validation(String),
}

impl MergeError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this failure (sysexits conventions).
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::DirectoryNotFound(_) | Self::NoFiles(_) => exitcode::NOINPUT,
            Self::Scan { .. } | Self::Read { .. } => exitcode::IOERR,
            Self::Write { .. } => exitcode::CANTCREAT,
            Self::Validation(_) => exitcode::USAGE,
        }
    }
}
