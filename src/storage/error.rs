use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures raised while reading or writing the snapshot file. Every variant
/// carries the path so console messages stay useful without extra context.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} could not be used as an inventory snapshot", .path.display())]
    Sqlite {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("{} is not an inventory snapshot (no `cds` table)", .path.display())]
    NotASnapshot { path: PathBuf },
}

impl StorageError {
    pub(crate) fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn sqlite(path: &Path) -> impl FnOnce(rusqlite::Error) -> Self + '_ {
        move |source| Self::Sqlite {
            path: path.to_path_buf(),
            source,
        }
    }
}
