use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use rusqlite::{Connection, OpenFlags};

use super::error::StorageError;

/// Folder name used beneath the user's home directory for application data.
pub const DATA_DIR_NAME: &str = ".cd-inventory";
/// Snapshot file name, also used on its own when no home directory exists.
pub const SNAPSHOT_FILE_NAME: &str = "CDInventory.dat";

/// Single table holding the snapshot rows in insertion order.
const CREATE_TABLE: &str = "CREATE TABLE cds (
    id INTEGER NOT NULL,
    title TEXT NOT NULL,
    artist TEXT NOT NULL
)";

/// Resolve where the snapshot lives when the user did not pick a path.
/// Falls back to the working directory if the home directory is unknown.
pub fn default_snapshot_path() -> PathBuf {
    match BaseDirs::new() {
        Some(base_dirs) => base_dirs
            .home_dir()
            .join(DATA_DIR_NAME)
            .join(SNAPSHOT_FILE_NAME),
        None => PathBuf::from(SNAPSHOT_FILE_NAME),
    }
}

/// Open an existing snapshot without write access. Returns `Ok(None)` when
/// the file does not exist so callers can decide how to bootstrap it.
pub(super) fn open_existing(path: &Path) -> Result<Option<Connection>, StorageError> {
    match fs::metadata(path) {
        Ok(_) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(StorageError::io(path)(err)),
    }

    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map(Some)
    .map_err(StorageError::sqlite(path))
}

/// Create an empty file at `path`, including any missing parent folders.
pub(super) fn create_empty(path: &Path) -> Result<(), StorageError> {
    ensure_parent_dir(path)?;
    File::create(path).map_err(StorageError::io(path))?;
    Ok(())
}

/// Start a brand new snapshot at `path`, discarding whatever was there.
/// The returned connection already has the `cds` table.
pub(super) fn open_fresh(path: &Path) -> Result<Connection, StorageError> {
    ensure_parent_dir(path)?;
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => return Err(StorageError::io(path)(err)),
    }

    let conn = Connection::open(path).map_err(StorageError::sqlite(path))?;
    conn.execute(CREATE_TABLE, [])
        .map_err(StorageError::sqlite(path))?;
    Ok(conn)
}

fn ensure_parent_dir(path: &Path) -> Result<(), StorageError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(StorageError::io(parent))
        }
        _ => Ok(()),
    }
}
