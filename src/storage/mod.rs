//! Persistence split across logical submodules: locating and opening the
//! snapshot file, and moving whole inventories in and out of it.

mod connection;
mod error;
mod snapshot;

pub use connection::{default_snapshot_path, DATA_DIR_NAME, SNAPSHOT_FILE_NAME};
pub use error::StorageError;
pub use snapshot::{load_snapshot, read_into, save_snapshot, LoadOrigin, Snapshot};
