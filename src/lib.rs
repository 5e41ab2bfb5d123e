//! Core library surface for the CD inventory manager.
//!
//! The binary only parses flags and wires these pieces together, so the
//! store, the snapshot persistence, and the command loop can all be driven
//! directly from tests.
pub mod config;
pub mod inventory;
pub mod logging;
pub mod models;
pub mod storage;
pub mod ui;

/// Snapshot persistence used at startup and by the load/save commands.
pub use storage::{default_snapshot_path, load_snapshot, read_into, save_snapshot, StorageError};

/// The domain types the other layers manipulate.
pub use inventory::{DeleteRejected, Inventory};
pub use models::Cd;

/// The interactive session and its entry point.
pub use ui::{run_app, App, Console};
