//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::storage::default_snapshot_path;

/// Environment variable that can point at the snapshot file instead of `--file`.
pub const FILE_ENV: &str = "CD_INVENTORY_FILE";

#[derive(Debug, Parser)]
#[command(
    name = "cd-inventory",
    version,
    about = "Interactive inventory manager for a CD collection"
)]
pub struct Cli {
    /// Snapshot file to load at startup and save to. Defaults to
    /// `~/.cd-inventory/CDInventory.dat`.
    #[arg(short, long, env = FILE_ENV, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Print plain text without colors.
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Path the session reads from and writes to.
    pub fn snapshot_path(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(default_snapshot_path)
    }
}
