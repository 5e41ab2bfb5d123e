//! Whole-inventory reads and writes. Both directions move the complete
//! collection in a single call; there is no incremental persistence.

use std::path::Path;

use rusqlite::{params, Connection};
use tracing::debug;

use super::connection::{create_empty, open_existing, open_fresh};
use super::error::StorageError;
use crate::inventory::Inventory;
use crate::models::Cd;

/// How the snapshot file was found when loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// The file already existed and was read.
    Existing,
    /// No file existed, so an empty one was created in its place.
    Created,
}

/// Records read from disk together with how the file was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub records: Vec<Cd>,
    pub origin: LoadOrigin,
}

/// Read every record stored at `path`.
///
/// A missing file is created empty and yields an empty snapshot. A zero-length
/// file is also an empty snapshot. Anything else must be a database written by
/// [`save_snapshot`].
pub fn load_snapshot(path: &Path) -> Result<Snapshot, StorageError> {
    let Some(conn) = open_existing(path)? else {
        debug!(path = %path.display(), "snapshot missing, creating empty file");
        create_empty(path)?;
        return Ok(Snapshot {
            records: Vec::new(),
            origin: LoadOrigin::Created,
        });
    };

    let records = if has_cds_table(&conn).map_err(StorageError::sqlite(path))? {
        fetch_records(&conn).map_err(StorageError::sqlite(path))?
    } else if is_zero_length(path)? {
        Vec::new()
    } else {
        return Err(StorageError::NotASnapshot {
            path: path.to_path_buf(),
        });
    };

    debug!(path = %path.display(), count = records.len(), "snapshot loaded");
    Ok(Snapshot {
        records,
        origin: LoadOrigin::Existing,
    })
}

/// Clear `inventory`, then fill it from the snapshot at `path`. On failure the
/// inventory is left empty rather than partially populated.
pub fn read_into(path: &Path, inventory: &mut Inventory) -> Result<LoadOrigin, StorageError> {
    inventory.clear();
    let snapshot = load_snapshot(path)?;
    inventory.replace(snapshot.records);
    Ok(snapshot.origin)
}

/// Overwrite the file at `path` with exactly `records`, in order.
pub fn save_snapshot(path: &Path, records: &[Cd]) -> Result<(), StorageError> {
    let mut conn = open_fresh(path)?;
    write_records(&mut conn, records).map_err(StorageError::sqlite(path))?;
    debug!(path = %path.display(), count = records.len(), "snapshot saved");
    Ok(())
}

fn has_cds_table(conn: &Connection) -> rusqlite::Result<bool> {
    let tables: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'cds'",
        [],
        |row| row.get(0),
    )?;
    Ok(tables > 0)
}

fn fetch_records(conn: &Connection) -> rusqlite::Result<Vec<Cd>> {
    let mut stmt = conn.prepare("SELECT id, title, artist FROM cds ORDER BY rowid")?;
    let records = stmt
        .query_map([], |row| {
            Ok(Cd {
                id: row.get(0)?,
                title: row.get(1)?,
                artist: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

fn write_records(conn: &mut Connection, records: &[Cd]) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare("INSERT INTO cds (id, title, artist) VALUES (?1, ?2, ?3)")?;
        for cd in records {
            stmt.execute(params![cd.id, cd.title, cd.artist])?;
        }
    }
    tx.commit()
}

fn is_zero_length(path: &Path) -> Result<bool, StorageError> {
    let metadata = std::fs::metadata(path).map_err(StorageError::io(path))?;
    Ok(metadata.len() == 0)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn sample() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.add("Thriller", "Michael Jackson");
        inventory.add("Back in Black", "AC/DC");
        inventory.add("", "Unknown Artist");
        inventory
    }

    #[test]
    fn missing_file_loads_empty_and_is_created() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("CDInventory.dat");

        let snapshot = load_snapshot(&path).expect("load");
        assert_eq!(snapshot.origin, LoadOrigin::Created);
        assert!(snapshot.records.is_empty());
        assert_eq!(fs::metadata(&path).expect("created").len(), 0);
    }

    #[test]
    fn freshly_created_file_loads_as_existing_empty() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("CDInventory.dat");
        load_snapshot(&path).expect("create");

        let snapshot = load_snapshot(&path).expect("reload");
        assert_eq!(snapshot.origin, LoadOrigin::Existing);
        assert!(snapshot.records.is_empty());
    }

    #[test]
    fn save_then_load_reproduces_records() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("CDInventory.dat");
        let inventory = sample();

        save_snapshot(&path, inventory.records()).expect("save");
        let snapshot = load_snapshot(&path).expect("load");
        assert_eq!(snapshot.records, inventory.records());
    }

    #[test]
    fn save_replaces_previous_snapshot() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("CDInventory.dat");
        save_snapshot(&path, sample().records()).expect("first save");

        let mut smaller = Inventory::new();
        smaller.add("Blue", "Joni Mitchell");
        save_snapshot(&path, smaller.records()).expect("second save");

        let snapshot = load_snapshot(&path).expect("load");
        assert_eq!(snapshot.records, smaller.records());
    }

    #[test]
    fn save_creates_missing_directories() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("data").join("CDInventory.dat");
        save_snapshot(&path, sample().records()).expect("save");
        assert_eq!(load_snapshot(&path).expect("load").records.len(), 3);
    }

    #[test]
    fn garbage_file_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("CDInventory.dat");
        fs::write(&path, vec![0x5a_u8; 4096]).expect("write");

        let err = load_snapshot(&path).expect_err("should fail");
        assert!(matches!(err, StorageError::Sqlite { .. }), "{err:?}");
    }

    #[test]
    fn foreign_database_is_not_a_snapshot() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("other.sqlite");
        {
            let conn = Connection::open(&path).expect("open");
            conn.execute("CREATE TABLE songs (title TEXT)", [])
                .expect("create");
        }

        let err = load_snapshot(&path).expect_err("should fail");
        assert!(matches!(err, StorageError::NotASnapshot { .. }), "{err:?}");
    }

    #[test]
    fn read_into_replaces_instead_of_merging() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("CDInventory.dat");
        let mut saved = Inventory::new();
        saved.add("Kind of Blue", "Miles Davis");
        save_snapshot(&path, saved.records()).expect("save");

        let mut inventory = sample();
        let origin = read_into(&path, &mut inventory).expect("read");
        assert_eq!(origin, LoadOrigin::Existing);
        assert_eq!(inventory, saved);
    }

    #[test]
    fn failed_read_into_leaves_inventory_empty() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("CDInventory.dat");
        fs::write(&path, vec![0x5a_u8; 4096]).expect("write");

        let mut inventory = sample();
        assert!(read_into(&path, &mut inventory).is_err());
        assert!(inventory.is_empty());
    }
}
