//! Domain model for a single inventory entry. The struct is a plain data
//! holder; ordering and numbering rules live in [`crate::inventory`] so this
//! type can be passed freely between the store, the snapshot file, and the
//! console.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One CD in the collection.
pub struct Cd {
    /// 1-based position in the inventory. The store rewrites it after every
    /// deletion, so it is only meaningful relative to the current list.
    pub id: i64,
    /// Album title as typed by the user. Empty titles are allowed.
    pub title: String,
    /// Performing artist. Not required to be unique or non-empty.
    pub artist: String,
}

impl Cd {
    pub fn new(id: i64, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
        }
    }
}

impl fmt::Display for Cd {
    /// Render the row exactly as the inventory table shows it:
    /// `ID<TAB>Title (by: Artist)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{} (by: {})", self.id, self.title, self.artist)
    }
}
