//! The in-memory store. `Inventory` is the only source of truth during a
//! session: the snapshot file is consulted wholesale on load and replaced
//! wholesale on save, never merged.
//!
//! After every public operation each record's `id` equals its 1-based
//! position, so users can always address an entry by the number they saw in
//! the last listing.

use thiserror::Error;

use crate::models::Cd;

/// Reasons a delete request is refused without touching the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeleteRejected {
    #[error("ID Number Invalid... Choose a positive, nonzero value")]
    NotPositive,
    #[error("ID Number Invalid... There are not that many CDs in the inventory ({id} > {count})")]
    NoSuchEntry { id: i64, count: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    cds: Vec<Cd>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from previously persisted records, renumbering them
    /// so the position invariant holds even for hand-edited snapshots.
    pub fn from_records(records: Vec<Cd>) -> Self {
        let mut inventory = Self { cds: records };
        inventory.renumber();
        inventory
    }

    pub fn records(&self) -> &[Cd] {
        &self.cds
    }

    pub fn len(&self) -> usize {
        self.cds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cds.is_empty()
    }

    /// Append a new CD with the next sequential id and hand back a reference
    /// to the stored entry.
    pub fn add(&mut self, title: impl Into<String>, artist: impl Into<String>) -> &Cd {
        let id = self.next_id();
        self.cds.push(Cd::new(id, title, artist));
        &self.cds[self.cds.len() - 1]
    }

    /// Remove the CD with the given id and renumber the rest.
    ///
    /// Bounds are checked against the current count only. An in-range id
    /// that matches nothing is not an error: the list is renumbered and
    /// `Ok(None)` is returned.
    pub fn delete(&mut self, id: i64) -> Result<Option<Cd>, DeleteRejected> {
        if id < 1 {
            return Err(DeleteRejected::NotPositive);
        }
        if id > self.len() as i64 {
            return Err(DeleteRejected::NoSuchEntry {
                id,
                count: self.len(),
            });
        }

        let removed = self
            .cds
            .iter()
            .position(|cd| cd.id == id)
            .map(|index| self.cds.remove(index));
        self.renumber();
        Ok(removed)
    }

    /// Replace the whole collection. Existing entries are dropped first so the
    /// result is never a merge of old and new state.
    pub fn replace(&mut self, records: Vec<Cd>) {
        self.cds.clear();
        self.cds.extend(records);
        self.renumber();
    }

    pub fn clear(&mut self) {
        self.cds.clear();
    }

    /// Rewrite every id to its 1-based position, preserving order.
    pub fn renumber(&mut self) {
        for (index, cd) in self.cds.iter_mut().enumerate() {
            cd.id = index as i64 + 1;
        }
    }

    fn next_id(&self) -> i64 {
        self.cds.len() as i64 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_dense(inventory: &Inventory) {
        for (index, cd) in inventory.records().iter().enumerate() {
            assert_eq!(cd.id, index as i64 + 1, "id out of place at {index}");
        }
    }

    fn sample() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.add("Thriller", "Michael Jackson");
        inventory.add("Back in Black", "AC/DC");
        inventory.add("Rumours", "Fleetwood Mac");
        inventory
    }

    #[test]
    fn add_appends_with_next_id() {
        let mut inventory = sample();
        let before = inventory.len();
        let added = inventory.add("Blue", "Joni Mitchell").clone();
        assert_eq!(inventory.len(), before + 1);
        assert_eq!(added.id, before as i64 + 1);
        assert_eq!(inventory.records().last(), Some(&added));
    }

    #[test]
    fn add_accepts_empty_strings() {
        let mut inventory = Inventory::new();
        let added = inventory.add("", "");
        assert_eq!(added, &Cd::new(1, "", ""));
    }

    #[test]
    fn scenario_add_add_delete_renumbers() {
        let mut inventory = Inventory::new();
        inventory.add("Thriller", "Michael Jackson");
        assert_eq!(
            inventory.records(),
            &[Cd::new(1, "Thriller", "Michael Jackson")]
        );

        inventory.add("Back in Black", "AC/DC");
        assert_eq!(
            inventory.records(),
            &[
                Cd::new(1, "Thriller", "Michael Jackson"),
                Cd::new(2, "Back in Black", "AC/DC"),
            ]
        );

        let removed = inventory.delete(1).expect("delete in range");
        assert_eq!(removed, Some(Cd::new(1, "Thriller", "Michael Jackson")));
        assert_eq!(inventory.records(), &[Cd::new(1, "Back in Black", "AC/DC")]);
    }

    #[test]
    fn delete_from_middle_keeps_order() {
        let mut inventory = sample();
        inventory.delete(2).expect("delete");
        let titles: Vec<_> = inventory.records().iter().map(|cd| cd.title.as_str()).collect();
        assert_eq!(titles, ["Thriller", "Rumours"]);
        assert_dense(&inventory);
    }

    #[test]
    fn delete_rejects_non_positive_ids() {
        let mut inventory = sample();
        let before = inventory.clone();
        assert_eq!(inventory.delete(0), Err(DeleteRejected::NotPositive));
        assert_eq!(inventory.delete(-4), Err(DeleteRejected::NotPositive));
        assert_eq!(inventory, before);
    }

    #[test]
    fn delete_rejects_ids_past_the_end() {
        let mut inventory = sample();
        let before = inventory.clone();
        assert_eq!(
            inventory.delete(4),
            Err(DeleteRejected::NoSuchEntry { id: 4, count: 3 })
        );
        assert_eq!(inventory, before);
    }

    #[test]
    fn delete_on_empty_inventory_is_rejected() {
        let mut inventory = Inventory::new();
        assert_eq!(
            inventory.delete(1),
            Err(DeleteRejected::NoSuchEntry { id: 1, count: 0 })
        );
    }

    #[test]
    fn in_range_id_without_match_only_renumbers() {
        // Only reachable when the invariant was broken from outside, e.g. a
        // record list pushed in without renumbering.
        let mut inventory = Inventory {
            cds: vec![Cd::new(1, "A", "a"), Cd::new(3, "B", "b")],
        };
        assert_eq!(inventory.delete(2), Ok(None));
        assert_eq!(inventory.len(), 2);
        assert_dense(&inventory);
    }

    #[test]
    fn ids_stay_dense_across_mixed_operations() {
        let mut inventory = Inventory::new();
        let script: &[(bool, i64)] = &[
            (true, 0),
            (true, 0),
            (true, 0),
            (false, 2),
            (true, 0),
            (false, 1),
            (false, 9),
            (false, 2),
            (true, 0),
            (false, 0),
            (false, 3),
        ];
        for (step, &(is_add, id)) in script.iter().enumerate() {
            if is_add {
                inventory.add(format!("title {step}"), format!("artist {step}"));
            } else {
                let _ = inventory.delete(id);
            }
            assert_dense(&inventory);
        }
    }

    #[test]
    fn replace_discards_previous_records() {
        let mut inventory = sample();
        inventory.replace(vec![Cd::new(7, "Kind of Blue", "Miles Davis")]);
        assert_eq!(
            inventory.records(),
            &[Cd::new(1, "Kind of Blue", "Miles Davis")]
        );
    }

    #[test]
    fn from_records_repairs_sparse_ids() {
        let inventory =
            Inventory::from_records(vec![Cd::new(4, "A", "a"), Cd::new(9, "B", "b")]);
        assert_dense(&inventory);
        assert_eq!(inventory.records()[1].title, "B");
    }
}
