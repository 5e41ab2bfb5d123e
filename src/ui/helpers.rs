use anyhow::Error;

use crate::models::Cd;

/// Menu options, one per line, in the order they are printed.
pub(crate) const MENU_LINES: &[&str] = &[
    "[l] load Inventory from file",
    "[a] Add CD",
    "[i] Display Current Inventory",
    "[d] delete CD from Inventory",
    "[s] Save Inventory to file",
    "[x] exit",
];

pub(crate) const INVENTORY_HEADER: &str = "======= The Current Inventory: =======";
pub(crate) const INVENTORY_FOOTER: &str = "======================================";

/// Build the body of the inventory table: column caption, a spacer, then one
/// row per CD.
pub(crate) fn inventory_rows(records: &[Cd]) -> Vec<String> {
    let mut rows = Vec::with_capacity(records.len() + 2);
    rows.push("ID\tCD Title (by: Artist)".to_string());
    rows.push(String::new());
    rows.extend(records.iter().map(Cd::to_string));
    rows
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}
