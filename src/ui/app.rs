use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Error, Result};
use tracing::{debug, warn};

use crate::inventory::Inventory;
use crate::storage::{read_into, save_snapshot, LoadOrigin};

use super::forms::{parse_cd_id, CdForm, Confirmation, MenuChoice, AFFIRMATIVE};
use super::helpers::{inventory_rows, surface_error, INVENTORY_FOOTER, INVENTORY_HEADER};
use super::terminal::{Console, Tone};

/// What the command loop should do after a command finished.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Session state: the inventory being edited and the snapshot file it is
/// loaded from and saved to. Built once at startup and handed to every
/// command handler.
pub struct App {
    path: PathBuf,
    inventory: Inventory,
}

impl App {
    /// Create a session bound to `path`. The inventory starts empty until
    /// [`App::startup`] reads the snapshot.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            inventory: Inventory::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// Read the snapshot before the first menu is shown.
    pub fn startup<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        console.line(format!("Inventory file: {}", self.path.display()))?;
        self.load_from_disk(console)
    }

    /// Run the command bound to `key`. Keys are normally vetted by the menu
    /// prompt first; anything unrecognized is reported and the loop carries
    /// on with the menu.
    pub fn dispatch<R: BufRead, W: Write>(
        &mut self,
        key: &str,
        console: &mut Console<R, W>,
    ) -> Result<Flow> {
        debug!(key, "dispatching menu command");
        match MenuChoice::from_key(key) {
            Some(MenuChoice::Exit) => {
                console.line("Goodbye...")?;
                Ok(Flow::Exit)
            }
            Some(MenuChoice::Load) => self.reload(console),
            Some(MenuChoice::Add) => self.add_cd(console),
            Some(MenuChoice::Show) => {
                self.show_inventory(console)?;
                Ok(Flow::Continue)
            }
            Some(MenuChoice::Delete) => self.delete_cd(console),
            Some(MenuChoice::Save) => self.save(console),
            None => {
                warn!(key, "unrecognized menu key reached the dispatcher");
                console.styled_line("Invalid Input...", Tone::Error)?;
                console.blank()?;
                console.line("Please choose one of the options listed")?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Print the inventory table.
    pub fn show_inventory<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        console.styled_line(INVENTORY_HEADER, Tone::Heading)?;
        for row in inventory_rows(self.inventory.records()) {
            console.line(row)?;
        }
        console.styled_line(INVENTORY_FOOTER, Tone::Heading)
    }

    fn reload<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<Flow> {
        console.styled_line(
            "WARNING: If you continue, all unsaved data will be lost when the Inventory is re-loaded.",
            Tone::Warning,
        )?;
        console.blank()?;
        console.line(format!(
            "Type '{AFFIRMATIVE}' to continue and reload data from the file. Otherwise reload will be canceled."
        ))?;
        let Some(answer) = console.prompt("Would you like to continue? ")? else {
            return Ok(Flow::Exit);
        };

        match Confirmation::from_answer(&answer) {
            Confirmation::Confirmed => {
                console.blank()?;
                console.line("Reloading...")?;
                self.load_from_disk(console)?;
            }
            Confirmation::Declined => {
                debug!("reload cancelled");
                let pause = console.prompt(
                    "Canceling... Inventory data NOT reloaded. Press [ENTER] to continue to the menu. ",
                )?;
                if pause.is_none() {
                    return Ok(Flow::Exit);
                }
            }
        }

        self.show_inventory(console)?;
        Ok(Flow::Continue)
    }

    fn add_cd<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<Flow> {
        let Some(title) = console.prompt("What is the CD's title? ")? else {
            return Ok(Flow::Exit);
        };
        let Some(artist) = console.prompt("What is the Artist's name? ")? else {
            return Ok(Flow::Exit);
        };

        let form = CdForm::from_replies(&title, &artist);
        let added = self.inventory.add(form.title, form.artist);
        debug!(id = added.id, "cd added");

        console.blank()?;
        self.show_inventory(console)?;
        Ok(Flow::Continue)
    }

    fn delete_cd<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<Flow> {
        console.line("Deleting an entry from the CD Inventory...")?;
        console.line("What is the ID number of the entry you want to delete?")?;
        console.blank()?;
        self.show_inventory(console)?;

        let Some(raw) = console.prompt("Enter ID Number Here: ")? else {
            return Ok(Flow::Exit);
        };
        let id = match parse_cd_id(&raw) {
            Ok(id) => id,
            Err(err) => {
                console.blank()?;
                console.styled_line("That is not a valid ID number...", Tone::Error)?;
                report_error(console, &Error::new(err))?;
                console.blank()?;
                console.line("No Entries Deleted")?;
                return Ok(Flow::Continue);
            }
        };

        console.blank()?;
        match self.inventory.delete(id) {
            Ok(removed) => {
                if let Some(cd) = removed {
                    debug!(id, title = %cd.title, "cd deleted");
                    console.styled_line("Entry Deleted", Tone::Success)?;
                }
                console.line("Relabeling ID Numbers...")?;
                console.line("ID numbers have been updated")?;
            }
            Err(rejected) => {
                console.styled_line(rejected.to_string(), Tone::Error)?;
                console.blank()?;
                console.line("No Entries Deleted")?;
            }
        }
        console.blank()?;
        self.show_inventory(console)?;
        Ok(Flow::Continue)
    }

    fn save<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<Flow> {
        self.show_inventory(console)?;
        console.blank()?;
        console.line(format!(
            "Save this inventory to file? Type '{AFFIRMATIVE}' to continue and save data to the file."
        ))?;
        let Some(answer) = console.prompt("Would you like to continue? ")? else {
            return Ok(Flow::Exit);
        };

        match Confirmation::from_answer(&answer) {
            Confirmation::Confirmed => {
                console.blank()?;
                console.line("Saving updated inventory...")?;
                match save_snapshot(&self.path, self.inventory.records()) {
                    Ok(()) => console.styled_line("Done", Tone::Success)?,
                    Err(err) => {
                        warn!(path = %self.path.display(), error = %err, "saving inventory failed");
                        console.styled_line("There was a general error...", Tone::Error)?;
                        report_error(console, &Error::new(err))?;
                        console.line("The inventory was NOT saved to file.")?;
                    }
                }
            }
            Confirmation::Declined => {
                debug!("save cancelled");
                let pause = console.prompt(
                    "The inventory was NOT saved to file. Press [ENTER] to return to the menu. ",
                )?;
                if pause.is_none() {
                    return Ok(Flow::Exit);
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Replace the inventory with the snapshot on disk, reporting the outcome.
    /// Storage failures are shown to the user and leave the inventory empty;
    /// they never end the session.
    fn load_from_disk<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        match read_into(&self.path, &mut self.inventory) {
            Ok(LoadOrigin::Existing) => {
                debug!(count = self.inventory.len(), "inventory loaded");
            }
            Ok(LoadOrigin::Created) => {
                let shown = self.path.display();
                console.blank()?;
                console.styled_line(format!("{shown} does not exist..."), Tone::Warning)?;
                console.line("Creating the File...")?;
                console.line(format!("The file, {shown}, has now been created!"))?;
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "loading inventory failed");
                console.blank()?;
                console.styled_line("There was a general error...", Tone::Error)?;
                report_error(console, &Error::new(err))?;
                console.line("Continuing with an empty inventory.")?;
            }
        }
        Ok(())
    }
}

/// Print the full cause chain plus the innermost cause on its own line.
fn report_error<R: BufRead, W: Write>(console: &mut Console<R, W>, err: &Error) -> Result<()> {
    console.line(format!("Error: {err:#}"))?;
    console.line(format!("Cause: {}", surface_error(err)))
}
