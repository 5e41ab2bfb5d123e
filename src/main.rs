//! Binary entry point: parse flags, install logging, then hand the session
//! to the interactive command loop until the user exits.
use std::io;

use cd_inventory::config::Cli;
use cd_inventory::{logging, run_app, App, Console};
use clap::Parser;
use crossterm::tty::IsTty;

/// Only a broken terminal ends the process with an error; storage problems
/// are reported inside the loop and the session continues.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init();

    let styled = !cli.no_color && io::stdout().is_tty();
    let mut app = App::new(cli.snapshot_path());
    let mut console = Console::stdio(styled);
    run_app(&mut app, &mut console)
}
