//! Interactive console front end: the menu loop, the prompts it asks, and
//! the session state the commands operate on.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::{App, Flow};
pub use terminal::{run_app, Console, Tone};
