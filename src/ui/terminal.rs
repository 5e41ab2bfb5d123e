use std::io::{self, BufRead, StdinLock, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use tracing::debug;

use super::app::{App, Flow};
use super::forms::MenuChoice;
use super::helpers::MENU_LINES;

/// Prompt shown until the user types one of the menu keys.
const MENU_PROMPT: &str = "Which operation would you like to perform? [l, a, i, d, s or x]: ";

/// Emphasis applied to a console line when styling is enabled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tone {
    Heading,
    Warning,
    Error,
    Success,
}

/// Line-oriented console over any reader/writer pair. The command loop only
/// talks to the terminal through this type, which keeps it drivable from
/// tests with in-memory buffers.
pub struct Console<R, W> {
    input: R,
    output: W,
    styled: bool,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console bound to the process's stdin and stdout.
    pub fn stdio(styled: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), styled)
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, styled: bool) -> Self {
        Self {
            input,
            output,
            styled,
        }
    }

    /// Write one plain line.
    pub fn line(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", text.as_ref()).context("failed to write to console")
    }

    pub fn blank(&mut self) -> Result<()> {
        self.line("")
    }

    /// Write one line with the color/attribute matching `tone`. Falls back to
    /// a plain line when styling is off.
    pub fn styled_line(&mut self, text: impl AsRef<str>, tone: Tone) -> Result<()> {
        if !self.styled {
            return self.line(text);
        }
        let (color, bold) = match tone {
            Tone::Heading => (Color::Cyan, true),
            Tone::Warning => (Color::Yellow, true),
            Tone::Error => (Color::Red, false),
            Tone::Success => (Color::Green, false),
        };
        if bold {
            queue!(self.output, SetAttribute(Attribute::Bold))
                .context("failed to style console output")?;
        }
        queue!(
            self.output,
            SetForegroundColor(color),
            Print(text.as_ref()),
            ResetColor,
            SetAttribute(Attribute::Reset),
            Print("\n")
        )
        .context("failed to write to console")
    }

    /// Print `question` without a newline and read the reply, minus its line
    /// terminator. Returns `Ok(None)` once input is exhausted.
    pub fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}").context("failed to write prompt")?;
        self.output.flush().context("failed to flush console")?;

        let mut reply = String::new();
        let read = self
            .input
            .read_line(&mut reply)
            .context("failed to read console input")?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed_len = reply.trim_end_matches(['\r', '\n']).len();
        reply.truncate(trimmed_len);
        Ok(Some(reply))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.output.flush().context("failed to flush console")
    }

    /// Hand back the writer, mainly so tests can inspect what was printed.
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Load the snapshot, then keep showing the menu and dispatching commands
/// until the user exits or input runs out.
pub fn run_app<R: BufRead, W: Write>(app: &mut App, console: &mut Console<R, W>) -> Result<()> {
    app.startup(console)?;

    loop {
        print_menu(console)?;
        let Some(key) = read_menu_key(console)? else {
            debug!("console input closed, leaving command loop");
            break;
        };
        if app.dispatch(&key, console)? == Flow::Exit {
            break;
        }
    }

    console.flush()
}

pub(crate) fn print_menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    console.blank()?;
    console.styled_line("Menu", Tone::Heading)?;
    console.blank()?;
    for line in MENU_LINES {
        console.line(line)?;
    }
    console.blank()
}

/// Ask for a menu key until a recognized one arrives. The returned key is
/// trimmed and lower-cased.
fn read_menu_key<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Option<String>> {
    loop {
        let Some(reply) = console.prompt(MENU_PROMPT)? else {
            return Ok(None);
        };
        let key = reply.trim().to_lowercase();
        if MenuChoice::from_key(&key).is_some() {
            console.blank()?;
            return Ok(Some(key));
        }
    }
}
