//! Terminal stand-ins for the character LCD and its buttons.
//!
//! ```text
//!   ██ │AQI A 42   L 38 │
//!   ██ │Good           /│      ██ = backlight colour as a 24-bit ANSI swatch
//! ```
//!
//! Keys are read a line at a time from stdin: `m` toggles mode, `p` toggles
//! pause, `q` shuts down.  End of input (stdin on `/dev/null` under a
//! service manager) only stops the reader; the monitor keeps running.

use std::io::{self, BufRead, Write};
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};

use crate::app::commands::AppCommand;
use crate::app::ports::Renderer;
use crate::display::DisplayFrame;
use crate::input::CommandQueue;

/// [`Renderer`] printing frames to any writer (stdout by default).
pub struct ConsoleRenderer<W: Write = io::Stdout> {
    out: W,
}

impl ConsoleRenderer {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, frame: &DisplayFrame) -> io::Result<()> {
        let (r, g, b) = frame.color;
        let swatch = format!("\x1b[48;2;{r};{g};{b}m  \x1b[0m");
        writeln!(self.out, "{swatch} │{}│", frame.line1)?;
        writeln!(self.out, "{swatch} │{}│", frame.line2)?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn show(&mut self, frame: &DisplayFrame) {
        if let Err(e) = self.write_frame(frame) {
            warn!("console: frame not written: {e}");
        }
    }
}

/// Map one input line to a command.  Only the first non-blank character counts.
pub fn parse_key(line: &str) -> Option<AppCommand> {
    match line.trim().chars().next()?.to_ascii_lowercase() {
        'm' => Some(AppCommand::ModeToggle),
        'p' => Some(AppCommand::PauseToggle),
        'q' => Some(AppCommand::Shutdown),
        _ => None,
    }
}

/// Forward stdin key lines into `queue` until `q` or end of input.
/// Only `q` queues a shutdown.
pub fn spawn_stdin_reader(queue: &'static CommandQueue) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("aqimon-input".into())
        .spawn(move || read_keys(io::stdin().lock(), queue))
}

fn read_keys(input: impl BufRead, queue: &CommandQueue) {
    for line in input.lines() {
        let Ok(line) = line else { break };
        match parse_key(&line) {
            Some(AppCommand::Shutdown) => {
                queue.push(AppCommand::Shutdown);
                return;
            }
            Some(command) => {
                queue.push(command);
            }
            None => debug!("console: ignored input {line:?}"),
        }
    }
    info!("console: input closed, keys disabled");
}
