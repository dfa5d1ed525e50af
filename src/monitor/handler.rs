//! Reactions to connection lifecycle events.

use std::io::{self, IsTerminal, Write};

use super::display::{Category, Display};
use super::message::{CountdownMessage, MessageError};

/// Callbacks invoked by the monitor, one at a time, in arrival order.
pub trait StreamHandler {
    fn on_open(&mut self) {}

    fn on_close(&mut self) {}

    /// Handle one text message. An error skips the message only.
    fn on_message(&mut self, raw: &str) -> Result<(), MessageError>;
}

/// Prints a colored countdown line for every tick received.
pub struct CountdownHandler<W: Write = io::Stdout> {
    display: Display,
    out: W,
    line_ending: &'static str,
}

impl CountdownHandler<io::Stdout> {
    /// Handler printing to stdout.
    ///
    /// On a terminal lines end in `\r\n`, so output stays aligned while the
    /// key-press wait holds the terminal in raw mode.
    pub fn stdout() -> Self {
        let stdout = io::stdout();
        if stdout.is_terminal() {
            Self::new(stdout).crlf()
        } else {
            Self::new(stdout)
        }
    }
}

impl<W: Write> CountdownHandler<W> {
    pub fn new(out: W) -> Self {
        Self {
            display: Display::new(),
            out,
            line_ending: "\n",
        }
    }

    /// End lines with `\r\n` instead of `\n`.
    pub fn crlf(mut self) -> Self {
        self.line_ending = "\r\n";
        self
    }

    pub fn current_category(&self) -> Option<Category> {
        self.display.current()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StreamHandler for CountdownHandler<W> {
    fn on_open(&mut self) {
        tracing::info!("connection open");
    }

    fn on_close(&mut self) {
        tracing::info!("connection closed");
    }

    fn on_message(&mut self, raw: &str) -> Result<(), MessageError> {
        let message = CountdownMessage::parse(raw)?;
        let seconds = message.seconds_remaining;

        self.display.update(seconds);
        write!(
            self.out,
            "{}{}",
            self.display.render(seconds),
            self.line_ending
        )?;
        self.out.flush()?;
        Ok(())
    }
}
