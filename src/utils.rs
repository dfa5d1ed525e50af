use std::io::{self, IsTerminal, Write};
use std::sync::Once;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

/// ANSI escape codes for terminal control
const CURSOR_SHOW: &str = "\x1B[?25h";
const ATTR_RESET: &str = "\x1B[0m";

static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Restore terminal to a clean state.
///
/// Resets colors left over from the last countdown line and shows the
/// cursor. Errors are ignored; this runs on the way out.
pub fn cleanup_terminal() {
    let _ = disable_raw_mode();

    let mut stdout = io::stdout();
    let _ = stdout.write_all(format!("{CURSOR_SHOW}{ATTR_RESET}").as_bytes());
    let _ = stdout.flush();
}

/// Install a panic hook that restores terminal state before panicking.
///
/// Safe to call multiple times - only installs once.
pub fn install_terminal_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            cleanup_terminal();
            default_hook(panic_info);
        }));
    });
}

/// Whether a key press can be waited for at all.
pub fn stdin_is_terminal() -> bool {
    io::stdin().is_terminal()
}

/// Block until any key is pressed.
///
/// Returns immediately when stdin is not a terminal, so piped and scripted
/// runs still exit. Raw mode is held while waiting, which also turns Ctrl+C
/// into an ordinary key press.
pub fn wait_for_key() -> Result<()> {
    if !stdin_is_terminal() {
        return Ok(());
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let result = read_key_press();
    disable_raw_mode().context("Failed to disable raw mode")?;
    result
}

/// Truncate a string safely by character count, not byte count.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

fn read_key_press() -> Result<()> {
    loop {
        if let Event::Key(key) = event::read().context("Failed to read terminal event")? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}
