//! Diagnostic logging setup.

use std::io::{self, IsTerminal, Write};

use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor debug mode asks for more.
const QUIET_FILTER: &str = "error";
const DEBUG_FILTER: &str = "button_monitor=debug,warn";

/// Directive string for the requested verbosity.
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        DEBUG_FILTER
    } else {
        QUIET_FILTER
    }
}

/// Writer that expands `\n` to `\r\n`.
///
/// Raw mode (held while waiting for a key) disables the terminal's own
/// newline translation.
pub struct CrlfWriter<W> {
    inner: W,
}

impl<W: Write> CrlfWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CrlfWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for (i, chunk) in buf.split(|b| *b == b'\n').enumerate() {
            if i > 0 {
                self.inner.write_all(b"\r\n")?;
            }
            self.inner.write_all(chunk)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Install the global subscriber, writing to stderr so diagnostics never mix
/// with the countdown on stdout. `RUST_LOG` takes precedence.
pub fn init(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));
    let terminal = io::stderr().is_terminal();

    // A subscriber may already be set (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(terminal)
        .with_writer(move || -> Box<dyn Write> {
            if terminal {
                Box::new(CrlfWriter::new(io::stderr()))
            } else {
                Box::new(io::stderr())
            }
        })
        .with_target(false)
        .without_time()
        .try_init();
}
