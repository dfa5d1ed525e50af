//! The streaming connection and its read loop.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use tungstenite::{Error as WsError, Message, WebSocket};

use crate::resolver::EndpointUrl;
use crate::utils::truncate;

use super::handler::StreamHandler;

/// Longest prefix of a skipped message that is logged.
const LOGGED_PAYLOAD_CHARS: usize = 120;

/// Connection lifecycle as seen by the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

/// Counts of what a monitoring run saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonitorSummary {
    pub handled: u64,
    pub skipped: u64,
}

/// Drives a single WebSocket connection, feeding each message to a handler.
#[derive(Debug, Default)]
pub struct Monitor {
    state: ConnectionState,
    summary: MonitorSummary,
}

impl Monitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Connect to `endpoint` and dispatch messages until the connection ends.
    ///
    /// Failing to connect is returned as an error without calling the
    /// handler. Once connected, the run always ends with `on_close` and an
    /// `Ok` summary, however the connection went away.
    pub fn run<H: StreamHandler>(
        &mut self,
        endpoint: &EndpointUrl,
        handler: &mut H,
    ) -> Result<MonitorSummary> {
        tracing::debug!(%endpoint, "connecting");
        let (mut socket, response) = tungstenite::connect(endpoint.as_str())
            .with_context(|| format!("Failed to connect to {endpoint}"))?;
        tracing::debug!(status = %response.status(), "handshake complete");

        Ok(self.pump(&mut socket, handler))
    }

    /// Read loop over an established socket.
    pub fn pump<S, H>(&mut self, socket: &mut WebSocket<S>, handler: &mut H) -> MonitorSummary
    where
        S: Read + Write,
        H: StreamHandler,
    {
        self.summary = MonitorSummary::default();
        self.state = ConnectionState::Connected;
        handler.on_open();

        loop {
            match socket.read() {
                Ok(Message::Text(text)) => self.dispatch(handler, text.as_str()),
                Ok(Message::Close(frame)) => {
                    // Keep reading so the close reply gets flushed; the next
                    // read reports ConnectionClosed.
                    tracing::debug!(?frame, "close frame received");
                }
                Ok(Message::Binary(data)) => {
                    tracing::debug!(bytes = data.len(), "ignoring binary message");
                }
                Ok(_) => {}
                Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "connection lost");
                    break;
                }
            }
        }

        self.state = ConnectionState::Disconnected;
        handler.on_close();

        tracing::debug!(
            handled = self.summary.handled,
            skipped = self.summary.skipped,
            "monitoring finished"
        );
        self.summary
    }

    fn dispatch<H: StreamHandler>(&mut self, handler: &mut H, raw: &str) {
        match handler.on_message(raw) {
            Ok(()) => self.summary.handled += 1,
            Err(e) => {
                self.summary.skipped += 1;
                tracing::warn!(
                    error = %e,
                    bytes = raw.len(),
                    payload = %truncate(raw, LOGGED_PAYLOAD_CHARS),
                    "skipping message"
                );
            }
        }
    }
}
