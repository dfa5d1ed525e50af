//! Startup sequence: resolve the endpoint, then monitor it.

use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};

use crate::config::Config;
use crate::monitor::{Monitor, MonitorSummary, StreamHandler};
use crate::resolver::{EndpointUrl, Resolver};

/// How a run ended. None of these is an error for the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No endpoint was found; no connection was attempted.
    Unresolved,
    /// The connection could not be opened.
    ConnectFailed,
    /// The connection was opened and has since closed.
    Finished(MonitorSummary),
}

/// Resolve (unless `endpoint` is given) and monitor with `handler`.
///
/// Only configuration mistakes are returned as errors. Resolution and
/// connection failures are logged and reported through [`Outcome`].
pub fn run<H: StreamHandler>(
    config: &Config,
    endpoint: Option<EndpointUrl>,
    handler: &mut H,
) -> Result<Outcome> {
    let endpoint = match endpoint {
        Some(endpoint) => endpoint,
        None => {
            let resolver = Resolver::new(&config.source_url, &config.endpoint_host)?;
            match resolver.resolve() {
                Ok(endpoint) => endpoint,
                Err(e) => {
                    tracing::warn!(source = resolver.source_url(), "{e}");
                    return Ok(Outcome::Unresolved);
                }
            }
        }
    };

    tracing::info!(%endpoint, "resolved endpoint");

    let mut monitor = Monitor::new();
    match monitor.run(&endpoint, handler) {
        Ok(summary) => Ok(Outcome::Finished(summary)),
        Err(e) => {
            tracing::warn!("{e:#}");
            Ok(Outcome::ConnectFailed)
        }
    }
}

/// Run [`run`] on a dedicated monitor thread.
///
/// Messages are still handled one at a time on that thread; the caller stays
/// free to wait for a key press. The handler is handed back when the run
/// ends.
pub fn spawn<H>(
    config: Config,
    endpoint: Option<EndpointUrl>,
    mut handler: H,
) -> Result<JoinHandle<Result<(Outcome, H)>>>
where
    H: StreamHandler + Send + 'static,
{
    thread::Builder::new()
        .name("monitor".to_string())
        .spawn(move || -> Result<(Outcome, H)> {
            let outcome = run(&config, endpoint, &mut handler)
                .inspect_err(|e| tracing::error!("{e:#}"))?;
            Ok((outcome, handler))
        })
        .context("Failed to start monitor thread")
}
