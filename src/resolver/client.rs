//! HTTP client used to fetch the source page.
//!
//! Timeouts keep a dead proxy from hanging startup forever, and the body is
//! capped so a misbehaving server cannot exhaust memory.

use anyhow::{bail, Context, Result};
use reqwest::blocking::{Client, Response};
use std::io::Read;
use std::time::Duration;

pub(crate) const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
pub(crate) const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30; // connection + transfer

/// Largest page body we are willing to buffer.
pub(crate) const MAX_PAGE_SIZE: u64 = 10 * 1024 * 1024;

/// Create an HTTP client with connect and total request timeouts.
pub(crate) fn create_http_client() -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
        .user_agent(concat!("button-monitor/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")
}

/// Return an error describing the status if the response was not a success.
pub(crate) fn validate_response_status(response: &Response, context: &str) -> Result<()> {
    if !response.status().is_success() {
        let status = response.status();
        bail!(
            "{}: HTTP {} - {}",
            context,
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown error")
        );
    }
    Ok(())
}

/// Read the whole body as text, failing once it grows past `max_size`.
///
/// Content-Length is checked up front when the server sends it; the limit is
/// enforced again while streaming since the header may be absent or wrong.
pub(crate) fn read_text_with_limit(response: Response, max_size: u64) -> Result<String> {
    if let Some(content_length) = response.content_length() {
        if content_length > max_size {
            bail!(
                "Content-Length {content_length} bytes exceeds maximum page size of {max_size} bytes"
            );
        }
    }

    let mut bytes = Vec::new();
    let mut reader = response;
    let mut buffer = [0u8; 8192];

    loop {
        let n = reader
            .read(&mut buffer)
            .context("Failed to read response body")?;
        if n == 0 {
            break;
        }
        if (bytes.len() + n) as u64 > max_size {
            bail!("Page body exceeds maximum size of {max_size} bytes");
        }
        bytes.extend_from_slice(&buffer[..n]);
    }

    // Pages are HTML; a stray invalid byte should not hide an otherwise valid URL.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
