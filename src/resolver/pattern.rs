//! Locating the live-feed URL inside a fetched page.

use anyhow::{Context, Result};
use regex::Regex;

/// Build the pattern for `wss://<host>/thebutton?h=<token>`.
///
/// The token runs until the next double quote, which is where the URL ends
/// inside the page's inline script.
pub fn endpoint_pattern(host: &str) -> Result<Regex> {
    let pattern = format!(r#"(wss://{}/thebutton\?h=[^"]*)"#, regex::escape(host));
    Regex::new(&pattern).with_context(|| format!("Invalid endpoint pattern for host: {host}"))
}

/// Return the first endpoint URL found in `body`, ignoring any later ones.
pub fn find_endpoint<'a>(pattern: &Regex, body: &'a str) -> Option<&'a str> {
    pattern
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
