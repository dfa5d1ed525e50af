//! Endpoint resolution.
//!
//! The live feed's WebSocket address is only published inside the page that
//! embeds it, so startup fetches that page once and pulls the URL out with a
//! regex. There is no retry: a failed fetch or a page without the URL ends
//! resolution and the caller skips monitoring.

pub(crate) mod client;
pub mod pattern;


use std::fmt;
use std::str::FromStr;

use anyhow::Context;
use regex::Regex;
use thiserror::Error;

use client::{create_http_client, read_text_with_limit, validate_response_status, MAX_PAGE_SIZE};
use pattern::{endpoint_pattern, find_endpoint};

/// Resolved address of the live feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointUrl(String);

impl EndpointUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EndpointUrl {
    type Err = anyhow::Error;

    /// Accept a user-supplied endpoint, requiring a WebSocket scheme.
    fn from_str(s: &str) -> anyhow::Result<Self> {
        let s = s.trim();
        if !(s.starts_with("wss://") || s.starts_with("ws://")) {
            anyhow::bail!("Endpoint must start with ws:// or wss://, got: {s}");
        }
        Ok(Self(s.to_string()))
    }
}

/// Why no endpoint could be produced.
///
/// Callers treat both variants the same way; the distinction only feeds
/// diagnostics.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to fetch source page: {0:#}")]
    Fetch(anyhow::Error),

    #[error("no endpoint URL for host {host} found in source page")]
    NotFound { host: String },
}

/// One-shot resolver bound to a source page and endpoint host.
#[derive(Debug, Clone)]
pub struct Resolver {
    source_url: String,
    host: String,
    pattern: Regex,
}

impl Resolver {
    pub fn new(source_url: impl Into<String>, host: impl Into<String>) -> anyhow::Result<Self> {
        let host = host.into();
        let pattern = endpoint_pattern(&host)?;
        Ok(Self {
            source_url: source_url.into(),
            host,
            pattern,
        })
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Fetch the source page and extract the first endpoint URL in it.
    pub fn resolve(&self) -> Result<EndpointUrl, ResolveError> {
        tracing::debug!(source = %self.source_url, "fetching source page");
        let body = self.fetch().map_err(ResolveError::Fetch)?;
        tracing::debug!(bytes = body.len(), "source page fetched");
        self.extract(&body)
    }

    /// Extract the endpoint from an already fetched page body.
    pub fn extract(&self, body: &str) -> Result<EndpointUrl, ResolveError> {
        find_endpoint(&self.pattern, body)
            .map(|url| EndpointUrl(url.to_string()))
            .ok_or_else(|| ResolveError::NotFound {
                host: self.host.clone(),
            })
    }

    fn fetch(&self) -> anyhow::Result<String> {
        let client = create_http_client()?;
        let response = client
            .get(&self.source_url)
            .send()
            .with_context(|| format!("Request to {} failed", self.source_url))?;

        validate_response_status(&response, "Failed to fetch source page")?;

        read_text_with_limit(response, MAX_PAGE_SIZE)
    }
}
