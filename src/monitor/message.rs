//! Decoding of inbound feed messages.

use serde::de::{self, Deserializer, Unexpected};
use serde::Deserialize;
use thiserror::Error;

/// Failure to handle a single message. Never fatal to the connection.
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("malformed countdown message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write countdown line: {0}")]
    Output(#[from] std::io::Error),
}

/// A countdown tick pushed by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownMessage {
    pub seconds_remaining: u32,
}

#[derive(Deserialize)]
struct Envelope {
    payload: Payload,
}

#[derive(Deserialize)]
struct Payload {
    #[serde(deserialize_with = "whole_seconds")]
    seconds_left: u32,
}

/// The feed serializes the countdown as a JSON number that may carry a
/// `.0` fraction. Only non-negative whole values are accepted.
fn whole_seconds<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Number::deserialize(deserializer)?;

    if let Some(n) = value.as_u64() {
        return u32::try_from(n).map_err(|_| {
            de::Error::invalid_value(Unexpected::Unsigned(n), &"seconds fitting in u32")
        });
    }

    match value.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => Ok(f as u32),
        Some(f) => Err(de::Error::invalid_value(
            Unexpected::Float(f),
            &"a non-negative whole number of seconds",
        )),
        None => Err(de::Error::custom("seconds_left is not a number")),
    }
}

impl CountdownMessage {
    /// Decode `payload.seconds_left` from a raw JSON message.
    ///
    /// Other fields are ignored. A missing field or a value that is not a
    /// non-negative whole number is an error.
    pub fn parse(raw: &str) -> Result<Self, MessageError> {
        let envelope: Envelope = serde_json::from_str(raw)?;
        Ok(Self {
            seconds_remaining: envelope.payload.seconds_left,
        })
    }
}
