//! Integration tests for button-monitor
//!
//! These drive the public API against loopback page and feed servers.

pub mod helpers;
pub mod resolve;
