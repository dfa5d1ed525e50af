//! Stream monitor for the countdown feed
//!
//! Opens one WebSocket to the resolved endpoint and turns each countdown tick
//! into a colored console line. Messages are handled sequentially on the
//! calling thread. When the connection closes monitoring ends; nothing
//! reconnects.

mod connection;
pub mod display;
mod handler;
mod message;


pub use connection::{ConnectionState, Monitor, MonitorSummary};
pub use display::{category_of, Category, Display};
pub use handler::{CountdownHandler, StreamHandler};
pub use message::{CountdownMessage, MessageError};
