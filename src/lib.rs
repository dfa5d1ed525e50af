pub mod app;
pub mod config;
pub mod logging;
pub mod monitor;
pub mod resolver;
pub mod utils;
