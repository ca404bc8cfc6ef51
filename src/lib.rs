//! Client for an MCP radio-automation server: pick a weak CQ station from the
//! current slice snapshot and ask the server to work it.

pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod model;
pub mod runner;
pub mod selector;
pub mod transport;
