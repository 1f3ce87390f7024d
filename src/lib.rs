//! lineircd - a small line-oriented IRC-style chat server.
//!
//! The binary in `main.rs` is a thin bootstrap; everything else lives here so
//! integration tests can run the gateway in-process.

pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod state;
pub mod telemetry;
