//! Integration test common infrastructure.
//!
//! Provides utilities for running an in-process test server, creating test
//! clients, and asserting on line flows.

pub mod client;
pub mod server;

#[allow(unused_imports)]
pub use client::{TestClient, command_of};
#[allow(unused_imports)]
pub use server::TestServer;
