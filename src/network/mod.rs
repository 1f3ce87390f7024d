//! Network layer: the listener and the per-client connection task.

mod connection;
mod gateway;

pub use connection::Connection;
pub use gateway::Gateway;
