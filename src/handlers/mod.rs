//! IRC command handlers.
//!
//! The [`Dispatcher`] turns a framed line into a typed
//! [`Command`](lineirc_proto::Command) and runs the matching handler against
//! the shared [`Registry`](crate::state::Registry). Failures that the client
//! should hear about come back as [`HandlerError`] and are turned into numeric
//! replies in one place.

mod channel;
mod connection;
mod core;
mod helpers;
mod messaging;
#[cfg(test)]
mod test_support;

pub use self::core::{Context, Dispatcher};
pub use channel::{JoinHandler, PartHandler};
pub use connection::{NickHandler, PingHandler, QuitHandler, UserHandler, send_welcome_burst};
pub use helpers::{fanout, server_notice, server_reply};
pub use messaging::PrivmsgHandler;

pub use crate::error::{HandlerError, HandlerResult};
