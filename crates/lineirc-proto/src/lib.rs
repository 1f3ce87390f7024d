//! # lineirc-proto
//!
//! Protocol pieces for a line-oriented IRC-style chat server:
//!
//! - [`line::LineCodec`]: CR LF line framing for tokio (`FramedRead`/`FramedWrite`)
//! - [`Response`]: the numeric reply codes the server emits
//! - [`Message`] and [`Prefix`]: outbound line construction and serialization
//! - [`Command`] and [`Verb`]: the closed set of client commands, with
//!   per-command arity validation
//! - [`casemap`]: RFC 1459 case-insensitive identifier comparison
//! - [`nick`]: nickname validation
//!
//! ## Quick Start
//!
//! ```rust
//! use lineirc_proto::{Command, Message, Prefix, Response};
//!
//! let cmd = Command::parse("NICK alice").unwrap().unwrap();
//! assert_eq!(cmd, Command::Nick("alice".to_string()));
//!
//! let reply = Message::response(Response::RPL_WELCOME, vec![
//!     "alice".to_string(),
//!     "Welcome to LineNet".to_string(),
//! ])
//! .with_prefix(Prefix::ServerName("irc.example.net".to_string()));
//! assert_eq!(reply.to_string(), ":irc.example.net 001 alice :Welcome to LineNet");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod chan;
pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;
pub mod nick;
pub mod response;

pub use self::casemap::irc_to_lower;
pub use self::chan::{normalize_channel, ChannelExt, CHANNEL_PREFIX};
pub use self::command::{tokenize, trailing, Command, ParseError, RawLine, Verb};
pub use self::error::ProtocolError;
#[cfg(feature = "tokio")]
pub use self::line::LineCodec;
pub use self::message::{Message, Prefix};
pub use self::nick::{NickExt, NICK_MAX_LEN};
pub use self::response::Response;
