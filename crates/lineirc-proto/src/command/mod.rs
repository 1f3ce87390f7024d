//! Inbound command tokenizing and parsing.
//!
//! A client line is split on single spaces into a verb and its parameters.
//! The verb resolves, case-sensitively, to one of a closed set of [`Verb`]s;
//! [`Command::parse`] then checks the per-verb arity and yields a typed
//! [`Command`].

mod parse;
mod tokenize;
mod types;

pub use parse::ParseError;
pub use tokenize::{tokenize, trailing, RawLine};
pub use types::{Command, Verb};
