//! Outbound message construction and serialization.

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

use crate::response::Response;

/// The source of a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prefix {
    /// A server name, e.g. `irc.example.net`.
    ServerName(String),
    /// A user: nickname, username and hostname (`nick!user@host`).
    Nickname(String, String, String),
}

impl Display for Prefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::ServerName(name) => f.write_str(&strip_line_breaks(name)),
            Prefix::Nickname(nick, user, host) => write!(
                f,
                "{}!{}@{}",
                strip_line_breaks(nick),
                strip_line_breaks(user),
                strip_line_breaks(host)
            ),
        }
    }
}

/// A single protocol line sent from the server.
///
/// Serializes as `[:prefix ]COMMAND[ param]*`. The last parameter is written
/// as a trailing parameter (`:text`) whenever it is empty, contains a space or
/// starts with a colon. The terminator is not part of the serialized form; the
/// [`LineCodec`](crate::line::LineCodec) appends it.
///
/// A message always serializes to exactly one line: CR, LF and NUL are dropped
/// from every parameter, and a middle parameter that cannot be written as one
/// (empty, containing a space, or starting with a colon) is written as `*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Optional message source.
    pub prefix: Option<Prefix>,
    /// Command word or three-digit numeric.
    pub command: String,
    /// Parameters, the last of which may be a trailing parameter.
    pub params: Vec<String>,
}

impl Message {
    /// Create a message from a command word and parameters.
    pub fn new(command: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            prefix: None,
            command: command.into(),
            params,
        }
    }

    /// Create a numeric reply. The first parameter is conventionally the
    /// target nickname (or `*`).
    pub fn response(response: Response, params: Vec<String>) -> Self {
        Self::new(format!("{:03}", response.code()), params)
    }

    /// `PONG <server> :<token>`
    pub fn pong(server: &str, token: &str) -> Self {
        Self::new("PONG", vec![server.to_string(), token.to_string()])
    }

    /// `ERROR :<text>`
    pub fn error(text: impl Into<String>) -> Self {
        Self::new("ERROR", vec![text.into()])
    }

    /// `NOTICE <target> :<text>`
    pub fn notice(target: &str, text: impl Into<String>) -> Self {
        Self::new("NOTICE", vec![target.to_string(), text.into()])
    }

    /// Attach a source prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }
}

fn needs_trailing(param: &str) -> bool {
    param.is_empty() || param.contains(' ') || param.starts_with(':')
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\r' | '\n' | '\0')
}

fn strip_line_breaks(param: &str) -> Cow<'_, str> {
    if param.contains(is_line_break) {
        Cow::Owned(param.replace(is_line_break, ""))
    } else {
        Cow::Borrowed(param)
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(ref prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }

        f.write_str(&self.command)?;

        if let Some((last, middle)) = self.params.split_last() {
            for param in middle {
                let param = strip_line_breaks(param);
                if needs_trailing(&param) {
                    f.write_str(" *")?;
                } else {
                    write!(f, " {}", param)?;
                }
            }
            let last = strip_line_breaks(last);
            if needs_trailing(&last) {
                write!(f, " :{}", last)?;
            } else {
                write!(f, " {}", last)?;
            }
        }

        Ok(())
    }
}
