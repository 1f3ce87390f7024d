use thiserror::Error;

use super::tokenize::{tokenize, trailing};
use super::types::{Command, Verb};
use crate::response::Response;

/// Why a line could not become a [`Command`].
///
/// Every variant corresponds to exactly one numeric reply; see
/// [`ParseError::response`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The verb is not in the command table.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// `NICK` without a nickname.
    #[error("no nickname given")]
    NoNicknameGiven,
    /// A required parameter is missing.
    #[error("not enough parameters for {0}")]
    NeedMoreParams(Verb),
    /// `PING` without a token.
    #[error("no origin specified")]
    NoOrigin,
    /// A message command without a target.
    #[error("no recipient given ({0})")]
    NoRecipient(Verb),
    /// A message command without text.
    #[error("no text to send")]
    NoTextToSend,
}

impl ParseError {
    /// The numeric reply reporting this error.
    pub fn response(&self) -> Response {
        match self {
            ParseError::UnknownCommand(_) => Response::ERR_UNKNOWNCOMMAND,
            ParseError::NoNicknameGiven => Response::ERR_NONICKNAMEGIVEN,
            ParseError::NeedMoreParams(_) => Response::ERR_NEEDMOREPARAMS,
            ParseError::NoOrigin => Response::ERR_NOORIGIN,
            ParseError::NoRecipient(_) => Response::ERR_NORECIPIENT,
            ParseError::NoTextToSend => Response::ERR_NOTEXTTOSEND,
        }
    }
}

/// First parameter, if present and non-empty.
fn required<'a>(params: &[&'a str]) -> Option<&'a str> {
    params.first().copied().filter(|p| !p.is_empty())
}

impl Command {
    /// Parse a complete line.
    ///
    /// Returns `Ok(None)` for a blank line.
    #[must_use = "command parsing result should be handled"]
    pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        let Some(raw) = tokenize(line) else {
            return Ok(None);
        };

        let verb =
            Verb::lookup(raw.verb).ok_or_else(|| ParseError::UnknownCommand(raw.verb.to_owned()))?;

        Command::from_parts(verb, &raw.params).map(Some)
    }

    /// Build a command from a resolved verb and its parameter tokens,
    /// validating arity.
    pub fn from_parts(verb: Verb, params: &[&str]) -> Result<Command, ParseError> {
        let cmd = match verb {
            Verb::Nick => {
                let nick = required(params).ok_or(ParseError::NoNicknameGiven)?;
                Command::Nick(nick.to_owned())
            }
            Verb::User => {
                if params.len() < 4 || params[0].is_empty() {
                    return Err(ParseError::NeedMoreParams(verb));
                }
                Command::User {
                    username: params[0].to_owned(),
                    mode: params[1].to_owned(),
                    unused: params[2].to_owned(),
                    realname: trailing(&params[3..]),
                }
            }
            Verb::Join => {
                let channel = required(params).ok_or(ParseError::NeedMoreParams(verb))?;
                Command::Join(channel.to_owned())
            }
            Verb::Ping => {
                if required(params).is_none() {
                    return Err(ParseError::NoOrigin);
                }
                Command::Ping(trailing(params))
            }
            Verb::Quit => {
                if params.is_empty() {
                    Command::Quit(None)
                } else {
                    Command::Quit(Some(trailing(params)))
                }
            }
            Verb::Part => {
                let channel = required(params).ok_or(ParseError::NeedMoreParams(verb))?;
                let reason = if params.len() > 1 {
                    Some(trailing(&params[1..]))
                } else {
                    None
                };
                Command::Part {
                    channel: channel.to_owned(),
                    reason,
                }
            }
            Verb::Privmsg => {
                let target = required(params).ok_or(ParseError::NoRecipient(verb))?;
                let text = trailing(&params[1..]);
                if text.is_empty() {
                    return Err(ParseError::NoTextToSend);
                }
                Command::Privmsg {
                    target: target.to_owned(),
                    text,
                }
            }
        };

        Ok(cmd)
    }
}
