//! Unified error handling for lineircd.
//!
//! Handler failures carry enough context to build the numeric reply the
//! client sees; `to_irc_reply` is the single place those replies are shaped.

use lineirc_proto::{Message, ParseError, Prefix, Response};
use thiserror::Error;
use tokio::sync::mpsc;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
#[allow(clippy::large_enum_variant)] // Send variant is large but rarely constructed
pub enum HandlerError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("erroneous nickname: {0}")]
    ErroneousNickname(String),

    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    #[error("not on channel: {0}")]
    NotOnChannel(String),

    #[error("no such nick/channel: {0}")]
    NoSuchNick(String),

    #[error("cannot send to channel: {0}")]
    CannotSendToChan(String),

    #[error("send error: {0}")]
    Send(#[from] mpsc::error::SendError<Message>),

    #[error("client quit: {0:?}")]
    Quit(Option<String>),
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(ParseError::UnknownCommand(_)) => "unknown_command",
            Self::Parse(ParseError::NoNicknameGiven) => "no_nickname_given",
            Self::Parse(ParseError::NeedMoreParams(_)) => "need_more_params",
            Self::Parse(ParseError::NoOrigin) => "no_origin",
            Self::Parse(ParseError::NoRecipient(_)) => "no_recipient",
            Self::Parse(ParseError::NoTextToSend) => "no_text_to_send",
            Self::NicknameInUse(_) => "nickname_in_use",
            Self::ErroneousNickname(_) => "erroneous_nickname",
            Self::NoSuchChannel(_) => "no_such_channel",
            Self::NotOnChannel(_) => "not_on_channel",
            Self::NoSuchNick(_) => "no_such_nick",
            Self::CannotSendToChan(_) => "cannot_send_to_chan",
            Self::Send(_) => "send_error",
            Self::Quit(_) => "quit",
        }
    }

    /// Convert to an IRC error reply message.
    ///
    /// Returns `None` for errors that don't warrant a client-visible reply
    /// (send failures, quit).
    pub fn to_irc_reply(&self, server_name: &str, nick: &str) -> Option<Message> {
        let (response, args): (Response, Vec<String>) = match self {
            Self::Parse(e) => {
                let args = match e {
                    ParseError::UnknownCommand(cmd) => vec![cmd.clone(), "Unknown command".into()],
                    ParseError::NoNicknameGiven => vec!["No nickname given".into()],
                    ParseError::NeedMoreParams(verb) => {
                        vec![verb.to_string(), "Not enough parameters".into()]
                    }
                    ParseError::NoOrigin => vec!["No origin specified".into()],
                    ParseError::NoRecipient(verb) => {
                        vec![format!("No recipient given ({})", verb)]
                    }
                    ParseError::NoTextToSend => vec!["No text to send".into()],
                };
                (e.response(), args)
            }
            Self::NicknameInUse(bad_nick) => (
                Response::ERR_NICKNAMEINUSE,
                vec![bad_nick.clone(), "Nickname is already in use".into()],
            ),
            Self::ErroneousNickname(bad_nick) => (
                Response::ERR_ERRONEUSNICKNAME,
                vec![bad_nick.clone(), "Erroneous nickname".into()],
            ),
            Self::NoSuchChannel(chan) => (
                Response::ERR_NOSUCHCHANNEL,
                vec![chan.clone(), "No such channel".into()],
            ),
            Self::NotOnChannel(chan) => (
                Response::ERR_NOTONCHANNEL,
                vec![chan.clone(), "You're not on that channel".into()],
            ),
            Self::NoSuchNick(target) => (
                Response::ERR_NOSUCHNICK,
                vec![target.clone(), "No such nick/channel".into()],
            ),
            Self::CannotSendToChan(chan) => (
                Response::ERR_CANNOTSENDTOCHAN,
                vec![chan.clone(), "Cannot send to channel".into()],
            ),

            // These errors don't get client-visible replies
            Self::Send(_) => return None,
            Self::Quit(_) => return None,
        };

        let mut params = Vec::with_capacity(args.len() + 1);
        params.push(nick.to_string());
        params.extend(args);

        Some(
            Message::response(response, params)
                .with_prefix(Prefix::ServerName(server_name.to_string())),
        )
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;
