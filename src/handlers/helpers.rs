//! Helper functions for IRC command handlers.

use crate::state::Session;
use lineirc_proto::{Message, Prefix, Response};
use std::sync::Arc;

/// Helper to create a server reply message (numeric response).
pub fn server_reply(server_name: &str, response: Response, params: Vec<String>) -> Message {
    Message::response(response, params).with_prefix(Prefix::ServerName(server_name.to_string()))
}

/// Helper to create a server NOTICE message.
pub fn server_notice<T: Into<String>>(server_name: &str, target: &str, text: T) -> Message {
    Message::notice(target, text).with_prefix(Prefix::ServerName(server_name.to_string()))
}

/// Queue `msg` for every recipient except `skip_uid`, without waiting.
///
/// Slow recipients are closed by [`Session::deliver`]; the others are not
/// held up. Returns how many recipients accepted the line.
pub fn fanout(recipients: &[Arc<Session>], msg: &Message, skip_uid: Option<&str>) -> usize {
    recipients
        .iter()
        .filter(|s| Some(s.uid()) != skip_uid)
        .filter(|s| s.deliver(msg.clone()))
        .count()
}
