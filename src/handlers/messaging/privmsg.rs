//! PRIVMSG handler.

use crate::error::HandlerError;
use crate::handlers::{Context, HandlerResult, fanout};
use lineirc_proto::{ChannelExt, Message};
use tracing::trace;

/// Handler for PRIVMSG command.
///
/// A `#` target delivers to every other member of that channel, provided the
/// sender is a member. Any other target is looked up as a nick.
pub struct PrivmsgHandler;

impl PrivmsgHandler {
    pub async fn handle(ctx: &Context<'_>, target: &str, text: &str) -> HandlerResult {
        let prefix = ctx.session.prefix();

        if target.is_channel_name() {
            let channel = ctx
                .registry
                .channel(target)
                .ok_or_else(|| HandlerError::NoSuchNick(target.to_string()))?;
            if !channel.contains(ctx.session.uid()) {
                return Err(HandlerError::CannotSendToChan(channel.name().to_string()));
            }

            let msg = Message::new("PRIVMSG", vec![channel.name().to_string(), text.to_string()])
                .with_prefix(prefix);
            let delivered = fanout(&channel.members(), &msg, Some(ctx.session.uid()));
            trace!(channel = %channel.name(), delivered, "Channel message");
        } else {
            let recipient = ctx
                .registry
                .lookup_nick(target)
                .ok_or_else(|| HandlerError::NoSuchNick(target.to_string()))?;

            let msg = Message::new("PRIVMSG", vec![recipient.nick_or_star(), text.to_string()])
                .with_prefix(prefix);
            recipient.deliver(msg);
            trace!(to = %recipient.uid(), "Private message");
        }

        Ok(())
    }
}
