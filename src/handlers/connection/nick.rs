//! NICK command handler.

use crate::handlers::{Context, HandlerError, HandlerResult, fanout};
use lineirc_proto::{Message, NickExt};
use tracing::info;

/// Handler for NICK command.
///
/// Binds the requested nick (or reports why it can't) and confirms with a
/// `NICK` line sourced from the caller's previous identity. Peers sharing a
/// channel see the same line. Nicks that would not survive serialization are
/// rejected with `ERR_ERRONEUSNICKNAME`.
pub struct NickHandler;

impl NickHandler {
    pub async fn handle(ctx: &Context<'_>, nick: &str) -> HandlerResult {
        if !nick.is_valid_nick() {
            return Err(HandlerError::ErroneousNickname(nick.to_string()));
        }

        let change = ctx.registry.claim_nick(ctx.session, nick)?;

        let msg = Message::new("NICK", vec![change.nick.clone()]).with_prefix(change.source);
        ctx.send(msg.clone()).await?;

        if change.had_nick {
            fanout(&change.peers, &msg, Some(ctx.session.uid()));
        }

        info!(uid = %ctx.session.uid(), nick = %change.nick, "Nick set");
        Ok(())
    }
}
