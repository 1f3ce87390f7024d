//! JOIN handler.

use crate::handlers::{Context, HandlerResult, fanout, server_reply};
use lineirc_proto::{Message, Response};
use tracing::info;

/// Handler for JOIN command.
///
/// Only the first channel token is honoured. On success the caller gets the
/// JOIN echo and RPL_TOPIC (the topic is the channel name), and every member,
/// caller included, gets a fresh RPL_NAMREPLY / RPL_ENDOFNAMES pair. The
/// caller's own replies wait for queue space; other members are fanned out to.
pub struct JoinHandler;

impl JoinHandler {
    pub async fn handle(ctx: &Context<'_>, channel: &str) -> HandlerResult {
        let outcome = ctx.registry.join_channel(ctx.session, channel)?;
        let name = outcome.channel.name().to_string();
        let server_name = ctx.server_name();

        let join = Message::new("JOIN", vec![name.clone()]).with_prefix(ctx.session.prefix());
        ctx.send(join.clone()).await?;
        if outcome.newly_joined {
            fanout(&outcome.members, &join, Some(ctx.session.uid()));
            info!(uid = %ctx.session.uid(), channel = %name, "Joined channel");
        }

        ctx.send_reply(
            Response::RPL_TOPIC,
            vec![ctx.nick_or_star(), name.clone(), name.clone()],
        )
        .await?;

        let nicks = outcome.channel.member_nicks().join(" ");

        ctx.send_reply(
            Response::RPL_NAMREPLY,
            vec![ctx.nick_or_star(), "=".to_string(), name.clone(), nicks.clone()],
        )
        .await?;
        ctx.send_reply(
            Response::RPL_ENDOFNAMES,
            vec![ctx.nick_or_star(), name.clone(), "End of /NAMES list".to_string()],
        )
        .await?;

        let caller = ctx.session.uid();
        for member in outcome.members.iter().filter(|m| m.uid() != caller) {
            let target = member.nick_or_star();
            member.deliver(server_reply(
                server_name,
                Response::RPL_NAMREPLY,
                vec![target.clone(), "=".to_string(), name.clone(), nicks.clone()],
            ));
            member.deliver(server_reply(
                server_name,
                Response::RPL_ENDOFNAMES,
                vec![target, name.clone(), "End of /NAMES list".to_string()],
            ));
        }

        Ok(())
    }
}
