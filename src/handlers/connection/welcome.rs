//! Welcome burst (connection notice, 001-004, MOTD).

use crate::handlers::{Context, HandlerResult, server_notice};
use lineirc_proto::Response;

/// Send the welcome burst.
pub async fn send_welcome_burst(ctx: &Context<'_>) -> HandlerResult {
    let info = &ctx.registry.server_info;
    let server_name = &info.name;
    let nick = ctx.nick_or_star();

    ctx.send(server_notice(
        server_name,
        "AUTH",
        format!("*** You connected on port {}", ctx.session.local_port()),
    ))
    .await?;

    ctx.send_reply(
        Response::RPL_WELCOME,
        vec![
            nick.clone(),
            format!(
                "Welcome to the {} IRC Network {}",
                info.network,
                ctx.session.prefix()
            ),
        ],
    )
    .await?;

    ctx.send_reply(
        Response::RPL_YOURHOST,
        vec![
            nick.clone(),
            format!(
                "Your host is {}, running version {}",
                server_name, info.version
            ),
        ],
    )
    .await?;

    ctx.send_reply(
        Response::RPL_CREATED,
        vec![
            nick.clone(),
            format!(
                "This server was created {}",
                info.created.format("%a %b %d %Y at %H:%M:%S UTC")
            ),
        ],
    )
    .await?;

    ctx.send_reply(
        Response::RPL_MYINFO,
        vec![
            nick.clone(),
            server_name.clone(),
            info.version.clone(),
            "o".to_string(),
            "o".to_string(),
        ],
    )
    .await?;

    ctx.send_reply(
        Response::RPL_MOTDSTART,
        vec![
            nick.clone(),
            format!("- {} Message of the day - ", server_name),
        ],
    )
    .await?;

    for line in &ctx.registry.motd {
        ctx.send_reply(Response::RPL_MOTD, vec![nick.clone(), format!("- {}", line)])
            .await?;
    }

    ctx.send_reply(
        Response::RPL_ENDOFMOTD,
        vec![nick, "End of /MOTD command.".to_string()],
    )
    .await
}
