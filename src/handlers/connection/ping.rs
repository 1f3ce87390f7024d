//! PING handler.

use crate::handlers::{Context, HandlerResult};
use lineirc_proto::{Message, Prefix};

/// Handler for PING command: echo the token back in a PONG.
pub struct PingHandler;

impl PingHandler {
    pub async fn handle(ctx: &Context<'_>, token: &str) -> HandlerResult {
        let server = ctx.server_name();
        let pong = Message::pong(server, token).with_prefix(Prefix::ServerName(server.to_string()));
        ctx.send(pong).await
    }
}
