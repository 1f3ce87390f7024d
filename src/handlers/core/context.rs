//! Command handler context.

use crate::error::HandlerResult;
use crate::handlers::helpers::server_reply;
use crate::state::{Registry, Session};
use lineirc_proto::{Message, Response};
use std::sync::Arc;

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The session that sent the command.
    pub session: &'a Arc<Session>,
    /// Shared server state.
    pub registry: &'a Registry,
}

impl<'a> Context<'a> {
    pub fn new(session: &'a Arc<Session>, registry: &'a Registry) -> Self {
        Self { session, registry }
    }

    #[inline]
    pub fn server_name(&self) -> &str {
        &self.registry.server_info.name
    }

    /// Reply target for numerics: the caller's nick, or `*`.
    #[inline]
    pub fn nick_or_star(&self) -> String {
        self.session.nick_or_star()
    }

    /// Queue a line for the caller.
    pub async fn send(&self, msg: Message) -> HandlerResult {
        self.session.send(msg).await?;
        Ok(())
    }

    /// Build and send a server reply in one call.
    #[inline]
    pub async fn send_reply(&self, response: Response, params: Vec<String>) -> HandlerResult {
        let reply = server_reply(self.server_name(), response, params);
        self.send(reply).await
    }
}
