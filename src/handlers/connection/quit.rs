//! QUIT handler.

use crate::handlers::{Context, HandlerError, HandlerResult};
use lineirc_proto::Message;
use tracing::info;

/// Handler for QUIT command.
///
/// Sends the closing `ERROR` line and returns [`HandlerError::Quit`]; the
/// connection loop removes the session and tells its channel peers.
pub struct QuitHandler;

impl QuitHandler {
    pub async fn handle(ctx: &Context<'_>, reason: Option<String>) -> HandlerResult {
        let quit_msg = match reason {
            Some(reason) => format!("Quit: {}", reason),
            None => "Client Quit".to_string(),
        };

        info!(
            uid = %ctx.session.uid(),
            nick = ?ctx.session.nick(),
            message = %quit_msg,
            "Client quit"
        );

        ctx.send(Message::error(format!(
            "Closing Link: {} ({})",
            ctx.session.host(),
            quit_msg
        )))
        .await?;

        // Signal quit by returning Quit error that connection loop will handle
        Err(HandlerError::Quit(Some(quit_msg)))
    }
}
