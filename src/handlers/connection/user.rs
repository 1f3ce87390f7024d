//! USER command handler.

use super::welcome::send_welcome_burst;
use crate::handlers::{Context, HandlerResult};
use tracing::info;

/// Handler for USER command.
///
/// Records the username and real name, then sends the welcome burst. There
/// is no NICK+USER gating: USER may come first, and repeating it resends the
/// burst.
pub struct UserHandler;

impl UserHandler {
    pub async fn handle(ctx: &Context<'_>, username: String, realname: String) -> HandlerResult {
        info!(uid = %ctx.session.uid(), user = %username, "User info set");
        ctx.session.set_user(username, realname);
        send_welcome_burst(ctx).await
    }
}
