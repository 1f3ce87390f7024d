//! PART handler.

use crate::handlers::{Context, HandlerResult, fanout};
use lineirc_proto::Message;
use tracing::info;

/// Handler for PART command.
///
/// Every member, the leaver included, sees the PART line. The channel is
/// deleted once its last member leaves.
pub struct PartHandler;

impl PartHandler {
    pub async fn handle(ctx: &Context<'_>, channel: &str, reason: Option<String>) -> HandlerResult {
        let prefix = ctx.session.prefix();
        let outcome = ctx.registry.part_channel(ctx.session, channel)?;

        let mut params = vec![outcome.channel.clone()];
        params.extend(reason);
        let part = Message::new("PART", params).with_prefix(prefix);

        ctx.send(part.clone()).await?;
        fanout(&outcome.recipients, &part, Some(ctx.session.uid()));

        info!(uid = %ctx.session.uid(), channel = %outcome.channel, "Left channel");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{drain, harness};

    #[tokio::test]
    async fn part_notifies_members_and_leaver() {
        let h = harness();
        let (alice, mut a_rx) = h.connect();
        let (bob, mut b_rx) = h.connect();
        h.run(&alice, "NICK alice").await.unwrap();
        h.run(&alice, "JOIN #rust").await.unwrap();
        h.run(&bob, "JOIN #rust").await.unwrap();
        drain(&mut a_rx);
        drain(&mut b_rx);

        h.run(&alice, "PART #rust :see you").await.unwrap();
        let expected = ":alice!~alice@127.0.0.1 PART #rust :see you";
        assert_eq!(drain(&mut a_rx), vec![expected]);
        assert_eq!(drain(&mut b_rx), vec![expected]);
        assert!(!alice.is_on("#rust"));
    }

    #[tokio::test]
    async fn part_errors() {
        let h = harness();
        let (alice, mut a_rx) = h.connect();
        let (bob, _b_rx) = h.connect();

        h.run(&alice, "PART").await.unwrap();
        h.run(&alice, "PART #nowhere").await.unwrap();
        h.run(&bob, "JOIN #rust").await.unwrap();
        h.run(&alice, "PART #rust").await.unwrap();

        assert_eq!(
            drain(&mut a_rx),
            vec![
                ":irc.localhost 461 * PART :Not enough parameters",
                ":irc.localhost 403 * #nowhere :No such channel",
                ":irc.localhost 442 * #rust :You're not on that channel",
            ]
        );
    }

    #[tokio::test]
    async fn last_part_deletes_channel() {
        let h = harness();
        let (alice, _rx) = h.connect();
        h.run(&alice, "JOIN #solo").await.unwrap();
        h.run(&alice, "PART #solo").await.unwrap();
        assert_eq!(h.registry.channel_count(), 0);
    }
}
