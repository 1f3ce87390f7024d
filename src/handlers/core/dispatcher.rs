//! Command dispatch.
//!
//! Commands are a closed set: the verb table lives in the protocol crate and
//! dispatch is an exhaustive `match` over [`Command`], so adding a verb
//! without a handler does not compile.

use super::context::Context;
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{
    JoinHandler, NickHandler, PartHandler, PingHandler, PrivmsgHandler, QuitHandler, UserHandler,
};
use lineirc_proto::{Command, Verb};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Instrument, Level, debug, span};

/// Routes parsed commands to their handlers and keeps usage counters.
pub struct Dispatcher {
    /// Usage counters, indexed by [`Verb::index`].
    command_counts: [AtomicU64; Verb::COUNT],
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            command_counts: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }

    /// How many times `verb` has been dispatched.
    pub fn command_count(&self, verb: Verb) -> u64 {
        self.command_counts[verb.index()].load(Ordering::Relaxed)
    }

    /// Get command usage statistics, most used first. Unused verbs are
    /// left out.
    pub fn get_command_stats(&self) -> Vec<(Verb, u64)> {
        let mut stats: Vec<_> = Verb::ALL
            .iter()
            .map(|verb| (*verb, self.command_count(*verb)))
            .filter(|(_, count)| *count > 0)
            .collect();

        stats.sort_by(|a, b| b.1.cmp(&a.1));
        stats
    }

    /// Handle one framed line.
    ///
    /// Blank lines are ignored. Protocol errors are answered with a numeric
    /// and swallowed; `Quit` and `Send` propagate so the connection loop can
    /// end the session.
    pub async fn dispatch(&self, ctx: &Context<'_>, line: &str) -> HandlerResult {
        let result = match Command::parse(line) {
            Ok(None) => return Ok(()),
            Ok(Some(cmd)) => {
                let verb = cmd.verb();
                self.command_counts[verb.index()].fetch_add(1, Ordering::Relaxed);

                let nick = ctx.session.nick();
                let irc_span = span!(
                    Level::DEBUG,
                    "irc.command",
                    command = %verb,
                    uid = %ctx.session.uid(),
                    source_nick = nick.as_deref(),
                );

                self.execute(ctx, cmd).instrument(irc_span).await
            }
            Err(e) => Err(HandlerError::from(e)),
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) => match e.to_irc_reply(ctx.server_name(), &ctx.nick_or_star()) {
                Some(reply) => {
                    debug!(uid = %ctx.session.uid(), error = %e, code = e.error_code(), "Command error");
                    ctx.send(reply).await
                }
                None => Err(e),
            },
        }
    }

    async fn execute(&self, ctx: &Context<'_>, cmd: Command) -> HandlerResult {
        match cmd {
            Command::Nick(nick) => NickHandler::handle(ctx, &nick).await,
            Command::User {
                username, realname, ..
            } => UserHandler::handle(ctx, username, realname).await,
            Command::Join(channel) => JoinHandler::handle(ctx, &channel).await,
            Command::Ping(token) => PingHandler::handle(ctx, &token).await,
            Command::Quit(reason) => QuitHandler::handle(ctx, reason).await,
            Command::Part { channel, reason } => PartHandler::handle(ctx, &channel, reason).await,
            Command::Privmsg { target, text } => PrivmsgHandler::handle(ctx, &target, &text).await,
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{drain, harness};
    use lineirc_proto::Verb;

    #[tokio::test]
    async fn blank_line_is_ignored() {
        let h = harness();
        let (s, mut rx) = h.connect();

        h.run(&s, "").await.unwrap();
        h.run(&s, "   ").await.unwrap();
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn unknown_verb_gets_one_421() {
        let h = harness();
        let (s, mut rx) = h.connect();

        h.run(&s, "FOO bar baz").await.unwrap();
        assert_eq!(
            drain(&mut rx),
            vec![":irc.localhost 421 * FOO :Unknown command"]
        );
        assert!(!s.is_closed());
        assert_eq!(h.registry.session_count(), 1);
    }

    #[tokio::test]
    async fn verbs_are_case_sensitive() {
        let h = harness();
        let (s, mut rx) = h.connect();

        h.run(&s, "nick alice").await.unwrap();
        assert_eq!(
            drain(&mut rx),
            vec![":irc.localhost 421 * nick :Unknown command"]
        );
        assert_eq!(s.nick(), None);
    }

    #[tokio::test]
    async fn counts_dispatched_commands() {
        let h = harness();
        let (s, _rx) = h.connect();

        h.run(&s, "PING a").await.unwrap();
        h.run(&s, "PING b").await.unwrap();
        h.run(&s, "NICK alice").await.unwrap();
        h.run(&s, "FOO").await.unwrap();

        assert_eq!(h.dispatcher.command_count(Verb::Ping), 2);
        assert_eq!(h.dispatcher.command_count(Verb::Nick), 1);
        assert_eq!(h.dispatcher.command_count(Verb::Join), 0);
        assert_eq!(
            h.dispatcher.get_command_stats(),
            vec![(Verb::Ping, 2), (Verb::Nick, 1)]
        );
    }
}
