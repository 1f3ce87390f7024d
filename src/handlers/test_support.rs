//! In-memory sessions for handler tests.

use crate::config::Config;
use crate::handlers::{Context, Dispatcher, HandlerResult};
use crate::state::{Registry, Session};
use lineirc_proto::Message;
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct Harness {
    pub registry: Registry,
    pub dispatcher: Dispatcher,
}

pub fn harness() -> Harness {
    harness_with(|_| {})
}

/// Harness over a tweaked default config.
pub fn harness_with(configure: impl FnOnce(&mut Config)) -> Harness {
    let mut config = Config::default();
    configure(&mut config);
    Harness {
        registry: Registry::new(&config),
        dispatcher: Dispatcher::new(),
    }
}

impl Harness {
    pub fn connect(&self) -> (Arc<Session>, mpsc::Receiver<Message>) {
        let (session, rx) = Session::new(
            self.registry.next_uid(),
            "127.0.0.1:50000".parse().unwrap(),
            6667,
            self.registry.limits.sendq_len,
        );
        (self.registry.register_session(session), rx)
    }

    pub async fn run(&self, session: &Arc<Session>, line: &str) -> HandlerResult {
        let ctx = Context::new(session, &self.registry);
        self.dispatcher.dispatch(&ctx, line).await
    }
}

/// Everything queued so far, serialized without the terminator.
pub fn drain(rx: &mut mpsc::Receiver<Message>) -> Vec<String> {
    let mut lines = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        lines.push(msg.to_string());
    }
    lines
}
