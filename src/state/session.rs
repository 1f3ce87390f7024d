//! Per-connection session state.
//!
//! A `Session` is shared (`Arc`) between the connection task, the registry and
//! every channel it has joined. Outbound lines go through a bounded queue that
//! the connection's writer task drains into the socket; nothing else writes to
//! the transport.

use crate::state::Uid;
use lineirc_proto::{irc_to_lower, Message, Prefix};
use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;
use std::net::SocketAddr;
use tokio::sync::mpsc::{self, error::SendError, error::TrySendError};
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Mutable identity fields, set by NICK and USER.
#[derive(Debug, Default, Clone)]
pub struct SessionInfo {
    /// Current nick, `None` until NICK succeeds.
    pub nick: Option<String>,
    /// Username from USER.
    pub username: Option<String>,
    /// Real name from USER.
    pub realname: Option<String>,
}

/// Server-side state for one connected client.
pub struct Session {
    uid: Uid,
    addr: SocketAddr,
    host: String,
    local_port: u16,
    outbound: mpsc::Sender<Message>,
    info: RwLock<SessionInfo>,
    /// Casefolded names of joined channels. Kept in step with the channel
    /// member sets by the registry.
    channels: Mutex<HashSet<String>>,
    close_reason: Mutex<Option<String>>,
    shutdown: CancellationToken,
}

impl Session {
    /// Create a session and the receiving end of its outbound queue.
    pub fn new(
        uid: Uid,
        addr: SocketAddr,
        local_port: u16,
        sendq_len: usize,
    ) -> (Self, mpsc::Receiver<Message>) {
        let (outbound, rx) = mpsc::channel(sendq_len.max(1));
        let session = Self {
            uid,
            addr,
            host: addr.ip().to_string(),
            local_port,
            outbound,
            info: RwLock::new(SessionInfo::default()),
            channels: Mutex::new(HashSet::new()),
            close_reason: Mutex::new(None),
            shutdown: CancellationToken::new(),
        };
        (session, rx)
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn local_port(&self) -> u16 {
        self.local_port
    }

    pub fn nick(&self) -> Option<String> {
        self.info.read().nick.clone()
    }

    /// Current nick, or `*` before NICK succeeds (the reply target for numerics).
    pub fn nick_or_star(&self) -> String {
        self.nick().unwrap_or_else(|| "*".to_string())
    }

    pub fn info(&self) -> SessionInfo {
        self.info.read().clone()
    }

    /// `nick!~user@host`. Falls back to `*` for a missing nick and to the nick
    /// for a missing username.
    pub fn prefix(&self) -> Prefix {
        let info = self.info.read();
        let nick = info.nick.clone().unwrap_or_else(|| "*".to_string());
        let user = info.username.clone().unwrap_or_else(|| nick.clone());
        Prefix::Nickname(nick, format!("~{}", user), self.host.clone())
    }

    /// Replace the nick, returning the previous one. Only the registry calls
    /// this, while holding the identity guard.
    pub(crate) fn set_nick(&self, nick: String) -> Option<String> {
        self.info.write().nick.replace(nick)
    }

    pub fn set_user(&self, username: String, realname: String) {
        let mut info = self.info.write();
        info.username = Some(username);
        info.realname = Some(realname);
    }

    /// Queue a line for this session, waiting for room. Used for replies to
    /// the session's own commands.
    pub async fn send(&self, msg: Message) -> Result<(), SendError<Message>> {
        self.outbound.send(msg).await
    }

    /// Queue a line without waiting. Used for fan-out to other sessions: a
    /// full queue marks the session as a slow consumer and closes it.
    ///
    /// Returns whether the line was queued.
    pub fn deliver(&self, msg: Message) -> bool {
        match self.outbound.try_send(msg) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!(uid = %self.uid, addr = %self.addr, "SendQ exceeded, closing session");
                self.close("SendQ exceeded");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// Ask the connection task to end. The first reason given wins.
    pub fn close(&self, reason: &str) {
        {
            let mut slot = self.close_reason.lock();
            if slot.is_none() {
                *slot = Some(reason.to_string());
            }
        }
        self.shutdown.cancel();
    }

    pub fn close_reason(&self) -> Option<String> {
        self.close_reason.lock().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Resolves once [`Session::close`] has been called.
    pub async fn closed(&self) {
        self.shutdown.cancelled().await
    }

    pub(crate) fn record_join(&self, channel: &str) -> bool {
        self.channels.lock().insert(irc_to_lower(channel))
    }

    pub(crate) fn record_part(&self, channel: &str) -> bool {
        self.channels.lock().remove(&irc_to_lower(channel))
    }

    pub(crate) fn take_channels(&self) -> Vec<String> {
        self.channels.lock().drain().collect()
    }

    /// Casefolded names of the channels this session is on.
    pub fn channels(&self) -> Vec<String> {
        self.channels.lock().iter().cloned().collect()
    }

    pub fn is_on(&self, channel: &str) -> bool {
        self.channels.lock().contains(&irc_to_lower(channel))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("uid", &self.uid)
            .field("addr", &self.addr)
            .field("nick", &self.nick())
            .finish()
    }
}
