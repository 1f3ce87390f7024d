//! The Registry - central shared state for the server.
//!
//! Holds every live session, the nick bindings and the channels in sharded
//! concurrent maps. There is no global lock: each map shard, each channel and
//! each session guard their own data. Identity claims (binding a nick,
//! creating a channel) additionally serialize on a small `names` mutex so the
//! "a nick never equals an existing channel name" check and the mutation it
//! protects happen atomically.
//!
//! Lock order, outermost first: `names`, map shard, channel members, session
//! channel set. No lock is held across an `.await`; callers receive snapshots
//! of recipients and deliver after every guard is released.

use crate::config::{Config, LimitsConfig};
use crate::error::HandlerError;
use crate::state::{Channel, Session, Uid, UidGenerator};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use lineirc_proto::{irc_to_lower, normalize_channel, Prefix};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// This server's identity information.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub network: String,
    pub version: String,
    pub created: DateTime<Utc>,
}

/// Result of a successful nick claim.
#[derive(Debug)]
pub struct NickChange {
    /// Source for the confirmation line: the old identity if there was one,
    /// otherwise the new one.
    pub source: Prefix,
    /// The nick now bound, as spelled by the client.
    pub nick: String,
    /// Whether the session already had a nick.
    pub had_nick: bool,
    /// Sessions sharing at least one channel with the caller, caller excluded.
    pub peers: Vec<Arc<Session>>,
}

/// Result of a successful join.
#[derive(Debug)]
pub struct JoinOutcome {
    pub channel: Arc<Channel>,
    /// `false` when the session was already a member.
    pub newly_joined: bool,
    /// Members right after the join, caller included.
    pub members: Vec<Arc<Session>>,
}

/// Result of a successful part.
#[derive(Debug)]
pub struct PartOutcome {
    /// Display name of the channel.
    pub channel: String,
    /// Members just before the part, leaver included.
    pub recipients: Vec<Arc<Session>>,
}

/// A session removed from the registry.
#[derive(Debug)]
pub struct Departure {
    pub session: Arc<Session>,
    /// Sessions that shared a channel with the departed one.
    pub peers: Vec<Arc<Session>>,
}

/// Server-wide authoritative store of sessions, nicks and channels.
pub struct Registry {
    /// All connected sessions, indexed by UID.
    sessions: DashMap<Uid, Arc<Session>>,
    /// Casefolded nick to session.
    nicks: DashMap<String, Arc<Session>>,
    /// Casefolded channel name to channel.
    channels: DashMap<String, Arc<Channel>>,
    /// Serializes nick binding and channel creation.
    names: Mutex<()>,
    uid_gen: UidGenerator,
    pub server_info: ServerInfo,
    pub motd: Vec<String>,
    pub limits: LimitsConfig,
}

impl Registry {
    pub fn new(config: &Config) -> Self {
        Self {
            sessions: DashMap::new(),
            nicks: DashMap::new(),
            channels: DashMap::new(),
            names: Mutex::new(()),
            uid_gen: UidGenerator::new(config.server.sid.clone()),
            server_info: ServerInfo {
                name: config.server.name.clone(),
                network: config.server.network.clone(),
                version: config.server.version.clone(),
                created: Utc::now(),
            },
            motd: config.motd.load_lines(),
            limits: config.limits.clone(),
        }
    }

    pub fn next_uid(&self) -> Uid {
        self.uid_gen.next()
    }

    /// Insert a freshly accepted session. Happens before any of its lines
    /// are processed.
    pub fn register_session(&self, session: Session) -> Arc<Session> {
        let session = Arc::new(session);
        self.sessions
            .insert(session.uid().to_string(), Arc::clone(&session));
        session
    }

    pub fn session(&self, uid: &str) -> Option<Arc<Session>> {
        self.sessions.get(uid).map(|r| Arc::clone(r.value()))
    }

    pub fn lookup_nick(&self, nick: &str) -> Option<Arc<Session>> {
        self.nicks
            .get(&irc_to_lower(nick))
            .map(|r| Arc::clone(r.value()))
    }

    /// Look up a channel; the marker is added if missing.
    pub fn channel(&self, name: &str) -> Option<Arc<Channel>> {
        let key = irc_to_lower(&normalize_channel(name));
        self.channels.get(&key).map(|r| Arc::clone(r.value()))
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn nick_count(&self) -> usize {
        self.nicks.len()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Bind `nick` to `session`, releasing its previous nick.
    ///
    /// Fails with `NicknameInUse` if another session holds the nick and with
    /// `ErroneousNickname` if a channel has that name. Neither failure
    /// mutates anything. A session may re-claim its own nick, e.g. to change
    /// its case.
    pub fn claim_nick(&self, session: &Arc<Session>, nick: &str) -> Result<NickChange, HandlerError> {
        let key = irc_to_lower(nick);

        let (source, had_nick) = {
            let _names = self.names.lock();

            if let Some(holder) = self.nicks.get(&key)
                && holder.uid() != session.uid()
            {
                return Err(HandlerError::NicknameInUse(nick.to_string()));
            }
            if self.channels.contains_key(&key) {
                return Err(HandlerError::ErroneousNickname(nick.to_string()));
            }

            let before = session.prefix();
            let old = session.set_nick(nick.to_string());
            if let Some(ref old) = old {
                let old_key = irc_to_lower(old);
                if old_key != key {
                    self.nicks
                        .remove_if(&old_key, |_, holder| holder.uid() == session.uid());
                }
            }
            self.nicks.insert(key, Arc::clone(session));

            match old {
                Some(_) => (before, true),
                None => (session.prefix(), false),
            }
        };

        Ok(NickChange {
            source,
            nick: nick.to_string(),
            had_nick,
            peers: self.channel_peers(session),
        })
    }

    /// Add `session` to the named channel, creating it if needed.
    ///
    /// The marker is prepended if missing. Creating a channel whose name is
    /// held as a nick fails with `NoSuchChannel`.
    pub fn join_channel(&self, session: &Arc<Session>, name: &str) -> Result<JoinOutcome, HandlerError> {
        let name = normalize_channel(name).into_owned();
        let key = irc_to_lower(&name);

        // Existing channel: add while holding the shard guard so an empty
        // channel cannot be deleted underneath us.
        if let Some(entry) = self.channels.get(&key) {
            let channel = Arc::clone(entry.value());
            let newly_joined = channel.add(session);
            drop(entry);
            return Ok(self.join_outcome(channel, newly_joined));
        }

        let _names = self.names.lock();
        if self.nicks.contains_key(&key) {
            return Err(HandlerError::NoSuchChannel(name));
        }

        let entry = self.channels.entry(key).or_insert_with(|| {
            debug!(channel = %name, "Channel created");
            Arc::new(Channel::new(name.clone()))
        });
        let channel = Arc::clone(entry.value());
        let newly_joined = channel.add(session);
        drop(entry);

        Ok(self.join_outcome(channel, newly_joined))
    }

    fn join_outcome(&self, channel: Arc<Channel>, newly_joined: bool) -> JoinOutcome {
        let members = channel.members();
        JoinOutcome {
            channel,
            newly_joined,
            members,
        }
    }

    /// Remove `session` from the named channel. Empty channels are deleted.
    pub fn part_channel(&self, session: &Arc<Session>, name: &str) -> Result<PartOutcome, HandlerError> {
        let channel = self
            .channel(name)
            .ok_or_else(|| HandlerError::NoSuchChannel(name.to_string()))?;

        let recipients = channel
            .remove(session)
            .ok_or_else(|| HandlerError::NotOnChannel(channel.name().to_string()))?;

        self.prune_channel(&channel);

        Ok(PartOutcome {
            channel: channel.name().to_string(),
            recipients,
        })
    }

    /// Remove a session and everything bound to it: its nick, and its
    /// membership in every channel. Idempotent: returns `None` if the session
    /// was already gone.
    pub fn remove_session(&self, uid: &str) -> Option<Departure> {
        let (_, session) = self.sessions.remove(uid)?;

        if let Some(nick) = session.nick() {
            let _names = self.names.lock();
            self.nicks
                .remove_if(&irc_to_lower(&nick), |_, holder| holder.uid() == uid);
        }

        let mut peers: HashMap<Uid, Arc<Session>> = HashMap::new();
        for key in session.take_channels() {
            let Some(channel) = self.channels.get(&key).map(|r| Arc::clone(r.value())) else {
                continue;
            };
            if let Some(members) = channel.remove(&session) {
                for member in members {
                    if member.uid() != uid {
                        peers.insert(member.uid().to_string(), member);
                    }
                }
            }
            self.prune_channel(&channel);
        }

        Some(Departure {
            session,
            peers: peers.into_values().collect(),
        })
    }

    /// Every session sharing a channel with `session`, each once, caller
    /// excluded.
    pub fn channel_peers(&self, session: &Session) -> Vec<Arc<Session>> {
        let mut peers: HashMap<Uid, Arc<Session>> = HashMap::new();
        for key in session.channels() {
            let Some(channel) = self.channels.get(&key).map(|r| Arc::clone(r.value())) else {
                continue;
            };
            for member in channel.members() {
                if member.uid() != session.uid() {
                    peers.insert(member.uid().to_string(), member);
                }
            }
        }
        peers.into_values().collect()
    }

    /// Delete the channel if it has no members left. The emptiness check runs
    /// under the shard write lock, which joiners of existing channels hold
    /// (shared) while adding themselves.
    fn prune_channel(&self, channel: &Channel) {
        let key = irc_to_lower(channel.name());
        if self
            .channels
            .remove_if(&key, |_, c| c.is_empty())
            .is_some()
        {
            debug!(channel = %channel.name(), "Channel destroyed");
        }
    }
}
