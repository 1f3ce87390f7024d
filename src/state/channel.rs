//! Channel membership.

use crate::state::{Session, Uid};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// A named set of member sessions.
///
/// Membership is only mutated through the [`Registry`](crate::state::Registry),
/// which keeps each member's own channel set in step while holding this
/// channel's write lock.
pub struct Channel {
    name: String,
    members: RwLock<HashMap<Uid, Arc<Session>>>,
}

impl Channel {
    /// `name` must already carry the channel marker.
    pub fn new(name: String) -> Self {
        Self {
            name,
            members: RwLock::new(HashMap::new()),
        }
    }

    /// Display name, as spelled by the first joiner.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a member, recording the channel on the session as well. Returns
    /// `false` if the session was already a member.
    pub(crate) fn add(&self, session: &Arc<Session>) -> bool {
        let mut members = self.members.write();
        if members.contains_key(session.uid()) {
            return false;
        }
        members.insert(session.uid().to_string(), Arc::clone(session));
        session.record_join(&self.name);
        true
    }

    /// Remove a member from both sides.
    ///
    /// Returns the member set as it was just before removal (leaver
    /// included), taken under the same lock, or `None` if the session was not
    /// a member.
    pub(crate) fn remove(&self, session: &Session) -> Option<Vec<Arc<Session>>> {
        let mut members = self.members.write();
        session.record_part(&self.name);
        if !members.contains_key(session.uid()) {
            return None;
        }
        let snapshot = members.values().cloned().collect();
        members.remove(session.uid());
        Some(snapshot)
    }

    pub fn contains(&self, uid: &str) -> bool {
        self.members.read().contains_key(uid)
    }

    /// Snapshot of the current members. The lock is released on return.
    pub fn members(&self) -> Vec<Arc<Session>> {
        self.members.read().values().cloned().collect()
    }

    /// Nicks of members that have one, sorted for stable output.
    pub fn member_nicks(&self) -> Vec<String> {
        let mut nicks: Vec<String> = self
            .members
            .read()
            .values()
            .filter_map(|s| s.nick())
            .collect();
        nicks.sort();
        nicks
    }

    pub fn len(&self) -> usize {
        self.members.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.read().is_empty()
    }
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("members", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(uid: &str, nick: Option<&str>) -> Arc<Session> {
        let (s, _rx) = Session::new(uid.into(), "127.0.0.1:1".parse().unwrap(), 6667, 8);
        if let Some(nick) = nick {
            s.set_nick(nick.into());
        }
        Arc::new(s)
    }

    #[test]
    fn add_is_idempotent_per_session() {
        let chan = Channel::new("#test".into());
        let alice = member("001AAAAAA", Some("alice"));

        assert!(chan.add(&alice));
        assert!(!chan.add(&alice));
        assert_eq!(chan.len(), 1);
        assert!(alice.is_on("#test"));
    }

    #[test]
    fn remove_updates_both_sides() {
        let chan = Channel::new("#test".into());
        let alice = member("001AAAAAA", Some("alice"));
        chan.add(&alice);

        let bob = member("001AAAAAB", Some("bob"));
        chan.add(&bob);

        let before = chan.remove(&alice).unwrap();
        assert_eq!(before.len(), 2);
        assert!(chan.remove(&alice).is_none());
        assert_eq!(chan.len(), 1);
        chan.remove(&bob);
        assert!(chan.is_empty());
        assert!(!alice.is_on("#test"));
    }

    #[test]
    fn member_nicks_skips_unnamed() {
        let chan = Channel::new("#test".into());
        chan.add(&member("001AAAAAB", Some("bob")));
        chan.add(&member("001AAAAAA", Some("alice")));
        chan.add(&member("001AAAAAC", None));

        assert_eq!(chan.member_nicks(), vec!["alice", "bob"]);
        assert_eq!(chan.members().len(), 3);
    }
}
