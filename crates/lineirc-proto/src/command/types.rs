use std::fmt::{self, Display, Formatter};

/// The closed set of verbs the server accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `NICK <nickname>`
    Nick,
    /// `USER <username> <mode> <unused> <realname...>`
    User,
    /// `JOIN <channel>`
    Join,
    /// `PING <token>`
    Ping,
    /// `QUIT [reason...]`
    Quit,
    /// `PART <channel> [reason...]`
    Part,
    /// `PRIVMSG <target> <text...>`
    Privmsg,
}

static VERBS: &[(&str, Verb)] = &[
    ("NICK", Verb::Nick),
    ("USER", Verb::User),
    ("JOIN", Verb::Join),
    ("PING", Verb::Ping),
    ("QUIT", Verb::Quit),
    ("PART", Verb::Part),
    ("PRIVMSG", Verb::Privmsg),
];

impl Verb {
    /// Number of verbs.
    pub const COUNT: usize = 7;

    /// Every verb, in table order.
    pub const ALL: [Verb; Verb::COUNT] = [
        Verb::Nick,
        Verb::User,
        Verb::Join,
        Verb::Ping,
        Verb::Quit,
        Verb::Part,
        Verb::Privmsg,
    ];

    /// Resolve a verb token. Matching is case-sensitive.
    pub fn lookup(token: &str) -> Option<Verb> {
        VERBS
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, verb)| *verb)
    }

    /// The wire name of this verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Nick => "NICK",
            Verb::User => "USER",
            Verb::Join => "JOIN",
            Verb::Ping => "PING",
            Verb::Quit => "QUIT",
            Verb::Part => "PART",
            Verb::Privmsg => "PRIVMSG",
        }
    }

    /// Position of this verb in [`Verb::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for Verb {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed client command with validated arity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Claim or change a nickname.
    Nick(String),
    /// Registration details.
    User {
        /// Username (first parameter).
        username: String,
        /// Mode parameter, unused by the server.
        mode: String,
        /// Unused parameter, conventionally `*`.
        unused: String,
        /// Real name: the fourth parameter and everything after it.
        realname: String,
    },
    /// Join a channel (first token only).
    Join(String),
    /// Liveness probe.
    Ping(String),
    /// Disconnect with an optional reason.
    Quit(Option<String>),
    /// Leave a channel.
    Part {
        /// Channel name as sent.
        channel: String,
        /// Optional reason.
        reason: Option<String>,
    },
    /// Send text to a nick or channel.
    Privmsg {
        /// Nick or channel name.
        target: String,
        /// Message text.
        text: String,
    },
}

impl Command {
    /// The verb this command was parsed from.
    pub fn verb(&self) -> Verb {
        match self {
            Command::Nick(_) => Verb::Nick,
            Command::User { .. } => Verb::User,
            Command::Join(_) => Verb::Join,
            Command::Ping(_) => Verb::Ping,
            Command::Quit(_) => Verb::Quit,
            Command::Part { .. } => Verb::Part,
            Command::Privmsg { .. } => Verb::Privmsg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(Verb::lookup("NICK"), Some(Verb::Nick));
        assert_eq!(Verb::lookup("PRIVMSG"), Some(Verb::Privmsg));
        assert_eq!(Verb::lookup("nick"), None);
        assert_eq!(Verb::lookup("FOO"), None);
    }

    #[test]
    fn test_table_covers_all_verbs() {
        for verb in Verb::ALL {
            assert_eq!(Verb::lookup(verb.as_str()), Some(verb));
            assert_eq!(Verb::ALL[verb.index()], verb);
        }
        assert_eq!(VERBS.len(), Verb::ALL.len());
    }
}
