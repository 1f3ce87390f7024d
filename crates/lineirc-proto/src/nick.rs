//! Nickname validation.
//!
//! The server is deliberately permissive about nick syntax. It only rejects
//! what would make a nick unusable on the wire: the nick appears as a middle
//! parameter in replies and as the first part of a `nick!user@host` prefix.

/// Maximum nickname length in bytes.
pub const NICK_MAX_LEN: usize = 30;

/// Extension trait for checking if a string can be used as a nickname.
pub trait NickExt {
    /// Check if this string is an acceptable nickname.
    ///
    /// Rejected: empty, longer than [`NICK_MAX_LEN`], a leading `:`, or any
    /// of space, `,`, `!`, `@`, CR, LF, NUL.
    ///
    /// # Examples
    ///
    /// ```
    /// use lineirc_proto::NickExt;
    ///
    /// assert!("alice".is_valid_nick());
    /// assert!("[away]".is_valid_nick());
    ///
    /// assert!(!"".is_valid_nick());
    /// assert!(!":x".is_valid_nick());
    /// assert!(!"a!b".is_valid_nick());
    /// ```
    fn is_valid_nick(&self) -> bool;
}

#[inline]
fn is_forbidden(c: char) -> bool {
    matches!(c, ' ' | ',' | '!' | '@' | '\r' | '\n' | '\0')
}

impl NickExt for str {
    fn is_valid_nick(&self) -> bool {
        !self.is_empty()
            && self.len() <= NICK_MAX_LEN
            && !self.starts_with(':')
            && !self.contains(is_forbidden)
    }
}

impl NickExt for String {
    fn is_valid_nick(&self) -> bool {
        self.as_str().is_valid_nick()
    }
}
