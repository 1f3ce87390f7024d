//! IRC case mapping.
//!
//! Nicknames and channel names compare case-insensitively using the
//! `rfc1459` mapping: ASCII letters fold to lowercase and `[]\~` are the
//! uppercase forms of `{}|^`. No Unicode normalization is performed, so
//! non-ASCII characters are left as they are.

#[inline]
fn fold(c: char) -> char {
    match c {
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        _ => c.to_ascii_lowercase(),
    }
}

/// Casefold a name into the key used for lookups.
pub fn irc_to_lower(s: &str) -> String {
    s.chars().map(fold).collect()
}
