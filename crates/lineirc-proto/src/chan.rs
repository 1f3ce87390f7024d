//! Channel name utilities.

use std::borrow::Cow;

/// The group-channel marker every channel name starts with.
pub const CHANNEL_PREFIX: char = '#';

/// Extension trait for recognizing channel names.
pub trait ChannelExt {
    /// Whether this string names a channel (starts with [`CHANNEL_PREFIX`]).
    fn is_channel_name(&self) -> bool;
}

impl ChannelExt for str {
    fn is_channel_name(&self) -> bool {
        self.starts_with(CHANNEL_PREFIX)
    }
}

impl ChannelExt for String {
    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }
}

/// Prepend the channel marker if the caller omitted it.
///
/// ```rust
/// use lineirc_proto::normalize_channel;
///
/// assert_eq!(normalize_channel("test"), "#test");
/// assert_eq!(normalize_channel("#test"), "#test");
/// ```
pub fn normalize_channel(name: &str) -> Cow<'_, str> {
    if name.is_channel_name() {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{}{}", CHANNEL_PREFIX, name))
    }
}
