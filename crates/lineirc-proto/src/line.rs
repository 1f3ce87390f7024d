//! CR LF line codec for tokio.
//!
//! Inbound, the decoder yields the raw bytes of each line with the two-byte
//! terminator stripped. A lone `\n` or `\r` is ordinary line content; only the
//! exact `\r\n` pair ends a line. Outbound, the encoder serializes a
//! [`Message`] and appends `\r\n`.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{self, ProtocolError};
use crate::message::Message;

/// The line terminator.
pub const CRLF: &[u8; 2] = b"\r\n";

/// Default maximum line length in bytes, terminator included.
pub const DEFAULT_MAX_LEN: usize = 512;

/// Line-based codec that handles CR LF terminated messages.
#[derive(Debug, Clone)]
pub struct LineCodec {
    /// Index of the next byte to scan for a terminator.
    next_index: usize,
    /// Maximum line length, terminator included.
    max_len: usize,
}

impl LineCodec {
    /// Create a codec with the default 512 byte limit.
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LEN)
    }

    /// Create a codec with a custom maximum line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
        }
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = BytesMut;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<BytesMut>> {
        // Step back one byte: a '\r' at the end of the previous scan may pair
        // with a '\n' that just arrived.
        let start = self.next_index.saturating_sub(1);

        if let Some(offset) = src[start..].windows(2).position(|w| w == CRLF) {
            let content_len = start + offset;
            let total = content_len + CRLF.len();
            self.next_index = 0;

            if total > self.max_len {
                return Err(ProtocolError::MessageTooLong {
                    actual: total,
                    limit: self.max_len,
                });
            }

            let mut line = src.split_to(total);
            line.truncate(content_len);
            return Ok(Some(line));
        }

        self.next_index = src.len();

        if src.len() > self.max_len {
            return Err(ProtocolError::MessageTooLong {
                actual: src.len(),
                limit: self.max_len,
            });
        }

        Ok(None)
    }
}

impl Encoder<Message> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, msg: Message, dst: &mut BytesMut) -> error::Result<()> {
        let line = msg.to_string();
        dst.reserve(line.len() + CRLF.len());
        dst.extend_from_slice(line.as_bytes());
        dst.extend_from_slice(CRLF);
        Ok(())
    }
}
