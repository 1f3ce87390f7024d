//! Error types for the line protocol.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Errors raised while framing a byte stream into lines.
///
/// Every variant is fatal for the stream it came from: once the framer
/// reports an error the connection cannot be resynchronized.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error on the underlying transport, including end-of-stream in the
    /// middle of a line.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A line (terminator included) exceeded the configured limit.
    #[error("message too long: {actual} bytes (limit: {limit})")]
    MessageTooLong {
        /// Bytes seen so far for the offending line.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },
}

impl ProtocolError {
    /// Whether this error means the peer simply went away.
    pub fn is_disconnect(&self) -> bool {
        match self {
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::UnexpectedEof
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
            ),
            Self::MessageTooLong { .. } => false,
        }
    }
}
