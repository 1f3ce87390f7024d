//! Per-connection limits configuration.

use serde::Deserialize;

/// Per-connection limits configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum inbound line length in bytes, CR LF included (default: 512).
    /// A longer line ends the connection.
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
    /// Outbound queue capacity per session (default: 256).
    /// A session whose queue fills up is disconnected with "SendQ exceeded".
    #[serde(default = "default_sendq_len")]
    pub sendq_len: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_len: default_max_line_len(),
            sendq_len: default_sendq_len(),
        }
    }
}

fn default_max_line_len() -> usize {
    512
}

fn default_sendq_len() -> usize {
    256
}
