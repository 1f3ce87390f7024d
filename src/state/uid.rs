//! Session identifier generation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Unique session identifier: SID followed by a base36 counter.
pub type Uid = String;

/// Generates unique session ids in TS6 style.
///
/// Format: SID (3 chars) + client id (base36, at least 6 chars).
/// Example: "001AAAAAA". The client id widens past six characters instead of
/// wrapping, so ids never repeat for the life of the process.
pub struct UidGenerator {
    sid: String,
    counter: AtomicU64,
}

impl UidGenerator {
    /// Create a new UID generator for the given server ID.
    pub fn new(sid: impl Into<String>) -> Self {
        Self {
            sid: sid.into(),
            counter: AtomicU64::new(0),
        }
    }

    /// Generate the next unique UID.
    pub fn next(&self) -> Uid {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.sid, base36_encode(n))
    }
}

/// Encode a number in base36, left-padded with 'A' to six characters.
fn base36_encode(mut n: u64) -> String {
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    const WIDTH: usize = 6;

    let mut digits = Vec::with_capacity(WIDTH + 1);
    loop {
        digits.push(CHARS[(n % 36) as usize]);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    while digits.len() < WIDTH {
        digits.push(b'A');
    }
    digits.reverse();

    String::from_utf8_lossy(&digits).into_owned()
}
