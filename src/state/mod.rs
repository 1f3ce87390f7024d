//! Shared server state.
//!
//! - [`Registry`]: the authoritative store of sessions, nicks and channels
//! - [`Session`]: one per connection, owns the outbound queue
//! - [`Channel`]: a named member set
//! - [`UidGenerator`]: unique session ids

mod channel;
mod registry;
mod session;
mod uid;

pub use channel::Channel;
pub use registry::{Departure, JoinOutcome, NickChange, PartOutcome, Registry, ServerInfo};
pub use session::{Session, SessionInfo};
pub use uid::{Uid, UidGenerator};
