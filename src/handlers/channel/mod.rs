//! Channel membership handlers.

mod join;
mod part;

pub use join::JoinHandler;
pub use part::PartHandler;
