//! Handler context and dispatch.

mod context;
mod dispatcher;

pub use context::Context;
pub use dispatcher::Dispatcher;
