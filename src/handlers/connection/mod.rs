//! Connection registration and lifecycle handlers.

mod nick;
mod ping;
mod quit;
mod user;
mod welcome;

pub use nick::NickHandler;
pub use ping::PingHandler;
pub use quit::QuitHandler;
pub use user::UserHandler;
pub use welcome::send_welcome_burst;
