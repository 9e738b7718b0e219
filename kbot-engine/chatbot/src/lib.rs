#[macro_use]
extern crate tracing;

mod bot;
mod error;
mod responder;

pub use bot::{render_reply, Bot, MENU_NOT_FOUND_RESPONSES, UNKNOWN_MENU, UNKNOWN_RESPONSES};
pub use error::BotError;
pub use responder::{ExactMatchResponder, Responder};
