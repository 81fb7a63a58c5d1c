mod action;
mod analysis;
mod error;
mod event;
mod gateway;
mod image_file;
mod message;
mod role;
mod session;
mod slash_commands;
mod upload;

pub use action::*;
pub use analysis::*;
pub use error::*;
pub use event::*;
pub use gateway::*;
pub use image_file::*;
pub use message::*;
pub use role::*;
pub use session::*;
pub use slash_commands::*;
pub use upload::*;
