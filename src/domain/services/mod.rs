pub mod actions;
mod app_state;
mod conversation;
mod normalizer;
mod streaming;
mod upload_workflow;

pub use app_state::*;
pub use conversation::*;
pub use normalizer::*;
pub use streaming::*;
pub use upload_workflow::*;
