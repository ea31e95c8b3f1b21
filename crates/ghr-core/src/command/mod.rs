//! Chat command system
//!
//! Commands are triggered by regular expressions matched against whole
//! channel messages. The host owns the chat connection and hands each
//! message to [`CommandRegistry::dispatch`].

pub mod registry;
pub mod traits;

pub use registry::CommandRegistry;
pub use traits::{Channel, Command, Invocation};
