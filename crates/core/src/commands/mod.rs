mod completion;
mod context;
mod error;
mod executor;
mod handler;
mod registry;

pub use completion::{Completion, CompletionIndex};
pub use context::ExecutionContext;
pub use error::{CommandError, CommandResult, InternalError, RuntimeError, SetupError};
pub use handler::{Command, CommandBuilder, Executor};
pub use registry::{CommandMap, CommandRegistry};

use cmdhandler_text::TextComponent;

/// An online player as seen by the host.
pub trait Player {
    fn name(&self) -> &str;

    /// Receives chat components; hosts talking to real clients send them as
    /// [`TextComponent::to_json`].
    fn send_message(&mut self, message: &[TextComponent]);
}

pub enum CommandSender<'a> {
    Player(&'a mut dyn Player),
    Console,
}

impl CommandSender<'_> {
    /// Only players can be permission checked and messaged, so every other
    /// sender is treated as non-interactive.
    pub fn as_player(&self) -> Option<&dyn Player> {
        match self {
            CommandSender::Player(player) => Some(&**player),
            CommandSender::Console => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CommandSender::Player(player) => player.name(),
            CommandSender::Console => "CONSOLE",
        }
    }
}
