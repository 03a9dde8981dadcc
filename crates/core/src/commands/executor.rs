use super::{
    context::ExecutionContext, error::CommandError, handler::Command, registry::CommandRegistry,
    CommandSender, Player,
};
use cmdhandler_text::{ColorCode, TextComponent, TextComponentBuilder};
use itertools::Itertools;
use tracing::{debug, error};

impl Command {
    /// Runs the command for `sender`. Returns `false` when the sender is not
    /// a player, lacks the permission or the executor failed.
    pub fn execute(&self, sender: CommandSender<'_>, label: &str, args: &[String]) -> bool {
        let CommandSender::Player(player) = sender else {
            debug!("Ignoring /{} from a non-player sender", label);
            return false;
        };

        if let Some(permission) = &self.permission {
            if !self.services.permissions.has_permission(&*player, permission) {
                debug!(
                    "{} is missing {} for /{}",
                    player.name(),
                    permission,
                    label
                );
                self.send_permission_denied(player);
                return false;
            }
        }

        let mut ctx =
            ExecutionContext::new(player, label, args, self.services.permissions.as_ref());
        match (self.executor)(&mut ctx) {
            Ok(()) => true,
            Err(CommandError::Runtime(err)) => {
                if let Some(message) = err.user_message() {
                    ctx.error(&message);
                }
                let usage = TextComponentBuilder::new(self.usage.as_str())
                    .color_code(ColorCode::Red)
                    .finish();
                ctx.player_mut().send_message(&[usage]);
                false
            }
            Err(err) => {
                error!("Error executing /{} for {}: {}", label, ctx.player().name(), err);
                false
            }
        }
    }

    fn send_permission_denied(&self, player: &mut dyn Player) {
        let config = &self.services.config;
        if !config.using_no_perm {
            return;
        }
        let message = self
            .permission_message
            .as_deref()
            .unwrap_or(&config.no_permission_message);
        player.send_message(&TextComponent::from_legacy_text(message));
    }
}

impl CommandRegistry {
    /// Executes a raw command line such as `/troll Steve spin`. Returns `None`
    /// when no registered command matches the label.
    pub fn dispatch(&self, sender: CommandSender<'_>, command_line: &str) -> Option<bool> {
        let command_line = command_line.trim();
        let command_line = command_line.strip_prefix('/').unwrap_or(command_line);

        let mut words = command_line.split_whitespace();
        let label = words.next()?;
        let Some(command) = self.get(label) else {
            debug!("Unknown command /{} from {}", label, sender.name());
            return None;
        };

        let args = words.map(str::to_owned).collect_vec();
        Some(command.execute(sender, label, &args))
    }

    /// Completions for a partially typed command line. While the label is
    /// still being typed the matching labels are offered.
    pub fn tab_complete(&self, sender: &CommandSender<'_>, command_line: &str) -> Vec<String> {
        let command_line = command_line.trim_start();
        let command_line = command_line.strip_prefix('/').unwrap_or(command_line);

        let Some((label, rest)) = command_line.split_once(' ') else {
            let typed = command_line.to_lowercase();
            return self
                .labels()
                .filter(|candidate| candidate.starts_with(&typed))
                .map(|candidate| format!("/{}", candidate))
                .sorted()
                .collect();
        };

        let Some(command) = self.get(label) else {
            return Vec::new();
        };
        let args = rest.split(' ').map(str::to_owned).collect_vec();
        command.tab_complete(sender, label, &args)
    }
}
