use super::Player;
use crate::commands::error::{CommandResult, RuntimeError};
use crate::permissions::PermissionAuthority;
use cmdhandler_text::{ColorCode, TextComponent, TextComponentBuilder};

/// Everything an executor can see while it runs. Only players reach an
/// executor, so the sender is always a player here.
pub struct ExecutionContext<'a> {
    player: &'a mut dyn Player,
    label: &'a str,
    args: &'a [String],
    permissions: &'a dyn PermissionAuthority,
}

impl<'a> ExecutionContext<'a> {
    pub(super) fn new(
        player: &'a mut dyn Player,
        label: &'a str,
        args: &'a [String],
        permissions: &'a dyn PermissionAuthority,
    ) -> Self {
        Self {
            player,
            label,
            args,
            permissions,
        }
    }

    /// The label the command was invoked with, which may be an alias.
    pub fn label(&self) -> &str {
        self.label
    }

    pub fn args(&self) -> &[String] {
        self.args
    }

    /// The argument at `index`, or an invalid usage error when it was not
    /// given.
    pub fn arg(&self, index: usize) -> CommandResult<&str> {
        self.args
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| RuntimeError::InvalidUsage.into())
    }

    pub fn player(&self) -> &dyn Player {
        &*self.player
    }

    pub fn player_mut(&mut self) -> &mut dyn Player {
        &mut *self.player
    }

    /// Sends a message written with `&` colour codes.
    pub fn reply(&mut self, message: &str) {
        self.player
            .send_message(&TextComponent::from_legacy_text(message));
    }

    pub fn error(&mut self, message: &str) {
        let component = TextComponentBuilder::new(message)
            .color_code(ColorCode::Red)
            .finish();
        self.player.send_message(&[component]);
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.has_permission(&*self.player, permission)
    }

    pub fn require_permission(&self, permission: &str) -> CommandResult<()> {
        if !self.has_permission(permission) {
            return Err(RuntimeError::PermissionDenied {
                permission: permission.to_string(),
            }
            .into());
        }
        Ok(())
    }
}
