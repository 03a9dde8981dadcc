use super::completion::CompletionIndex;
use super::context::ExecutionContext;
use super::error::{CommandResult, SetupError};
use super::registry::CommandMap;
use super::CommandSender;
use crate::host::HostServices;
use tracing::trace;

/// The command specific logic. Returning a runtime error makes the sender
/// see the usage line.
/// Internal errors are only logged; the sender is sent nothing.
pub type Executor = Box<dyn Fn(&mut ExecutionContext<'_>) -> CommandResult<()> + Send + Sync>;

/// A sealed command. Nothing about it can change anymore; it can only be
/// registered, executed and asked for completions.
pub struct Command {
    pub(super) plugin: String,
    pub(super) name: String,
    pub(super) description: String,
    pub(super) usage: String,
    pub(super) permission: Option<String>,
    pub(super) permission_message: Option<String>,
    pub(super) aliases: Vec<String>,
    pub(super) completions: CompletionIndex,
    pub(super) services: HostServices,
    pub(super) executor: Executor,
}

impl Command {
    /// The plugin this command belongs to.
    pub fn plugin(&self) -> &str {
        &self.plugin
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    pub fn permission_message(&self) -> Option<&str> {
        self.permission_message.as_deref()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn completions(&self) -> &CompletionIndex {
        &self.completions
    }

    /// Registers into `map` without a namespace. Returns whether the map
    /// accepted the command.
    pub fn register<M: CommandMap + ?Sized>(self, map: &mut M) -> bool {
        map.register("", self)
    }

    pub fn tab_complete(
        &self,
        sender: &CommandSender<'_>,
        alias: &str,
        args: &[String],
    ) -> Vec<String> {
        let fallback = || self.services.fallback.complete(sender, alias, args);

        let Some(player) = sender.as_player() else {
            return fallback();
        };
        let permissions = self.services.permissions.as_ref();
        if let Some(permission) = &self.permission {
            if !permissions.has_permission(player, permission) {
                return fallback();
            }
        }

        match self
            .completions
            .resolve(args, |permission| permissions.has_permission(player, permission))
        {
            Some(suggestions) => suggestions,
            None => {
                trace!("/{} offered nothing for {:?}, falling back", self.name, args);
                fallback()
            }
        }
    }
}

/// A command that is still being configured. Every setter ignores empty
/// input so calls can be chained freely.
pub struct CommandBuilder {
    command: Command,
}

impl CommandBuilder {
    /// # Panics
    ///
    /// Panics if `plugin` or `name` is empty.
    pub fn new(
        plugin: impl Into<String>,
        name: impl Into<String>,
        services: HostServices,
        executor: impl Fn(&mut ExecutionContext<'_>) -> CommandResult<()> + Send + Sync + 'static,
    ) -> Self {
        let plugin = plugin.into();
        let name = name.into();
        assert!(!plugin.is_empty(), "Command must belong to a plugin");
        assert!(!name.is_empty(), "Command name can not be empty");

        let usage = format!("/{}", name);
        Self {
            command: Command {
                plugin,
                name,
                description: String::new(),
                usage,
                permission: None,
                permission_message: None,
                aliases: Vec::new(),
                completions: CompletionIndex::new(),
                services,
                executor: Box::new(executor),
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        if !description.is_empty() {
            self.command.description = description;
        }
        self
    }

    /// Shown to the sender whenever the executor fails, e.g. `/troll <player>`.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        let usage = usage.into();
        if !usage.is_empty() {
            self.command.usage = usage;
        }
        self
    }

    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        let permission = permission.into();
        if !permission.is_empty() {
            self.command.permission = Some(permission);
        }
        self
    }

    /// Sent instead of the configured default when the sender lacks the
    /// command's permission.
    pub fn permission_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        if !message.is_empty() {
            self.command.permission_message = Some(message);
        }
        self
    }

    /// Replaces the alias list. An empty list is ignored.
    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        let aliases: Vec<String> = aliases
            .iter()
            .filter(|alias| !alias.is_empty())
            .map(|alias| alias.to_string())
            .collect();
        if !aliases.is_empty() {
            self.command.aliases = aliases;
        }
        self
    }

    /// Offers `text` at argument `index`, optionally only to holders of
    /// `permission` and only after one of `preceding_words`.
    pub fn one_completion(
        mut self,
        index: usize,
        permission: Option<&str>,
        text: &str,
        preceding_words: &[&str],
    ) -> Self {
        self.command
            .completions
            .add_one(index, permission, text, preceding_words);
        self
    }

    /// Same as [`CommandBuilder::one_completion`] for every entry of `texts`.
    pub fn list_completion(
        mut self,
        index: usize,
        permission: Option<&str>,
        preceding_words: &[&str],
        texts: &[&str],
    ) -> Self {
        self.command
            .completions
            .add_list(index, permission, preceding_words, texts);
        self
    }

    pub fn seal(self) -> CommandResult<Command> {
        if let Some(completion) = self.command.completions.first_unreachable() {
            return Err(SetupError::UnreachableCompletion {
                text: completion.text().to_string(),
            }
            .into());
        }
        Ok(self.command)
    }

    /// Seals the command and registers it into `map` without a namespace.
    pub fn register<M: CommandMap + ?Sized>(self, map: &mut M) -> CommandResult<bool> {
        Ok(self.seal()?.register(map))
    }
}
