use cmdhandler_core::commands::{CommandBuilder, CommandResult, ExecutionContext, Player};
use cmdhandler_core::commands::CommandSender;
use cmdhandler_core::config::HandlerConfig;
use cmdhandler_core::host::{DefaultCompleter, HostServices};
use cmdhandler_text::TextComponent;

/// Records every message it receives as plain text.
pub struct TestPlayer {
    name: String,
    pub messages: Vec<String>,
}

impl TestPlayer {
    pub fn new(name: &str) -> TestPlayer {
        TestPlayer {
            name: name.to_string(),
            messages: Vec::new(),
        }
    }
}

impl Player for TestPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn send_message(&mut self, message: &[TextComponent]) {
        self.messages.push(TextComponent::to_plain_text(message));
    }
}

/// Always suggests the same names, like a server with two players online.
pub struct FixedCompletions;

pub const DEFAULT_SUGGESTIONS: [&str; 2] = ["Notch", "jeb_"];

impl DefaultCompleter for FixedCompletions {
    fn complete(&self, _: &CommandSender<'_>, _: &str, _: &[String]) -> Vec<String> {
        DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
    }
}

/// Services where every player holds exactly `granted`.
pub fn services_with(granted: &'static [&'static str], config: HandlerConfig) -> HostServices {
    HostServices::new(
        move |_: &dyn Player, permission: &str| granted.iter().any(|g| *g == permission),
        FixedCompletions,
        config,
    )
}

pub fn services(granted: &'static [&'static str]) -> HostServices {
    services_with(granted, HandlerConfig::default())
}

pub fn builder(granted: &'static [&'static str]) -> CommandBuilder {
    CommandBuilder::new("TestPlugin", "troll", services(granted), succeed)
}

pub fn succeed(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    ctx.reply("&adone");
    Ok(())
}

pub fn args(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| word.to_string()).collect()
}

pub fn defaults() -> Vec<String> {
    args(&DEFAULT_SUGGESTIONS)
}
