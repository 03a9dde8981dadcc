mod troll;

use anyhow::{Context, Result};
use clap::Parser;
use cmdhandler_core::commands::{CommandRegistry, CommandSender, Player};
use cmdhandler_core::config::HandlerConfig;
use cmdhandler_core::host::{HostServices, OnlinePlayers};
use cmdhandler_core::permissions::{PermissionTable, PlayerPermissions};
use cmdhandler_text::TextComponent;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Console host for trying out commands and their tab completion.
///
/// `/label args` executes a command, `?label args` prints the completions for
/// the partial line and `quit` exits.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the config file. Missing keys are filled in with defaults.
    #[arg(long, default_value = "Config.toml")]
    config: PathBuf,

    /// Name of the player sending commands.
    #[arg(long, default_value = "Steve")]
    player: String,

    /// Permission node granted to the player, e.g. `troll.*` or `-troll.admin`.
    #[arg(short, long = "permission")]
    permissions: Vec<String>,

    /// Send commands as the console instead of the player.
    #[arg(long)]
    console: bool,
}

struct ConsolePlayer {
    name: String,
}

impl Player for ConsolePlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn send_message(&mut self, message: &[TextComponent]) {
        debug!("{} <- {}", self.name, TextComponent::to_json(message));
        println!("{}", TextComponent::to_ansi(message));
    }
}

fn sender(console: bool, player: &mut ConsolePlayer) -> CommandSender<'_> {
    if console {
        CommandSender::Console
    } else {
        CommandSender::Player(player)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let logfile = tracing_appender::rolling::daily("./logs", "cmdhandler.log");
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var("CMDHANDLER_LOG")
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(logfile.and(std::io::stdout))
        .with_env_filter(env_filter)
        .init();

    let config = HandlerConfig::load(&args.config)?;
    let unknown_command = TextComponent::from_legacy_text(&config.unknown_command_message);

    let mut online_players = config.online_players.clone();
    if !online_players
        .iter()
        .any(|name| name.eq_ignore_ascii_case(&args.player))
    {
        online_players.push(args.player.clone());
    }

    let mut permissions = PermissionTable::new();
    permissions.set_player(
        &args.player,
        args.permissions.iter().map(String::as_str).collect::<PlayerPermissions>(),
    );

    let services = HostServices::new(permissions, OnlinePlayers::new(online_players), config);
    let mut registry = CommandRegistry::new();
    troll::register(&mut registry, services)?;

    info!(
        "Ready, sending commands as {}",
        if args.console { "CONSOLE" } else { args.player.as_str() }
    );

    let mut player = ConsolePlayer {
        name: args.player.clone(),
    };
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let line = line.trim_end_matches(['\r', '\n']);

        if line.trim() == "quit" {
            break;
        }
        if let Some(partial) = line.strip_prefix('?') {
            let sender = sender(args.console, &mut player);
            let suggestions = registry.tab_complete(&sender, partial);
            println!("[{}]", suggestions.join(", "));
        } else if !line.trim().is_empty()
            && registry
                .dispatch(sender(args.console, &mut player), line)
                .is_none()
        {
            println!("{}", TextComponent::to_ansi(&unknown_command));
        }
    }

    Ok(())
}
