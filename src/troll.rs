use anyhow::{Result, bail};
use cmdhandler_core::commands::{CommandBuilder, CommandError, CommandMap, ExecutionContext};
use cmdhandler_core::host::HostServices;

const EFFECTS: [&str; 3] = ["spin", "freeze", "launch"];

fn exec_troll(ctx: &mut ExecutionContext<'_>) -> Result<(), CommandError> {
    let target = ctx.arg(0)?.to_string();
    let effect = ctx.arg(1)?.to_string();

    match effect.as_str() {
        "launch" => {
            let height = ctx.args().get(2).cloned().unwrap_or_else(|| "low".into());
            if !matches!(height.as_str(), "low" | "high") {
                return Err(CommandError::usage());
            }
            ctx.reply(&format!("&aLaunched &e{}&a ({})", target, height));
        }
        "explode" => {
            ctx.require_permission("troll.admin")?;
            if ctx.args().get(2).map(String::as_str) != Some("confirm") {
                return Err(CommandError::runtime(
                    "Exploding is permanent, add 'confirm' to go ahead",
                ));
            }
            ctx.reply(&format!("&4Exploded &e{}", target));
        }
        effect if EFFECTS.contains(&effect) => {
            ctx.reply(&format!("&aApplied &6{}&a to &e{}", effect, target));
        }
        _ => return Err(CommandError::usage()),
    }
    Ok(())
}

/// Registers `/troll <player> <effect>`.
pub fn register<M: CommandMap>(map: &mut M, services: HostServices) -> Result<()> {
    let registered = CommandBuilder::new("TrollingFreedom", "troll", services, exec_troll)
        .description("Play a harmless trick on a player")
        .usage("/troll <player> <spin|freeze|launch|explode> [low|high|confirm]")
        .permission("troll.use")
        .permission_message("&cYou are not allowed to troll anyone.")
        .aliases(&["tf"])
        .list_completion(1, None, &[], &EFFECTS)
        .one_completion(1, Some("troll.admin"), "explode", &[])
        .list_completion(2, None, &["launch"], &["low", "high"])
        .one_completion(2, Some("troll.admin"), "confirm", &["explode"])
        .register(map)?;

    if !registered {
        bail!("/troll is already registered");
    }
    Ok(())
}
