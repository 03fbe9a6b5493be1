mod config;
mod utils;

use anyhow::{Context, Result, bail};
use config::{Action, Config};
use mprisctl::mpris::discovery::is_blocked;
use mprisctl::{Command, MprisController, PlayerId};
use utils::{format_metadata, metadata_json, players_json};

/// Non-blocked players, in bus order.
fn available_players(controller: &MprisController, config: &Config) -> Result<Vec<PlayerId>> {
    let players = controller.try_list_players()?;
    Ok(players
        .into_iter()
        .filter(|p| !is_blocked(p, &config.blocked))
        .collect())
}

/// The player named on the command line, or the first available one.
fn select_player(controller: &MprisController, config: &Config) -> Result<PlayerId> {
    if let Some(name) = config.action.player() {
        return Ok(PlayerId::from(name));
    }
    available_players(controller, config)?
        .into_iter()
        .next()
        .context("No MPRIS player is running")
}

fn main() -> Result<()> {
    env_logger::init();
    let config = Config::parse();
    let controller = MprisController::try_new()?.with_timeout(config.timeout());

    let command = match config.action {
        Action::List => {
            let players = available_players(&controller, &config)?;
            if config.json {
                println!("{}", players_json(&players));
            } else {
                players.iter().for_each(|p| println!("{p}"));
            }
            return Ok(());
        }
        Action::Metadata { .. } => {
            let player = select_player(&controller, &config)?;
            let metadata = controller
                .try_metadata(&player)
                .with_context(|| format!("Failed to get track metadata for {player}"))?;
            if config.json {
                println!("{}", metadata_json(&player, &metadata));
            } else {
                println!("{}", format_metadata(&config.format, &metadata));
            }
            return Ok(());
        }
        Action::PlayPause { .. } => Command::PlayPause,
        Action::Next { .. } => Command::Next,
        Action::Previous { .. } => Command::Previous,
    };

    let player = select_player(&controller, &config)?;
    if !controller.send(&player, command) {
        bail!("Failed to send {} command to {player}", command.method());
    }
    Ok(())
}
