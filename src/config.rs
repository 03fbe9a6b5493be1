use std::time::Duration;

use clap::{Parser, Subcommand};

/// Configuration parsed from command-line arguments.
#[derive(Debug, Parser, Clone)]
#[command(author, version, about = "Control MPRIS2 media players over D-Bus", long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub action: Action,
    /// Reply timeout for each D-Bus call, in milliseconds
    #[arg(short = 't', long = "timeout-ms", default_value_t = 25_000, global = true)]
    pub timeout_ms: u64,
    /// Block certain players (comma-separated list)
    #[arg(
        short = 'b',
        long = "blocked",
        value_delimiter = ',',
        default_value = "",
        global = true
    )]
    pub blocked: Vec<String>,
    /// Print results as JSON
    #[arg(long = "json", default_value_t = false, action = clap::ArgAction::SetTrue, global = true)]
    pub json: bool,
    /// Metadata format string ({title}, {artist}, {album}, {length})
    #[arg(long = "format", default_value = "{artist} - {title} ({length})", global = true)]
    pub format: String,
}

#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum Action {
    /// List available players
    List,
    /// Toggle play/pause
    PlayPause { player: Option<String> },
    /// Skip to the next track
    Next { player: Option<String> },
    /// Go back to the previous track
    Previous { player: Option<String> },
    /// Show metadata of the current track
    Metadata { player: Option<String> },
}

impl Action {
    /// The player named on the command line, if the action takes one.
    pub fn player(&self) -> Option<&str> {
        match self {
            Action::List => None,
            Action::PlayPause { player }
            | Action::Next { player }
            | Action::Previous { player }
            | Action::Metadata { player } => player.as_deref(),
        }
    }
}

impl Config {
    /// Parse arguments and normalize derived fields.
    pub fn parse() -> Self {
        <Self as Parser>::parse().normalized()
    }

    fn normalized(mut self) -> Self {
        self.blocked = self
            .blocked
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
