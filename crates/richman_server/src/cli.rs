//! Command-line interface for the richman server.

use clap::{Parser, ValueEnum};
use richman_rules::Ruleset;

/// Turn-based board game server with per-session state.
#[derive(Parser, Debug)]
#[command(name = "richman_server")]
#[command(about = "Turn-based board game server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind to
    #[arg(short, long, default_value = "3000")]
    pub port: u16,

    /// Board variant to serve
    #[arg(long, value_enum, default_value = "festival16")]
    pub board: BoardChoice,

    /// Seconds a session may stay idle before eviction
    #[arg(long, default_value = "86400")]
    pub idle_timeout_secs: u64,

    /// Seconds between idle sweeps
    #[arg(long, default_value = "3600")]
    pub sweep_interval_secs: u64,
}

/// Selectable board variants.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum BoardChoice {
    /// 16-cell festival board, one die.
    Festival16,
    /// 40-cell classic board, two dice.
    Classic40,
}

impl BoardChoice {
    /// The ruleset for this variant.
    pub fn ruleset(self) -> Ruleset {
        match self {
            BoardChoice::Festival16 => Ruleset::festival16(),
            BoardChoice::Classic40 => Ruleset::classic40(),
        }
    }
}
