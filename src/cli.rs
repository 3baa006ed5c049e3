//! Command-line interface for tui-candy.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, ValueEnum};

use crate::config::AppConfig;
use crate::error::ConfigError;

/// Terminal candy puzzles: match-3 and number ordering
#[derive(Parser, Debug)]
#[command(name = "tui-candy")]
#[command(about = "Terminal match-3 puzzle with a number-ordering mini-game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML config file; defaults are used when it does not exist
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Which game to play
    #[arg(short, long, value_enum, default_value_t = GameKind::Match3)]
    pub game: GameKind,

    /// Moves per match-3 session
    #[arg(short, long)]
    pub moves: Option<u32>,

    /// Seed for both games (otherwise taken from the config file or the clock)
    #[arg(short, long)]
    pub seed: Option<u32>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Available games
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    #[value(name = "match3")]
    Match3,
    Ordering,
}

impl Cli {
    /// Load the config file (if any) and apply command-line overrides.
    pub fn resolve_config(&self) -> Result<AppConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load_or_default(path)?,
            None => AppConfig::default(),
        };
        let file_given = self.config.as_ref().is_some_and(|p| p.exists());
        self.apply_overrides(&mut config, file_given, clock_seed);
        config.validate()?;
        Ok(config)
    }

    /// Command-line values win over the file. Without `--seed` and without a
    /// config file the seed comes from `fallback_seed`.
    pub fn apply_overrides(
        &self,
        config: &mut AppConfig,
        file_given: bool,
        fallback_seed: impl FnOnce() -> u32,
    ) {
        if let Some(moves) = self.moves {
            config.session.moves = moves;
        }
        match self.seed {
            Some(seed) => {
                config.session.seed = seed;
                config.ordering.seed = seed;
            }
            None if !file_given => {
                let seed = fallback_seed();
                config.session.seed = seed;
                config.ordering.seed = seed;
            }
            None => {}
        }
        if let Some(path) = &self.log_file {
            config.log_file = Some(path.clone());
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
