pub mod abilities;
pub mod error;
pub mod fight;
pub mod fight_log;
pub mod matrix;
pub mod object;
pub mod pet;
pub mod pool;
pub mod roster;
pub mod serial;

pub use crate::error::{ArenaError, Result};
pub use crate::fight::{FightOptions, FightReport, Outcome};
pub use crate::fight_log::FightLog;
pub use crate::object::{Object, ObjectKind};
pub use crate::pet::{Pet, PetKind, Stats};
pub use crate::pool::OpponentPool;
pub use crate::roster::{Roster, View};

use crate::fight::DEFAULT_MAX_MICRO_ROUNDS;
use anyhow::Context;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub opponents_path: PathBuf,
    pub seed: u64,
    pub max_micro_rounds: usize,
    pub log_filter: String,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            opponents_path: PathBuf::from("data/saved_teams.txt"),
            seed: 0,
            max_micro_rounds: DEFAULT_MAX_MICRO_ROUNDS,
            log_filter: "pet_arena=info".to_string(),
        }
    }
}

impl ArenaConfig {
    pub fn fight_options(&self) -> FightOptions {
        FightOptions {
            max_micro_rounds: self.max_micro_rounds,
        }
    }
}

pub fn load_config(path: &Path) -> anyhow::Result<ArenaConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;
    let parsed: ArenaConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    if parsed.max_micro_rounds == 0 {
        anyhow::bail!("max_micro_rounds must be > 0");
    }
    Ok(parsed)
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    Fight,
    Evaluate,
}

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub config: ArenaConfig,
    pub team: String,
    pub turn: Option<u32>,
    pub mode: Mode,
    pub json: bool,
    pub save: bool,
}

pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    let mut team = Roster::unserialize(&opts.team).context("Failed to parse the team line")?;
    let turn = opts.turn.unwrap_or(team.turn());
    let options = opts.config.fight_options();
    let pool = OpponentPool::from_path(&opts.config.opponents_path);

    match opts.mode {
        Mode::Fight => {
            let mut rng = SmallRng::seed_from_u64(opts.config.seed);
            let mut opponent = pool
                .get_random_team(turn, &mut rng)
                .with_context(|| format!("No opponent to fight at turn {turn}"))?;
            if opts.json {
                let mut log = FightLog::new();
                let report = team.fight_with_report(&mut opponent, options, &mut log)?;
                let out = json!({ "turn": turn, "report": report, "fight": log.to_json() });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                let mut log = FightLog::new();
                let outcome = team.fight_with_options(&mut opponent, options, &mut log)?;
                for line in log.log_lines() {
                    println!("{line}");
                }
                println!("{outcome}");
            }
        }
        Mode::Evaluate => {
            let record = matrix::evaluate_pool(&team, &pool, turn, options)
                .with_context(|| format!("Failed to evaluate against turn {turn} opponents"))?;
            if opts.json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!(
                    "Turn {}: {} wins, {} draws, {} losses (win rate {:.4})",
                    record.turn,
                    record.wins,
                    record.draws,
                    record.losses,
                    record.win_rate()
                );
            }
        }
    }

    if opts.save {
        pool::append_team(&opts.config.opponents_path, &team)
            .context("Failed to save the team to the opponent store")?;
    }
    Ok(())
}
