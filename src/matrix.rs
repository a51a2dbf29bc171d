use crate::error::Result;
use crate::fight::{FightOptions, Outcome};
use crate::pool::OpponentPool;
use crate::roster::Roster;
use rayon::prelude::*;
use serde::Serialize;

/// Tally of one team fighting every stored opponent of a turn.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct PoolRecord {
    pub turn: u32,
    pub wins: u64,
    pub draws: u64,
    pub losses: u64,
}

impl PoolRecord {
    pub fn total(&self) -> u64 {
        self.wins + self.draws + self.losses
    }

    /// Draws count as half a win.
    pub fn win_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total as f64
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
    }
}

/// Fights a copy of `team` against a copy of each opponent, in parallel.
pub fn fight_all(team: &Roster, opponents: &[Roster], options: FightOptions) -> Result<Vec<Outcome>> {
    opponents
        .par_iter()
        .map(|opponent| {
            let mut team = team.clone();
            let mut opponent = opponent.clone();
            team.get_fight_result_with_options(&mut opponent, options)
                .map(|report| report.outcome)
        })
        .collect()
}

pub fn evaluate_pool(
    team: &Roster,
    pool: &OpponentPool,
    turn: u32,
    options: FightOptions,
) -> Result<PoolRecord> {
    let (stored, opponents) = pool.teams_at(turn)?;
    let mut record = PoolRecord {
        turn: stored,
        ..PoolRecord::default()
    };
    for outcome in fight_all(team, opponents, options)? {
        record.record(outcome);
    }
    Ok(record)
}
