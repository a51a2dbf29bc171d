//! Head-to-head fight resolution between two rosters' working views.

use crate::abilities::Hook;
use crate::error::{ArenaError, Result};
use crate::fight_log::FightLog;
use crate::pet::{Pet, PetId};
use crate::roster::{Roster, View};
use serde::Serialize;
use std::fmt;
use tracing::debug;

pub const DEFAULT_MAX_MICRO_ROUNDS: usize = 1000;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Side {
    A,
    B,
}

impl Side {
    fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Result from the point of view of the roster that started the fight.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Outcome {
    Loss = -1,
    Draw = 0,
    Win = 1,
}

impl Outcome {
    pub fn as_i8(self) -> i8 {
        self as i8
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::Loss => "Loss...",
            Outcome::Draw => "Draw !",
            Outcome::Win => "Win !",
        };
        f.write_str(text)
    }
}

#[derive(Copy, Clone, Debug)]
pub struct FightOptions {
    /// Micro-rounds allowed between the same two front pets.
    pub max_micro_rounds: usize,
}

impl Default for FightOptions {
    fn default() -> Self {
        Self {
            max_micro_rounds: DEFAULT_MAX_MICRO_ROUNDS,
        }
    }
}

/// Outcome plus both working views as they stood when the fight ended.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FightReport {
    pub outcome: Outcome,
    pub team: String,
    pub opponent: String,
}

struct Fight<'a> {
    team_a: &'a mut Roster,
    team_b: &'a mut Roster,
    options: FightOptions,
}

impl<'a> Fight<'a> {
    fn team(&self, side: Side) -> &Roster {
        match side {
            Side::A => &*self.team_a,
            Side::B => &*self.team_b,
        }
    }

    fn team_mut(&mut self, side: Side) -> &mut Roster {
        match side {
            Side::A => &mut *self.team_a,
            Side::B => &mut *self.team_b,
        }
    }

    fn front(&self, side: Side) -> Option<&Pet> {
        self.team(side).working.first()
    }

    fn front_ids(&self) -> (Option<PetId>, Option<PetId>) {
        (
            self.front(Side::A).map(Pet::id),
            self.front(Side::B).map(Pet::id),
        )
    }

    fn outcome(&self) -> Option<Outcome> {
        match (self.team_a.working.is_empty(), self.team_b.working.is_empty()) {
            (true, true) => Some(Outcome::Draw),
            (true, false) => Some(Outcome::Loss),
            (false, true) => Some(Outcome::Win),
            (false, false) => None,
        }
    }

    fn settle_faints(&mut self) -> usize {
        self.team_a.settle_faints() + self.team_b.settle_faints()
    }

    /// The front pet of `side` hits the opposing front pet.
    fn strike(&mut self, side: Side) {
        let Some(id) = self.front(side).map(Pet::id) else {
            return;
        };
        self.team_mut(side).fire(id, Hook::BeforeAttack);
        let attacker = self.team(side);
        let Some(damage) = attacker.position(id).map(|idx| attacker.working[idx].damage()) else {
            return;
        };
        if let Some(target) = self.team_mut(side.opponent()).working.first_mut() {
            target.take_damage(damage);
        }
    }

    /// Both front pets attack; the stronger one first, side B on ties.
    fn micro_round(&mut self) {
        let (Some(a), Some(b)) = (self.front(Side::A), self.front(Side::B)) else {
            return;
        };
        let order = if a.attack() > b.attack() {
            [Side::A, Side::B]
        } else {
            [Side::B, Side::A]
        };
        for side in order {
            self.strike(side);
        }
    }

    fn run(&mut self, mut log: Option<&mut FightLog>) -> Result<Outcome> {
        self.settle_faints();
        if let Some(log) = log.as_deref_mut() {
            log.log_start(self.team_a, self.team_b);
        }

        let mut fronts = self.front_ids();
        let mut rounds = 0usize;
        loop {
            if let Some(outcome) = self.outcome() {
                if let Some(log) = log.as_deref_mut() {
                    log.log_outcome(outcome);
                }
                return Ok(outcome);
            }

            let current = self.front_ids();
            if current != fronts {
                fronts = current;
                rounds = 0;
            }
            if rounds >= self.options.max_micro_rounds {
                return Err(ArenaError::NonTerminatingFight { rounds });
            }
            rounds += 1;

            self.micro_round();
            if self.settle_faints() > 0 {
                if let Some(log) = log.as_deref_mut() {
                    log.log_round(self.team_a, self.team_b);
                }
            }
        }
    }
}

/// Runs a fight to completion, captures `finish` from the final state, then
/// resets both rosters whatever the result.
fn resolve<T>(
    team: &mut Roster,
    other: &mut Roster,
    options: FightOptions,
    log: Option<&mut FightLog>,
    finish: impl FnOnce(&Roster, &Roster) -> T,
) -> Result<(Outcome, T)> {
    team.set_fighting(true);
    other.set_fighting(true);

    let result = Fight {
        team_a: &mut *team,
        team_b: &mut *other,
        options,
    }
    .run(log);
    let extra = finish(team, other);

    team.reset();
    other.reset();

    let outcome = result?;
    debug!(%outcome, turn = team.turn(), "fight over");
    Ok((outcome, extra))
}

impl Roster {
    /// Fights `other`, writing a round-by-round display into `log`.
    pub fn fight(&mut self, other: &mut Roster, log: &mut FightLog) -> Result<Outcome> {
        self.fight_with_options(other, FightOptions::default(), log)
    }

    pub fn fight_with_options(
        &mut self,
        other: &mut Roster,
        options: FightOptions,
        log: &mut FightLog,
    ) -> Result<Outcome> {
        resolve(self, other, options, Some(log), |_, _| ()).map(|(outcome, ())| outcome)
    }

    /// Fights `other` silently and returns both post-fight serializations.
    pub fn get_fight_result(&mut self, other: &mut Roster) -> Result<FightReport> {
        self.get_fight_result_with_options(other, FightOptions::default())
    }

    pub fn get_fight_result_with_options(
        &mut self,
        other: &mut Roster,
        options: FightOptions,
    ) -> Result<FightReport> {
        report(self, other, options, None)
    }

    /// Logged fight that also returns both post-fight serializations.
    pub fn fight_with_report(
        &mut self,
        other: &mut Roster,
        options: FightOptions,
        log: &mut FightLog,
    ) -> Result<FightReport> {
        report(self, other, options, Some(log))
    }
}

fn report(
    team: &mut Roster,
    other: &mut Roster,
    options: FightOptions,
    log: Option<&mut FightLog>,
) -> Result<FightReport> {
    let (outcome, (team, opponent)) = resolve(team, other, options, log, |team, other| {
        (team.serialize(View::Working), other.serialize(View::Working))
    })?;
    Ok(FightReport {
        outcome,
        team,
        opponent,
    })
}
