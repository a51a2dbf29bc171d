//! Saved opponent teams, keyed by the turn they were recorded at.

use crate::error::{ArenaError, Result};
use crate::roster::{Roster, View};
use once_cell::sync::OnceCell;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

type TeamsByTurn = BTreeMap<u32, Vec<Roster>>;

#[derive(Clone, Debug)]
enum Source {
    File(PathBuf),
    Text(String),
}

/// Lazily loaded pool of opponents.
///
/// The store is read on first access and cached until [`OpponentPool::clear`].
/// Lookups for a turn with no saved team fall back to the closest earlier turn.
#[derive(Debug)]
pub struct OpponentPool {
    source: Source,
    teams: OnceCell<TeamsByTurn>,
}

impl OpponentPool {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::File(path.into()),
            teams: OnceCell::new(),
        }
    }

    /// Pool backed by in-memory store contents, one team per line.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            source: Source::Text(text.into()),
            teams: OnceCell::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.teams.get().is_some()
    }

    /// Drops the cached teams; the next lookup reads the store again.
    pub fn clear(&mut self) {
        self.teams.take();
    }

    fn teams(&self) -> Result<&TeamsByTurn> {
        self.teams.get_or_try_init(|| self.load())
    }

    fn load(&self) -> Result<TeamsByTurn> {
        let text = match &self.source {
            Source::Text(text) => return parse_store(text),
            Source::File(path) => match fs::read_to_string(path) {
                Ok(text) => text,
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    warn!(path = %path.display(), "opponent store not found, pool is empty");
                    return Ok(TeamsByTurn::new());
                }
                Err(source) => {
                    return Err(ArenaError::Store {
                        path: path.clone(),
                        source,
                    })
                }
            },
        };
        let teams = parse_store(&text)?;
        info!(
            turns = teams.len(),
            teams = teams.values().map(Vec::len).sum::<usize>(),
            "opponent store loaded"
        );
        Ok(teams)
    }

    /// Number of stored teams over all turns.
    pub fn len(&self) -> Result<usize> {
        Ok(self.teams()?.values().map(Vec::len).sum())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn turns(&self) -> Result<Vec<u32>> {
        Ok(self.teams()?.keys().copied().collect())
    }

    /// Teams stored at the greatest turn not after `turn`.
    pub fn teams_at(&self, turn: u32) -> Result<(u32, &[Roster])> {
        self.teams()?
            .range(..=turn)
            .rev()
            .find(|(_, teams)| !teams.is_empty())
            .map(|(&stored, teams)| (stored, teams.as_slice()))
            .ok_or(ArenaError::NoOpponentAvailable { turn })
    }

    /// An independent copy of a random team for `turn`.
    pub fn get_random_team<R: Rng + ?Sized>(&self, turn: u32, rng: &mut R) -> Result<Roster> {
        let (stored, teams) = self.teams_at(turn)?;
        if stored != turn {
            debug!(turn, stored, "no team saved for turn, using earlier one");
        }
        teams
            .choose(rng)
            .cloned()
            .ok_or(ArenaError::NoOpponentAvailable { turn })
    }
}

fn parse_store(text: &str) -> Result<TeamsByTurn> {
    let mut teams = TeamsByTurn::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let team = Roster::unserialize(line).map_err(|err| match err {
            ArenaError::MalformedSerializedState(msg) => {
                ArenaError::malformed(format!("line {}: {msg}", idx + 1))
            }
            other => other,
        })?;
        teams.entry(team.turn()).or_default().push(team);
    }
    Ok(teams)
}

/// Appends the persistent view of `team` to the store at `path`.
pub fn append_team(path: &Path, team: &Roster) -> Result<()> {
    let store_err = |source| ArenaError::Store {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(store_err)?;
    writeln!(file, "{}", team.serialize(View::Persistent)).map_err(store_err)?;
    Ok(())
}
