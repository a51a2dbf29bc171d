use crate::fight::Outcome;
use crate::pet::Pet;
use crate::roster::Roster;
use serde_json::json;

const CELL_WIDTH: usize = 10;
const SEPARATOR: &str = "  ///  ";

/// Collects a printable trace of one fight.
///
/// Each snapshot renders two lines, pet names then `attack/life`, with the
/// first team drawn back to front so both front pets meet at the separator.
#[derive(Clone, Debug, Default)]
pub struct FightLog {
    rounds: usize,
    log: Vec<String>,
}

impl FightLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_start(&mut self, team: &Roster, other: &Roster) {
        self.log.push(format!("|start|turn {}", team.turn()));
        self.log_teams(team, other);
    }

    pub fn log_round(&mut self, team: &Roster, other: &Roster) {
        self.rounds += 1;
        self.log.push(format!("|round|{}", self.rounds));
        self.log_teams(team, other);
    }

    pub fn log_outcome(&mut self, outcome: Outcome) {
        let line = match outcome {
            Outcome::Win => "|win|team".to_string(),
            Outcome::Loss => "|win|opponent".to_string(),
            Outcome::Draw => "|tie|".to_string(),
        };
        self.log.push(line);
    }

    fn log_teams(&mut self, team: &Roster, other: &Roster) {
        let ours: Vec<&Pet> = team.working_pets().iter().filter(|p| p.is_alive()).rev().collect();
        let theirs: Vec<&Pet> = other.working_pets().iter().filter(|p| p.is_alive()).collect();
        self.log.push(display_line(&ours, &theirs, |pet| pet.name().to_string()));
        self.log.push(display_line(&ours, &theirs, Pet::disp_stats));
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "rounds": self.rounds,
            "log": self.log,
        })
    }
}

fn display_line(ours: &[&Pet], theirs: &[&Pet], cell: impl Fn(&Pet) -> String) -> String {
    let mut line = String::new();
    for pet in ours {
        line.push_str(&pad(&cell(pet), CELL_WIDTH));
    }
    line.push_str(SEPARATOR);
    for pet in theirs {
        line.push_str(&pad(&cell(pet), CELL_WIDTH));
    }
    line.trim_end().to_string()
}

/// Centers `text` in a cell of `width` characters; longer text is kept whole.
pub fn pad(text: &str, width: usize) -> String {
    format!("{text:^width$}")
}
