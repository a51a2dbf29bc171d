//! Line format for saved teams: `"<turn> (<pet>) (<pet>) ..."`.
//!
//! A pet record is `Name,attack,life,level,item` where `item` is an item name
//! or `none`. Records appear in battle order and fainted pets are skipped.

use crate::error::{ArenaError, Result};
use crate::object::Object;
use crate::pet::{Pet, PetKind, Stats, MAX_LEVEL};
use crate::roster::{Roster, View, MAX_PETS};

const NO_ITEM: &str = "none";

impl Roster {
    pub fn serialize(&self, view: View) -> String {
        let mut out = self.turn.to_string();
        for pet in self.view(view).iter().filter(|pet| pet.is_alive()) {
            out.push(' ');
            out.push_str(&serialize_pet(pet));
        }
        out
    }

    /// Rebuilds a team saved by [`Roster::serialize`], ready to fight.
    pub fn unserialize(text: &str) -> Result<Roster> {
        let text = text.trim();
        let (turn_token, mut rest) = text.split_once(' ').unwrap_or((text, ""));
        let turn: u32 = turn_token
            .parse()
            .map_err(|_| ArenaError::malformed(format!("bad turn token '{turn_token}'")))?;

        let mut roster = Roster::new();
        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }
            let body = rest
                .strip_prefix('(')
                .ok_or_else(|| ArenaError::malformed(format!("expected '(' at '{rest}'")))?;
            let close = body
                .find(')')
                .ok_or_else(|| ArenaError::malformed("unbalanced parentheses"))?;
            let record = &body[..close];
            if record.contains('(') {
                return Err(ArenaError::malformed("unbalanced parentheses"));
            }
            if roster.pets.len() >= MAX_PETS {
                return Err(ArenaError::malformed(format!("more than {MAX_PETS} pets")));
            }
            let pet = parse_pet(record)?;
            let pet = roster.adopt(pet);
            roster.pets.push(pet);
            rest = &body[close + 1..];
        }

        roster.working = roster.pets.clone();
        roster.turn = turn;
        roster.in_fight = true;
        Ok(roster)
    }
}

pub fn serialize_pet(pet: &Pet) -> String {
    format!(
        "({},{},{},{},{})",
        pet.name(),
        pet.attack(),
        pet.life(),
        pet.level(),
        pet.item().map_or(NO_ITEM, Object::name)
    )
}

fn parse_pet(record: &str) -> Result<Pet> {
    let fields: Vec<&str> = record.split(',').map(str::trim).collect();
    let [name, attack, life, level, item] = fields[..] else {
        return Err(ArenaError::malformed(format!(
            "expected 5 fields in pet record '{record}'"
        )));
    };

    let kind = PetKind::from_name(name)
        .ok_or_else(|| ArenaError::malformed(format!("unknown pet '{name}'")))?;
    let attack = parse_number(attack, "attack", record)?;
    let life = parse_number(life, "life", record)?;
    let level: u8 = level
        .parse()
        .ok()
        .filter(|lvl| (1..=MAX_LEVEL).contains(lvl))
        .ok_or_else(|| ArenaError::malformed(format!("bad level in pet record '{record}'")))?;
    let item = match item {
        NO_ITEM => None,
        name => {
            let object = Object::from_name(name)
                .filter(Object::is_item)
                .ok_or_else(|| ArenaError::malformed(format!("unknown item '{name}'")))?;
            Some(object)
        }
    };

    Ok(Pet::restore(kind, Stats::new(attack, life), level, item))
}

fn parse_number(value: &str, field: &str, record: &str) -> Result<i32> {
    value
        .parse()
        .map_err(|_| ArenaError::malformed(format!("bad {field} in pet record '{record}'")))
}
