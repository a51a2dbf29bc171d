//! Triggered pet abilities.
//!
//! Every pet kind maps to one static [`Ability`] implementor. Hooks default to
//! no-ops; a kind overrides only the events it reacts to. Hooks run against
//! the roster view that is authoritative at the time (working view during a
//! fight, persistent view otherwise) and their mutations are visible to the
//! hooks fired after them in the same pass.

mod combat;
mod faint;
mod shop;

pub use combat::Elephant;
pub use faint::{Ant, Cricket, Flamingo};
pub use shop::{Beaver, Bluebird, Ladybug, Otter, Rabbit, Swan};

use crate::object::Object;
use crate::pet::{Pet, PetId, PetKind};
use crate::roster::Roster;

#[derive(Clone, Copy, Debug)]
pub enum Hook<'a> {
    StartTurn,
    EndTurn,
    BeforeAttack,
    Faint,
    Sell,
    ObjectReceived(&'a Object),
    ObjectBoughtNearby { index: usize, object: &'a Object },
    Buy,
}

impl Hook<'_> {
    pub const fn name(&self) -> &'static str {
        match self {
            Hook::StartTurn => "start_turn",
            Hook::EndTurn => "end_turn",
            Hook::BeforeAttack => "before_attack",
            Hook::Faint => "faint",
            Hook::Sell => "sell",
            Hook::ObjectReceived(_) => "object_received",
            Hook::ObjectBoughtNearby { .. } => "object_bought_nearby",
            Hook::Buy => "buy",
        }
    }
}

pub trait Ability: Send + Sync {
    fn on_start_turn(&self, _ctx: &mut HookContext<'_>) {}
    fn on_end_turn(&self, _ctx: &mut HookContext<'_>) {}
    fn on_before_attack(&self, _ctx: &mut HookContext<'_>) {}
    fn on_faint(&self, _ctx: &mut HookContext<'_>) {}
    fn on_sell(&self, _ctx: &mut HookContext<'_>) {}
    fn on_object_received(&self, _ctx: &mut HookContext<'_>, _object: &Object) {}
    fn on_object_bought_nearby(&self, _ctx: &mut HookContext<'_>, _index: usize, _object: &Object) {}
    fn on_buy(&self, _ctx: &mut HookContext<'_>) {}

    fn trigger(&self, hook: Hook<'_>, ctx: &mut HookContext<'_>) {
        match hook {
            Hook::StartTurn => self.on_start_turn(ctx),
            Hook::EndTurn => self.on_end_turn(ctx),
            Hook::BeforeAttack => self.on_before_attack(ctx),
            Hook::Faint => self.on_faint(ctx),
            Hook::Sell => self.on_sell(ctx),
            Hook::ObjectReceived(object) => self.on_object_received(ctx, object),
            Hook::ObjectBoughtNearby { index, object } => {
                self.on_object_bought_nearby(ctx, index, object)
            }
            Hook::Buy => self.on_buy(ctx),
        }
    }
}

/// Kinds without a triggered ability (summon tokens).
pub struct NoAbility;

impl Ability for NoAbility {}

pub fn for_kind(kind: PetKind) -> &'static dyn Ability {
    match kind {
        PetKind::Ant => &Ant,
        PetKind::Beaver => &Beaver,
        PetKind::Cricket => &Cricket,
        PetKind::Otter => &Otter,
        PetKind::Ladybug => &Ladybug,
        PetKind::Bluebird => &Bluebird,
        PetKind::Elephant => &Elephant,
        PetKind::Flamingo => &Flamingo,
        PetKind::Swan => &Swan,
        PetKind::Rabbit => &Rabbit,
        PetKind::ZombieCricket | PetKind::Bee => &NoAbility,
    }
}

/// What a hook may see and touch while it runs.
pub struct HookContext<'a> {
    roster: &'a mut Roster,
    source: PetId,
    level: u8,
}

impl<'a> HookContext<'a> {
    pub(crate) fn new(roster: &'a mut Roster, source: PetId, level: u8) -> Self {
        Self {
            roster,
            source,
            level,
        }
    }

    /// Level of the pet whose hook is running.
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn in_fight(&self) -> bool {
        self.roster.is_fighting()
    }

    pub fn pets(&self) -> &[Pet] {
        self.roster.active()
    }

    /// Position of the source pet, `None` once it has left the view.
    pub fn position(&self) -> Option<usize> {
        self.roster.position(self.source)
    }

    /// Indices of up to `count` alive pets directly behind the source, nearest first.
    pub fn alive_behind(&self, count: usize) -> Vec<usize> {
        let Some(position) = self.position() else {
            return Vec::new();
        };
        self.pets()
            .iter()
            .enumerate()
            .skip(position + 1)
            .filter(|(_, pet)| pet.is_alive())
            .map(|(idx, _)| idx)
            .take(count)
            .collect()
    }

    /// Indices of every pet except the source, in roster order.
    pub fn others(&self) -> Vec<usize> {
        self.pets()
            .iter()
            .enumerate()
            .filter(|(_, pet)| pet.id() != self.source)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn damage(&mut self, index: usize, amount: i32) -> i32 {
        match self.roster.active_mut().get_mut(index) {
            Some(pet) => pet.take_damage(amount),
            None => 0,
        }
    }

    /// Permanent outside a fight, until the fight ends inside one.
    pub fn buff(&mut self, index: usize, attack: i32, life: i32) {
        let permanent = !self.in_fight();
        if let Some(pet) = self.roster.active_mut().get_mut(index) {
            pet.buff(attack, life, permanent);
        }
    }

    pub fn buff_self(&mut self, attack: i32, life: i32) {
        if let Some(index) = self.position() {
            self.buff(index, attack, life);
        }
    }

    /// Summons `pet` directly behind the source.
    pub fn summon(&mut self, pet: Pet) -> Option<PetId> {
        self.roster.summon(self.source, pet)
    }
}
