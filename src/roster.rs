//! Team composition and lifecycle.
//!
//! A [`Roster`] owns its pets in two sequences: the persistent view, which is
//! authoritative between fights, and the working view, a copy taken at
//! [`Roster::end_turn`] that fights mutate. [`Roster::reset`] reconciles the
//! two once a fight is over.

use crate::abilities::{Hook, HookContext};
use crate::error::{ArenaError, Result};
use crate::object::{Object, ObjectEffect};
use crate::pet::{Pet, PetId};
use tracing::{debug, trace};

pub const MAX_PETS: usize = 6;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum View {
    Persistent,
    Working,
}

#[derive(Clone, Debug, Default)]
pub struct Roster {
    pub(crate) turn: u32,
    pub(crate) in_fight: bool,
    next_id: u32,
    pub(crate) pets: Vec<Pet>,
    pub(crate) working: Vec<Pet>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn nb_pets(&self) -> usize {
        self.pets.len()
    }

    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    pub fn working_pets(&self) -> &[Pet] {
        &self.working
    }

    pub fn view(&self, view: View) -> &[Pet] {
        match view {
            View::Persistent => &self.pets,
            View::Working => &self.working,
        }
    }

    pub fn is_fighting(&self) -> bool {
        self.in_fight
    }

    pub(crate) fn set_fighting(&mut self, in_fight: bool) {
        self.in_fight = in_fight;
    }

    /// The view hooks and summons act on.
    pub(crate) fn active(&self) -> &[Pet] {
        if self.in_fight {
            &self.working
        } else {
            &self.pets
        }
    }

    pub(crate) fn active_mut(&mut self) -> &mut Vec<Pet> {
        if self.in_fight {
            &mut self.working
        } else {
            &mut self.pets
        }
    }

    pub(crate) fn position(&self, id: PetId) -> Option<usize> {
        self.active().iter().position(|pet| pet.id == id)
    }

    fn active_ids(&self) -> Vec<PetId> {
        self.active().iter().map(Pet::id).collect()
    }

    /// Hands out a fresh id; the roster owns the pet from here on.
    pub(crate) fn adopt(&mut self, mut pet: Pet) -> Pet {
        self.next_id += 1;
        pet.id = PetId(self.next_id);
        pet
    }

    /// Shop-phase mutations only touch the persistent view.
    fn check_shopping(&self, action: &'static str) -> Result<()> {
        if self.in_fight {
            return Err(ArenaError::InFight { action });
        }
        Ok(())
    }

    fn check_index(&self, action: &'static str, index: usize) -> Result<()> {
        if index < self.pets.len() {
            return Ok(());
        }
        Err(ArenaError::InvalidIndex { action, index })
    }

    pub fn can_combine(&self, src_index: usize, dst_index: usize) -> Result<()> {
        self.check_index("COMBINE", src_index)?;
        if src_index == dst_index {
            return Err(ArenaError::SameIndex { index: src_index });
        }
        self.can_combine_named(dst_index, self.pets[src_index].name())
    }

    pub fn can_combine_named(&self, index: usize, name: &str) -> Result<()> {
        self.check_index("COMBINE", index)?;
        let expected = self.pets[index].name();
        if expected != name {
            return Err(ArenaError::NameMismatch {
                expected: expected.to_string(),
                found: name.to_string(),
            });
        }
        Ok(())
    }

    pub fn add(&mut self, pet: Pet) -> Result<PetId> {
        self.check_shopping("ADD")?;
        if self.pets.len() >= MAX_PETS {
            return Err(ArenaError::RosterFull);
        }
        let pet = self.adopt(pet);
        let id = pet.id;
        self.pets.push(pet);
        Ok(id)
    }

    /// Adds the pet and fires its buy hook.
    pub fn buy(&mut self, pet: Pet) -> Result<PetId> {
        let id = self.add(pet)?;
        self.fire(id, Hook::Buy);
        Ok(id)
    }

    /// Merges the pet at `src_index` into the one at `dst_index`.
    pub fn combine(&mut self, src_index: usize, dst_index: usize) -> Result<()> {
        self.check_shopping("COMBINE")?;
        self.can_combine(src_index, dst_index)?;
        let source = self.pets.remove(src_index);
        let dst_index = if src_index < dst_index {
            dst_index - 1
        } else {
            dst_index
        };
        self.pets[dst_index].absorb(source);
        debug!(pet = self.pets[dst_index].name(), level = self.pets[dst_index].level(), "combined");
        Ok(())
    }

    /// Merges an outside pet (fresh from the shop) into the one at `index`.
    pub fn combine_pet(&mut self, index: usize, pet: Pet) -> Result<()> {
        self.check_shopping("COMBINE")?;
        self.can_combine_named(index, pet.name())?;
        self.pets[index].absorb(pet);
        Ok(())
    }

    /// Sells the pet at `index` and returns its level.
    pub fn sell(&mut self, index: usize) -> Result<u8> {
        self.check_shopping("SELL_PET")?;
        self.check_index("SELL_PET", index)?;
        let id = self.pets[index].id;
        let level = self.pets[index].level();
        self.fire(id, Hook::Sell);
        if let Some(index) = self.pets.iter().position(|pet| pet.id == id) {
            let pet = self.pets.remove(index);
            debug!(pet = pet.name(), level, "sold");
        }
        Ok(level)
    }

    /// Inserts `pet` right behind `base`, or at the back if `base` is gone.
    ///
    /// The new pet is dropped when the persistent view is already full, even
    /// while a fight is running on the working view.
    pub fn summon(&mut self, base: PetId, pet: Pet) -> Option<PetId> {
        if self.pets.len() >= MAX_PETS {
            debug!(pet = pet.name(), "team is full, summon dropped");
            return None;
        }
        let mut pet = self.adopt(pet);
        pet.is_summoned = self.in_fight;
        let id = pet.id;
        debug!(pet = pet.name(), in_fight = self.in_fight, "summoned");
        let view = self.active_mut();
        let at = view
            .iter()
            .position(|other| other.id == base)
            .map_or(view.len(), |idx| idx + 1);
        view.insert(at, pet);
        Some(id)
    }

    /// Faints the pet at `index` of the authoritative view.
    pub fn faint(&mut self, index: usize) -> Result<()> {
        let Some(id) = self.active().get(index).map(Pet::id) else {
            return Err(ArenaError::InvalidIndex {
                action: "FAINT",
                index,
            });
        };
        self.faint_pet(id);
        Ok(())
    }

    pub(crate) fn faint_pet(&mut self, id: PetId) {
        self.fire(id, Hook::Faint);
        let Some(index) = self.position(id) else {
            return;
        };
        let held = self.active()[index].item().map(Object::effect);
        if let Some(ObjectEffect::SummonOnFaint(kind)) = held {
            self.summon(id, Pet::new(kind));
        }
        if let Some(index) = self.position(id) {
            let pet = self.active_mut().remove(index);
            debug!(pet = pet.name(), summoned = pet.is_summoned, "fainted");
        }
    }

    /// Faints every dead pet, front to back, until none is left.
    pub(crate) fn settle_faints(&mut self) -> usize {
        let mut fainted = 0;
        while let Some(id) = self.active().iter().find(|pet| !pet.is_alive()).map(Pet::id) {
            self.faint_pet(id);
            fainted += 1;
        }
        fainted
    }

    /// Gives `object` to the pet at `index`, then lets every other pet react.
    pub fn give_object(&mut self, index: usize, object: Object) -> Result<()> {
        self.check_shopping("GIVE_OBJECT")?;
        self.check_index("GIVE_OBJECT", index)?;
        let id = self.pets[index].id;
        if object.is_item() {
            if let Some(old) = self.pets[index].equip(object) {
                debug!(old = old.name(), new = object.name(), "item replaced");
            }
        } else if let ObjectEffect::Buff(stats) = object.effect() {
            self.pets[index].buff(stats.attack, stats.life, true);
        }

        self.fire(id, Hook::ObjectReceived(&object));
        for other in self.active_ids() {
            if other == id {
                continue;
            }
            let recipient = self.position(id).unwrap_or(index);
            self.fire(
                other,
                Hook::ObjectBoughtNearby {
                    index: recipient,
                    object: &object,
                },
            );
        }

        if object.effect() == ObjectEffect::Faint && self.position(id).is_some() {
            self.faint_pet(id);
        }
        Ok(())
    }

    /// Starts a shop turn; a team still in fight mode is reset first.
    pub fn begin_turn(&mut self) {
        if self.in_fight {
            self.reset();
        }
        self.turn += 1;
        for id in self.active_ids() {
            self.fire(id, Hook::StartTurn);
        }
    }

    /// Fires end-of-turn hooks and snapshots the team for the coming fight.
    pub fn end_turn(&mut self) {
        if self.in_fight {
            self.reset();
        }
        for id in self.active_ids() {
            self.fire(id, Hook::EndTurn);
        }
        self.working = self.pets.clone();
    }

    /// Reorders the team; entries past the team size are ignored and unlisted
    /// pets keep their relative order behind the listed ones.
    pub fn order(&mut self, order: &[usize]) -> Result<()> {
        self.check_shopping("ORDER")?;
        let mut seen = vec![false; self.pets.len()];
        for &index in order.iter().filter(|&&idx| idx < self.pets.len()) {
            if std::mem::replace(&mut seen[index], true) {
                return Err(ArenaError::InvalidIndex {
                    action: "ORDER",
                    index,
                });
            }
        }

        let mut slots: Vec<Option<Pet>> = self.pets.drain(..).map(Some).collect();
        let mut ordered = Vec::with_capacity(slots.len());
        for &index in order {
            if let Some(pet) = slots.get_mut(index).and_then(Option::take) {
                ordered.push(pet);
            }
        }
        ordered.extend(slots.into_iter().flatten());
        self.pets = ordered;
        Ok(())
    }

    /// Drops summon-only pets, restores every pet's stats, re-syncs the
    /// working view from the persistent one and leaves fight mode.
    pub fn reset(&mut self) {
        let dropped = self.working.iter().filter(|pet| pet.is_summoned).count();
        if dropped > 0 {
            debug!(dropped, "discarding summoned pets");
        }
        for pet in &mut self.pets {
            pet.reset_stats();
        }
        self.working = self.pets.clone();
        self.in_fight = false;
    }

    pub(crate) fn fire(&mut self, id: PetId, hook: Hook<'_>) {
        let Some(index) = self.position(id) else {
            return;
        };
        let pet = &self.active()[index];
        let ability = pet.kind().ability();
        let level = pet.level();
        trace!(pet = pet.name(), hook = hook.name(), "hook");
        let mut ctx = HookContext::new(self, id, level);
        ability.trigger(hook, &mut ctx);
    }
}
