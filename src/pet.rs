use crate::abilities::{self, Ability};
use crate::object::{Object, ObjectEffect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Experience needed to reach level 2 and level 3.
const LEVEL_THRESHOLDS: [u8; 2] = [2, 5];
pub const MAX_EXP: u8 = 5;
pub const MAX_LEVEL: u8 = 3;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub attack: i32,
    pub life: i32,
}

impl Stats {
    pub const fn new(attack: i32, life: i32) -> Self {
        Stats { attack, life }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Pack {
    Standard = 1,
    Dlc1 = 2,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PetKind {
    Ant,
    Beaver,
    Cricket,
    ZombieCricket,
    Otter,
    Ladybug,
    Bluebird,
    Elephant,
    Flamingo,
    Swan,
    Rabbit,
    Bee,
}

#[derive(Clone, Copy, Debug)]
pub struct SpeciesInfo {
    pub kind: PetKind,
    pub id: u16,
    pub tier: u8,
    pub pack: Pack,
    pub stats: Stats,
}

static SPECIES: phf::Map<&'static str, SpeciesInfo> = phf::phf_map! {
    "Ant" => SpeciesInfo { kind: PetKind::Ant, id: 1, tier: 1, pack: Pack::Standard, stats: Stats::new(2, 1) },
    "Beaver" => SpeciesInfo { kind: PetKind::Beaver, id: 2, tier: 1, pack: Pack::Standard, stats: Stats::new(3, 2) },
    "Cricket" => SpeciesInfo { kind: PetKind::Cricket, id: 3, tier: 1, pack: Pack::Standard, stats: Stats::new(1, 2) },
    "ZombieCricket" => SpeciesInfo { kind: PetKind::ZombieCricket, id: 4, tier: 1, pack: Pack::Standard, stats: Stats::new(1, 1) },
    "Otter" => SpeciesInfo { kind: PetKind::Otter, id: 5, tier: 1, pack: Pack::Standard, stats: Stats::new(1, 2) },
    "Ladybug" => SpeciesInfo { kind: PetKind::Ladybug, id: 6, tier: 1, pack: Pack::Dlc1, stats: Stats::new(1, 3) },
    "Bluebird" => SpeciesInfo { kind: PetKind::Bluebird, id: 7, tier: 1, pack: Pack::Dlc1, stats: Stats::new(2, 1) },
    "Flamingo" => SpeciesInfo { kind: PetKind::Flamingo, id: 16, tier: 2, pack: Pack::Standard, stats: Stats::new(4, 2) },
    "Swan" => SpeciesInfo { kind: PetKind::Swan, id: 17, tier: 2, pack: Pack::Standard, stats: Stats::new(1, 3) },
    "Elephant" => SpeciesInfo { kind: PetKind::Elephant, id: 18, tier: 2, pack: Pack::Standard, stats: Stats::new(3, 5) },
    "Rabbit" => SpeciesInfo { kind: PetKind::Rabbit, id: 24, tier: 3, pack: Pack::Standard, stats: Stats::new(3, 2) },
    "Bee" => SpeciesInfo { kind: PetKind::Bee, id: 90, tier: 1, pack: Pack::Standard, stats: Stats::new(1, 1) },
};

impl PetKind {
    pub const ALL: [PetKind; 12] = [
        PetKind::Ant,
        PetKind::Beaver,
        PetKind::Cricket,
        PetKind::ZombieCricket,
        PetKind::Otter,
        PetKind::Ladybug,
        PetKind::Bluebird,
        PetKind::Elephant,
        PetKind::Flamingo,
        PetKind::Swan,
        PetKind::Rabbit,
        PetKind::Bee,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            PetKind::Ant => "Ant",
            PetKind::Beaver => "Beaver",
            PetKind::Cricket => "Cricket",
            PetKind::ZombieCricket => "ZombieCricket",
            PetKind::Otter => "Otter",
            PetKind::Ladybug => "Ladybug",
            PetKind::Bluebird => "Bluebird",
            PetKind::Elephant => "Elephant",
            PetKind::Flamingo => "Flamingo",
            PetKind::Swan => "Swan",
            PetKind::Rabbit => "Rabbit",
            PetKind::Bee => "Bee",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        SPECIES.get(name).map(|info| info.kind)
    }

    pub fn info(self) -> &'static SpeciesInfo {
        &SPECIES[self.name()]
    }

    pub fn ability(self) -> &'static dyn Ability {
        abilities::for_kind(self)
    }
}

/// Roster-local handle of a pet. Stable across both views of a roster.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PetId(pub(crate) u32);

#[derive(Clone, Debug, PartialEq)]
pub struct Pet {
    pub(crate) id: PetId,
    kind: PetKind,
    // Permanent stats, restored by `reset_stats`.
    stats: Stats,
    current: Stats,
    exp: u8,
    item: Option<Object>,
    pub(crate) is_summoned: bool,
}

impl Pet {
    pub fn new(kind: PetKind) -> Self {
        let stats = kind.info().stats;
        Pet {
            id: PetId::default(),
            kind,
            stats,
            current: stats,
            exp: 0,
            item: None,
            is_summoned: false,
        }
    }

    pub fn with_stats(mut self, attack: i32, life: i32) -> Self {
        self.stats = Stats::new(attack, life);
        self.current = self.stats;
        self
    }

    pub fn with_exp(mut self, exp: u8) -> Self {
        self.exp = exp.min(MAX_EXP);
        self
    }

    pub fn with_level(self, level: u8) -> Self {
        self.with_exp(exp_for_level(level))
    }

    pub fn with_item(mut self, item: Object) -> Self {
        if item.is_item() {
            self.item = Some(item);
        }
        self
    }

    pub fn id(&self) -> PetId {
        self.id
    }

    pub fn kind(&self) -> PetKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn species_id(&self) -> u16 {
        self.kind.info().id
    }

    pub fn tier(&self) -> u8 {
        self.kind.info().tier
    }

    pub fn pack(&self) -> Pack {
        self.kind.info().pack
    }

    /// Current attack.
    pub fn attack(&self) -> i32 {
        self.current.attack
    }

    /// Current life; zero or below means fainted.
    pub fn life(&self) -> i32 {
        self.current.life
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn current(&self) -> Stats {
        self.current
    }

    pub fn exp(&self) -> u8 {
        self.exp
    }

    pub fn level(&self) -> u8 {
        1 + LEVEL_THRESHOLDS.iter().filter(|&&t| self.exp >= t).count() as u8
    }

    pub fn item(&self) -> Option<&Object> {
        self.item.as_ref()
    }

    pub fn is_alive(&self) -> bool {
        self.current.life > 0
    }

    pub fn is_summoned(&self) -> bool {
        self.is_summoned
    }

    /// `attack/life` with both values clamped at zero.
    pub fn disp_stats(&self) -> String {
        format!("{}/{}", self.current.attack.max(0), self.current.life.max(0))
    }

    /// Damage dealt by one attack, held item included.
    pub fn damage(&self) -> i32 {
        match self.item.map(|item| item.effect()) {
            Some(ObjectEffect::AttackBonus(bonus)) => self.current.attack + bonus,
            _ => self.current.attack,
        }
    }

    /// Applies incoming damage and returns what was actually taken.
    pub(crate) fn take_damage(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let taken = match self.item.map(|item| item.effect()) {
            Some(ObjectEffect::DamageReduction(reduction)) => (amount - reduction).max(1),
            _ => amount,
        };
        self.current.life -= taken;
        taken
    }

    /// Permanent buffs also raise the stats restored after a fight.
    pub(crate) fn buff(&mut self, attack: i32, life: i32, permanent: bool) {
        self.current.attack += attack;
        self.current.life += life;
        if permanent {
            self.stats.attack += attack;
            self.stats.life += life;
        }
    }

    /// Equips an item and hands back the one it replaces.
    pub(crate) fn equip(&mut self, item: Object) -> Option<Object> {
        self.item.replace(item)
    }

    /// Merges a same-species pet into this one.
    ///
    /// Each permanent stat becomes the larger of the two plus one; experience
    /// adds up plus one for the merge itself. The other pet's item is dropped.
    pub(crate) fn absorb(&mut self, other: Pet) {
        self.stats.attack = self.stats.attack.max(other.stats.attack) + 1;
        self.stats.life = self.stats.life.max(other.stats.life) + 1;
        self.exp = (self.exp + other.exp + 1).min(MAX_EXP);
        self.reset_stats();
    }

    pub(crate) fn reset_stats(&mut self) {
        self.current = self.stats;
    }

    pub(crate) fn restore(kind: PetKind, stats: Stats, level: u8, item: Option<Object>) -> Self {
        Pet {
            id: PetId::default(),
            kind,
            stats,
            current: stats,
            exp: exp_for_level(level),
            item,
            is_summoned: false,
        }
    }
}

impl fmt::Display for Pet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} lvl{}", self.name(), self.disp_stats(), self.level())
    }
}

/// Smallest experience value giving `level`.
pub fn exp_for_level(level: u8) -> u8 {
    match level {
        0 | 1 => 0,
        2 => LEVEL_THRESHOLDS[0],
        _ => LEVEL_THRESHOLDS[1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectKind;

    #[test]
    fn every_kind_has_a_table_entry() {
        for kind in PetKind::ALL {
            assert_eq!(PetKind::from_name(kind.name()), Some(kind));
            assert_eq!(kind.info().kind, kind);
        }
        assert_eq!(PetKind::Elephant.info().id, 18);
        assert_eq!(PetKind::Elephant.info().stats, Stats::new(3, 5));
    }

    #[test]
    fn level_follows_experience() {
        let pet = Pet::new(PetKind::Ant);
        assert_eq!(pet.level(), 1);
        assert_eq!(pet.clone().with_exp(1).level(), 1);
        assert_eq!(pet.clone().with_exp(2).level(), 2);
        assert_eq!(pet.clone().with_exp(4).level(), 2);
        assert_eq!(pet.clone().with_exp(5).level(), 3);
        assert_eq!(pet.with_exp(200).exp(), MAX_EXP);
        for level in 1..=MAX_LEVEL {
            assert_eq!(Pet::new(PetKind::Ant).with_level(level).level(), level);
        }
    }

    #[test]
    fn garlic_reduces_damage_but_never_below_one() {
        let mut pet = Pet::new(PetKind::Elephant).with_item(Object::new(ObjectKind::Garlic));
        assert_eq!(pet.take_damage(5), 3);
        assert_eq!(pet.take_damage(1), 1);
        assert_eq!(pet.life(), 1);
    }

    #[test]
    fn meat_bone_adds_damage() {
        let pet = Pet::new(PetKind::Ant).with_item(Object::new(ObjectKind::MeatBone));
        assert_eq!(pet.damage(), 5);
    }

    #[test]
    fn temporary_buffs_vanish_on_reset() {
        let mut pet = Pet::new(PetKind::Swan);
        pet.buff(1, 1, true);
        pet.buff(5, 5, false);
        assert_eq!(pet.current(), Stats::new(7, 9));
        pet.reset_stats();
        assert_eq!(pet.current(), Stats::new(2, 4));
    }

    #[test]
    fn absorb_takes_the_best_stats_plus_one() {
        let mut dst = Pet::new(PetKind::Ant).with_stats(2, 5);
        let src = Pet::new(PetKind::Ant).with_stats(4, 1).with_exp(1);
        dst.absorb(src);
        assert_eq!(dst.stats(), Stats::new(5, 6));
        assert_eq!(dst.exp(), 2);
        assert_eq!(dst.level(), 2);
    }
}
