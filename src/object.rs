use crate::pet::{Pack, PetKind, Stats};
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ObjectClass {
    /// Consumed as soon as it is given to a pet.
    Food,
    /// Stays equipped on the pet until replaced or the pet is destroyed.
    Item,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ObjectKind {
    Apple,
    Pear,
    SleepingPill,
    MeatBone,
    Garlic,
    Honey,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ObjectEffect {
    /// Permanent stat gain for the recipient.
    Buff(Stats),
    /// Recipient faints once every hook has seen the object.
    Faint,
    /// Extra damage dealt by the holder on each attack.
    AttackBonus(i32),
    /// Damage taken by the holder is reduced, never below 1.
    DamageReduction(i32),
    /// Summoned behind the holder when it faints.
    SummonOnFaint(PetKind),
}

#[derive(Clone, Copy, Debug)]
pub struct ObjectInfo {
    pub kind: ObjectKind,
    pub id: u16,
    pub tier: u8,
    pub pack: Pack,
    pub class: ObjectClass,
    pub effect: ObjectEffect,
}

static OBJECTS: phf::Map<&'static str, ObjectInfo> = phf::phf_map! {
    "Apple" => ObjectInfo {
        kind: ObjectKind::Apple,
        id: 1,
        tier: 1,
        pack: Pack::Standard,
        class: ObjectClass::Food,
        effect: ObjectEffect::Buff(Stats { attack: 1, life: 1 }),
    },
    "Honey" => ObjectInfo {
        kind: ObjectKind::Honey,
        id: 2,
        tier: 1,
        pack: Pack::Standard,
        class: ObjectClass::Item,
        effect: ObjectEffect::SummonOnFaint(PetKind::Bee),
    },
    "MeatBone" => ObjectInfo {
        kind: ObjectKind::MeatBone,
        id: 3,
        tier: 2,
        pack: Pack::Standard,
        class: ObjectClass::Item,
        effect: ObjectEffect::AttackBonus(3),
    },
    "SleepingPill" => ObjectInfo {
        kind: ObjectKind::SleepingPill,
        id: 4,
        tier: 2,
        pack: Pack::Standard,
        class: ObjectClass::Food,
        effect: ObjectEffect::Faint,
    },
    "Garlic" => ObjectInfo {
        kind: ObjectKind::Garlic,
        id: 5,
        tier: 3,
        pack: Pack::Standard,
        class: ObjectClass::Item,
        effect: ObjectEffect::DamageReduction(2),
    },
    "Pear" => ObjectInfo {
        kind: ObjectKind::Pear,
        id: 6,
        tier: 2,
        pack: Pack::Dlc1,
        class: ObjectClass::Food,
        effect: ObjectEffect::Buff(Stats { attack: 2, life: 2 }),
    },
};

impl ObjectKind {
    pub const ALL: [ObjectKind; 6] = [
        ObjectKind::Apple,
        ObjectKind::Pear,
        ObjectKind::SleepingPill,
        ObjectKind::MeatBone,
        ObjectKind::Garlic,
        ObjectKind::Honey,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ObjectKind::Apple => "Apple",
            ObjectKind::Pear => "Pear",
            ObjectKind::SleepingPill => "SleepingPill",
            ObjectKind::MeatBone => "MeatBone",
            ObjectKind::Garlic => "Garlic",
            ObjectKind::Honey => "Honey",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        OBJECTS.get(name).map(|info| info.kind)
    }

    pub fn info(self) -> &'static ObjectInfo {
        &OBJECTS[self.name()]
    }
}

/// A food or item handed to a pet through [`crate::Roster::give_object`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Object {
    kind: ObjectKind,
}

impl Object {
    pub fn new(kind: ObjectKind) -> Self {
        Self { kind }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ObjectKind::from_name(name).map(Self::new)
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn id(&self) -> u16 {
        self.kind.info().id
    }

    pub fn tier(&self) -> u8 {
        self.kind.info().tier
    }

    pub fn pack(&self) -> Pack {
        self.kind.info().pack
    }

    pub fn class(&self) -> ObjectClass {
        self.kind.info().class
    }

    pub fn is_item(&self) -> bool {
        self.class() == ObjectClass::Item
    }

    pub fn is_food(&self) -> bool {
        self.class() == ObjectClass::Food
    }

    pub fn effect(&self) -> ObjectEffect {
        self.kind.info().effect
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
