use super::{Ability, HookContext};
use crate::pet::{Pet, PetKind};

/// Faint: gives the pet directly behind +2/+1 per level.
pub struct Ant;

impl Ability for Ant {
    fn on_faint(&self, ctx: &mut HookContext<'_>) {
        let level = ctx.level() as i32;
        if let Some(&index) = ctx.alive_behind(1).first() {
            ctx.buff(index, 2 * level, level);
        }
    }
}

/// Faint: summons a Zombie Cricket with `level`/`level` stats.
pub struct Cricket;

impl Ability for Cricket {
    fn on_faint(&self, ctx: &mut HookContext<'_>) {
        let level = ctx.level() as i32;
        let zombie = Pet::new(PetKind::ZombieCricket).with_stats(level, level);
        if ctx.summon(zombie).is_none() {
            tracing::debug!("no room left for the Zombie Cricket");
        }
    }
}

/// Faint: gives the two pets behind +1/+1 per level.
pub struct Flamingo;

impl Ability for Flamingo {
    fn on_faint(&self, ctx: &mut HookContext<'_>) {
        let level = ctx.level() as i32;
        for index in ctx.alive_behind(2) {
            ctx.buff(index, level, level);
        }
    }
}
