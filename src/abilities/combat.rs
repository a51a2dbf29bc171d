use super::{Ability, HookContext};

/// Before attacking, deals 1 damage to up to `level` alive pets behind it.
pub struct Elephant;

impl Ability for Elephant {
    fn on_before_attack(&self, ctx: &mut HookContext<'_>) {
        let targets = ctx.alive_behind(ctx.level() as usize);
        tracing::debug!(
            level = ctx.level(),
            hit = targets.len(),
            "Elephant hits the pets behind it"
        );
        for index in targets {
            ctx.damage(index, 1);
        }
    }
}
