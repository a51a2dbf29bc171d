use super::{Ability, HookContext};
use crate::object::Object;

/// Sell: gives the first two other pets +1 life per level.
pub struct Beaver;

impl Ability for Beaver {
    fn on_sell(&self, ctx: &mut HookContext<'_>) {
        let level = ctx.level() as i32;
        for index in ctx.others().into_iter().take(2) {
            ctx.buff(index, 0, level);
        }
    }
}

/// Buy: gives the pet directly ahead +1/+1 per level.
pub struct Otter;

impl Ability for Otter {
    fn on_buy(&self, ctx: &mut HookContext<'_>) {
        let level = ctx.level() as i32;
        if let Some(index) = ctx.position().and_then(|pos| pos.checked_sub(1)) {
            ctx.buff(index, level, level);
        }
    }
}

/// Eats food: gains +1 attack per level.
pub struct Ladybug;

impl Ability for Ladybug {
    fn on_object_received(&self, ctx: &mut HookContext<'_>, object: &Object) {
        if object.is_food() {
            let level = ctx.level() as i32;
            ctx.buff_self(level, 0);
        }
    }
}

/// End turn: gives the front pet +1 attack per level.
pub struct Bluebird;

impl Ability for Bluebird {
    fn on_end_turn(&self, ctx: &mut HookContext<'_>) {
        let level = ctx.level() as i32;
        if !ctx.pets().is_empty() {
            ctx.buff(0, level, 0);
        }
    }
}

/// Start turn: gains +1 life per level.
pub struct Swan;

impl Ability for Swan {
    fn on_start_turn(&self, ctx: &mut HookContext<'_>) {
        let level = ctx.level() as i32;
        ctx.buff_self(0, level);
    }
}

/// Another pet eats food: that pet gains +1 life per level.
pub struct Rabbit;

impl Ability for Rabbit {
    fn on_object_bought_nearby(&self, ctx: &mut HookContext<'_>, index: usize, object: &Object) {
        if object.is_food() {
            let level = ctx.level() as i32;
            ctx.buff(index, 0, level);
        }
    }
}
