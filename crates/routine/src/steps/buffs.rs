//! Self buffs that are refreshed by plain use.
use behavior_tree::{Behavior, Status};
use combat_core::{Decision, SlotId};

use crate::context::TickContext;
use crate::spatial::hostiles_near;

/// Buff granted by the short-duration cry.
pub const ENDURANCE_CHARGE: &str = "endurance_charge";
/// Refresh once fewer milliseconds than this remain.
pub const SHORT_BUFF_THRESHOLD_MS: u64 = 5_000;
/// Refresh only with a hostile this close to the agent.
pub const SHORT_BUFF_RADIUS: f32 = 30.0;

pub const BLOOD_RAGE_BUFF: &str = "blood_rage";
pub const RIGHTEOUS_FIRE_BUFF: &str = "righteous_fire";

/// Keeps the short-duration buff up while something is close.
pub struct ShortBuff;

impl ShortBuff {
    pub const NAME: &'static str = "short_buff";
}

impl Behavior<TickContext<'_>> for ShortBuff {
    fn tick(&self, ctx: &mut TickContext<'_>) -> Status {
        let Some(slot) = ctx.layout.enduring_cry else {
            return Status::Pass;
        };
        if !ctx.can_use(slot) {
            return Status::Pass;
        }
        let expiring = ctx.agent.buff_remaining_ms(ENDURANCE_CHARGE) < SHORT_BUFF_THRESHOLD_MS;
        let threatened =
            hostiles_near(ctx.hostiles, ctx.agent.position, SHORT_BUFF_RADIUS, None) > 0;
        if !(expiring && threatened) {
            return Status::Pass;
        }
        cast_on_self(ctx, Self::NAME, slot)
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

/// Casts the non-duration buffs that are missing.
///
/// Blood Rage is only worth its life cost with the target inside combat
/// range. Righteous Fire is kept up unconditionally.
pub struct SelfBuffs;

impl SelfBuffs {
    pub const NAME: &'static str = "self_buffs";
}

impl Behavior<TickContext<'_>> for SelfBuffs {
    fn tick(&self, ctx: &mut TickContext<'_>) -> Status {
        let target_in_range = ctx
            .target
            .as_ref()
            .is_some_and(|target| target.distance < ctx.config.combat_range as f32);

        if let Some(slot) = ctx.layout.blood_rage
            && ctx.can_use(slot)
            && !ctx.agent.has_buff(BLOOD_RAGE_BUFF)
            && target_in_range
        {
            return cast_on_self(ctx, Self::NAME, slot);
        }

        if let Some(slot) = ctx.layout.righteous_fire
            && ctx.can_use(slot)
            && !ctx.agent.has_buff(RIGHTEOUS_FIRE_BUFF)
        {
            return cast_on_self(ctx, Self::NAME, slot);
        }

        Status::Pass
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

fn cast_on_self(ctx: &mut TickContext<'_>, step: &'static str, slot: SlotId) -> Status {
    let result = ctx.use_ability(slot, None, true);
    ctx.finish(
        step,
        Decision::UseAbility {
            slot,
            at: None,
            in_place: true,
        },
        result,
    )
}
