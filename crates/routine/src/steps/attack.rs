//! Primary attack: slot choice, positioning and the cast itself.
use behavior_tree::{Behavior, Status};
use combat_core::{Decision, Rarity, RoutineConfig, SlotId};
use tracing::{debug, info};

use super::AttackPlan;
use crate::context::{TargetSnapshot, TickContext};
use crate::error::ActionError;

/// Hostiles in melee range needed before a melee AoE is preferred.
pub const MELEE_AOE_CROWD: usize = 3;

/// Whether the attack should be area-of-effect and whether it is melee.
///
/// Crowded low-rarity targets call for AoE. Once the target is inside melee
/// range the attack turns melee and the crowd around the agent decides.
pub fn classify(target: &TargetSnapshot, distance: f32, max_melee_range: f32) -> (bool, bool) {
    let mut aoe = target.pack_size > 2 && target.rarity < Rarity::Rare;
    let mut melee = false;
    if distance < max_melee_range {
        melee = true;
        aoe = target.hostiles_in_melee >= MELEE_AOE_CROWD;
    }
    (aoe, melee)
}

/// Picks the attack slot and whether it is melee.
///
/// Walks the four configured slots, preferred kind first, and falls back to
/// the other kind when nothing of the preferred kind can be used. The
/// fallback slot is used unchecked and always counts as melee.
pub fn select_primary(
    config: &RoutineConfig,
    aoe: bool,
    melee: bool,
    usable: impl Fn(SlotId) -> bool,
) -> Option<(SlotId, bool)> {
    let st_melee = (config.single_target_melee_slot, true);
    let st_ranged = (config.single_target_ranged_slot, false);
    let aoe_melee = (config.aoe_melee_slot, true);
    let aoe_ranged = (config.aoe_ranged_slot, false);

    let order = match (aoe, melee) {
        (true, true) => [aoe_melee, st_melee, aoe_ranged, st_ranged],
        (true, false) => [aoe_ranged, st_ranged, aoe_melee, st_melee],
        (false, true) => [st_melee, aoe_melee, st_ranged, aoe_ranged],
        (false, false) => [st_ranged, aoe_ranged, st_melee, aoe_melee],
    };

    order
        .into_iter()
        .find_map(|(slot, is_melee)| slot.filter(|&slot| usable(slot)).map(|slot| (slot, is_melee)))
        .or_else(|| config.fallback_slot.map(|slot| (slot, true)))
}

/// Decides which slot the primary attack uses this tick.
pub struct ChoosePrimary;

impl ChoosePrimary {
    pub const NAME: &'static str = "choose_primary";
}

impl Behavior<TickContext<'_>> for ChoosePrimary {
    fn tick(&self, ctx: &mut TickContext<'_>) -> Status {
        let Some(target) = ctx.target.as_ref() else {
            return Status::Pass;
        };
        let distance = ctx.agent.position.distance(target.position);
        let (aoe, melee) = classify(target, distance, ctx.config.max_melee_range as f32);

        let Some((slot, melee)) = select_primary(ctx.config, aoe, melee, |slot| ctx.can_use(slot))
        else {
            return ctx.fail_idle(Self::NAME, ActionError::NoSlotConfigured);
        };

        debug!(%slot, aoe, melee, "primary attack chosen");
        ctx.attack = Some(AttackPlan {
            slot,
            melee,
            in_place: ctx.config.always_attack_in_place,
        });
        Status::Pass
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

/// Closes in until the target is within reach of the chosen attack.
///
/// A proximity shield forces melee range even for ranged attacks.
pub struct RangeGate;

impl RangeGate {
    pub const NAME: &'static str = "range_gate";
}

impl Behavior<TickContext<'_>> for RangeGate {
    fn tick(&self, ctx: &mut TickContext<'_>) -> Status {
        let (Some(plan), Some(target)) = (ctx.attack, ctx.target.as_ref()) else {
            return Status::Pass;
        };
        let position = target.position;
        let distance = ctx.agent.position.distance(position);
        let reach = if plan.melee || target.proximity_shield {
            ctx.config.max_melee_range
        } else {
            ctx.config.max_range_range
        };
        if distance <= reach as f32 {
            return Status::Pass;
        }

        info!(distance, reach, "moving towards target");
        let result = ctx.move_towards(position);
        ctx.finish(Self::NAME, Decision::MoveTowards(position), result)
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

/// Re-aims an attack that is still being held instead of pressing it again.
pub struct RedirectCast;

impl RedirectCast {
    pub const NAME: &'static str = "redirect_cast";
}

impl Behavior<TickContext<'_>> for RedirectCast {
    fn tick(&self, ctx: &mut TickContext<'_>) -> Status {
        let (Some(plan), Some(target)) = (ctx.attack, ctx.target.as_ref()) else {
            return Status::Pass;
        };
        let position = target.position;
        let holding = ctx.state.cast.is_in_flight(plan.slot)
            && ctx.skill(plan.slot).is_some()
            && ctx.env.is_held_key_down(plan.slot)
            && ctx.agent.is_busy_casting();
        if !holding {
            return Status::Pass;
        }

        ctx.suppress_highlight();
        ctx.env.set_aim(position);
        ctx.finish(Self::NAME, Decision::SetAim(position), Ok(()))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

/// Presses and holds the chosen attack at the target.
pub struct CastPrimary;

impl CastPrimary {
    pub const NAME: &'static str = "cast_primary";
}

impl Behavior<TickContext<'_>> for CastPrimary {
    fn tick(&self, ctx: &mut TickContext<'_>) -> Status {
        let (Some(plan), Some(target)) = (ctx.attack, ctx.target.as_ref()) else {
            return Status::Pass;
        };
        let at = target.position;

        ctx.suppress_highlight();
        if ctx.skill(plan.slot).is_none() {
            return ctx.fail_idle(Self::NAME, ActionError::EmptySlot(plan.slot));
        }

        let result = ctx.hold_ability(plan.slot, at, plan.in_place);
        // Tracked even when refused so the next tick does not re-press blindly.
        ctx.state.cast.begin(plan.slot);
        ctx.finish(
            Self::NAME,
            Decision::HoldAbility {
                slot: plan.slot,
                at,
                in_place: plan.in_place,
            },
            result,
        )
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
