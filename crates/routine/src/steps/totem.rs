use behavior_tree::{Behavior, Status};
use combat_core::Decision;

use crate::context::TickContext;
use crate::spatial::point_towards;
use crate::state::Throttle;

/// Totems further than this from the agent no longer count against the cap.
pub const TOTEM_RADIUS: f32 = 60.0;

/// Drops a totem halfway to the target once the totem delay has passed.
pub struct PlaceTotem;

impl PlaceTotem {
    pub const NAME: &'static str = "place_totem";
}

impl Behavior<TickContext<'_>> for PlaceTotem {
    fn tick(&self, ctx: &mut TickContext<'_>) -> Status {
        let (Some(slot), Some(target)) = (ctx.layout.totem_slot, ctx.target.as_ref()) else {
            return Status::Pass;
        };
        if !ctx.state.cooldowns.ready(Throttle::Totem, ctx.now_ms) {
            return Status::Pass;
        }

        let me = ctx.agent.position;
        let Some(skill) = ctx.skill(slot) else {
            return Status::Pass;
        };
        let nearby = skill
            .deployed
            .iter()
            .filter(|totem| totem.distance(me) < TOTEM_RADIUS)
            .count();
        if !skill.usable || nearby >= ctx.agent.max_totems as usize {
            return Status::Pass;
        }

        let at = point_towards(me, target.position, target.distance / 2.0);
        ctx.suppress_highlight();
        let result = ctx.use_ability(slot, Some(at), true);
        // Restarted even when the cast was refused.
        ctx.state.cooldowns.record_use(Throttle::Totem, ctx.now_ms);
        ctx.finish(
            Self::NAME,
            Decision::UseAbility {
                slot,
                at: Some(at),
                in_place: true,
            },
            result,
        )
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
