//! Burst-summoned minions.
use behavior_tree::{Behavior, Status};
use combat_core::{Decision, SlotId};
use tracing::debug;

use crate::context::TickContext;
use crate::state::Throttle;

/// Summons raging spirits, then skeletons, in bursts at the target.
///
/// Each attempt counts towards the burst window whether or not the cast goes
/// through. Both abilities are held rather than tapped.
pub struct BurstSummons;

impl BurstSummons {
    pub const NAME: &'static str = "burst_summons";
}

impl Behavior<TickContext<'_>> for BurstSummons {
    fn tick(&self, ctx: &mut TickContext<'_>) -> Status {
        let Some(aim) = ctx.target.as_ref().map(|target| target.aim_point) else {
            return Status::Pass;
        };

        let bursts = [
            (ctx.layout.raging_spirits, Throttle::RagingSpirits),
            (ctx.layout.skeletons, Throttle::Skeletons),
        ];
        for (slot, throttle) in bursts {
            let Some(slot) = slot else {
                continue;
            };
            if ready(ctx, slot, throttle) {
                let count = ctx.state.cooldowns.record_burst(throttle, ctx.now_ms);
                debug!(%slot, %throttle, count, "burst summon");
                ctx.env.clear_key_states();
                let result = ctx.hold_ability(slot, aim, false);
                return ctx.finish(
                    Self::NAME,
                    Decision::HoldAbility {
                        slot,
                        at: aim,
                        in_place: false,
                    },
                    result,
                );
            }
        }
        Status::Pass
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

fn ready(ctx: &TickContext<'_>, slot: SlotId, throttle: Throttle) -> bool {
    ctx.state.cooldowns.burst_ready(throttle, ctx.now_ms)
        && ctx
            .skill(slot)
            .is_some_and(|skill| skill.usable && skill.under_deploy_cap())
}
