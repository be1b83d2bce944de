use behavior_tree::{Behavior, Status};
use combat_core::{Decision, SkillTags};
use tracing::debug;

use crate::context::TickContext;
use crate::state::Throttle;

/// Fires the first charged (vaal) ability that is ready at the target.
///
/// The bar is scanned at most once per throttle interval; the interval
/// restarts only after a scan that found nothing to fire.
pub struct CastVaal;

impl CastVaal {
    pub const NAME: &'static str = "cast_vaal";
}

impl Behavior<TickContext<'_>> for CastVaal {
    fn tick(&self, ctx: &mut TickContext<'_>) -> Status {
        if !ctx.config.auto_cast_vaal_skills {
            return Status::Pass;
        }
        let Some(at) = ctx.target.as_ref().map(|target| target.position) else {
            return Status::Pass;
        };
        if !ctx.state.cooldowns.ready(Throttle::Vaal, ctx.now_ms) {
            return Status::Pass;
        }

        let ready = ctx
            .env
            .skills()
            .iter()
            .filter(|skill| skill.tags.contains(SkillTags::VAAL) && skill.usable)
            .find_map(|skill| skill.slot.map(|slot| (slot, skill.name.clone())));

        let Some((slot, name)) = ready else {
            ctx.state.cooldowns.record_use(Throttle::Vaal, ctx.now_ms);
            return Status::Pass;
        };

        debug!(%slot, skill = %name, "casting vaal skill");
        ctx.suppress_highlight();
        let result = ctx.use_ability(slot, Some(at), false);
        ctx.finish(
            Self::NAME,
            Decision::UseAbility {
                slot,
                at: Some(at),
                in_place: false,
            },
            result,
        )
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
