//! Corpse raising and golem upkeep.
use behavior_tree::{Behavior, Status};
use combat_core::Decision;
use tracing::info;

use crate::context::TickContext;
use crate::spatial::best_corpse;
use crate::state::Throttle;

/// Which corpse ability a [`RaiseCorpse`] step drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorpseRole {
    Spectre,
    Zombie,
}

/// Raises the nearest usable body while under the minion cap.
pub struct RaiseCorpse {
    pub role: CorpseRole,
}

impl RaiseCorpse {
    pub const SPECTRE: Self = Self {
        role: CorpseRole::Spectre,
    };
    pub const ZOMBIE: Self = Self {
        role: CorpseRole::Zombie,
    };

    pub const fn label(&self) -> &'static str {
        match self.role {
            CorpseRole::Spectre => "raise_spectre",
            CorpseRole::Zombie => "raise_zombie",
        }
    }
}

impl Behavior<TickContext<'_>> for RaiseCorpse {
    fn tick(&self, ctx: &mut TickContext<'_>) -> Status {
        let slot = match self.role {
            CorpseRole::Spectre => ctx.layout.raise_spectre,
            CorpseRole::Zombie => ctx.layout.raise_zombie,
        };
        let Some(slot) = slot else {
            return Status::Pass;
        };
        let ready = ctx
            .skill(slot)
            .is_some_and(|skill| skill.usable && skill.under_deploy_cap());
        if !ready {
            return Status::Pass;
        }

        let stay_in_frame = ctx.stay_in_frame();
        let Some(corpse) = best_corpse(ctx.hostiles, ctx.agent.position, &*ctx.env, stay_in_frame)
        else {
            return Status::Pass;
        };

        info!(step = self.label(), corpse = %corpse.id, name = %corpse.name, "raising corpse");
        ctx.suppress_highlight();
        let at = corpse.position;
        let result = ctx.use_ability(slot, Some(at), false);
        ctx.finish(
            self.label(),
            Decision::UseAbility {
                slot,
                at: Some(at),
                in_place: false,
            },
            result,
        )
    }

    fn name(&self) -> &'static str {
        self.label()
    }
}

/// Re-summons the golem on a fixed interval while under its cap.
pub struct SummonGolem;

impl SummonGolem {
    pub const NAME: &'static str = "summon_golem";
}

impl Behavior<TickContext<'_>> for SummonGolem {
    fn tick(&self, ctx: &mut TickContext<'_>) -> Status {
        let Some(slot) = ctx.layout.golem else {
            return Status::Pass;
        };
        if !ctx.state.cooldowns.ready(Throttle::Golem, ctx.now_ms) {
            return Status::Pass;
        }
        let ready = ctx
            .skill(slot)
            .is_some_and(|skill| skill.usable && skill.under_deploy_cap());
        if !ready {
            return Status::Pass;
        }

        ctx.suppress_highlight();
        let at = ctx.agent.position;
        let result = ctx.use_ability(slot, Some(at), true);
        if result.is_ok() {
            ctx.state.cooldowns.record_use(Throttle::Golem, ctx.now_ms);
        }
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
