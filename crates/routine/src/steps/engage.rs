//! Target acquisition and the checks that gate engaging it.
use std::time::Duration;

use behavior_tree::{Behavior, Status};
use combat_core::Decision;
use tracing::{debug, error, info};

use crate::context::{Reach, TargetSnapshot, TickContext};
use crate::spatial::{SEGMENT_STRIDE, closed_door_between};

/// Unreachable targets are skipped for this long.
pub const UNREACHABLE_TTL: Duration = Duration::from_secs(60);
/// Doors within this distance of the line to the target block it.
pub const DOOR_RADIUS: f32 = 10.0;

/// Freezes the best-ranked hostile for the rest of the tick.
///
/// Without a target the objective handler gets the tick; if it has nothing
/// to do either, the tick ends idle and any held ability is released.
pub struct AcquireTarget;

impl AcquireTarget {
    pub const NAME: &'static str = "acquire_target";
}

impl Behavior<TickContext<'_>> for AcquireTarget {
    fn tick(&self, ctx: &mut TickContext<'_>) -> Status {
        let Some(best) = ctx.best else {
            if let Some(status) = pursue_objective(ctx) {
                return status;
            }
            ctx.restore_highlight();
            if let Some(slot) = ctx.state.cast.clear() {
                debug!(%slot, "releasing held ability");
                ctx.env.clear_key_states();
            }
            return ctx.idle(Self::NAME);
        };

        let env = &*ctx.env;
        let snapshot = TargetSnapshot::capture(
            best,
            ctx.hostiles,
            &ctx.agent,
            ctx.layout,
            |slot| env.slot(slot).map(|skill| skill.name.clone()),
            ctx.config.max_melee_range as f32,
        );
        debug!(
            target = %snapshot.id,
            name = %snapshot.name,
            distance = snapshot.distance,
            pack = snapshot.pack_size,
            "target acquired"
        );
        ctx.target = Some(snapshot);

        pursue_objective(ctx).unwrap_or(Status::Pass)
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

fn pursue_objective(ctx: &mut TickContext<'_>) -> Option<Status> {
    let action = ctx
        .objectives
        .pursue(&mut *ctx.env, ctx.config, ctx.hostiles)?;
    let step = ctx.objectives.name();
    Some(ctx.finish(step, action.decision, action.result))
}

/// Drops targets that cannot be walked to or are too far by path.
pub struct LeashGate;

impl LeashGate {
    pub const NAME: &'static str = "leash_gate";
}

impl Behavior<TickContext<'_>> for LeashGate {
    fn tick(&self, ctx: &mut TickContext<'_>) -> Status {
        let Some(target) = ctx.target.as_ref() else {
            return Status::Pass;
        };
        let (id, position) = (target.id, target.position);

        let me = ctx.agent.position;
        let stay_in_frame = ctx.stay_in_frame();
        let reach = Reach {
            path_distance: ctx.env.path_distance(me, position, stay_in_frame),
            can_see: ctx.env.can_see(me, position, stay_in_frame),
            blocked_by_door: closed_door_between(
                ctx.env.doors(),
                me,
                position,
                DOOR_RADIUS,
                SEGMENT_STRIDE,
            ),
        };
        ctx.reach = Some(reach);

        if reach.path_distance.is_infinite() {
            error!(
                target = %id,
                "could not determine the path distance to the target, blacklisting it"
            );
            ctx.env.add(id, UNREACHABLE_TTL, "Unable to pathfind to.");
            return ctx.idle(Self::NAME);
        }

        if reach.path_distance > ctx.config.combat_range as f32 {
            debug!(
                target = %id,
                path_distance = reach.path_distance,
                "target is outside combat range by path"
            );
            ctx.restore_highlight();
            return ctx.idle(Self::NAME);
        }

        Status::Pass
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

/// Walks towards a target that is out of sight or behind a closed door.
pub struct ApproachHidden;

impl ApproachHidden {
    pub const NAME: &'static str = "approach_hidden";
}

impl Behavior<TickContext<'_>> for ApproachHidden {
    fn tick(&self, ctx: &mut TickContext<'_>) -> Status {
        let (Some(target), Some(reach)) = (ctx.target.as_ref(), ctx.reach) else {
            return Status::Pass;
        };
        if reach.can_see && !reach.blocked_by_door {
            return Status::Pass;
        }

        let position = target.position;
        info!(
            target = %target.name,
            can_see = reach.can_see,
            path_distance = reach.path_distance,
            blocked_by_door = reach.blocked_by_door,
            "moving towards hidden target"
        );
        let result = ctx.move_towards(position);
        ctx.finish(Self::NAME, Decision::MoveTowards(position), result)
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
