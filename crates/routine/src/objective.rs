//! Environmental objectives pursued between or around fights.
//!
//! The chain consults an [`ObjectiveHandler`] when there is nothing to fight
//! and again right after a target has been acquired. The stock handler,
//! [`ShrineHandler`], walks to and activates nearby shrines.
use std::collections::HashMap;
use std::time::Duration;

use combat_core::{Candidate, Decision, EntityId, Environment, RoutineConfig};
use tracing::{debug, error, info};

use crate::error::ActionError;
use crate::spatial::{hostiles_along, hostiles_near};

/// What an objective handler did.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectiveAction {
    pub decision: Decision,
    pub result: Result<(), ActionError>,
}

impl ObjectiveAction {
    fn done(decision: Decision) -> Self {
        Self {
            decision,
            result: Ok(()),
        }
    }
}

/// A side objective that may take over a tick.
pub trait ObjectiveHandler {
    fn name(&self) -> &'static str;

    /// Acts on the objective, or returns `None` to leave the tick to combat.
    fn pursue(
        &mut self,
        env: &mut dyn Environment,
        config: &RoutineConfig,
        hostiles: &[Candidate],
    ) -> Option<ObjectiveAction>;

    /// Forgets per-area bookkeeping.
    fn reset(&mut self) {}
}

/// Shrines further than this are ignored.
pub const SHRINE_RADIUS: f32 = 50.0;
/// Interaction attempts before a shrine is given up on.
pub const MAX_SHRINE_TRIES: u32 = 10;
const SHRINE_TTL: Duration = Duration::from_secs(60 * 60);
/// Shrines that spawn allies are worth fighting through a crowd for.
const ALLY_SHRINE: &str = "Skeletons";

/// Walks to and activates the nearest shrine when the way is clear.
#[derive(Debug, Default)]
pub struct ShrineHandler {
    tries: HashMap<EntityId, u32>,
}

impl ShrineHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tries(&self, shrine: EntityId) -> u32 {
        self.tries.get(&shrine).copied().unwrap_or(0)
    }
}

impl ObjectiveHandler for ShrineHandler {
    fn name(&self) -> &'static str {
        "shrines"
    }

    fn pursue(
        &mut self,
        env: &mut dyn Environment,
        config: &RoutineConfig,
        hostiles: &[Candidate],
    ) -> Option<ObjectiveAction> {
        if config.skip_shrines {
            return None;
        }

        let me = env.agent().position;
        let shrine = env
            .shrines()
            .iter()
            .filter(|shrine| !shrine.deactivated && !env.contains(shrine.id))
            .filter(|shrine| shrine.position.distance(me) < SHRINE_RADIUS)
            .min_by(|a, b| {
                a.position
                    .distance(me)
                    .total_cmp(&b.position.distance(me))
            })
            .cloned()?;

        let tries = *self.tries.entry(shrine.id).or_insert(0);
        if tries > MAX_SHRINE_TRIES {
            info!(shrine = %shrine.id, tries, "giving up on shrine");
            env.add(shrine.id, SHRINE_TTL, "Could not interact with the shrine.");
            return Some(ObjectiveAction::done(Decision::NoAction));
        }

        let clear_path = hostiles_along(hostiles, me, shrine.position, 5.0) < 5
            && hostiles_near(hostiles, me, 20.0, None) < 3;
        if !clear_path && shrine.kind != ALLY_SHRINE {
            return None;
        }

        let stay_in_frame = !config.leave_frame;
        let approach = env.walkable_near(shrine.position);
        let path_distance = env.path_distance(me, approach, stay_in_frame);
        if path_distance > SHRINE_RADIUS {
            debug!(shrine = %shrine.id, path_distance, "shrine path too long");
            return None;
        }

        if me.distance(approach) < 20.0 && path_distance < 25.0 {
            debug!(shrine = %shrine.id, "interacting with shrine");
            *self.tries.entry(shrine.id).or_insert(0) += 1;
            let result = if env.interact(shrine.id) {
                Ok(())
            } else {
                Err(ActionError::InteractFailed(shrine.id))
            };
            return Some(ObjectiveAction {
                decision: Decision::Interact(shrine.id),
                result,
            });
        }

        let result = if env.move_towards(approach) {
            Ok(())
        } else {
            error!(shrine = %shrine.id, "move towards shrine failed");
            env.add(shrine.id, SHRINE_TTL, "Could not move towards the shrine.");
            Err(ActionError::MoveFailed(approach))
        };
        Some(ObjectiveAction {
            decision: Decision::MoveTowards(approach),
            result,
        })
    }

    fn reset(&mut self) {
        self.tries.clear();
    }
}
