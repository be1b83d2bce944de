//! Per-tick blackboard shared by the chain steps.
use behavior_tree::Status;
use combat_core::{
    AbilitySlot, AgentState, Candidate, Decision, EntityId, Environment, Position, Rarity,
    RoutineConfig, SlotId,
};
use tracing::{error, info};

use crate::error::ActionError;
use crate::layout::SlotLayout;
use crate::objective::ObjectiveHandler;
use crate::report::TickOutcome;
use crate::spatial::hostiles_near;
use crate::state::RoutineState;
use crate::steps::AttackPlan;

/// Radius around the target used to judge how packed it is.
pub const PACK_RADIUS: f32 = 20.0;

/// The chosen target, frozen when it is acquired.
///
/// Later steps read these values even if the environment changes while
/// earlier actions of the same tick are being carried out.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetSnapshot {
    pub id: EntityId,
    pub name: String,
    pub position: Position,
    /// Where held abilities aim.
    pub aim_point: Position,
    pub rarity: Rarity,
    pub distance: f32,
    pub proximity_shield: bool,
    pub cursable: bool,
    pub curse_count: u32,
    /// Per curse slot: whether that curse is already on the target.
    pub curse_present: Vec<(SlotId, bool)>,
    /// Live hostiles within [`PACK_RADIUS`] of the target.
    pub pack_size: usize,
    /// Live hostiles within melee range of the agent.
    pub hostiles_in_melee: usize,
}

impl TargetSnapshot {
    pub fn capture(
        target: &Candidate,
        hostiles: &[Candidate],
        agent: &AgentState,
        layout: &SlotLayout,
        curse_names: impl Fn(SlotId) -> Option<String>,
        melee_range: f32,
    ) -> Self {
        let curse_present = layout
            .curse_slots
            .iter()
            .map(|&slot| {
                let present = curse_names(slot)
                    .is_some_and(|name| target.curses.has_curse_from(&name));
                (slot, present)
            })
            .collect();

        Self {
            id: target.id,
            name: target.name.clone(),
            position: target.position,
            aim_point: target.aim_point(),
            rarity: target.rarity,
            distance: target.distance,
            proximity_shield: target.proximity_shield,
            cursable: target.curses.cursable,
            curse_count: target.curses.count,
            curse_present,
            pack_size: hostiles_near(hostiles, target.position, PACK_RADIUS, Some(target.id)),
            hostiles_in_melee: hostiles_near(hostiles, agent.position, melee_range, None),
        }
    }

    pub fn has_curse_from(&self, slot: SlotId) -> bool {
        self.curse_present
            .iter()
            .any(|&(curse, present)| curse == slot && present)
    }
}

/// Reachability of the target, filled in by the leash step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reach {
    pub path_distance: f32,
    pub can_see: bool,
    pub blocked_by_door: bool,
}

/// Everything a chain step may read or change during one tick.
pub struct TickContext<'a> {
    pub env: &'a mut dyn Environment,
    pub config: &'a RoutineConfig,
    pub layout: &'a SlotLayout,
    pub state: &'a mut RoutineState,
    pub objectives: &'a mut dyn ObjectiveHandler,
    /// Hostile snapshot taken at the start of the tick.
    pub hostiles: &'a [Candidate],
    /// Best-ranked hostile, if any.
    pub best: Option<&'a Candidate>,
    pub agent: AgentState,
    pub now_ms: u64,
    /// A closed strongbox is close enough for its label to get in the way.
    pub needs_highlight_off: bool,
    pub target: Option<TargetSnapshot>,
    pub reach: Option<Reach>,
    pub attack: Option<AttackPlan>,
    outcome: Option<TickOutcome>,
}

impl<'a> TickContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        env: &'a mut dyn Environment,
        config: &'a RoutineConfig,
        layout: &'a SlotLayout,
        state: &'a mut RoutineState,
        objectives: &'a mut dyn ObjectiveHandler,
        hostiles: &'a [Candidate],
        best: Option<&'a Candidate>,
        now_ms: u64,
    ) -> Self {
        let agent = env.agent().clone();
        Self {
            env,
            config,
            layout,
            state,
            objectives,
            hostiles,
            best,
            agent,
            now_ms,
            needs_highlight_off: false,
            target: None,
            reach: None,
            attack: None,
            outcome: None,
        }
    }

    pub fn with_highlight_flag(mut self, needs_highlight_off: bool) -> Self {
        self.needs_highlight_off = needs_highlight_off;
        self
    }

    /// Whether navigation queries must stay inside the loaded region.
    pub fn stay_in_frame(&self) -> bool {
        !self.config.leave_frame
    }

    pub fn skill(&self, slot: SlotId) -> Option<&AbilitySlot> {
        self.env.slot(slot)
    }

    /// The slot holds an ability that can be used right now.
    pub fn can_use(&self, slot: SlotId) -> bool {
        self.skill(slot).is_some_and(|skill| skill.usable)
    }

    /// Turns the always-highlight overlay off before a targeted cast.
    pub fn suppress_highlight(&mut self) {
        if self.needs_highlight_off && self.env.highlight_enabled() {
            info!("disabling always-highlight to avoid skill use issues");
            self.env.toggle_highlight();
        }
    }

    /// Turns the always-highlight overlay back on.
    pub fn restore_highlight(&mut self) {
        if !self.env.highlight_enabled() {
            info!("enabling always-highlight");
            self.env.toggle_highlight();
        }
    }

    pub fn use_ability(
        &mut self,
        slot: SlotId,
        at: Option<Position>,
        in_place: bool,
    ) -> Result<(), ActionError> {
        self.env.use_ability(slot, at, in_place)?;
        Ok(())
    }

    pub fn hold_ability(
        &mut self,
        slot: SlotId,
        at: Position,
        in_place: bool,
    ) -> Result<(), ActionError> {
        self.env.begin_held_ability(slot, at, in_place)?;
        Ok(())
    }

    pub fn move_towards(&mut self, point: Position) -> Result<(), ActionError> {
        if self.env.move_towards(point) {
            Ok(())
        } else {
            Err(ActionError::MoveFailed(point))
        }
    }

    /// Records the decision of `step` and ends the tick.
    pub fn finish(
        &mut self,
        step: &'static str,
        decision: Decision,
        result: Result<(), ActionError>,
    ) -> Status {
        let outcome = match result {
            Ok(()) if decision.is_no_action() => TickOutcome::Idle { step: Some(step) },
            Ok(()) => {
                info!(step, %decision, "committed");
                TickOutcome::Acted { step, decision }
            }
            Err(error) => {
                error!(step, %decision, %error, "action failed");
                TickOutcome::Failed {
                    step,
                    decision,
                    error,
                }
            }
        };
        self.record(outcome);
        Status::Commit
    }

    /// Ends the tick without acting.
    pub fn idle(&mut self, step: &'static str) -> Status {
        self.record(TickOutcome::Idle { step: Some(step) });
        Status::Commit
    }

    /// Ends the tick without acting because of a misconfiguration or refusal.
    pub fn fail_idle(&mut self, step: &'static str, error: ActionError) -> Status {
        error!(step, %error, "nothing to do");
        self.record(TickOutcome::Failed {
            step,
            decision: Decision::NoAction,
            error,
        });
        Status::Commit
    }

    fn record(&mut self, outcome: TickOutcome) {
        debug_assert!(
            self.outcome.is_none(),
            "outcome already recorded: {:?}",
            self.outcome
        );
        self.outcome = Some(outcome);
    }

    pub fn outcome(&self) -> Option<&TickOutcome> {
        self.outcome.as_ref()
    }

    pub fn into_outcome(self) -> Option<TickOutcome> {
        self.outcome
    }
}
