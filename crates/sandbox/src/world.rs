//! The scripted environment.
use std::collections::HashMap;
use std::time::Duration;

use combat_core::{
    AbilitySlot, AgentState, BindError, Blacklist, Candidate, Chest, Clock, Door, EntityId,
    Executor, Navigator, Position, Shrine, SkillCatalog, SlotId, UseError, WorldView,
};
use tracing::{debug, trace};

use crate::scenario::Scenario;

/// An executor or navigator call, in the order it was made.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Use {
        slot: SlotId,
        at: Option<Position>,
        in_place: bool,
    },
    Hold {
        slot: SlotId,
        at: Position,
        in_place: bool,
    },
    SetAim(Position),
    MoveTowards(Position),
    Interact(EntityId),
    ClearKeys,
    ToggleHighlight,
    Wait(u64),
    Assign { slot: SlotId, ability: u32 },
}

#[derive(Clone, Debug)]
struct BlacklistEntry {
    until_ms: u64,
    reason: String,
}

/// In-memory world driven by a [`Scenario`].
#[derive(Clone, Debug)]
pub struct ScriptedWorld {
    scenario: Scenario,
    now_ms: u64,
    held: Option<SlotId>,
    blacklist: HashMap<EntityId, BlacklistEntry>,
    calls: Vec<Call>,
}

impl Default for ScriptedWorld {
    fn default() -> Self {
        Self::new(Scenario::default())
    }
}

impl ScriptedWorld {
    pub fn new(scenario: Scenario) -> Self {
        let mut world = Self {
            now_ms: scenario.start_ms,
            scenario,
            held: None,
            blacklist: HashMap::new(),
            calls: Vec::new(),
        };
        world.refresh_distances();
        world
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Moves the clock forward.
    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Returns and forgets the calls recorded so far.
    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    /// Why `id` is blacklisted, if it still is.
    pub fn blacklist_reason(&self, id: EntityId) -> Option<&str> {
        self.blacklist
            .get(&id)
            .filter(|entry| entry.until_ms > self.now_ms)
            .map(|entry| entry.reason.as_str())
    }

    pub fn agent_mut(&mut self) -> &mut AgentState {
        &mut self.scenario.agent
    }

    /// Moves the agent, keeping hostile distances consistent.
    pub fn set_agent_position(&mut self, position: Position) {
        self.scenario.agent.position = position;
        self.refresh_distances();
    }

    pub fn add_hostile(&mut self, mut hostile: Candidate) {
        hostile.distance = hostile.position.distance(self.scenario.agent.position);
        self.scenario.hostiles.push(hostile);
    }

    pub fn hostile_mut(&mut self, id: EntityId) -> Option<&mut Candidate> {
        self.scenario.hostiles.iter_mut().find(|hostile| hostile.id == id)
    }

    pub fn clear_hostiles(&mut self) {
        self.scenario.hostiles.clear();
    }

    pub fn add_skill(&mut self, skill: AbilitySlot) {
        self.scenario.skills.push(skill);
    }

    pub fn skill_mut(&mut self, id: u32) -> Option<&mut AbilitySlot> {
        self.scenario.skills.iter_mut().find(|skill| skill.id == id)
    }

    pub fn add_chest(&mut self, chest: Chest) {
        self.scenario.chests.push(chest);
    }

    pub fn add_shrine(&mut self, shrine: Shrine) {
        self.scenario.shrines.push(shrine);
    }

    pub fn add_door(&mut self, door: Door) {
        self.scenario.doors.push(door);
    }

    pub fn set_highlight(&mut self, enabled: bool) {
        self.scenario.highlight = enabled;
    }

    /// Scripts the navigator to find no path to `id`.
    pub fn set_unreachable(&mut self, id: EntityId) {
        self.scenario.unreachable.push(id);
    }

    /// Scripts the navigator to report no line of sight to `id`.
    pub fn set_hidden(&mut self, id: EntityId) {
        self.scenario.hidden.push(id);
    }

    pub fn set_path_factor(&mut self, factor: f32) {
        self.scenario.path_factor = Some(factor);
    }

    /// Scripts the executor to refuse uses of `slot`.
    pub fn refuse_slot(&mut self, slot: SlotId) {
        self.scenario.refused_slots.push(slot);
    }

    pub fn set_ignore_binds(&mut self, ignore: bool) {
        self.scenario.ignore_binds = ignore;
    }

    pub fn set_move_fails(&mut self, fails: bool) {
        self.scenario.move_fails = fails;
    }

    pub fn set_interact_fails(&mut self, fails: bool) {
        self.scenario.interact_fails = fails;
    }

    fn refresh_distances(&mut self) {
        let me = self.scenario.agent.position;
        for hostile in &mut self.scenario.hostiles {
            hostile.distance = hostile.position.distance(me);
        }
    }

    /// The hostile or shrine standing exactly at `point`.
    fn entity_at(&self, point: Position) -> Option<EntityId> {
        self.scenario
            .hostiles
            .iter()
            .map(|hostile| (hostile.id, hostile.position))
            .chain(
                self.scenario
                    .shrines
                    .iter()
                    .map(|shrine| (shrine.id, shrine.position)),
            )
            .find(|(_, position)| *position == point)
            .map(|(id, _)| id)
    }

    fn check_use(&self, slot: SlotId) -> Result<(), UseError> {
        let skill = self.slot(slot).ok_or(UseError::EmptySlot(slot))?;
        if self.scenario.refused_slots.contains(&slot) {
            return Err(UseError::Rejected(format!("scripted refusal of {slot}")));
        }
        if !skill.usable {
            return Err(UseError::NotUsable(slot));
        }
        Ok(())
    }
}

impl WorldView for ScriptedWorld {
    fn agent(&self) -> &AgentState {
        &self.scenario.agent
    }

    fn hostiles(&self) -> &[Candidate] {
        &self.scenario.hostiles
    }

    fn chests(&self) -> &[Chest] {
        &self.scenario.chests
    }

    fn shrines(&self) -> &[Shrine] {
        &self.scenario.shrines
    }

    fn doors(&self) -> &[Door] {
        &self.scenario.doors
    }

    fn highlight_enabled(&self) -> bool {
        self.scenario.highlight
    }
}

impl Navigator for ScriptedWorld {
    fn path_distance(&self, from: Position, to: Position, _stay_in_frame: bool) -> f32 {
        if self
            .entity_at(to)
            .is_some_and(|id| self.scenario.unreachable.contains(&id))
        {
            return f32::INFINITY;
        }
        from.distance(to) * self.scenario.path_factor.unwrap_or(1.0)
    }

    fn can_see(&self, _from: Position, to: Position, _stay_in_frame: bool) -> bool {
        !self
            .entity_at(to)
            .is_some_and(|id| self.scenario.hidden.contains(&id))
    }

    fn move_towards(&mut self, point: Position) -> bool {
        self.calls.push(Call::MoveTowards(point));
        !self.scenario.move_fails
    }
}

impl Executor for ScriptedWorld {
    fn use_ability(
        &mut self,
        slot: SlotId,
        at: Option<Position>,
        in_place: bool,
    ) -> Result<(), UseError> {
        self.check_use(slot)?;
        debug!(%slot, ?at, in_place, "use");
        self.calls.push(Call::Use { slot, at, in_place });
        Ok(())
    }

    fn begin_held_ability(
        &mut self,
        slot: SlotId,
        at: Position,
        in_place: bool,
    ) -> Result<(), UseError> {
        self.check_use(slot)?;
        debug!(%slot, ?at, in_place, "hold");
        self.held = Some(slot);
        self.calls.push(Call::Hold { slot, at, in_place });
        Ok(())
    }

    fn set_aim(&mut self, at: Position) {
        self.calls.push(Call::SetAim(at));
    }

    fn is_held_key_down(&self, slot: SlotId) -> bool {
        self.held == Some(slot)
    }

    fn clear_key_states(&mut self) {
        self.held = None;
        self.calls.push(Call::ClearKeys);
    }

    fn interact(&mut self, target: EntityId) -> bool {
        self.calls.push(Call::Interact(target));
        !self.scenario.interact_fails
    }

    fn toggle_highlight(&mut self) {
        self.scenario.highlight = !self.scenario.highlight;
        self.calls.push(Call::ToggleHighlight);
    }

    fn wait(&mut self, ms: u64) {
        self.now_ms += ms;
        self.calls.push(Call::Wait(ms));
    }
}

impl Blacklist for ScriptedWorld {
    fn add(&mut self, id: EntityId, ttl: Duration, reason: &str) {
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        debug!(%id, ttl_ms, reason, "blacklisted");
        self.blacklist.insert(
            id,
            BlacklistEntry {
                until_ms: self.now_ms.saturating_add(ttl_ms),
                reason: reason.to_owned(),
            },
        );
    }

    fn contains(&self, id: EntityId) -> bool {
        self.blacklist_reason(id).is_some()
    }
}

impl SkillCatalog for ScriptedWorld {
    fn skills(&self) -> &[AbilitySlot] {
        &self.scenario.skills
    }

    fn assign(&mut self, slot: SlotId, id: u32) -> Result<(), BindError> {
        self.calls.push(Call::Assign { slot, ability: id });
        if self.scenario.locked_slots.contains(&slot) {
            return Err(BindError::SlotRejected(slot));
        }
        if !self.scenario.skills.iter().any(|skill| skill.id == id) {
            return Err(BindError::UnknownAbility(id));
        }
        if self.scenario.ignore_binds {
            trace!(%slot, id, "bind ignored");
            return Ok(());
        }
        for skill in &mut self.scenario.skills {
            if skill.id == id {
                skill.slot = Some(slot);
            } else if skill.slot == Some(slot) {
                skill.slot = None;
            }
        }
        Ok(())
    }
}

impl Clock for ScriptedWorld {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}
