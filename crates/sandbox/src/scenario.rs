//! Scenario format.
//!
//! ```ron
//! (
//!     agent: (position: (x: 0.0, y: 0.0)),
//!     hostiles: [
//!         (id: 1, name: "Goatman", position: (x: 20.0, y: 0.0), rarity: Magic),
//!     ],
//!     skills: [
//!         (id: 10, name: "Fireball", slot: Some(2), tags: "RANGED | SINGLE"),
//!     ],
//! )
//! ```
use std::path::Path;

use combat_core::{AbilitySlot, AgentState, Candidate, Chest, Door, EntityId, Shrine, SlotId};
use serde::{Deserialize, Serialize};

/// Errors raised while parsing a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("invalid scenario: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("duplicate entity id {0}")]
    DuplicateEntity(EntityId),
}

/// A world snapshot plus the knobs that script the environment's answers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub agent: AgentState,
    /// Hostile distances are recomputed from positions on load.
    pub hostiles: Vec<Candidate>,
    pub chests: Vec<Chest>,
    pub shrines: Vec<Shrine>,
    pub doors: Vec<Door>,
    pub skills: Vec<AbilitySlot>,
    /// Whether the always-highlight overlay starts enabled.
    pub highlight: bool,
    /// Clock reading at the start.
    pub start_ms: u64,
    /// Milliseconds the clock advances between ticks when run in a loop.
    pub tick_ms: u64,
    /// Entities no path leads to.
    pub unreachable: Vec<EntityId>,
    /// Entities the agent has no line of sight to.
    pub hidden: Vec<EntityId>,
    /// Walking distance as a multiple of the straight-line distance.
    pub path_factor: Option<f32>,
    /// Slots whose uses the executor refuses.
    pub refused_slots: Vec<SlotId>,
    /// Slots the skill bar refuses to bind into.
    pub locked_slots: Vec<SlotId>,
    /// Binding requests are accepted but never take effect.
    pub ignore_binds: bool,
    pub move_fails: bool,
    pub interact_fails: bool,
}

impl Scenario {
    /// Parse a scenario from RON text.
    pub fn from_ron(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = ron::from_str(text)?;
        scenario.check_ids()?;
        Ok(scenario)
    }

    fn check_ids(&self) -> Result<(), ScenarioError> {
        let mut seen = std::collections::HashSet::new();
        let ids = self
            .hostiles
            .iter()
            .map(|hostile| hostile.id)
            .chain(self.chests.iter().map(|chest| chest.id))
            .chain(self.shrines.iter().map(|shrine| shrine.id))
            .chain(self.doors.iter().map(|door| door.id));
        for id in ids {
            if !seen.insert(id) {
                return Err(ScenarioError::DuplicateEntity(id));
            }
        }
        Ok(())
    }
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> anyhow::Result<Scenario> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))?;
        Scenario::from_ron(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse scenario RON at {}: {}", path.display(), e)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use combat_core::{Rarity, SkillTags};

    use super::*;

    const SAMPLE: &str = r#"
(
    agent: (position: (x: 0.0, y: 0.0), max_totems: 2),
    hostiles: [
        (id: 1, name: "Goatman", position: (x: 20.0, y: 0.0), rarity: Magic),
        (id: 2, name: "Goatman Shaman", position: (x: 25.0, y: 5.0)),
    ],
    skills: [
        (id: 10, name: "Fireball", slot: Some(2), tags: "RANGED | SINGLE"),
    ],
    unreachable: [2],
    tick_ms: 250,
)
"#;

    #[test]
    fn parses_sample() {
        let scenario = Scenario::from_ron(SAMPLE).unwrap();
        assert_eq!(scenario.agent.max_totems, 2);
        assert_eq!(scenario.agent.total_curses_allowed, 1);
        assert_eq!(scenario.hostiles.len(), 2);
        assert_eq!(scenario.hostiles[0].rarity, Rarity::Magic);
        assert_eq!(scenario.skills[0].slot, Some(SlotId(2)));
        assert_eq!(scenario.skills[0].tags, SkillTags::RANGED | SkillTags::SINGLE);
        assert!(scenario.skills[0].usable);
        assert_eq!(scenario.unreachable, vec![EntityId(2)]);
        assert_eq!(scenario.tick_ms, 250);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let text = r#"(hostiles: [(id: 1), (id: 1)])"#;
        assert!(matches!(
            Scenario::from_ron(text),
            Err(ScenarioError::DuplicateEntity(EntityId(1)))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let scenario = ScenarioLoader::load(file.path()).unwrap();
        assert_eq!(scenario.hostiles[1].name, "Goatman Shaman");
    }

    #[test]
    fn demo_pack_parses() {
        let scenario = Scenario::from_ron(include_str!("../../../demos/pack.ron")).unwrap();
        assert_eq!(scenario.tick_ms, 250);
        assert_eq!(scenario.shrines[0].kind, "Skeletons");
        assert!(scenario.chests[0].strongbox);
    }
}
