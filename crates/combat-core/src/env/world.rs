use crate::entity::{AgentState, Candidate, Chest, Door, EntityId, Shrine};

/// Read-only enumeration of the world around the agent.
pub trait WorldView {
    fn agent(&self) -> &AgentState;

    /// Every hostile the host knows about, alive or dead, in enumeration order.
    fn hostiles(&self) -> &[Candidate];

    fn chests(&self) -> &[Chest];

    fn shrines(&self) -> &[Shrine];

    fn doors(&self) -> &[Door];

    /// Bodies left behind by dead hostiles.
    fn corpses(&self) -> Vec<&Candidate> {
        self.hostiles()
            .iter()
            .filter(|candidate| candidate.is_active_dead())
            .collect()
    }

    fn hostile(&self, id: EntityId) -> Option<&Candidate> {
        self.hostiles().iter().find(|candidate| candidate.id == id)
    }

    /// Whether the always-highlight overlay is currently on.
    fn highlight_enabled(&self) -> bool;
}
