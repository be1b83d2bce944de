use std::time::Duration;

use crate::entity::EntityId;

/// Time-limited exclusion store owned by the host.
pub trait Blacklist {
    fn add(&mut self, id: EntityId, ttl: Duration, reason: &str);

    fn contains(&self, id: EntityId) -> bool;
}
