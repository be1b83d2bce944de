//! In-flight held ability tracking.
use crate::skill::SlotId;

/// The ability currently held down, if any.
///
/// Holding a new slot replaces the previous one, so two slots are never in
/// flight at the same time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CastState {
    in_flight: Option<SlotId>,
}

impl CastState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, slot: SlotId) {
        self.in_flight = Some(slot);
    }

    /// Clears the in-flight slot and returns what was held.
    pub fn clear(&mut self) -> Option<SlotId> {
        self.in_flight.take()
    }

    pub fn current(&self) -> Option<SlotId> {
        self.in_flight
    }

    pub fn is_casting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_in_flight(&self, slot: SlotId) -> bool {
        self.in_flight == Some(slot)
    }
}
