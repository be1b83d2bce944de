//! Status returned by behavior nodes.

/// The result of evaluating a behavior node for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The node decided what to do this tick.
    ///
    /// A decision was recorded (possibly "do nothing") and the tick must end
    /// here.
    Commit,

    /// The node had nothing to contribute; evaluation moves on.
    Pass,
}

impl Status {
    /// Maps a boolean outcome onto a status.
    #[inline]
    pub fn from_bool(committed: bool) -> Self {
        if committed { Status::Commit } else { Status::Pass }
    }
}
