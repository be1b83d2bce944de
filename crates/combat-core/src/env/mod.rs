//! Boundaries between the decision core and the world it drives.
//!
//! Each trait covers one collaborator. A host implements all of them on a
//! single adapter and hands the routine `&mut dyn Environment`.
mod blacklist;
mod clock;
mod executor;
mod navigator;
mod skills;
mod world;

pub use blacklist::Blacklist;
pub use clock::Clock;
pub use executor::{Executor, UseError};
pub use navigator::Navigator;
pub use skills::{BindError, SkillCatalog};
pub use world::WorldView;

/// Everything a decision tick needs from the host.
pub trait Environment: WorldView + Navigator + Executor + Blacklist + SkillCatalog + Clock {
    /// The blacklist as a standalone trait object, handed to targeting rules.
    fn blacklist_mut(&mut self) -> &mut dyn Blacklist;
}

impl<T> Environment for T
where
    T: WorldView + Navigator + Executor + Blacklist + SkillCatalog + Clock,
{
    fn blacklist_mut(&mut self) -> &mut dyn Blacklist {
        self
    }
}
