//! The decision chain.
//!
//! Steps run in a fixed priority order and the first one that commits ends
//! the tick:
//!
//! 1. raise a spectre from a nearby corpse
//! 2. re-summon the golem
//! 3. raise a zombie
//! 4. refresh the short-duration buff
//! 5. turn on missing auras
//! 6. acquire the target (or pursue a side objective, or idle)
//! 7. leash: drop unreachable or path-distant targets
//! 8. walk towards a hidden target
//! 9. place a totem
//! 10. curse the target
//! 11. non-duration self buffs
//! 12. burst summons
//! 13. charged (vaal) abilities
//! 14. choose the primary attack slot
//! 15. close in to attack range
//! 16. re-aim an attack that is still held
//! 17. cast the primary attack
//!
//! Steps 1 to 5 work without a target. Steps after 6 only act once a target
//! has been captured into [`TickContext::target`].
//!
//! [`TickContext::target`]: crate::context::TickContext::target
use behavior_tree::{Behavior, Selector};
use combat_core::SlotId;

use crate::context::TickContext;

pub mod attack;
pub mod auras;
pub mod buffs;
pub mod curses;
pub mod engage;
pub mod minions;
pub mod summons;
pub mod totem;
pub mod vaal;

pub use attack::{CastPrimary, ChoosePrimary, RangeGate, RedirectCast, classify, select_primary};
pub use auras::MaintainAuras;
pub use buffs::{SelfBuffs, ShortBuff};
pub use curses::{ApplyCurses, should_curse};
pub use engage::{AcquireTarget, ApproachHidden, LeashGate};
pub use minions::{RaiseCorpse, SummonGolem};
pub use summons::BurstSummons;
pub use totem::PlaceTotem;
pub use vaal::CastVaal;

/// The primary attack chosen for this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackPlan {
    pub slot: SlotId,
    /// Melee attacks close in to melee range before casting.
    pub melee: bool,
    pub in_place: bool,
}

/// Name of the chain, as it appears in logs.
pub const CHAIN_NAME: &str = "combat";

/// Builds the decision chain in priority order.
pub fn combat_chain<'a>() -> Selector<TickContext<'a>> {
    let steps: Vec<Box<dyn Behavior<TickContext<'a>>>> = vec![
        Box::new(RaiseCorpse::SPECTRE),
        Box::new(SummonGolem),
        Box::new(RaiseCorpse::ZOMBIE),
        Box::new(ShortBuff),
        Box::new(MaintainAuras),
        Box::new(AcquireTarget),
        Box::new(LeashGate),
        Box::new(ApproachHidden),
        Box::new(PlaceTotem),
        Box::new(ApplyCurses),
        Box::new(SelfBuffs),
        Box::new(BurstSummons),
        Box::new(CastVaal),
        Box::new(ChoosePrimary),
        Box::new(RangeGate),
        Box::new(RedirectCast),
        Box::new(CastPrimary),
    ];
    Selector::named(CHAIN_NAME, steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_order() {
        let chain = combat_chain();
        let names: Vec<_> = chain.step_names().collect();
        assert_eq!(
            names,
            [
                "raise_spectre",
                "summon_golem",
                "raise_zombie",
                "short_buff",
                "maintain_auras",
                "acquire_target",
                "leash_gate",
                "approach_hidden",
                "place_totem",
                "apply_curses",
                "self_buffs",
                "burst_summons",
                "cast_vaal",
                "choose_primary",
                "range_gate",
                "redirect_cast",
                "cast_primary",
            ]
        );
    }
}
