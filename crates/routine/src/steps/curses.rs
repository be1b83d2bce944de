//! Curse application.
use behavior_tree::{Behavior, Status};
use combat_core::{Decision, Rarity};
use tracing::debug;

use crate::context::TickContext;

/// Packs at least this large are worth cursing regardless of rarity.
pub const CURSE_PACK_SIZE: usize = 3;

/// Whether a target is worth cursing at all.
///
/// Only targets inside `max_range` qualify, and then only magic or better
/// ones, or any target standing in a pack.
pub fn should_curse(distance: f32, rarity: Rarity, pack_size: usize, max_range: f32) -> bool {
    distance < max_range && (rarity >= Rarity::Magic || pack_size >= CURSE_PACK_SIZE)
}

/// Applies the first curse the target is still missing.
pub struct ApplyCurses;

impl ApplyCurses {
    pub const NAME: &'static str = "apply_curses";
}

impl Behavior<TickContext<'_>> for ApplyCurses {
    fn tick(&self, ctx: &mut TickContext<'_>) -> Status {
        let Some(target) = ctx.target.as_ref() else {
            return Status::Pass;
        };
        let distance = ctx.agent.position.distance(target.position);
        if !should_curse(
            distance,
            target.rarity,
            target.pack_size,
            ctx.config.max_range_range as f32,
        ) {
            return Status::Pass;
        }
        if !target.cursable || target.curse_count >= ctx.layout.total_curses_allowed {
            return Status::Pass;
        }

        let at = target.position;
        let Some(slot) = ctx
            .layout
            .curse_slots
            .iter()
            .copied()
            .find(|&slot| ctx.can_use(slot) && !target.has_curse_from(slot))
        else {
            return Status::Pass;
        };

        debug!(%slot, target = %target.id, curses = target.curse_count, "cursing target");
        ctx.suppress_highlight();
        let result = ctx.use_ability(slot, Some(at), true);
        ctx.finish(
            Self::NAME,
            Decision::UseAbility {
                slot,
                at: Some(at),
                in_place: true,
            },
            result,
        )
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
