//! Aura upkeep.
use behavior_tree::{Behavior, Status};
use combat_core::{AbilitySlot, AgentState, Decision, SlotId};
use tracing::{info, warn};

use crate::context::TickContext;
use crate::error::ActionError;
use crate::layout::is_item_aura;

/// Assignments tried before an unbound aura is given up on.
pub const BIND_ATTEMPTS: u32 = 3;
/// Pause after each assignment for the skill bar to update.
pub const BIND_WAIT_MS: u64 = 1_000;

/// Whether `skill` is an aura-like ability that is currently off.
pub fn needs_activation(
    skill: &AbilitySlot,
    agent: &AgentState,
    enable_auras_from_items: bool,
) -> bool {
    if skill.aurified_curse {
        !skill.cursing_with_this
    } else if skill.considered_aura {
        !skill.using_considered_aura
    } else if skill.is_tagged_aura() || is_item_aura(&skill.name, enable_auras_from_items) {
        !agent.has_buff(&skill.name)
    } else {
        false
    }
}

/// Turns on the first aura-like ability that is off.
///
/// Abilities that are not on the skill bar are bound into the designated
/// aura slot first.
pub struct MaintainAuras;

impl MaintainAuras {
    pub const NAME: &'static str = "maintain_auras";
}

impl Behavior<TickContext<'_>> for MaintainAuras {
    fn tick(&self, ctx: &mut TickContext<'_>) -> Status {
        let Some(aura_slot) = ctx.layout.aura_slot else {
            return Status::Pass;
        };

        let config = ctx.config;
        let mut pending = None;
        for skill in ctx.env.skills() {
            if config.is_skill_blacklisted(skill.id)
                || !needs_activation(skill, &ctx.agent, config.enable_auras_from_items)
            {
                continue;
            }
            if skill.usable {
                pending = Some(skill.clone());
                break;
            }
            if config.debug_auras {
                warn!(aura = %skill.name, id = skill.id, "aura is off but cannot be used");
            }
        }
        let Some(skill) = pending else {
            return Status::Pass;
        };

        let slot = match bind(ctx, &skill, aura_slot) {
            Ok(slot) => slot,
            Err(error) => {
                return ctx.finish(
                    Self::NAME,
                    Decision::UseAbility {
                        slot: aura_slot,
                        at: None,
                        in_place: false,
                    },
                    Err(error),
                );
            }
        };

        info!(aura = %skill.name, %slot, "activating aura");
        let result = ctx.use_ability(slot, None, false);
        ctx.finish(
            Self::NAME,
            Decision::UseAbility {
                slot,
                at: None,
                in_place: false,
            },
            result,
        )
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

/// The slot `skill` is bound to, assigning it to `aura_slot` if needed.
fn bind(
    ctx: &mut TickContext<'_>,
    skill: &AbilitySlot,
    aura_slot: SlotId,
) -> Result<SlotId, ActionError> {
    let mut attempts = 0;
    loop {
        if let Some(slot) = ctx.env.ability(skill.id).and_then(|bound| bound.slot) {
            return Ok(slot);
        }
        if attempts == BIND_ATTEMPTS {
            return Err(ActionError::BindTimedOut {
                name: skill.name.clone(),
                attempts,
            });
        }
        attempts += 1;
        info!(
            aura = %skill.name,
            %aura_slot,
            attempt = attempts,
            "assigning aura to the skill bar"
        );
        ctx.env.assign(aura_slot, skill.id)?;
        ctx.env.wait(BIND_WAIT_MS);
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{Buff, SkillTags};

    use super::*;

    #[test]
    fn activation_follows_aura_kind() {
        let mut agent = AgentState::default();
        let mut hatred = AbilitySlot::new(1, "Hatred", None, SkillTags::AURA);
        assert!(needs_activation(&hatred, &agent, true));

        agent.buffs.push(Buff::permanent("Hatred"));
        assert!(!needs_activation(&hatred, &agent, true));

        hatred.tags = SkillTags::AURA | SkillTags::VAAL;
        agent.buffs.clear();
        assert!(needs_activation(&hatred, &agent, true), "item aura name still applies");
        assert!(!needs_activation(&hatred, &agent, false));

        let mut curse = AbilitySlot::new(2, "Blasphemy", None, SkillTags::CURSE);
        curse.aurified_curse = true;
        assert!(needs_activation(&curse, &agent, false));
        curse.cursing_with_this = true;
        assert!(!needs_activation(&curse, &agent, false));

        let mut considered = AbilitySlot::new(3, "Arctic Armour", None, SkillTags::empty());
        considered.considered_aura = true;
        assert!(needs_activation(&considered, &agent, false));
        considered.using_considered_aura = true;
        assert!(!needs_activation(&considered, &agent, false));

        let plain = AbilitySlot::new(4, "Fireball", None, SkillTags::RANGED);
        assert!(!needs_activation(&plain, &agent, true));
    }
}
