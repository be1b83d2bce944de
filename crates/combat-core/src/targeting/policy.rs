//! Stock combat targeting rules.
use std::time::Duration;

use crate::entity::{Candidate, Rarity};

use super::rules::{InclusionRule, RuleError, RuleScope, TargetMode, WeightRule};
use super::TargetingEngine;

/// Auras that make a hostile (or everything near it) invulnerable.
pub const IGNORED_AURAS: &[&str] = &[
    "shrine_godmode",
    "bloodlines_invulnerable",
    "god_mode",
    "bloodlines_necrovigil",
];

/// Aura carried by the source of "allies cannot die".
const CANNOT_DIE_SOURCE_AURA: &str = "monster_aura_cannot_die";

/// Minions that get in the way without being worth the time.
const FILLER_MINIONS: &[&str] = &["Summoned Skeleton", "Raised Zombie"];

const PORTAL_NAMES: &[&str] = &["Chilling Portal", "Burning Portal"];

const TRANSITION_BOSS: &str = "Dominus, High Templar";
const TRANSITION_ADD: &str = "Miscreation";
const TRANSITION_PHASES: &[u8] = &[5, 6];

const EXCLUSION_TTL: Duration = Duration::from_secs(60 * 60);

/// Registers [`default_inclusion_rules`] and [`default_weight_rules`].
pub fn register_default_rules(engine: &mut TargetingEngine, ignored_auras: &[&str]) {
    for rule in default_inclusion_rules(ignored_auras) {
        engine.add_inclusion(rule);
    }
    for rule in default_weight_rules() {
        engine.add_weight(rule);
    }
}

/// Inclusion rules in evaluation order.
pub fn default_inclusion_rules(ignored_auras: &[&str]) -> Vec<InclusionRule> {
    let ignored: Vec<String> = ignored_auras.iter().map(|aura| aura.to_string()).collect();

    vec![
        InclusionRule::new("not_blacklisted", |candidate, scope| {
            Ok(!scope.blacklist.contains(candidate.id))
        }),
        InclusionRule::new("liveness", |candidate, scope| {
            Ok(match scope.mode {
                TargetMode::Living => candidate.is_active(),
                TargetMode::Corpses => candidate.is_active_dead(),
            })
        }),
        InclusionRule::new("can_die", |candidate, _| Ok(!candidate.cannot_die)),
        InclusionRule::new("in_range", |candidate, scope| {
            if candidate.distance.is_nan() || candidate.distance < 0.0 {
                return Err(RuleError::InvalidDistance {
                    id: candidate.id,
                    distance: candidate.distance,
                });
            }
            Ok(candidate.distance <= scope.max_range)
        }),
        InclusionRule::new("no_ignored_aura", move |candidate, _| {
            Ok(!ignored.iter().any(|aura| candidate.has_aura(aura)))
        }),
        InclusionRule::new("not_voidspawn", |candidate, _| {
            Ok(!candidate.has_affix_named("Voidspawn of Abaxoth"))
        }),
        InclusionRule::new("not_transition_add", exclude_transition_adds),
        InclusionRule::new("not_portal", |candidate, scope| {
            if PORTAL_NAMES.contains(&candidate.name.as_str()) {
                scope
                    .blacklist
                    .add(candidate.id, EXCLUSION_TTL, "Piety portal");
                return Ok(false);
            }
            Ok(true)
        }),
    ]
}

/// Adds spawned during a boss phase change cannot be killed in time.
fn exclude_transition_adds(
    candidate: &Candidate,
    scope: &mut RuleScope<'_, '_>,
) -> Result<bool, RuleError> {
    if candidate.name != TRANSITION_ADD {
        return Ok(true);
    }
    let transitioning = scope
        .find_by_name(TRANSITION_BOSS)
        .is_some_and(|boss| !boss.is_active_dead() && TRANSITION_PHASES.contains(&boss.phase));
    if transitioning {
        scope
            .blacklist
            .add(candidate.id, EXCLUSION_TTL, TRANSITION_ADD);
        return Ok(false);
    }
    Ok(true)
}

/// Weight rules in application order.
pub fn default_weight_rules() -> Vec<WeightRule> {
    vec![
        WeightRule::flat("cannot_die_source", 40.0, |c| c.has_aura(CANNOT_DIE_SOURCE_AURA)),
        WeightRule::flat("aggro", 20.0, |c| c.targeting_agent),
        WeightRule::new("rarity", |c, score| {
            *score += match c.rarity {
                Rarity::Normal => 0.0,
                Rarity::Magic => 5.0,
                Rarity::Rare => 10.0,
                Rarity::Unique => 15.0,
            };
        }),
        WeightRule::flat("filler_minion", -15.0, |c| {
            FILLER_MINIONS.contains(&c.name.as_str())
        }),
        WeightRule::flat("normal_totem", -15.0, |c| {
            c.rarity == Rarity::Normal && c.kind.contains("/Totems/")
        }),
        WeightRule::flat("raises_undead", 30.0, |c| c.has_affix_containing("RaisesUndead")),
        WeightRule::flat("respawner", -30.0, |c| c.kind.contains("TaniwhaTail")),
        WeightRule::flat("expires", -15.0, |c| c.expires_on_timer),
    ]
}
