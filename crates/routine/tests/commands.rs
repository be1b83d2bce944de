//! The command surface driven through a running routine.
use combat_core::{
    AbilitySlot, Candidate, ConfigError, EntityId, Position, RoutineConfig, SkillTags, SlotId,
    WeightRule,
};
use routine::{CombatRoutine, CommandError, CommandValue, OPTIONS};
use sandbox::ScriptedWorld;

fn routine() -> CombatRoutine {
    let mut routine = CombatRoutine::new(RoutineConfig {
        single_target_ranged_slot: Some(SlotId(2)),
        ..RoutineConfig::default()
    });
    routine.start(0).expect("primary slot configured");
    routine
}

fn int(value: i64) -> Vec<CommandValue> {
    vec![CommandValue::Int(value)]
}

#[test]
fn leash_round_trips() {
    let mut routine = routine();
    assert_eq!(routine.execute("GetLeash", &[]), Ok(Some(CommandValue::Int(-1))));

    routine.execute("SetLeash", &int(25)).expect("leash accepted");
    assert_eq!(routine.execute("GetLeash", &[]), Ok(Some(CommandValue::Int(25))));

    assert_eq!(
        routine.execute("SetLeash", &int(-2)),
        Err(CommandError::OutOfRange {
            command: "SetLeash".into(),
            value: -2,
        })
    );
    assert_eq!(
        routine.execute("SetLeash", &[]),
        Err(CommandError::MissingArgument {
            command: "SetLeash".into(),
        })
    );
    assert_eq!(routine.leash(), 25);
}

#[test]
fn every_option_answers_get() {
    let mut routine = routine();
    for entry in OPTIONS {
        let value = routine
            .execute(&format!("Get{}", entry.name), &[])
            .unwrap_or_else(|err| panic!("Get{} failed: {err}", entry.name))
            .unwrap_or_else(|| panic!("Get{} returned nothing", entry.name));
        routine
            .execute(&format!("Set{}", entry.name), &[value])
            .unwrap_or_else(|err| panic!("Set{} rejected its own value: {err}", entry.name));
    }
    assert_eq!(routine.config(), &RoutineConfig {
        single_target_ranged_slot: Some(SlotId(2)),
        ..RoutineConfig::default()
    });
}

#[test]
fn option_changes_apply_on_the_next_tick() {
    let mut world = ScriptedWorld::default();
    world.set_highlight(true);
    world.add_skill(AbilitySlot::new(2, "Fireball", Some(SlotId(2)), SkillTags::RANGED));
    world.add_hostile(Candidate::new(EntityId(1), "Goatman", Position::new(50.0, 0.0)));
    let mut routine = routine();

    assert_eq!(routine.tick(&mut world).target, Some(EntityId(1)));

    routine.execute("SetCombatRange", &int(40)).expect("known option");
    assert_eq!(routine.tick(&mut world).target, None);
    assert_eq!(routine.config().combat_range, 40);
}

#[test]
fn reset_targeting_restores_stock_rules() {
    let mut routine = routine();
    let stock: Vec<_> = routine.targeting().weight_rules().collect();

    routine
        .targeting_mut()
        .add_weight(WeightRule::flat("always", 100.0, |_| true));
    assert_eq!(routine.targeting().weight_rules().count(), stock.len() + 1);

    assert_eq!(routine.execute("ResetCombatTargeting", &[]), Ok(None));
    assert_eq!(routine.targeting().weight_rules().collect::<Vec<_>>(), stock);
}

#[test]
fn reset_cast_state_forgets_the_held_slot() {
    let mut world = ScriptedWorld::default();
    world.add_skill(AbilitySlot::new(2, "Fireball", Some(SlotId(2)), SkillTags::RANGED));
    world.add_hostile(Candidate::new(EntityId(1), "Goatman", Position::new(20.0, 0.0)));
    let mut routine = routine();

    routine.tick(&mut world);
    assert_eq!(routine.state().cast.current(), Some(SlotId(2)));

    assert_eq!(routine.execute("ResetCastState", &[]), Ok(None));
    assert_eq!(routine.state().cast.current(), None);
}

#[test]
fn slot_options_use_minus_one_for_unset() {
    let mut routine = routine();
    assert_eq!(
        routine.execute("GetAoeMeleeSlot", &[]),
        Ok(Some(CommandValue::Int(-1)))
    );
    routine.execute("SetAoeMeleeSlot", &int(4)).expect("slot in range");
    assert_eq!(routine.config().aoe_melee_slot, Some(SlotId(4)));
    assert_eq!(
        routine.execute("Frobnicate", &[]),
        Err(CommandError::UnknownCommand("Frobnicate".into()))
    );
}

#[test]
fn setters_refuse_configs_the_routine_cannot_run() {
    let mut routine = routine();

    assert_eq!(
        routine.execute("SetCombatRange", &int(-20)),
        Err(CommandError::Rejected {
            command: "SetCombatRange".into(),
            source: ConfigError::NegativeRange {
                name: "combat_range",
                value: -20,
            },
        })
    );
    assert_eq!(routine.config().combat_range, 70);

    assert_eq!(
        routine.execute("SetSingleTargetRangedSlot", &int(-1)),
        Err(CommandError::Rejected {
            command: "SetSingleTargetRangedSlot".into(),
            source: ConfigError::NoPrimarySlot,
        })
    );
    assert_eq!(routine.config().single_target_ranged_slot, Some(SlotId(2)));

    // A stopped routine may pass through an unusable layout while reconfigured.
    routine.stop();
    routine
        .execute("SetSingleTargetRangedSlot", &int(-1))
        .expect("stopped routine accepts it");
    routine.execute("SetFallbackSlot", &int(1)).expect("slot in range");
    assert!(routine.start(0).is_ok());
}
