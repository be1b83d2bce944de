//! End-to-end ticks of the combat chain against a scripted world.
use combat_core::{
    AbilitySlot, Buff, Candidate, Chest, Clock, Decision, EntityId, Liveness, Position, Rarity,
    RoutineConfig, Shrine, SkillTags, SlotId, WorldView,
};
use routine::steps::{
    AcquireTarget, ApplyCurses, ApproachHidden, BurstSummons, CastPrimary, CastVaal, LeashGate,
    MaintainAuras, PlaceTotem, RaiseCorpse, RangeGate, RedirectCast, SelfBuffs, ShortBuff,
    SummonGolem,
};
use routine::{ActionError, CombatRoutine, CommandValue, RoutineEvent, Throttle, TickOutcome};
use sandbox::{Call, ScriptedWorld};

const FIREBALL: SlotId = SlotId(2);

fn fireball() -> AbilitySlot {
    AbilitySlot::new(2, "Fireball", Some(FIREBALL), SkillTags::RANGED | SkillTags::SINGLE)
}

fn goatman(id: u32, x: f32, y: f32) -> Candidate {
    Candidate::new(EntityId(id), "Goatman", Position::new(x, y))
}

fn ranged_config() -> RoutineConfig {
    RoutineConfig {
        single_target_ranged_slot: Some(FIREBALL),
        ..RoutineConfig::default()
    }
}

/// A world with the fireball on the bar and the highlight already on.
fn world() -> ScriptedWorld {
    let mut world = ScriptedWorld::default();
    world.add_skill(fireball());
    world.set_highlight(true);
    world
}

fn started(config: RoutineConfig, world: &ScriptedWorld) -> CombatRoutine {
    let mut routine = CombatRoutine::new(config);
    routine
        .start(world.now_ms())
        .expect("config has a primary slot");
    routine
}

fn acted(step: &'static str, decision: Decision) -> TickOutcome {
    TickOutcome::Acted { step, decision }
}

fn idle(step: &'static str) -> TickOutcome {
    TickOutcome::Idle { step: Some(step) }
}

fn hold(slot: SlotId, at: Position) -> Decision {
    Decision::HoldAbility {
        slot,
        at,
        in_place: false,
    }
}

#[test]
fn targets_within_combat_range_only() {
    let mut world = world();
    world.add_hostile(goatman(1, 50.0, 0.0));
    world.add_hostile(goatman(2, 80.0, 0.0));
    let mut routine = started(ranged_config(), &world);

    let report = routine.tick(&mut world);
    assert_eq!(report.target, Some(EntityId(1)));
    assert_eq!(
        report.outcome,
        acted(RangeGate::NAME, Decision::MoveTowards(Position::new(50.0, 0.0)))
    );

    world.clear_hostiles();
    world.add_hostile(goatman(2, 80.0, 0.0));
    let report = routine.tick(&mut world);
    assert_eq!(report.target, None);
    assert_eq!(report.outcome, idle(AcquireTarget::NAME));
}

#[test]
fn leash_widens_ranking_but_not_the_path_gate() {
    let mut world = world();
    world.add_hostile(goatman(2, 80.0, 0.0));
    let mut routine = started(ranged_config(), &world);

    routine
        .execute("SetLeash", &[CommandValue::Int(90)])
        .expect("leash accepted");
    let report = routine.tick(&mut world);
    assert_eq!(report.target, Some(EntityId(2)));
    assert_eq!(report.outcome, idle(LeashGate::NAME));
    assert!(world.calls().is_empty());
}

#[test]
fn magic_target_in_a_pack_gets_cursed() {
    let mut world = world();
    world.add_skill(AbilitySlot::new(5, "Enfeeble", Some(SlotId(5)), SkillTags::CURSE));
    world.add_hostile(Candidate {
        rarity: Rarity::Magic,
        ..goatman(1, 20.0, 0.0)
    });
    world.add_hostile(goatman(2, 15.0, 5.0));
    world.add_hostile(goatman(3, 15.0, -5.0));
    let mut routine = started(ranged_config(), &world);

    let target = Position::new(20.0, 0.0);
    let report = routine.tick(&mut world);
    assert_eq!(report.target, Some(EntityId(1)));
    assert_eq!(
        report.outcome,
        acted(
            ApplyCurses::NAME,
            Decision::UseAbility {
                slot: SlotId(5),
                at: Some(target),
                in_place: true,
            }
        )
    );

    let cursed = world.hostile_mut(EntityId(1)).expect("target present");
    cursed.curses.count = 1;
    cursed.curses.applied.insert("Enfeeble".into());
    let report = routine.tick(&mut world);
    assert_eq!(report.outcome, acted(CastPrimary::NAME, hold(FIREBALL, target)));
}

#[test]
fn curses_stop_at_the_allowed_count() {
    let mut world = world();
    world.agent_mut().total_curses_allowed = 2;
    world.add_skill(AbilitySlot::new(5, "Enfeeble", Some(SlotId(5)), SkillTags::CURSE));
    world.add_skill(AbilitySlot::new(6, "Vulnerability", Some(SlotId(6)), SkillTags::CURSE));
    let mut rare = Candidate {
        rarity: Rarity::Rare,
        ..goatman(1, 20.0, 0.0)
    };
    rare.curses.count = 1;
    rare.curses.applied.insert("Enfeeble".into());
    world.add_hostile(rare);
    let mut routine = started(ranged_config(), &world);

    let report = routine.tick(&mut world);
    assert_eq!(report.step(), Some(ApplyCurses::NAME));
    assert_eq!(report.decision().slot(), Some(SlotId(6)));

    let target = world.hostile_mut(EntityId(1)).expect("target present");
    target.curses.count = 2;
    target.curses.applied.insert("Vulnerability".into());
    let report = routine.tick(&mut world);
    assert_eq!(report.step(), Some(CastPrimary::NAME));
}

#[test]
fn fallback_slot_is_used_as_melee() {
    let mut world = ScriptedWorld::default();
    world.set_highlight(true);
    world.add_skill(AbilitySlot::new(
        3,
        "Ground Slam",
        Some(SlotId(3)),
        SkillTags::MELEE | SkillTags::AOE,
    ));
    world.add_hostile(goatman(1, 30.0, 0.0));
    let config = RoutineConfig {
        fallback_slot: Some(SlotId(3)),
        ..RoutineConfig::default()
    };
    let mut routine = started(config, &world);

    let target = Position::new(30.0, 0.0);
    let report = routine.tick(&mut world);
    assert_eq!(report.outcome, acted(RangeGate::NAME, Decision::MoveTowards(target)));

    world.set_agent_position(Position::new(25.0, 0.0));
    let report = routine.tick(&mut world);
    assert_eq!(report.outcome, acted(CastPrimary::NAME, hold(SlotId(3), target)));
}

#[test]
fn held_attack_is_redirected_instead_of_recast() {
    let mut world = world();
    world.add_hostile(goatman(1, 20.0, 0.0));
    let mut routine = started(ranged_config(), &world);

    let target = Position::new(20.0, 0.0);
    let report = routine.tick(&mut world);
    assert_eq!(report.outcome, acted(CastPrimary::NAME, hold(FIREBALL, target)));
    assert_eq!(routine.state().cast.current(), Some(FIREBALL));

    world.agent_mut().current_action = Some("Fireball".into());
    let report = routine.tick(&mut world);
    assert_eq!(report.outcome, acted(RedirectCast::NAME, Decision::SetAim(target)));
    assert_eq!(world.calls().last(), Some(&Call::SetAim(target)));
}

#[test]
fn redirect_turns_the_highlight_off_near_strongboxes() {
    let mut world = world();
    world.add_chest(Chest {
        id: EntityId(40),
        position: Position::new(30.0, 0.0),
        opened: false,
        strongbox: true,
    });
    world.add_hostile(goatman(1, 20.0, 0.0));
    let mut routine = started(ranged_config(), &world);
    let target = Position::new(20.0, 0.0);

    assert_eq!(routine.tick(&mut world).step(), Some(CastPrimary::NAME));
    world.take_calls();

    // Switched back on by hand while the attack is still held.
    world.set_highlight(true);
    world.agent_mut().current_action = Some("Fireball".into());
    let report = routine.tick(&mut world);
    assert_eq!(report.outcome, acted(RedirectCast::NAME, Decision::SetAim(target)));
    assert_eq!(
        world.take_calls(),
        vec![Call::ToggleHighlight, Call::SetAim(target)]
    );
    assert!(!world.highlight_enabled());
}

#[test]
fn losing_the_target_releases_the_held_key() {
    let mut world = world();
    world.add_hostile(goatman(1, 20.0, 0.0));
    let mut routine = started(ranged_config(), &world);
    routine.tick(&mut world);
    world.take_calls();

    world.clear_hostiles();
    let report = routine.tick(&mut world);
    assert_eq!(report.outcome, idle(AcquireTarget::NAME));
    assert_eq!(report.decision(), Decision::NoAction);
    assert_eq!(world.take_calls(), vec![Call::ClearKeys]);
    assert_eq!(routine.state().cast.current(), None);

    // Nothing held any more, so the keys are left alone.
    routine.tick(&mut world);
    assert!(world.calls().is_empty());
}

#[test]
fn raging_spirits_burst_then_rest() {
    let mut world = world();
    let mut spirits =
        AbilitySlot::new(4, "Summon Raging Spirit", Some(SlotId(4)), SkillTags::SUMMON);
    spirits.max_deployed = 20;
    world.add_skill(spirits);
    world.add_hostile(goatman(1, 20.0, 0.0));
    let mut routine = started(ranged_config(), &world);
    let aim = Position::new(20.0, 0.0);

    // The first window opens once the delay has passed.
    assert_eq!(routine.tick(&mut world).step(), Some(CastPrimary::NAME));

    world.advance(5_000);
    for expected in [1, 2, 0] {
        let report = routine.tick(&mut world);
        assert_eq!(report.outcome, acted(BurstSummons::NAME, hold(SlotId(4), aim)));
        assert_eq!(
            routine.state().cooldowns.burst_count(Throttle::RagingSpirits),
            expected
        );
    }
    assert_eq!(routine.tick(&mut world).step(), Some(CastPrimary::NAME));

    world.advance(4_999);
    assert_eq!(routine.tick(&mut world).step(), Some(CastPrimary::NAME));
    world.advance(1);
    assert_eq!(routine.tick(&mut world).step(), Some(BurstSummons::NAME));
}

#[test]
fn burst_summons_clear_keys_before_holding() {
    let mut world = world();
    let mut skeletons = AbilitySlot::new(4, "Summon Skeletons", Some(SlotId(4)), SkillTags::SUMMON);
    skeletons.max_deployed = 10;
    world.add_skill(skeletons);
    world.add_hostile(goatman(1, 20.0, 0.0));
    let mut routine = started(ranged_config(), &world);

    world.advance(1_000);
    let report = routine.tick(&mut world);
    assert_eq!(report.step(), Some(BurstSummons::NAME));
    assert_eq!(
        world.take_calls(),
        vec![
            Call::ClearKeys,
            Call::Hold {
                slot: SlotId(4),
                at: Position::new(20.0, 0.0),
                in_place: false,
            },
        ]
    );
}

#[test]
fn shrine_is_activated_then_given_up_on() {
    let mut world = world();
    world.add_shrine(Shrine {
        id: EntityId(30),
        position: Position::new(10.0, 0.0),
        ..Shrine::default()
    });
    let mut routine = started(ranged_config(), &world);

    for _ in 0..11 {
        let report = routine.tick(&mut world);
        assert_eq!(report.outcome, acted("shrines", Decision::Interact(EntityId(30))));
    }

    let report = routine.tick(&mut world);
    assert_eq!(report.outcome, idle("shrines"));
    assert_eq!(
        world.blacklist_reason(EntityId(30)),
        Some("Could not interact with the shrine.")
    );

    let report = routine.tick(&mut world);
    assert_eq!(report.outcome, idle(AcquireTarget::NAME));
}

#[test]
fn distant_shrine_is_walked_to() {
    let mut world = world();
    world.add_shrine(Shrine {
        id: EntityId(30),
        position: Position::new(40.0, 0.0),
        ..Shrine::default()
    });
    let mut routine = started(ranged_config(), &world);

    let report = routine.tick(&mut world);
    assert_eq!(
        report.outcome,
        acted("shrines", Decision::MoveTowards(Position::new(40.0, 0.0)))
    );

    routine
        .execute("SetSkipShrines", &[CommandValue::Bool(true)])
        .expect("known option");
    let report = routine.tick(&mut world);
    assert_eq!(report.outcome, idle(AcquireTarget::NAME));
}

#[test]
fn shrine_on_a_clear_path_preempts_combat() {
    let mut world = world();
    world.add_hostile(goatman(1, 30.0, 0.0));
    world.add_shrine(Shrine {
        id: EntityId(30),
        position: Position::new(-10.0, 0.0),
        ..Shrine::default()
    });
    let mut routine = started(ranged_config(), &world);

    let report = routine.tick(&mut world);
    assert_eq!(report.target, Some(EntityId(1)));
    assert_eq!(report.outcome, acted("shrines", Decision::Interact(EntityId(30))));
}

#[test]
fn unreachable_target_is_blacklisted() {
    let mut world = world();
    world.add_hostile(goatman(1, 30.0, 0.0));
    world.set_unreachable(EntityId(1));
    let mut routine = started(ranged_config(), &world);

    let report = routine.tick(&mut world);
    assert_eq!(report.outcome, idle(LeashGate::NAME));
    assert_eq!(world.blacklist_reason(EntityId(1)), Some("Unable to pathfind to."));

    let report = routine.tick(&mut world);
    assert_eq!(report.target, None);

    world.advance(60_000);
    let report = routine.tick(&mut world);
    assert_eq!(report.target, Some(EntityId(1)));
}

#[test]
fn hidden_target_is_approached() {
    let mut world = world();
    world.add_hostile(goatman(1, 30.0, 0.0));
    world.set_hidden(EntityId(1));
    let mut routine = started(ranged_config(), &world);

    let report = routine.tick(&mut world);
    assert_eq!(
        report.outcome,
        acted(ApproachHidden::NAME, Decision::MoveTowards(Position::new(30.0, 0.0)))
    );
}

#[test]
fn failed_move_ends_the_tick() {
    let mut world = world();
    world.add_hostile(goatman(1, 50.0, 0.0));
    world.set_move_fails(true);
    let mut routine = started(ranged_config(), &world);

    let report = routine.tick(&mut world);
    assert_eq!(report.step(), Some(RangeGate::NAME));
    assert_eq!(
        report.outcome.error(),
        Some(&ActionError::MoveFailed(Position::new(50.0, 0.0)))
    );
    assert!(!report.outcome.is_committed());
}

fn aura_world() -> ScriptedWorld {
    let mut world = world();
    world.agent_mut().buffs.push(Buff::permanent("Clarity"));
    world.add_skill(AbilitySlot::new(6, "Clarity", Some(SlotId(6)), SkillTags::AURA));
    world.add_skill(AbilitySlot::new(20, "Hatred", None, SkillTags::AURA));
    world
}

#[test]
fn unbound_aura_is_assigned_then_used() {
    let mut world = aura_world();
    let mut routine = started(ranged_config(), &world);

    let report = routine.tick(&mut world);
    assert_eq!(
        report.outcome,
        acted(
            MaintainAuras::NAME,
            Decision::UseAbility {
                slot: SlotId(6),
                at: None,
                in_place: false,
            }
        )
    );
    assert_eq!(
        world.take_calls(),
        vec![
            Call::Assign {
                slot: SlotId(6),
                ability: 20,
            },
            Call::Wait(1_000),
            Call::Use {
                slot: SlotId(6),
                at: None,
                in_place: false,
            },
        ]
    );
}

#[test]
fn aura_binding_gives_up_after_three_attempts() {
    let mut world = aura_world();
    world.set_ignore_binds(true);
    let mut routine = started(ranged_config(), &world);

    let report = routine.tick(&mut world);
    assert_eq!(report.step(), Some(MaintainAuras::NAME));
    assert_eq!(
        report.outcome.error(),
        Some(&ActionError::BindTimedOut {
            name: "Hatred".into(),
            attempts: 3,
        })
    );
    let assigns = world
        .calls()
        .iter()
        .filter(|call| matches!(call, Call::Assign { .. }))
        .count();
    assert_eq!(assigns, 3);
    assert_eq!(world.now_ms(), 3_000);
}

#[test]
fn blacklisted_aura_is_left_off() {
    let mut world = aura_world();
    let config = RoutineConfig {
        blacklisted_skill_ids: "20".into(),
        ..ranged_config()
    };
    let mut routine = started(config, &world);

    let report = routine.tick(&mut world);
    assert_eq!(report.outcome, idle(AcquireTarget::NAME));
}

#[test]
fn highlight_is_suppressed_near_strongboxes() {
    let mut world = world();
    world.add_chest(Chest {
        id: EntityId(40),
        position: Position::new(30.0, 0.0),
        opened: false,
        strongbox: true,
    });
    world.add_hostile(goatman(1, 20.0, 0.0));
    let mut routine = started(ranged_config(), &world);

    routine.tick(&mut world);
    assert_eq!(
        world.take_calls(),
        vec![
            Call::ToggleHighlight,
            Call::Hold {
                slot: FIREBALL,
                at: Position::new(20.0, 0.0),
                in_place: false,
            },
        ]
    );
    assert!(!world.highlight_enabled());

    world.clear_hostiles();
    routine.tick(&mut world);
    assert_eq!(world.take_calls(), vec![Call::ToggleHighlight, Call::ClearKeys]);
    assert!(world.highlight_enabled());
}

#[test]
fn totem_is_dropped_halfway_once_per_delay() {
    let mut world = world();
    world.add_skill(AbilitySlot::new(
        7,
        "Searing Totem",
        Some(SlotId(7)),
        SkillTags::TOTEM | SkillTags::RANGED,
    ));
    world.add_hostile(goatman(1, 20.0, 0.0));
    let mut routine = started(ranged_config(), &world);

    assert_eq!(routine.tick(&mut world).step(), Some(CastPrimary::NAME));

    world.advance(5_000);
    let report = routine.tick(&mut world);
    assert_eq!(
        report.outcome,
        acted(
            PlaceTotem::NAME,
            Decision::UseAbility {
                slot: SlotId(7),
                at: Some(Position::new(10.0, 0.0)),
                in_place: true,
            }
        )
    );

    world
        .skill_mut(7)
        .expect("totem skill")
        .deployed
        .push(Position::new(10.0, 0.0));
    world.advance(5_000);
    assert_ne!(routine.tick(&mut world).step(), Some(PlaceTotem::NAME));
}

#[test]
fn charged_skill_fires_when_scan_is_due() {
    let mut world = world();
    world.add_skill(AbilitySlot::new(
        8,
        "Vaal Fireball",
        Some(SlotId(8)),
        SkillTags::RANGED | SkillTags::VAAL,
    ));
    world.add_hostile(goatman(1, 20.0, 0.0));
    let mut routine = started(ranged_config(), &world);

    assert_eq!(routine.tick(&mut world).step(), Some(CastPrimary::NAME));

    world.advance(1_000);
    let report = routine.tick(&mut world);
    assert_eq!(
        report.outcome,
        acted(
            CastVaal::NAME,
            Decision::UseAbility {
                slot: SlotId(8),
                at: Some(Position::new(20.0, 0.0)),
                in_place: false,
            }
        )
    );
}

#[test]
fn golem_is_summoned_after_its_interval() {
    let mut world = world();
    let mut golem = AbilitySlot::new(9, "Summon Stone Golem", Some(SlotId(9)), SkillTags::SUMMON);
    golem.max_deployed = 1;
    world.add_skill(golem);
    let mut routine = started(ranged_config(), &world);

    assert_eq!(routine.tick(&mut world).outcome, idle(AcquireTarget::NAME));

    world.advance(10_000);
    let report = routine.tick(&mut world);
    assert_eq!(
        report.outcome,
        acted(
            SummonGolem::NAME,
            Decision::UseAbility {
                slot: SlotId(9),
                at: Some(Position::ORIGIN),
                in_place: true,
            }
        )
    );
}

#[test]
fn zombies_are_raised_from_usable_bodies() {
    let mut world = world();
    let mut zombie = AbilitySlot::new(10, "Raise Zombie", Some(SlotId(8)), SkillTags::SUMMON);
    zombie.max_deployed = 3;
    world.add_skill(zombie);
    world.add_hostile(Candidate {
        liveness: Liveness::ActiveDead,
        corpse_usable: true,
        ..goatman(9, 10.0, 0.0)
    });
    let mut routine = started(ranged_config(), &world);

    let report = routine.tick(&mut world);
    assert_eq!(
        report.outcome,
        acted(
            RaiseCorpse::ZOMBIE.label(),
            Decision::UseAbility {
                slot: SlotId(8),
                at: Some(Position::new(10.0, 0.0)),
                in_place: false,
            }
        )
    );
}

#[test]
fn area_change_rediscovers_the_skill_bar() {
    let mut world = world();
    let mut routine = started(ranged_config(), &world);
    routine.tick(&mut world);
    assert!(routine.layout().curse_slots.is_empty());

    world.add_skill(AbilitySlot::new(5, "Enfeeble", Some(SlotId(5)), SkillTags::CURSE));
    routine.tick(&mut world);
    assert!(routine.layout().curse_slots.is_empty());

    routine.handle_event(&RoutineEvent::AreaChanged {
        old_seed: 1,
        new_seed: 2,
        area: "The Ledge".into(),
    });
    assert!(routine.layout().is_stale());
    routine.tick(&mut world);
    assert_eq!(routine.layout().curse_slots.as_slice(), &[SlotId(5)]);
}

#[test]
fn area_change_reopens_the_burst_window() {
    let mut world = world();
    let mut spirits =
        AbilitySlot::new(4, "Summon Raging Spirit", Some(SlotId(4)), SkillTags::SUMMON);
    spirits.max_deployed = 20;
    world.add_skill(spirits);
    world.add_hostile(goatman(1, 20.0, 0.0));
    let mut routine = started(ranged_config(), &world);

    world.advance(5_000);
    assert_eq!(routine.tick(&mut world).step(), Some(BurstSummons::NAME));
    assert_eq!(routine.state().cooldowns.burst_count(Throttle::RagingSpirits), 1);

    routine.handle_event(&RoutineEvent::AreaChanged {
        old_seed: 1,
        new_seed: 2,
        area: "The Ledge".into(),
    });
    for expected in [1, 2, 0] {
        assert_eq!(routine.tick(&mut world).step(), Some(BurstSummons::NAME));
        assert_eq!(
            routine.state().cooldowns.burst_count(Throttle::RagingSpirits),
            expected
        );
    }
    assert_eq!(routine.tick(&mut world).step(), Some(CastPrimary::NAME));
}

#[test]
fn item_aura_option_rebuilds_the_layout() {
    let mut world = world();
    world.add_skill(AbilitySlot::new(21, "Anger", Some(SlotId(7)), SkillTags::empty()));
    let config = RoutineConfig {
        enable_auras_from_items: false,
        ..ranged_config()
    };
    let mut routine = started(config, &world);

    routine.tick(&mut world);
    assert_eq!(routine.layout().aura_slot, None);

    routine
        .execute("SetEnableAurasFromItems", &[CommandValue::Bool(true)])
        .expect("known option");
    assert!(routine.layout().is_stale());
    routine.tick(&mut world);
    assert_eq!(routine.layout().aura_slot, Some(SlotId(7)));
}

#[test]
fn routine_without_a_primary_slot_stays_stopped() {
    let mut world = world();
    world.add_hostile(goatman(1, 20.0, 0.0));
    let mut routine = CombatRoutine::new(RoutineConfig::default());

    assert!(routine.start(0).is_err());
    assert!(!routine.is_running());

    let report = routine.tick(&mut world);
    assert_eq!(report.outcome, TickOutcome::Idle { step: None });
    assert!(world.calls().is_empty());
}

#[test]
fn short_buff_is_refreshed_only_under_threat() {
    let mut world = world();
    world.add_skill(AbilitySlot::new(11, "Enduring Cry", Some(SlotId(7)), SkillTags::empty()));
    world.agent_mut().buffs.push(Buff::timed("endurance_charge", 4_000));
    world.add_hostile(goatman(1, 50.0, 0.0));
    let mut routine = started(ranged_config(), &world);

    assert_eq!(routine.tick(&mut world).step(), Some(RangeGate::NAME));

    world.add_hostile(goatman(2, 20.0, 0.0));
    let report = routine.tick(&mut world);
    assert_eq!(
        report.outcome,
        acted(
            ShortBuff::NAME,
            Decision::UseAbility {
                slot: SlotId(7),
                at: None,
                in_place: true,
            }
        )
    );
}

#[test]
fn blood_rage_waits_for_a_target() {
    let mut world = world();
    world.add_skill(AbilitySlot::new(12, "Blood Rage", Some(SlotId(6)), SkillTags::empty()));
    let mut routine = started(ranged_config(), &world);

    assert_eq!(routine.tick(&mut world).outcome, idle(AcquireTarget::NAME));

    world.add_hostile(goatman(1, 20.0, 0.0));
    let report = routine.tick(&mut world);
    assert_eq!(report.step(), Some(SelfBuffs::NAME));
    assert_eq!(report.decision().slot(), Some(SlotId(6)));

    world.agent_mut().buffs.push(Buff::permanent("blood_rage"));
    assert_eq!(routine.tick(&mut world).step(), Some(CastPrimary::NAME));
}
