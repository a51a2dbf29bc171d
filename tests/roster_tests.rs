use pet_arena::{ArenaError, Object, ObjectKind, Pet, PetKind, Roster, Stats, View};

fn make_roster(kinds: &[PetKind]) -> Roster {
    let mut roster = Roster::new();
    for &kind in kinds {
        roster.add(Pet::new(kind)).expect("roster has room");
    }
    roster
}

fn names(pets: &[Pet]) -> Vec<&'static str> {
    pets.iter().map(Pet::name).collect()
}

#[test]
fn seventh_pet_is_rejected() {
    let mut roster = make_roster(&[PetKind::Ant; 6]);
    let err = roster.add(Pet::new(PetKind::Beaver)).unwrap_err();
    assert!(matches!(err, ArenaError::RosterFull));
    assert_eq!(roster.nb_pets(), 6);
}

#[test]
fn summon_is_dropped_when_full() {
    let mut roster = make_roster(&[PetKind::Cricket; 6]);
    let base = roster.pets()[0].id();
    assert!(roster.summon(base, Pet::new(PetKind::Bee)).is_none());
    assert_eq!(roster.nb_pets(), 6);
}

#[test]
fn combine_checks_indices_then_names() {
    let mut roster = make_roster(&[PetKind::Ant, PetKind::Ant, PetKind::Beaver]);
    let before = roster.serialize(View::Persistent);

    assert!(matches!(
        roster.combine(5, 0),
        Err(ArenaError::InvalidIndex { action: "COMBINE", index: 5 })
    ));
    assert!(matches!(
        roster.combine(0, 5),
        Err(ArenaError::InvalidIndex { action: "COMBINE", index: 5 })
    ));
    assert!(matches!(
        roster.combine(1, 1),
        Err(ArenaError::SameIndex { index: 1 })
    ));
    assert!(matches!(
        roster.combine(0, 2),
        Err(ArenaError::NameMismatch { .. })
    ));
    assert_eq!(roster.serialize(View::Persistent), before);

    roster.combine(0, 1).expect("two ants combine");
    assert_eq!(names(roster.pets()), ["Ant", "Beaver"]);
    assert_eq!(roster.pets()[0].stats(), Stats::new(3, 2));
    assert_eq!(roster.pets()[0].exp(), 1);
}

#[test]
fn combine_pet_levels_up_after_enough_merges() {
    let mut roster = make_roster(&[PetKind::Swan]);
    roster.combine_pet(0, Pet::new(PetKind::Swan)).unwrap();
    assert_eq!(roster.pets()[0].level(), 1);
    roster.combine_pet(0, Pet::new(PetKind::Swan)).unwrap();
    assert_eq!(roster.pets()[0].exp(), 2);
    assert_eq!(roster.pets()[0].level(), 2);
    assert!(matches!(
        roster.combine_pet(0, Pet::new(PetKind::Ant)),
        Err(ArenaError::NameMismatch { .. })
    ));
}

#[test]
fn selling_a_beaver_feeds_the_first_two_others() {
    let mut roster = make_roster(&[PetKind::Beaver, PetKind::Ant, PetKind::Cricket, PetKind::Swan]);
    let level = roster.sell(0).unwrap();
    assert_eq!(level, 1);
    assert_eq!(names(roster.pets()), ["Ant", "Cricket", "Swan"]);
    assert_eq!(roster.pets()[0].life(), 2);
    assert_eq!(roster.pets()[1].life(), 3);
    assert_eq!(roster.pets()[2].life(), 3);
    assert!(matches!(
        roster.sell(3),
        Err(ArenaError::InvalidIndex { action: "SELL_PET", .. })
    ));
}

#[test]
fn buying_an_otter_buffs_the_pet_ahead() {
    let mut roster = make_roster(&[PetKind::Ant]);
    roster.buy(Pet::new(PetKind::Otter)).unwrap();
    assert_eq!(roster.pets()[0].stats(), Stats::new(3, 2));
    assert_eq!(roster.pets()[1].stats(), Stats::new(1, 2));
}

#[test]
fn food_reaches_the_recipient_and_its_neighbours() {
    let mut roster = make_roster(&[PetKind::Ant, PetKind::Rabbit, PetKind::Ladybug]);
    roster.give_object(2, Object::new(ObjectKind::Apple)).unwrap();
    // Apple +1/+1, Ladybug +1 attack, Rabbit +1 life.
    assert_eq!(roster.pets()[2].stats(), Stats::new(3, 5));
    assert_eq!(roster.pets()[0].stats(), Stats::new(2, 1));
}

#[test]
fn sleeping_pill_faints_and_triggers_the_faint_hook() {
    let mut roster = make_roster(&[PetKind::Cricket, PetKind::Ant]);
    roster.give_object(0, Object::new(ObjectKind::SleepingPill)).unwrap();
    assert_eq!(names(roster.pets()), ["ZombieCricket", "Ant"]);
    assert!(!roster.pets()[0].is_summoned());
}

#[test]
fn a_new_item_replaces_the_held_one() {
    let mut roster = make_roster(&[PetKind::Ant]);
    roster.give_object(0, Object::new(ObjectKind::Honey)).unwrap();
    roster.give_object(0, Object::new(ObjectKind::Garlic)).unwrap();
    assert_eq!(
        roster.pets()[0].item().map(Object::kind),
        Some(ObjectKind::Garlic)
    );
    assert!(roster.give_object(3, Object::new(ObjectKind::Apple)).is_err());
}

#[test]
fn order_moves_listed_pets_first() {
    let mut roster = make_roster(&[PetKind::Ant, PetKind::Beaver, PetKind::Cricket]);
    roster.order(&[2, 9, 0]).unwrap();
    assert_eq!(names(roster.pets()), ["Cricket", "Ant", "Beaver"]);

    let before = roster.serialize(View::Persistent);
    assert!(matches!(
        roster.order(&[1, 1]),
        Err(ArenaError::InvalidIndex { action: "ORDER", index: 1 })
    ));
    assert_eq!(roster.serialize(View::Persistent), before);
}

#[test]
fn turn_hooks_run_in_roster_order() {
    let mut roster = make_roster(&[PetKind::Ant, PetKind::Swan, PetKind::Bluebird]);
    roster.begin_turn();
    assert_eq!(roster.turn(), 1);
    assert_eq!(roster.pets()[1].stats(), Stats::new(1, 4));

    roster.end_turn();
    assert_eq!(roster.pets()[0].stats(), Stats::new(3, 1));
    assert_eq!(roster.working_pets(), roster.pets());
    assert!(!roster.is_fighting());
}

#[test]
fn faint_rejects_unknown_index() {
    let mut roster = make_roster(&[PetKind::Ant]);
    assert!(matches!(
        roster.faint(1),
        Err(ArenaError::InvalidIndex { action: "FAINT", index: 1 })
    ));
    roster.faint(0).unwrap();
    assert_eq!(roster.nb_pets(), 0);
}

#[test]
fn serialized_roster_reads_back_identically() -> anyhow::Result<()> {
    let mut roster = Roster::new();
    roster.add(
        Pet::new(PetKind::Ant)
            .with_level(2)
            .with_item(Object::new(ObjectKind::MeatBone)),
    )?;
    roster.add(Pet::new(PetKind::Cricket))?;
    roster.begin_turn();
    roster.end_turn();

    let line = roster.serialize(View::Persistent);
    assert_eq!(line, "1 (Ant,2,1,2,MeatBone) (Cricket,1,2,1,none)");
    let restored = Roster::unserialize(&line)?;
    assert_eq!(restored.serialize(View::Persistent), line);
    assert_eq!(restored.serialize(View::Working), roster.serialize(View::Working));
    Ok(())
}

#[test]
fn loaded_team_refuses_shop_changes_until_reset() -> anyhow::Result<()> {
    let mut roster = Roster::unserialize("3 (Ant,2,1,1,none)")?;
    assert!(roster.is_fighting());

    for err in [
        roster.give_object(0, Object::new(ObjectKind::Apple)).unwrap_err(),
        roster.buy(Pet::new(PetKind::Otter)).unwrap_err(),
        roster.sell(0).unwrap_err(),
        roster.combine_pet(0, Pet::new(PetKind::Ant)).unwrap_err(),
        roster.order(&[0]).unwrap_err(),
    ] {
        assert!(matches!(err, ArenaError::InFight { .. }), "{err}");
    }
    assert_eq!(roster.serialize(View::Persistent), "3 (Ant,2,1,1,none)");
    assert_eq!(roster.working_pets(), roster.pets());

    roster.reset();
    roster.give_object(0, Object::new(ObjectKind::Apple))?;
    roster.buy(Pet::new(PetKind::Otter))?;
    roster.end_turn();
    let mut other = Roster::unserialize("3 (Beaver,1,1,1,none)")?;
    roster.get_fight_result(&mut other)?;
    assert_eq!(roster.pets()[0].stats(), Stats::new(4, 3));
    assert_eq!(roster.serialize(View::Persistent), "3 (Ant,4,3,1,none) (Otter,1,2,1,none)");
    Ok(())
}

#[test]
fn new_turn_leaves_fight_mode() -> anyhow::Result<()> {
    let mut roster = Roster::unserialize("3 (Swan,1,3,1,none)")?;
    roster.begin_turn();
    assert!(!roster.is_fighting());
    assert_eq!(roster.turn(), 4);
    assert_eq!(roster.pets()[0].stats(), Stats::new(1, 4));
    roster.add(Pet::new(PetKind::Ant))?;
    assert_eq!(roster.nb_pets(), 2);
    Ok(())
}
