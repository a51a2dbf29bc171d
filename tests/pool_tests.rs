use pet_arena::matrix::evaluate_pool;
use pet_arena::pool::append_team;
use pet_arena::{ArenaError, FightOptions, OpponentPool, Pet, PetKind, Roster, View};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs;

const STORE: &str = "\
2 (Ant,2,1,1,none) (Cricket,1,2,1,none)
2 (Beaver,3,2,1,none)

5 (Elephant,3,5,2,Garlic) (Swan,1,4,1,none)
";

fn make_store(contents: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("saved_teams.txt"), contents).expect("write store");
    dir
}

fn make_team(pets: &[(PetKind, i32, i32)]) -> Roster {
    let mut roster = Roster::new();
    for &(kind, attack, life) in pets {
        roster
            .add(Pet::new(kind).with_stats(attack, life))
            .expect("roster has room");
    }
    roster.end_turn();
    roster
}

#[test]
fn random_team_falls_back_to_an_earlier_turn() -> anyhow::Result<()> {
    let dir = make_store(STORE);
    let pool = OpponentPool::from_path(dir.path().join("saved_teams.txt"));
    let mut rng = SmallRng::seed_from_u64(7);

    assert!(!pool.is_loaded());
    assert_eq!(pool.get_random_team(4, &mut rng)?.turn(), 2);
    assert!(pool.is_loaded());
    assert_eq!(pool.get_random_team(5, &mut rng)?.turn(), 5);
    assert_eq!(pool.get_random_team(12, &mut rng)?.turn(), 5);
    assert!(matches!(
        pool.get_random_team(1, &mut rng),
        Err(ArenaError::NoOpponentAvailable { turn: 1 })
    ));
    assert_eq!(pool.turns()?, vec![2, 5]);
    assert_eq!(pool.len()?, 3);
    Ok(())
}

#[test]
fn opponents_are_independent_copies() -> anyhow::Result<()> {
    let pool = OpponentPool::from_text(STORE);
    let mut rng = SmallRng::seed_from_u64(1);
    let mut team = make_team(&[(PetKind::Beaver, 10, 10)]);

    let mut opponent = pool.get_random_team(5, &mut rng)?;
    opponent.reset();
    opponent.order(&[1, 0])?;
    team.get_fight_result(&mut opponent)?;

    let again = pool.get_random_team(5, &mut rng)?;
    assert_eq!(
        again.serialize(View::Persistent),
        "5 (Elephant,3,5,2,Garlic) (Swan,1,4,1,none)"
    );
    Ok(())
}

#[test]
fn missing_store_gives_an_empty_pool() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let pool = OpponentPool::from_path(dir.path().join("nothing_here.txt"));
    assert!(pool.is_empty()?);
    let mut rng = SmallRng::seed_from_u64(0);
    assert!(matches!(
        pool.get_random_team(3, &mut rng),
        Err(ArenaError::NoOpponentAvailable { turn: 3 })
    ));
    Ok(())
}

#[test]
fn malformed_store_names_the_line() {
    let dir = make_store("2 (Ant,2,1,1,none)\n2 (Ant,2,1,1,none\n");
    let pool = OpponentPool::from_path(dir.path().join("saved_teams.txt"));
    let err = pool.len().unwrap_err();
    assert!(matches!(err, ArenaError::MalformedSerializedState(_)));
    assert!(err.to_string().contains("line 2"), "{err}");
}

#[test]
fn appended_teams_show_up_after_clear() -> anyhow::Result<()> {
    let dir = make_store(STORE);
    let path = dir.path().join("saved_teams.txt");
    let mut pool = OpponentPool::from_path(&path);
    assert_eq!(pool.len()?, 3);

    let mut team = make_team(&[(PetKind::Ant, 2, 1)]);
    team.begin_turn();
    team.begin_turn();
    team.begin_turn();
    append_team(&path, &team)?;
    assert_eq!(pool.len()?, 3);

    pool.clear();
    assert_eq!(pool.len()?, 4);
    let (turn, teams) = pool.teams_at(3)?;
    assert_eq!(turn, 3);
    assert_eq!(teams[0].serialize(View::Persistent), "3 (Ant,2,1,1,none)");
    Ok(())
}

#[test]
fn evaluation_covers_every_stored_team() -> anyhow::Result<()> {
    let pool = OpponentPool::from_text(STORE);
    let team = make_team(&[(PetKind::Beaver, 10, 10)]);

    let record = evaluate_pool(&team, &pool, 3, FightOptions::default())?;
    assert_eq!(record.turn, 2);
    assert_eq!(record.total(), 2);
    assert_eq!(record.wins, 2);
    assert!((record.win_rate() - 1.0).abs() < f64::EPSILON);
    Ok(())
}
