//! Whole-level runs through the arena

use crypt_gamestate::{GameState, LevelRecord, ProgressStore, MAIN_MENU_SCENE};
use crypt_inventory::PickupState;
use crypt_runtime::prelude::*;

const LEVEL: &str = "crypt_1";

fn session() -> (GameSession, SceneLog) {
    let mut store = ProgressStore::new();
    store
        .register(
            LevelRecord::new(LEVEL, "The Ossuary")
                .with_objective("Slay the ghoul")
                .with_objective("Recover the treasure"),
        )
        .unwrap();
    (GameSession::new(store), SceneLog::new())
}

struct Level {
    arena: Arena,
    ghoul: crypt_core::EntityId,
    treasure: crypt_core::ItemId,
}

fn level(config: &GameConfig) -> Level {
    let mut arena = Arena::new(LEVEL, config, EventBus::shared()).unwrap();
    let ghoul = arena.spawn_enemy("ghoul", [0.0, 0.0, 8.0]);
    let treasure = arena.add_treasure([5.0, 0.0, 0.0]);
    arena.set_finish_zone([0.0, 0.0, -10.0], 1.5);
    arena.add_objective(KillAllObjective::new("Slay the ghoul", [ghoul]));
    arena.add_objective(CollectAllObjective::new("Recover the treasure", [treasure]));
    arena.start();
    Level {
        arena,
        ghoul,
        treasure,
    }
}

#[test]
fn test_winning_run_sets_best_time() {
    let (mut session, mut scenes) = session();
    session.play_level(LEVEL, &mut scenes).unwrap();
    let Level {
        mut arena,
        ghoul,
        treasure,
    } = level(&GameConfig::default());

    assert!(arena.tick(0.5, &mut session, &mut scenes).is_none());
    assert!(matches!(arena.fire(), ShotReport::Hit { enemy, .. } if enemy == ghoul));
    assert!(!arena.enemy(ghoul).unwrap().is_alive());

    arena.move_player([5.0, 0.0, 0.0]);
    arena.tick(0.5, &mut session, &mut scenes);
    assert_eq!(arena.collectible(treasure).unwrap().state(), PickupState::Claimed);
    assert_eq!(arena.run().check_objectives(), vec![true, false]);

    // Pickup completes after the three second delay
    for _ in 0..7 {
        arena.tick(0.5, &mut session, &mut scenes);
    }
    assert!(!arena.collectible(treasure).unwrap().is_active());
    assert_eq!(arena.run().check_objectives(), vec![true, true]);

    arena.move_player([0.0, 0.0, -10.0]);
    let (result, outcome) = arena.tick(0.5, &mut session, &mut scenes).unwrap();
    assert!(result.all_complete);
    assert_eq!(result.objective_results, vec![true, true]);
    assert_eq!(result.elapsed_time, 4.5);
    assert!(outcome.new_best);
    assert!(outcome.first_completion);

    assert_eq!(session.state(), GameState::EndScreen);
    assert_eq!(scenes.last(), Some(MAIN_MENU_SCENE));

    let results = session.take_results().unwrap();
    assert!(results.passed);
    assert_eq!(results.run_time, 4.5);
    assert_eq!(results.fastest_time, 4.5);
    assert_eq!(
        results.objectives,
        vec![
            ("Slay the ghoul".to_string(), true),
            ("Recover the treasure".to_string(), true)
        ]
    );
    assert_eq!(session.state(), GameState::Menu);
    assert!(session.take_results().is_none());
}

#[test]
fn test_leaving_early_fails_without_touching_best() {
    let (mut session, mut scenes) = session();
    session.play_level(LEVEL, &mut scenes).unwrap();
    let Level { mut arena, .. } = level(&GameConfig::default());

    arena.tick(0.5, &mut session, &mut scenes);
    arena.fire();
    arena.move_player([0.0, 0.0, -10.0]);
    let (result, outcome) = arena.tick(0.5, &mut session, &mut scenes).unwrap();

    assert_eq!(result.objective_results, vec![true, false]);
    assert!(!result.all_complete);
    assert!(!outcome.new_best);

    let record = session.store().level(LEVEL).unwrap();
    assert!(!record.completed);
    assert_eq!(record.fastest_time, 180.0);

    // Walking through the exit again changes nothing
    arena.move_player([0.0, 0.0, 0.0]);
    assert!(arena.tick(0.5, &mut session, &mut scenes).is_none());
    arena.move_player([0.0, 0.0, -10.0]);
    assert!(arena.tick(0.5, &mut session, &mut scenes).is_none());
    assert_eq!(scenes.requests.len(), 2);
}

#[test]
fn test_claimed_treasure_is_lost_when_level_ends() {
    let (mut session, mut scenes) = session();
    session.play_level(LEVEL, &mut scenes).unwrap();
    let Level {
        mut arena,
        treasure,
        ..
    } = level(&GameConfig::default());

    arena.move_player([5.0, 0.0, 0.0]);
    arena.tick(0.5, &mut session, &mut scenes);
    assert_eq!(arena.collectible(treasure).unwrap().state(), PickupState::Claimed);

    arena.move_player([0.0, 0.0, -10.0]);
    let (result, _) = arena.tick(0.5, &mut session, &mut scenes).unwrap();
    assert_eq!(result.objective_results, vec![false, false]);
    assert_eq!(arena.collectible(treasure).unwrap().state(), PickupState::Claimed);
}

#[test]
fn test_ghoul_kills_fragile_player() {
    let (mut session, mut scenes) = session();
    session.play_level(LEVEL, &mut scenes).unwrap();

    let config = GameConfig::from_toml_str(
        r#"
        [player]
        max_health = 2
        invulnerability = 0.5

        [enemy]
        attack_interval = 1.0
        speed = 4.0
        "#,
    )
    .unwrap();
    let Level { mut arena, .. } = level(&config);

    let mut finished = None;
    for _ in 0..40 {
        finished = arena.tick(0.25, &mut session, &mut scenes);
        if finished.is_some() {
            break;
        }
    }

    let (result, _) = finished.expect("the ghoul should have killed the player");
    assert!(!arena.player().is_alive());
    assert!(!result.all_complete);
    assert_eq!(session.state(), GameState::EndScreen);
    assert!(!session.take_results().unwrap().passed);
}
