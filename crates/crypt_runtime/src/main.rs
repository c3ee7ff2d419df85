//! Crypt Run demo
//!
//! Loads the configuration, builds a small crypt and plays it through with
//! a scripted player: shoot the ghouls, take the key, open the door, loot
//! the chest and walk out. The results screen is written to the log.
//!
//! Run with: cargo run -p crypt_runtime -- [config.toml]
//!       or: CRYPT_CONFIG=game.toml cargo run --bin crypt

use crypt_core::math::{self, Vec3};
use crypt_core::{EntityId, ItemId};
use crypt_gamestate::{format_clock, LevelRecord, ProgressSaver, SaveFormat};
use crypt_inventory::Door;
use crypt_runtime::prelude::*;

const SAVE_SLOT: &str = "progress";
const FRAME: f32 = 0.25;

struct Layout {
    ghouls: Vec<EntityId>,
    key: Vec3,
    door: Vec3,
    chest: Vec3,
    treasure: ItemId,
    finish: Vec3,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = GameConfig::load()?;
    config.log_summary();

    let mut store = config.progress_store()?;
    if store.levels().is_empty() {
        store.register(
            LevelRecord::new("crypt_1", "The Ossuary")
                .with_description("Clear the ossuary and recover its treasure")
                .with_objective("Slay the ghouls")
                .with_objective("Recover the treasure"),
        )?;
    }

    let saver = config
        .save_dir
        .as_ref()
        .map(|dir| ProgressSaver::new(dir).with_format(SaveFormat::Json));
    if let Some(saver) = &saver {
        if saver.exists(SAVE_SLOT) {
            saver.restore(SAVE_SLOT, &mut store)?;
        }
    }

    let level_id = store
        .levels()
        .first()
        .map(|level| level.id.clone())
        .ok_or("no levels configured")?;

    let mut session = GameSession::new(store);
    let mut scenes = SceneLog::new();
    for (id, best) in session.level_times() {
        log::info!("{:<12} best {}", id, format_clock(best));
    }

    session.play_level(&level_id, &mut scenes)?;
    let mut arena = Arena::new(&level_id, &config, EventBus::shared())?;
    let layout = build(&mut arena);
    arena.start();
    play(&mut arena, &layout, &mut session, &mut scenes);

    match session.take_results() {
        Some(results) => {
            for line in results.to_string().lines() {
                log::info!("{}", line);
            }
        }
        None => log::warn!("Run did not finish"),
    }

    if let Some(saver) = &saver {
        saver.save(SAVE_SLOT, session.store())?;
    }
    Ok(())
}

fn build(arena: &mut Arena) -> Layout {
    let ghouls = vec![
        arena.spawn_enemy("ghoul", [0.0, 0.0, 8.0]),
        arena.spawn_enemy("ghoul", [4.0, 0.0, 9.0]),
    ];

    let key_position = [-4.0, 0.0, 0.0];
    let key = arena.add_key(key_position);

    let door = [0.0, 0.0, 12.0];
    let door_body = arena.add_wall(door, [2.0, 2.0, 0.2]);
    arena.add_interactable(door, Door::new().with_key(key).with_body(door_body));

    let chest = [0.0, 0.0, 14.0];
    let treasure = arena.add_chest(chest);

    let finish = [0.0, 0.0, 20.0];
    arena.set_finish_zone(finish, 1.5);

    arena.add_objective(KillAllObjective::new("Slay the ghouls", ghouls.clone()));
    arena.add_objective(CollectAllObjective::new("Recover the treasure", [treasure]));

    Layout {
        ghouls,
        key: key_position,
        door,
        chest,
        treasure,
        finish,
    }
}

fn play(arena: &mut Arena, layout: &Layout, session: &mut GameSession, scenes: &mut SceneLog) {
    let mut step = |arena: &mut Arena| arena.tick(FRAME, session, scenes).is_some();

    step(arena);

    for &ghoul in &layout.ghouls {
        for _ in 0..8 {
            let Some(target) = arena.enemy(ghoul).filter(|e| e.is_alive()) else {
                break;
            };
            let aim = math::sub(target.position(), arena.player().position);
            arena.face(aim);
            arena.release_trigger();
            log::info!("Shot: {:?}", arena.fire());
            if step(arena) {
                return;
            }
        }
    }

    arena.move_player(layout.key);
    if step(arena) {
        return;
    }

    arena.move_player(math::sub(layout.door, [0.0, 0.0, 2.0]));
    arena.face([0.0, 0.0, 1.0]);
    log::info!("Door: {:?}", arena.interact());

    arena.move_player(math::sub(layout.chest, [0.0, 0.0, 0.5]));
    log::info!("Chest: {:?}", arena.interact());

    for _ in 0..20 {
        if step(arena) {
            return;
        }
        if arena.collectible(layout.treasure).is_some_and(|c| !c.is_active()) {
            break;
        }
    }

    arena.move_player(layout.finish);
    step(arena);
}
