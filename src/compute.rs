/// The per-frame game loop.
///
/// `tick` takes an immutable reference to the current `GameState` (plus the
/// held-key snapshot, the wall clock and an RNG handle) and returns a
/// brand-new `GameState`. Side effects are limited to the injected RNG.

use rand::Rng;

use crate::combat::{check_enemy_contact, check_hazard_contact, update_bullets, update_pickups};
use crate::constants::{CAMERA_SMOOTH, FIRST_LEVEL, MAX_HP, VIEW_WIDTH, WORLD_WIDTH};
use crate::effects::update_death_effects;
use crate::enemies::update_enemies;
use crate::entities::{Controls, GameState, GameStatus};
use crate::error::GameError;
use crate::hazards::update_hazards;
use crate::level::{apply_layout, build_level, check_level_complete};
use crate::player::{new_player, update_player};
use crate::projectiles::update_boss_projectiles;

// ── Constructors ─────────────────────────────────────────────────────────────

/// A new run starting at `level` with no score, gold or upgrades.
pub fn init_state(level: u32, now: f64, rng: &mut impl Rng) -> Result<GameState, GameError> {
    let layout = build_level(level, rng)?;
    let mut state = GameState {
        player: new_player(),
        hp: MAX_HP,
        score: 0,
        bullets: Vec::new(),
        enemies: Vec::new(),
        platforms: Vec::new(),
        pickups: Vec::new(),
        boss_projectiles: Vec::new(),
        hazards: Vec::new(),
        death_effects: Vec::new(),
        camera_x: 0.0,
        level: FIRST_LEVEL,
        level_started_at: now,
        walker_spawn_timer: 0,
        status: GameStatus::Playing,
        last_time_bonus: 0,
        frame: 0,
    };
    apply_layout(&mut state, level, layout, now);
    Ok(state)
}

// ── Per-frame tick (pure apart from the injected RNG) ─────────────────────────

/// Advance the simulation by one frame. Nothing moves while the store is
/// open or after the run has ended.
///
/// `now` is wall-clock seconds; it only drives boss sway and the level
/// timer. Every gameplay timer counts ticks.
pub fn tick(state: &GameState, controls: &Controls, now: f64, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    step(&mut next, controls, now, rng);
    next
}

/// In-place form of [`tick`]. Stage order matters: later stages read what
/// earlier ones wrote (bullet hits land before the level-complete check).
pub fn step(state: &mut GameState, controls: &Controls, now: f64, rng: &mut impl Rng) {
    if state.status != GameStatus::Playing {
        return;
    }
    state.frame += 1;

    update_player(state, controls);
    update_bullets(state, rng);
    update_death_effects(&mut state.death_effects);
    update_pickups(state);
    update_enemies(state, now, rng);
    update_boss_projectiles(state);
    update_camera(state);
    update_hazards(state, rng);
    check_enemy_contact(state);
    check_hazard_contact(state);

    if state.status == GameStatus::Playing {
        check_level_complete(state, now);
    }
}

/// Ease the camera toward centring the player, clamped to the world.
pub fn update_camera(state: &mut GameState) {
    let target = state.player.body.center_x() - VIEW_WIDTH / 2.0;
    state.camera_x += (target - state.camera_x) * CAMERA_SMOOTH;
    state.camera_x = state.camera_x.clamp(0.0, WORLD_WIDTH - VIEW_WIDTH);
}
