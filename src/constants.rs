/// Simulation tunables. Distances are world pixels, durations are ticks.

// ── World ─────────────────────────────────────────────────────────────────────

pub const GRAVITY: f32 = 0.5;
pub const JUMP_FORCE: f32 = -12.0;
pub const MOVE_SPEED: f32 = 5.0;
pub const WORLD_WIDTH: f32 = 4000.0;
pub const WORLD_HEIGHT: f32 = 540.0;
/// Size of the visible window the camera follows.
pub const VIEW_WIDTH: f32 = 960.0;
pub const VIEW_HEIGHT: f32 = 540.0;
pub const GROUND_Y: f32 = 480.0;
pub const GROUND_HEIGHT: f32 = 60.0;
pub const BOSS_X: f32 = WORLD_WIDTH - 280.0;
pub const CAMERA_SMOOTH: f32 = 0.08;
/// Bullets and projectiles survive this far outside the camera window.
pub const OFFSCREEN_MARGIN: f32 = 50.0;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_START_X: f32 = 100.0;
pub const PLAYER_GROUND_Y: f32 = 432.0;
pub const PLAYER_WIDTH: f32 = 36.0;
pub const PLAYER_HEIGHT: f32 = 48.0;
pub const MAX_HP: i32 = 100;
pub const DEFAULT_DAMAGE: i32 = 20;
pub const INVINCIBILITY_TICKS: u32 = 120;
pub const KNOCKBACK_X: f32 = 8.0;
pub const KNOCKBACK_Y: f32 = -6.0;
/// Feet may sit this far below a platform top and still land on it.
pub const LANDING_TOLERANCE: f32 = 20.0;
pub const MUZZLE_DISTANCE: f32 = 24.0;
/// Angle between neighbouring bullets of a spread shot (radians).
pub const SPREAD_STEP: f32 = 0.25;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const WALKER_WIDTH: f32 = 44.0;
pub const WALKER_HEIGHT: f32 = 52.0;
pub const WALKER_SPAWN_INTERVAL: u32 = 120;
pub const WALKER_BASE_SPEED: f32 = 2.4;
pub const WALKER_SPEED_PER_LEVEL: f32 = 0.4;
pub const THROWER_WIDTH: f32 = 40.0;
pub const THROWER_HEIGHT: f32 = 42.0;
pub const THROWER_HEALTH: i32 = 2;
pub const THROWER_PROJECTILE_SPEED: f32 = 7.0;
pub const THROWER_RELOAD_BASE: i32 = 90;
pub const THROWER_RELOAD_JITTER: i32 = 40;
pub const THROWER_RANGE_BEHIND: f32 = 350.0;
pub const THROWER_RANGE_AHEAD: f32 = 400.0;
/// Bosses hold fire until the player is this close.
pub const BOSS_ENGAGE_RANGE: f32 = 400.0;
pub const BOSS_PROJECTILE_SIZE: f32 = 14.0;
pub const THROWN_PROJECTILE_SIZE: f32 = 12.0;

// ── Scoring & progression ─────────────────────────────────────────────────────

pub const SCORE_PER_HIT: u32 = 100;
pub const SCORE_PER_BOSS_HIT: u32 = 500;
pub const TIME_BONUS_BASE: f64 = 2500.0;
pub const TIME_BONUS_PER_SECOND: f64 = 25.0;
pub const FIRST_LEVEL: u32 = 1;
pub const FINAL_LEVEL: u32 = 6;

// ── Effects ───────────────────────────────────────────────────────────────────

pub const DEATH_EFFECT_TICKS: u32 = 50;
pub const DEATH_PARTICLES: usize = 16;
pub const BOSS_DEATH_PARTICLES: usize = 28;
pub const PARTICLE_DRAG: f32 = 0.92;
pub const PARTICLE_FADE: f32 = 0.025;

// ── Hazards ───────────────────────────────────────────────────────────────────

pub const STALACTITE_GRAVITY: f32 = 0.3;
pub const LAVA_CYCLE: u32 = 240;
pub const LAVA_RISE_START: u32 = 120;
pub const LAVA_FALL_START: u32 = 170;
pub const LAVA_SPAWN_PHASE: u32 = 145;
pub const LAVA_MAX_HEIGHT: f32 = 160.0;
pub const LAVA_COLUMN_WIDTH: f32 = 30.0;
pub const FIREBALL_SIZE: f32 = 16.0;
pub const FIREBALL_GRAVITY: f32 = 0.3;
