/// Level recipes, level loading, and the boss-defeated → store transition.
///
/// Each recipe lays out a sine-profiled chain of floating platforms with
/// random jitter, ground walkers, throwers on every few platforms, pickups
/// above the platforms, the level's hazards, and exactly one boss.

use rand::Rng;

use crate::boss::new_boss;
use crate::constants::{
    FINAL_LEVEL, FIRST_LEVEL, GROUND_HEIGHT, GROUND_Y, MAX_HP, PLAYER_GROUND_Y, PLAYER_START_X,
    TIME_BONUS_BASE, TIME_BONUS_PER_SECOND, WORLD_WIDTH,
};
use crate::enemies::{boss_of, is_alive, new_thrower, new_walker};
use crate::entities::{
    BossKind, Enemy, EnemyKind, GameState, GameStatus, Hazard, HazardKind, Pickup, PickupKind,
    ProjectileKind,
};
use crate::error::GameError;
use crate::geometry::Rect;
use crate::hazards::{cycle, eruption};

// ── Recipes ──────────────────────────────────────────────────────────────────

struct PlatformRule {
    count: usize,
    x_start: f32,
    x_step: f32,
    x_jitter: f32,
    y_base: f32,
    y_amplitude: f32,
    y_frequency: f32,
    width_base: f32,
    width_jitter: f32,
    height: f32,
}

/// Platform `i` (ground is 0) gets a thrower when
/// `i >= first && i < limit && i % modulo == remainder`.
struct ThrowerRule {
    first: usize,
    modulo: usize,
    remainder: usize,
    limit: usize,
    cooldown_base: i32,
    cooldown_step: i32,
    even: ProjectileKind,
    odd: ProjectileKind,
}

/// Floating platform `i` (ground excluded) gets a pickup when
/// `i % modulo == remainder` and `i > after`.
struct PickupRule {
    modulo: usize,
    remainder: usize,
    after: Option<usize>,
    /// Offset from the platform's left edge; `None` centres the pickup.
    x_offset: Option<f32>,
    y_offset: f32,
    size: f32,
    kind: PickupKind,
    value: u32,
}

struct LevelRecipe {
    platforms: PlatformRule,
    walker_xs: &'static [f32],
    walker_health: i32,
    walker_vx: f32,
    throwers: ThrowerRule,
    pickups: [PickupRule; 3],
    boss: BossKind,
    hazards: fn() -> Vec<Hazard>,
}

fn gold(modulo: usize, remainder: usize, after: Option<usize>, x_offset: Option<f32>, y_offset: f32, value: u32) -> PickupRule {
    PickupRule {
        modulo,
        remainder,
        after,
        x_offset,
        y_offset,
        size: 22.0,
        kind: PickupKind::Gold,
        value,
    }
}

fn star(modulo: usize, remainder: usize, after: usize, x_offset: Option<f32>, y_offset: f32, value: u32) -> PickupRule {
    PickupRule {
        modulo,
        remainder,
        after: Some(after),
        x_offset,
        y_offset,
        size: 20.0,
        kind: PickupKind::Star,
        value,
    }
}

fn recipe(level: u32) -> Option<LevelRecipe> {
    let recipe = match level {
        // Desert temple
        1 => LevelRecipe {
            platforms: PlatformRule {
                count: 25,
                x_start: 400.0,
                x_step: 150.0,
                x_jitter: 80.0,
                y_base: 380.0,
                y_amplitude: 60.0,
                y_frequency: 0.5,
                width_base: 80.0,
                width_jitter: 40.0,
                height: 16.0,
            },
            walker_xs: &[800.0, 1600.0, 2000.0, 2800.0, 3200.0],
            walker_health: 20,
            walker_vx: -2.4,
            throwers: ThrowerRule {
                first: 3,
                modulo: 4,
                remainder: 0,
                limit: 20,
                cooldown_base: 60,
                cooldown_step: 15,
                even: ProjectileKind::Knife,
                odd: ProjectileKind::Axe,
            },
            pickups: [
                gold(2, 0, None, None, -50.0, 5),
                gold(5, 0, Some(0), Some(15.0), -85.0, 10),
                star(6, 3, 2, None, -70.0, 100),
            ],
            boss: BossKind::SandPharaoh,
            hazards: desert_hazards,
        },
        // Jungle
        2 => LevelRecipe {
            platforms: PlatformRule {
                count: 28,
                x_start: 350.0,
                x_step: 130.0,
                x_jitter: 60.0,
                y_base: 360.0,
                y_amplitude: 70.0,
                y_frequency: 0.6,
                width_base: 70.0,
                width_jitter: 50.0,
                height: 14.0,
            },
            walker_xs: &[800.0, 1500.0, 1800.0, 2600.0, 3000.0],
            walker_health: 20,
            walker_vx: -2.6,
            throwers: ThrowerRule {
                first: 3,
                modulo: 4,
                remainder: 1,
                limit: 24,
                cooldown_base: 55,
                cooldown_step: 12,
                even: ProjectileKind::Knife,
                odd: ProjectileKind::Axe,
            },
            pickups: [
                gold(2, 1, None, None, -55.0, 8),
                gold(4, 0, Some(2), Some(20.0), -95.0, 15),
                star(5, 2, 3, Some(10.0), -75.0, 150),
            ],
            boss: BossKind::JungleRoc,
            hazards: jungle_hazards,
        },
        // Cave
        3 => LevelRecipe {
            platforms: PlatformRule {
                count: 32,
                x_start: 300.0,
                x_step: 120.0,
                x_jitter: 50.0,
                y_base: 340.0,
                y_amplitude: 80.0,
                y_frequency: 0.7,
                width_base: 65.0,
                width_jitter: 55.0,
                height: 14.0,
            },
            walker_xs: &[700.0, 1300.0, 1650.0, 2350.0, 2700.0, 3400.0],
            walker_health: 30,
            walker_vx: -2.8,
            throwers: ThrowerRule {
                first: 2,
                modulo: 4,
                remainder: 2,
                limit: 28,
                cooldown_base: 50,
                cooldown_step: 10,
                even: ProjectileKind::Knife,
                odd: ProjectileKind::Axe,
            },
            pickups: [
                gold(2, 0, None, None, -60.0, 10),
                gold(4, 2, Some(2), Some(10.0), -105.0, 20),
                star(5, 1, 4, Some(15.0), -80.0, 200),
            ],
            boss: BossKind::CaveKraken,
            hazards: cave_hazards,
        },
        // Volcano
        4 => LevelRecipe {
            platforms: PlatformRule {
                count: 35,
                x_start: 250.0,
                x_step: 110.0,
                x_jitter: 45.0,
                y_base: 320.0,
                y_amplitude: 90.0,
                y_frequency: 0.8,
                width_base: 60.0,
                width_jitter: 60.0,
                height: 14.0,
            },
            walker_xs: &[650.0, 1250.0, 1550.0, 2150.0, 2450.0, 3050.0, 3350.0],
            walker_health: 30,
            walker_vx: -3.0,
            throwers: ThrowerRule {
                first: 2,
                modulo: 4,
                remainder: 3,
                limit: 30,
                cooldown_base: 45,
                cooldown_step: 8,
                even: ProjectileKind::Knife,
                odd: ProjectileKind::Axe,
            },
            pickups: [
                gold(2, 1, None, None, -65.0, 12),
                gold(4, 1, Some(3), Some(25.0), -110.0, 25),
                star(4, 3, 5, Some(18.0), -85.0, 250),
            ],
            boss: BossKind::MagmaGolem,
            hazards: volcano_hazards,
        },
        // Glacier
        5 => LevelRecipe {
            platforms: PlatformRule {
                count: 36,
                x_start: 240.0,
                x_step: 100.0,
                x_jitter: 40.0,
                y_base: 330.0,
                y_amplitude: 85.0,
                y_frequency: 0.85,
                width_base: 60.0,
                width_jitter: 55.0,
                height: 14.0,
            },
            walker_xs: &[600.0, 1150.0, 1500.0, 2000.0, 2400.0, 2900.0, 3300.0],
            walker_health: 40,
            walker_vx: -3.2,
            throwers: ThrowerRule {
                first: 2,
                modulo: 4,
                remainder: 0,
                limit: 32,
                cooldown_base: 40,
                cooldown_step: 8,
                even: ProjectileKind::IceShard,
                odd: ProjectileKind::Knife,
            },
            pickups: [
                gold(2, 0, None, None, -65.0, 14),
                gold(4, 2, Some(3), Some(20.0), -110.0, 30),
                star(5, 4, 5, Some(12.0), -85.0, 300),
            ],
            boss: BossKind::FrostWyrm,
            hazards: glacier_hazards,
        },
        // Clockwork factory
        6 => LevelRecipe {
            platforms: PlatformRule {
                count: 38,
                x_start: 220.0,
                x_step: 95.0,
                x_jitter: 40.0,
                y_base: 320.0,
                y_amplitude: 95.0,
                y_frequency: 0.9,
                width_base: 58.0,
                width_jitter: 55.0,
                height: 14.0,
            },
            walker_xs: &[550.0, 1000.0, 1400.0, 1800.0, 2200.0, 2600.0, 3000.0, 3300.0],
            walker_health: 40,
            walker_vx: -3.4,
            throwers: ThrowerRule {
                first: 2,
                modulo: 4,
                remainder: 1,
                limit: 34,
                cooldown_base: 40,
                cooldown_step: 6,
                even: ProjectileKind::Gear,
                odd: ProjectileKind::Axe,
            },
            pickups: [
                gold(2, 1, None, None, -70.0, 16),
                gold(4, 0, Some(3), Some(22.0), -115.0, 35),
                star(5, 3, 5, Some(14.0), -90.0, 350),
            ],
            boss: BossKind::ClockworkKing,
            hazards: factory_hazards,
        },
        _ => return None,
    };
    Some(recipe)
}

// ── Hazard layouts ───────────────────────────────────────────────────────────

fn desert_hazards() -> Vec<Hazard> {
    [1100.0, 2300.0, 3000.0]
        .iter()
        .enumerate()
        .map(|(i, &x)| Hazard {
            body: Rect::new(x, GROUND_Y - 10.0, 90.0, 10.0),
            kind: HazardKind::Sand(cycle(200, 80, i as u32 * 60)),
        })
        .collect()
}

fn jungle_hazards() -> Vec<Hazard> {
    [1200.0, 2000.0, 2900.0]
        .iter()
        .enumerate()
        .map(|(i, &x)| Hazard {
            body: Rect::new(x, GROUND_Y - 150.0, 24.0, 150.0),
            kind: HazardKind::Vine(cycle(150, 40, i as u32 * 50)),
        })
        .collect()
}

fn cave_hazards() -> Vec<Hazard> {
    [900.0, 1500.0, 2100.0, 2600.0, 3100.0]
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let spawn_y = -40.0 - i as f32 * 90.0;
            Hazard {
                body: Rect::new(x, spawn_y, 24.0, 40.0),
                kind: HazardKind::Stalactite { spawn_y, vy: 0.0 },
            }
        })
        .collect()
}

fn volcano_hazards() -> Vec<Hazard> {
    [1000.0, 1700.0, 2300.0, 2900.0]
        .iter()
        .enumerate()
        .map(|(i, &x)| Hazard {
            body: Rect::new(x, GROUND_Y - 12.0, 70.0, 12.0),
            kind: HazardKind::Lava(eruption(i as u32 * 60)),
        })
        .collect()
}

fn steam_vent(i: usize, x: f32) -> Hazard {
    Hazard {
        body: Rect::new(x, GROUND_Y - 140.0, 40.0, 140.0),
        kind: HazardKind::Steam(cycle(180, 60, i as u32 * 45)),
    }
}

fn glacier_hazards() -> Vec<Hazard> {
    let spikes = [1000.0, 1800.0, 2600.0, 3200.0]
        .iter()
        .enumerate()
        .map(|(i, &x)| Hazard {
            body: Rect::new(x, GROUND_Y - 24.0, 60.0, 24.0),
            kind: HazardKind::IceSpike(cycle(120, 45, i as u32 * 30)),
        });
    let vents = [1400.0, 2200.0, 3000.0]
        .iter()
        .enumerate()
        .map(|(i, &x)| steam_vent(i, x));
    spikes.chain(vents).collect()
}

fn factory_hazards() -> Vec<Hazard> {
    let gears = [1100.0, 2000.0, 2800.0]
        .iter()
        .enumerate()
        .map(|(i, &x)| Hazard {
            body: Rect::new(x, GROUND_Y - 40.0, 40.0, 40.0),
            kind: HazardKind::GearTrap {
                cycle: cycle(160, 100, i as u32 * 40),
                min_x: x - 150.0,
                max_x: x + 150.0,
                vx: 1.5,
            },
        });
    let vents = [1550.0, 2450.0]
        .iter()
        .enumerate()
        .map(|(i, &x)| steam_vent(i, x));
    gears.chain(vents).collect()
}

// ── Layout building ──────────────────────────────────────────────────────────

/// Everything a level load replaces.
#[derive(Clone, Debug)]
pub struct LevelLayout {
    pub platforms: Vec<Rect>,
    pub enemies: Vec<Enemy>,
    pub pickups: Vec<Pickup>,
    pub hazards: Vec<Hazard>,
}

pub fn build_level(level: u32, rng: &mut impl Rng) -> Result<LevelLayout, GameError> {
    let recipe = recipe(level).ok_or(GameError::UnknownLevel(level))?;

    let mut platforms = vec![Rect::new(0.0, GROUND_Y, WORLD_WIDTH, GROUND_HEIGHT)];
    let rule = &recipe.platforms;
    for i in 0..rule.count {
        let fi = i as f32;
        let x = rule.x_start + fi * rule.x_step + rng.gen::<f32>() * rule.x_jitter;
        let y = rule.y_base + (fi * rule.y_frequency).sin() * rule.y_amplitude;
        let width = rule.width_base + rng.gen::<f32>() * rule.width_jitter;
        platforms.push(Rect::new(x, y, width, rule.height));
    }

    let mut enemies: Vec<Enemy> = recipe
        .walker_xs
        .iter()
        .map(|&x| new_walker(x, recipe.walker_health, recipe.walker_vx))
        .collect();
    enemies.push(new_boss(recipe.boss));

    let t = &recipe.throwers;
    for (i, platform) in platforms.iter().enumerate() {
        if i >= t.first && i < t.limit && i % t.modulo == t.remainder {
            let cooldown = t.cooldown_base + i as i32 * t.cooldown_step;
            let projectile = if i % 2 == 0 { t.even } else { t.odd };
            enemies.push(new_thrower(platform, cooldown, projectile));
        }
    }

    let mut pickups = Vec::new();
    for (i, platform) in platforms.iter().skip(1).enumerate() {
        for rule in &recipe.pickups {
            let after_ok = rule.after.map_or(true, |after| i > after);
            if i % rule.modulo != rule.remainder || !after_ok {
                continue;
            }
            let x = match rule.x_offset {
                Some(offset) => platform.x + offset,
                None => platform.center_x() - rule.size / 2.0,
            };
            pickups.push(Pickup {
                body: Rect::new(x, platform.y + rule.y_offset, rule.size, rule.size),
                kind: rule.kind,
                value: rule.value,
            });
        }
    }

    let layout = LevelLayout {
        platforms,
        enemies,
        pickups,
        hazards: (recipe.hazards)(),
    };
    validate_layout(level, &layout)?;
    Ok(layout)
}

/// A level needs exactly one boss: its defeat is the only way out.
pub fn validate_layout(level: u32, layout: &LevelLayout) -> Result<(), GameError> {
    let found = layout
        .enemies
        .iter()
        .filter(|e| matches!(e.kind, EnemyKind::Boss(_)))
        .count();
    if found != 1 {
        return Err(GameError::BossCount { level, found });
    }
    Ok(())
}

// ── Loading ──────────────────────────────────────────────────────────────────

/// Replace the world with `level`'s layout. Score, gold, guns and armor carry
/// over; position, velocity, HP, timers and every entity store reset.
pub fn load_level(
    state: &GameState,
    level: u32,
    now: f64,
    rng: &mut impl Rng,
) -> Result<GameState, GameError> {
    let layout = build_level(level, rng)?;
    let mut next = state.clone();
    apply_layout(&mut next, level, layout, now);
    Ok(next)
}

pub(crate) fn apply_layout(state: &mut GameState, level: u32, layout: LevelLayout, now: f64) {
    state.level = level;
    state.level_started_at = now;
    state.hp = MAX_HP;
    state.status = GameStatus::Playing;
    state.last_time_bonus = 0;
    state.walker_spawn_timer = 0;
    state.camera_x = 0.0;

    state.platforms = layout.platforms;
    state.enemies = layout.enemies;
    state.pickups = layout.pickups;
    state.hazards = layout.hazards;
    state.bullets.clear();
    state.boss_projectiles.clear();
    state.death_effects.clear();

    let player = &mut state.player;
    player.body.x = PLAYER_START_X;
    player.body.y = PLAYER_GROUND_Y;
    player.vx = 0.0;
    player.vy = 0.0;
    player.grounded = false;
    player.crouching = false;
    player.invincible = 0;
    player.shoot_cooldown = 0;

    tracing::info!(
        level,
        platforms = state.platforms.len(),
        enemies = state.enemies.len(),
        hazards = state.hazards.len(),
        "level loaded"
    );
}

pub fn is_final_level(level: u32) -> bool {
    level >= FINAL_LEVEL
}

pub fn is_valid_level(level: u32) -> bool {
    (FIRST_LEVEL..=FINAL_LEVEL).contains(&level)
}

// ── Completion ───────────────────────────────────────────────────────────────

/// `max(0, floor(2500 - elapsed * 25))`.
pub fn time_bonus(elapsed_secs: f64) -> u32 {
    let bonus = (TIME_BONUS_BASE - elapsed_secs.max(0.0) * TIME_BONUS_PER_SECOND).floor();
    bonus.max(0.0) as u32
}

/// Open the store once the level's boss is down. Awards the time bonus and
/// returns true only on the tick the store opens; later calls are no-ops.
pub fn check_level_complete(state: &mut GameState, now: f64) -> bool {
    if state.status != GameStatus::Playing {
        return false;
    }
    let boss_down = boss_of(&state.enemies).is_some_and(|boss| !is_alive(boss));
    if !boss_down {
        return false;
    }

    let bonus = time_bonus(now - state.level_started_at);
    state.score += bonus;
    state.last_time_bonus = bonus;
    state.status = GameStatus::StoreOpen;
    tracing::info!(level = state.level, bonus, score = state.score, "level complete, store open");
    true
}
