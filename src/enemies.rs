/// Walker and thrower AI, the periodic walker spawner, and dispatch to the
/// boss patterns.

use rand::Rng;

use crate::boss::update_boss;
use crate::constants::{
    BOSS_X, PLAYER_GROUND_Y, THROWER_HEALTH, THROWER_HEIGHT, THROWER_PROJECTILE_SPEED,
    THROWER_RANGE_AHEAD, THROWER_RANGE_BEHIND, THROWER_RELOAD_BASE, THROWER_RELOAD_JITTER,
    THROWER_WIDTH, THROWN_PROJECTILE_SIZE, VIEW_WIDTH, WALKER_BASE_SPEED, WALKER_HEIGHT,
    WALKER_SPAWN_INTERVAL, WALKER_SPEED_PER_LEVEL, WALKER_WIDTH, WORLD_WIDTH,
};
use crate::entities::{BossProjectile, Enemy, EnemyKind, GameState, GameStatus, Player, ProjectileKind};
use crate::geometry::{direction, Rect};

// ── Constructors ─────────────────────────────────────────────────────────────

/// A walker standing on the ground at `x`.
pub fn new_walker(x: f32, health: i32, vx: f32) -> Enemy {
    Enemy {
        body: Rect::new(x, PLAYER_GROUND_Y - 4.0, WALKER_WIDTH, WALKER_HEIGHT),
        health,
        max_health: health,
        kind: EnemyKind::Walker { vx },
    }
}

/// A thrower standing on top of `platform`.
pub fn new_thrower(platform: &Rect, cooldown: i32, projectile: ProjectileKind) -> Enemy {
    Enemy {
        body: Rect::new(
            platform.center_x() - THROWER_WIDTH / 2.0,
            platform.y - THROWER_HEIGHT,
            THROWER_WIDTH,
            THROWER_HEIGHT,
        ),
        health: THROWER_HEALTH,
        max_health: THROWER_HEALTH,
        kind: EnemyKind::Thrower {
            cooldown,
            projectile,
        },
    }
}

/// Health of walkers spawned mid-level.
pub fn spawned_walker_health(level: u32) -> i32 {
    match level {
        0..=2 => 20,
        3..=4 => 30,
        _ => 40,
    }
}

pub fn spawned_walker_speed(level: u32) -> f32 {
    WALKER_BASE_SPEED + level.saturating_sub(1) as f32 * WALKER_SPEED_PER_LEVEL
}

// ── Queries ──────────────────────────────────────────────────────────────────

/// Can this enemy still be hit and still hurt the player?
pub fn is_alive(enemy: &Enemy) -> bool {
    match &enemy.kind {
        EnemyKind::Boss(boss) => !boss.defeated && enemy.health > 0,
        _ => enemy.health > 0,
    }
}

pub fn boss_of(enemies: &[Enemy]) -> Option<&Enemy> {
    enemies
        .iter()
        .find(|e| matches!(e.kind, EnemyKind::Boss(_)))
}

// ── Per-tick update ──────────────────────────────────────────────────────────

pub fn update_enemies(state: &mut GameState, now: f64, rng: &mut impl Rng) {
    state.walker_spawn_timer += 1;
    if state.walker_spawn_timer >= WALKER_SPAWN_INTERVAL && state.status == GameStatus::Playing {
        state.walker_spawn_timer = 0;
        let walker = spawn_walker(&state.player, state.camera_x, state.level);
        state.enemies.push(walker);
    }

    // Dead bosses stay: the level-complete check reads them.
    state
        .enemies
        .retain(|e| e.health > 0 || matches!(e.kind, EnemyKind::Boss(_)));

    let GameState {
        enemies,
        player,
        platforms,
        boss_projectiles,
        ..
    } = state;

    for enemy in enemies.iter_mut() {
        match &mut enemy.kind {
            EnemyKind::Walker { vx } => update_walker(&mut enemy.body, vx, platforms),
            EnemyKind::Thrower {
                cooldown,
                projectile,
            } => {
                if let Some(p) = update_thrower(&enemy.body, cooldown, *projectile, player, rng) {
                    boss_projectiles.push(p);
                }
            }
            EnemyKind::Boss(boss) => update_boss(&mut enemy.body, boss, player, now, boss_projectiles),
        }
    }
}

/// Extra walker entering from outside the camera view, heading into the
/// play area. Near the boss arena it comes from behind the player instead.
fn spawn_walker(player: &Player, camera_x: f32, level: u32) -> Enemy {
    let speed = spawned_walker_speed(level);
    let health = spawned_walker_health(level);
    let in_boss_area = player.body.x > BOSS_X - 350.0;
    if in_boss_area {
        new_walker((camera_x - 120.0).max(20.0), health, speed)
    } else {
        new_walker(
            (camera_x + VIEW_WIDTH + 180.0).min(WORLD_WIDTH - 50.0),
            health,
            -speed,
        )
    }
}

fn update_walker(body: &mut Rect, vx: &mut f32, platforms: &[Rect]) {
    body.x += *vx;
    let feet = body.bottom();
    let supported = platforms
        .iter()
        .any(|p| feet >= p.y - 4.0 && feet <= p.y + 12.0 && body.spans_x(p));
    if !supported {
        *vx = -*vx;
    }

    body.x = body.x.clamp(0.0, WORLD_WIDTH - body.width);
    if body.x <= 0.0 && *vx < 0.0 {
        *vx = -*vx;
    }
    if body.x >= WORLD_WIDTH - body.width && *vx > 0.0 {
        *vx = -*vx;
    }
}

/// Count down and, when ready and the player is in range, throw at the
/// player's centre from just above the thrower's centre.
fn update_thrower(
    body: &Rect,
    cooldown: &mut i32,
    projectile: ProjectileKind,
    player: &Player,
    rng: &mut impl Rng,
) -> Option<BossProjectile> {
    *cooldown -= 1;
    let in_range = player.body.x > body.x - THROWER_RANGE_BEHIND
        && player.body.x < body.x + THROWER_RANGE_AHEAD;
    if *cooldown > 0 || !in_range {
        return None;
    }

    let ex = body.center_x();
    let ey = body.center_y() - 8.0;
    let (dx, dy) = direction(ex, ey, player.body.center_x(), player.body.center_y());
    *cooldown = THROWER_RELOAD_BASE + rng.gen_range(0..THROWER_RELOAD_JITTER);

    let size = THROWN_PROJECTILE_SIZE;
    Some(BossProjectile {
        body: Rect::new(ex - size / 2.0, ey - size / 2.0, size, size),
        vx: dx * THROWER_PROJECTILE_SPEED,
        vy: dy * THROWER_PROJECTILE_SPEED,
        kind: projectile,
        homing: false,
        spin: if projectile == ProjectileKind::Axe { 0.25 } else { 0.0 },
        angle: 0.0,
    })
}
