/// Boss catalogue and the per-boss movement and attack patterns.
///
/// Movement oscillates with the wall-clock seconds passed in as `now`, so the
/// sway looks the same at any frame rate. Attack timing is a tick cooldown.

use std::f32::consts::TAU;

use crate::constants::{BOSS_ENGAGE_RANGE, BOSS_PROJECTILE_SIZE, BOSS_X, SPREAD_STEP};
use crate::entities::{Boss, BossKind, BossProjectile, Enemy, EnemyKind, Player, ProjectileKind};
use crate::geometry::Rect;
use crate::projectiles::launch;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossStats {
    pub width: f32,
    pub height: f32,
    pub health: i32,
    pub start_y: f32,
    pub vx: f32,
    /// Vertical band the boss is clamped to.
    pub min_y: f32,
    pub max_y: f32,
    /// Ticks between volleys.
    pub cooldown: i32,
}

impl BossKind {
    pub fn stats(&self) -> BossStats {
        match self {
            BossKind::SandPharaoh => BossStats {
                width: 120.0,
                height: 100.0,
                health: 30,
                start_y: 380.0,
                vx: 0.0,
                min_y: 360.0,
                max_y: 420.0,
                cooldown: 90,
            },
            BossKind::JungleRoc => BossStats {
                width: 100.0,
                height: 100.0,
                health: 50,
                start_y: 350.0,
                vx: 2.0,
                min_y: 320.0,
                max_y: 400.0,
                cooldown: 60,
            },
            BossKind::CaveKraken => BossStats {
                width: 140.0,
                height: 120.0,
                health: 80,
                start_y: 360.0,
                vx: 0.0,
                min_y: 340.0,
                max_y: 420.0,
                cooldown: 70,
            },
            BossKind::MagmaGolem => BossStats {
                width: 100.0,
                height: 90.0,
                health: 100,
                start_y: 320.0,
                vx: 0.0,
                min_y: 320.0,
                max_y: 390.0,
                cooldown: 50,
            },
            BossKind::FrostWyrm => BossStats {
                width: 110.0,
                height: 100.0,
                health: 120,
                start_y: 360.0,
                vx: 2.0,
                min_y: 340.0,
                max_y: 420.0,
                cooldown: 65,
            },
            BossKind::ClockworkKing => BossStats {
                width: 130.0,
                height: 120.0,
                health: 150,
                start_y: 330.0,
                vx: 0.0,
                min_y: 300.0,
                max_y: 400.0,
                cooldown: 55,
            },
        }
    }
}

pub fn new_boss(kind: BossKind) -> Enemy {
    let stats = kind.stats();
    Enemy {
        body: Rect::new(BOSS_X, stats.start_y, stats.width, stats.height),
        health: stats.health,
        max_health: stats.health,
        kind: EnemyKind::Boss(Boss {
            kind,
            vx: stats.vx,
            vy: 0.0,
            shoot_cooldown: 0,
            volleys: 0,
            defeated: false,
        }),
    }
}

/// Fraction of the health bar left, in `0.0..=1.0`.
pub fn health_fraction(enemy: &Enemy) -> f32 {
    if enemy.max_health <= 0 {
        return 0.0;
    }
    (enemy.health.max(0) as f32 / enemy.max_health as f32).min(1.0)
}

// ── Movement ─────────────────────────────────────────────────────────────────

fn wave(now: f64, freq: f64, amp: f64) -> f32 {
    ((now * freq).sin() * amp) as f32
}

/// Patrol between `min_x` and `max_x`, turning around at either end.
fn patrol(body: &mut Rect, vx: &mut f32, step: f32, min_x: f32, max_x: f32) {
    body.x += step;
    if body.x <= min_x && *vx < 0.0 {
        *vx = -*vx;
    } else if body.x >= max_x && *vx > 0.0 {
        *vx = -*vx;
    }
    body.x = body.x.clamp(min_x, max_x);
}

fn move_boss(body: &mut Rect, boss: &mut Boss, player: &Player, now: f64) {
    let stats = boss.kind.stats();
    match boss.kind {
        BossKind::SandPharaoh => {
            boss.vy = wave(now, 2.0, 2.0);
            if body.x > player.body.x + 200.0 {
                body.x -= 1.5;
            }
        }
        BossKind::JungleRoc => {
            let step = boss.vx;
            patrol(body, &mut boss.vx, step, BOSS_X - 80.0, BOSS_X + 60.0);
            boss.vy = wave(now, 3.0, 2.5);
        }
        BossKind::CaveKraken => boss.vy = wave(now, 1.5, 3.0),
        BossKind::MagmaGolem => boss.vy = wave(now, 1.2, 2.0),
        BossKind::FrostWyrm => {
            let dashing = (now * 2.0).sin() > 0.8;
            let step = if dashing { boss.vx * 3.0 } else { boss.vx };
            patrol(body, &mut boss.vx, step, BOSS_X - 160.0, BOSS_X + 60.0);
            boss.vy = wave(now, 2.5, 1.5);
        }
        BossKind::ClockworkKing => {
            body.x = (body.x + wave(now, 0.9, 1.2)).clamp(BOSS_X - 120.0, BOSS_X + 40.0);
            boss.vy = wave(now, 1.8, 2.5);
        }
    }
    body.y = (body.y + boss.vy).clamp(stats.min_y, stats.max_y);
}

// ── Attacks ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Attack {
    /// One shot straight at the player.
    Aimed,
    /// `n` shots fanned around the aimed direction.
    Spread(u32),
    /// `n` shots evenly spaced around the full circle.
    Radial(u32),
    /// One slow shot that steers toward the player.
    Homing,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Volley {
    pub attack: Attack,
    pub projectile: ProjectileKind,
    pub speed: f32,
    /// Cosmetic spin given to each projectile.
    pub spin: f32,
}

/// The volley a boss fires next. The Clockwork King alternates between a
/// spinning gear fan and a homing ghost.
pub fn next_volley(boss: &Boss) -> Volley {
    let volley = |attack, projectile, speed| Volley {
        attack,
        projectile,
        speed,
        spin: 0.0,
    };
    match boss.kind {
        BossKind::SandPharaoh => volley(Attack::Aimed, ProjectileKind::Coin, 6.0),
        BossKind::JungleRoc => volley(Attack::Spread(3), ProjectileKind::Egg, 8.0),
        BossKind::CaveKraken => volley(Attack::Spread(5), ProjectileKind::Ink, 7.0),
        BossKind::MagmaGolem => volley(Attack::Radial(8), ProjectileKind::Generic, 9.0),
        BossKind::FrostWyrm => volley(Attack::Spread(4), ProjectileKind::IceShard, 8.0),
        BossKind::ClockworkKing if boss.volleys % 2 == 0 => Volley {
            spin: 0.3,
            ..volley(Attack::Spread(6), ProjectileKind::Gear, 7.0)
        },
        BossKind::ClockworkKing => volley(Attack::Homing, ProjectileKind::Ghost, 4.0),
    }
}

/// Projectiles for one volley from `(cx, cy)` toward the player's centre.
pub fn volley_projectiles(volley: &Volley, cx: f32, cy: f32, player: &Player) -> Vec<BossProjectile> {
    let aim = (player.body.center_y() - cy).atan2(player.body.center_x() - cx);
    let angles: Vec<f32> = match volley.attack {
        Attack::Aimed | Attack::Homing => vec![aim],
        Attack::Spread(n) => {
            let mid = n.saturating_sub(1) as f32 / 2.0;
            (0..n).map(|i| aim + (i as f32 - mid) * SPREAD_STEP).collect()
        }
        Attack::Radial(n) => (0..n).map(|i| aim + i as f32 * TAU / n as f32).collect(),
    };

    angles
        .into_iter()
        .map(|angle| {
            let mut p = launch(volley.projectile, cx, cy, BOSS_PROJECTILE_SIZE, angle, volley.speed);
            p.homing = volley.attack == Attack::Homing;
            p.spin = volley.spin;
            p
        })
        .collect()
}

// ── Per-tick update ──────────────────────────────────────────────────────────

pub fn update_boss(
    body: &mut Rect,
    boss: &mut Boss,
    player: &Player,
    now: f64,
    projectiles: &mut Vec<BossProjectile>,
) {
    if boss.defeated {
        return;
    }
    move_boss(body, boss, player, now);

    boss.shoot_cooldown -= 1;
    if boss.shoot_cooldown <= 0 && player.body.x > body.x - BOSS_ENGAGE_RANGE {
        let volley = next_volley(boss);
        projectiles.extend(volley_projectiles(&volley, body.center_x(), body.center_y(), player));
        boss.volleys += 1;
        boss.shoot_cooldown = boss.kind.stats().cooldown;
    }
}
