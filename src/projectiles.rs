/// Hostile projectiles: thrower knives, boss volleys and lava fireballs.

use crate::constants::{
    FIREBALL_GRAVITY, GROUND_Y, OFFSCREEN_MARGIN, VIEW_HEIGHT, VIEW_WIDTH,
};
use crate::entities::{BossProjectile, GameState, ProjectileKind};
use crate::geometry::{direction, Rect};
use crate::player::take_hit;

/// Fraction of the gap between current and desired velocity a homing
/// projectile closes each tick.
const HOMING_TURN: f32 = 0.04;

/// A projectile of `size`×`size` centred on `(cx, cy)`, flying at `speed`
/// along `angle`.
pub fn launch(
    kind: ProjectileKind,
    cx: f32,
    cy: f32,
    size: f32,
    angle: f32,
    speed: f32,
) -> BossProjectile {
    BossProjectile {
        body: Rect::new(cx - size / 2.0, cy - size / 2.0, size, size),
        vx: angle.cos() * speed,
        vy: angle.sin() * speed,
        kind,
        homing: false,
        spin: 0.0,
        angle: 0.0,
    }
}

/// Move every projectile, retire the ones that left the play area or hit
/// the ground, and resolve hits against the player. A projectile that
/// touches the player is consumed even while the player is invincible.
pub fn update_boss_projectiles(state: &mut GameState) {
    let min_x = state.camera_x - OFFSCREEN_MARGIN;
    let max_x = state.camera_x + VIEW_WIDTH + OFFSCREEN_MARGIN;
    let target_x = state.player.body.center_x();
    let target_y = state.player.body.center_y();
    let player_body = state.player.body;

    let mut hits = 0;
    state.boss_projectiles.retain_mut(|p| {
        if p.homing {
            let speed = p.vx.hypot(p.vy);
            let (dx, dy) = direction(p.body.center_x(), p.body.center_y(), target_x, target_y);
            p.vx += (dx * speed - p.vx) * HOMING_TURN;
            p.vy += (dy * speed - p.vy) * HOMING_TURN;
        }
        if p.kind == ProjectileKind::LavaFireball {
            p.vy += FIREBALL_GRAVITY;
        }
        p.body.x += p.vx;
        p.body.y += p.vy;
        p.angle += p.spin;

        if p.body.x < min_x || p.body.x > max_x {
            return false;
        }
        if p.body.bottom() < -OFFSCREEN_MARGIN || p.body.y > VIEW_HEIGHT + OFFSCREEN_MARGIN {
            return false;
        }
        if p.kind == ProjectileKind::LavaFireball && p.vy > 0.0 && p.body.bottom() >= GROUND_Y {
            return false;
        }
        if p.body.overlaps(&player_body) {
            hits += 1;
            return false;
        }
        true
    });

    // Only the first hit lands; it starts the invincibility window.
    if hits > 0 && state.player.invincible == 0 {
        take_hit(state);
    }
}
