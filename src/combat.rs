/// Collision and damage resolution between the player, bullets, enemies,
/// hazards and pickups.
///
/// Enemy contact and hazard contact are independent passes. Each checks the
/// invincibility window first, so only the first hit of a tick lands.

use rand::Rng;

use crate::constants::{
    OFFSCREEN_MARGIN, SCORE_PER_BOSS_HIT, SCORE_PER_HIT, VIEW_HEIGHT, VIEW_WIDTH,
};
use crate::effects::spawn_death_effect;
use crate::enemies::is_alive;
use crate::entities::{EnemyKind, GameState, PickupKind};
use crate::hazards;
use crate::player::take_hit;

/// Move bullets, drop the ones that left the camera window on any side, and
/// let each remaining bullet hit the first live enemy it overlaps.
pub fn update_bullets(state: &mut GameState, rng: &mut impl Rng) {
    let min_x = state.camera_x - OFFSCREEN_MARGIN;
    let max_x = state.camera_x + VIEW_WIDTH + OFFSCREEN_MARGIN;
    let GameState {
        bullets,
        enemies,
        score,
        death_effects,
        ..
    } = state;

    bullets.retain_mut(|bullet| {
        bullet.body.x += bullet.vx;
        bullet.body.y += bullet.vy;
        if bullet.body.x < min_x || bullet.body.x > max_x {
            return false;
        }
        if bullet.body.bottom() < -OFFSCREEN_MARGIN
            || bullet.body.y > VIEW_HEIGHT + OFFSCREEN_MARGIN
        {
            return false;
        }

        let Some(enemy) = enemies
            .iter_mut()
            .find(|e| is_alive(e) && bullet.body.overlaps(&e.body))
        else {
            return true;
        };

        enemy.health -= bullet.damage;
        let is_boss = matches!(enemy.kind, EnemyKind::Boss(_));
        *score += if is_boss { SCORE_PER_BOSS_HIT } else { SCORE_PER_HIT };

        if enemy.health <= 0 {
            if let EnemyKind::Boss(boss) = &mut enemy.kind {
                boss.defeated = true;
                tracing::info!(boss = boss.kind.name(), "boss defeated");
            }
            death_effects.push(spawn_death_effect(
                enemy.body.center_x(),
                enemy.body.center_y(),
                is_boss,
                rng,
            ));
        }
        false
    });
}

pub fn update_pickups(state: &mut GameState) {
    let GameState {
        player,
        pickups,
        score,
        ..
    } = state;

    pickups.retain(|pickup| {
        if !player.body.overlaps(&pickup.body) {
            return true;
        }
        match pickup.kind {
            PickupKind::Gold => {
                player.gold += pickup.value;
                *score += pickup.value;
            }
            PickupKind::Star => *score += pickup.value,
        }
        false
    });
}

/// At most one hit from touching enemies per tick.
pub fn check_enemy_contact(state: &mut GameState) {
    if state.player.invincible > 0 {
        return;
    }
    let touching = state
        .enemies
        .iter()
        .any(|e| is_alive(e) && state.player.body.overlaps(&e.body));
    if touching {
        take_hit(state);
    }
}

/// At most one hit from active hazards per tick.
pub fn check_hazard_contact(state: &mut GameState) {
    if state.player.invincible > 0 {
        return;
    }
    let touching = state
        .hazards
        .iter()
        .any(|h| hazards::hits(h, &state.player.body));
    if touching {
        take_hit(state);
    }
}
