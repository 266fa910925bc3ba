/// Player controller: aim, movement, shooting, platform landing and the
/// damage-intake rule shared by every hostile system.

use crate::constants::{
    DEFAULT_DAMAGE, GRAVITY, INVINCIBILITY_TICKS, JUMP_FORCE, KNOCKBACK_X, KNOCKBACK_Y,
    LANDING_TOLERANCE, MOVE_SPEED, PLAYER_GROUND_Y, PLAYER_HEIGHT, PLAYER_START_X, PLAYER_WIDTH,
    WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::entities::{Controls, GameState, GameStatus, GunId, Player};
use crate::geometry::Rect;
use crate::weapons;

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh player at the level start, holding only the pistol.
pub fn new_player() -> Player {
    Player {
        body: Rect::new(PLAYER_START_X, PLAYER_GROUND_Y, PLAYER_WIDTH, PLAYER_HEIGHT),
        vx: 0.0,
        vy: 0.0,
        grounded: false,
        crouching: false,
        facing: 1.0,
        aim_angle: 0.0,
        gun: GunId::Pistol,
        owned_guns: vec![GunId::Pistol],
        gold: 0,
        has_armor: false,
        invincible: 0,
        shoot_cooldown: 0,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Point the gun at a world position. Facing follows the aim.
pub fn aim_at(state: &GameState, world_x: f32, world_y: f32) -> GameState {
    let mut next = state.clone();
    aim_player(&mut next.player, world_x, world_y);
    next
}

pub fn aim_player(player: &mut Player, world_x: f32, world_y: f32) {
    let px = player.body.center_x();
    let py = player.body.center_y();
    player.aim_angle = (world_y - py).atan2(world_x - px);
    player.facing = if player.aim_angle.cos() >= 0.0 { 1.0 } else { -1.0 };
}

// ── Damage intake ────────────────────────────────────────────────────────────

/// Damage one hit deals to this player: halved (floored) with armor.
pub fn damage_taken(player: &Player) -> i32 {
    if player.has_armor {
        DEFAULT_DAMAGE / 2
    } else {
        DEFAULT_DAMAGE
    }
}

/// Apply one hit: HP loss, invincibility window, knockback away from where
/// the player is facing. Ends the run when HP is exhausted.
///
/// Callers check `player.invincible` first; this function does not.
pub fn take_hit(state: &mut GameState) {
    state.hp -= damage_taken(&state.player);
    state.player.invincible = INVINCIBILITY_TICKS;
    state.player.vx = -state.player.facing * KNOCKBACK_X;
    state.player.vy = KNOCKBACK_Y;

    if state.hp <= 0 && state.status == GameStatus::Playing {
        state.status = GameStatus::Defeat;
        tracing::info!(level = state.level, score = state.score, "player defeated");
    }
}

// ── Per-tick update ──────────────────────────────────────────────────────────

pub fn update_player(state: &mut GameState, controls: &Controls) {
    let player = &mut state.player;
    player.invincible = player.invincible.saturating_sub(1);

    // Horizontal: crouch beats direction keys; left beats right.
    player.crouching = player.grounded && controls.crouch;
    player.vx = if player.crouching {
        0.0
    } else if controls.left {
        -MOVE_SPEED
    } else if controls.right {
        MOVE_SPEED
    } else {
        0.0
    };
    player.body.x += player.vx;

    if player.shoot_cooldown > 0 {
        player.shoot_cooldown -= 1;
    }
    if controls.fire && player.shoot_cooldown <= 0 {
        state.bullets.extend(weapons::fire(player));
        player.shoot_cooldown = player.gun.stats().cooldown;
    }

    player.vy += GRAVITY;
    if controls.jump && player.grounded {
        player.vy = JUMP_FORCE;
        player.grounded = false;
    }
    player.body.y += player.vy;

    land_on_platforms(player, &state.platforms);

    player.body.x = player.body.x.clamp(0.0, WORLD_WIDTH - player.body.width);

    if player.body.y > WORLD_HEIGHT {
        player.body.y = PLAYER_GROUND_Y;
        player.vy = 0.0;
        if player.invincible == 0 {
            take_hit(state);
        }
    }
}

/// Snap onto the first platform (list order) the player's feet reach this
/// tick while falling.
fn land_on_platforms(player: &mut Player, platforms: &[Rect]) {
    player.grounded = false;
    for platform in platforms {
        if !player.body.spans_x(platform) {
            continue;
        }
        let feet = player.body.bottom();
        if player.vy >= 0.0
            && feet <= platform.y + LANDING_TOLERANCE
            && feet + player.vy >= platform.y
        {
            player.body.y = platform.y - player.body.height;
            player.vy = 0.0;
            player.grounded = true;
            break;
        }
    }
}
