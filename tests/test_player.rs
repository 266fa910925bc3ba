use std::f32::consts::PI;

use run_and_gun::compute::init_state;
use run_and_gun::constants::*;
use run_and_gun::entities::*;
use run_and_gun::geometry::Rect;
use run_and_gun::player::*;
use run_and_gun::weapons::fire;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    let mut s = init_state(1, 0.0, &mut StdRng::seed_from_u64(42)).unwrap();
    s.platforms = vec![Rect::new(0.0, GROUND_Y, WORLD_WIDTH, GROUND_HEIGHT)];
    s.enemies.clear();
    s.pickups.clear();
    s.hazards.clear();
    s
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

// ── new_player ────────────────────────────────────────────────────────────────

#[test]
fn new_player_defaults() {
    let p = new_player();
    assert_eq!(p.body, Rect::new(PLAYER_START_X, PLAYER_GROUND_Y, PLAYER_WIDTH, PLAYER_HEIGHT));
    assert_eq!(p.gun, GunId::Pistol);
    assert_eq!(p.facing, 1.0);
    assert!(!p.has_armor);
    assert_eq!(p.invincible, 0);
}

// ── aim_at ────────────────────────────────────────────────────────────────────

#[test]
fn aim_at_sets_angle_and_facing() {
    let s = make_state();
    let cx = s.player.body.center_x();
    let cy = s.player.body.center_y();

    let left = aim_at(&s, cx - 100.0, cy);
    assert!(approx(left.player.aim_angle.abs(), PI));
    assert_eq!(left.player.facing, -1.0);

    let down_right = aim_at(&s, cx + 100.0, cy + 100.0);
    assert!(approx(down_right.player.aim_angle, PI / 4.0));
    assert_eq!(down_right.player.facing, 1.0);
}

#[test]
fn aim_at_leaves_input_untouched() {
    let s = make_state();
    let _ = aim_at(&s, 0.0, 0.0);
    assert_eq!(s.player.aim_angle, 0.0);
}

// ── Horizontal movement ───────────────────────────────────────────────────────

fn settle(s: &mut GameState) {
    // One idle tick lands the player on the ground.
    update_player(s, &Controls::default());
    assert!(s.player.grounded);
}

#[test]
fn left_beats_right() {
    let mut s = make_state();
    settle(&mut s);
    let x = s.player.body.x;
    update_player(
        &mut s,
        &Controls {
            left: true,
            right: true,
            ..Controls::default()
        },
    );
    assert_eq!(s.player.body.x, x - MOVE_SPEED);
}

#[test]
fn crouch_stops_horizontal_movement() {
    let mut s = make_state();
    settle(&mut s);
    let x = s.player.body.x;
    update_player(
        &mut s,
        &Controls {
            crouch: true,
            right: true,
            ..Controls::default()
        },
    );
    assert!(s.player.crouching);
    assert_eq!(s.player.body.x, x);
}

// ── Jumping and landing ───────────────────────────────────────────────────────

#[test]
fn jump_only_from_ground() {
    let mut s = make_state();
    settle(&mut s);
    let jump = Controls {
        jump: true,
        ..Controls::default()
    };
    update_player(&mut s, &jump);
    assert_eq!(s.player.vy, JUMP_FORCE);
    assert!(!s.player.grounded);

    // Airborne: holding jump only lets gravity act.
    update_player(&mut s, &jump);
    assert_eq!(s.player.vy, JUMP_FORCE + GRAVITY);
}

#[test]
fn lands_on_floating_platform() {
    let mut s = make_state();
    let platform = Rect::new(0.0, 300.0, 200.0, 16.0);
    s.platforms.push(platform);
    s.player.body.y = platform.y - PLAYER_HEIGHT - 1.0;
    s.player.vy = 0.0;

    update_player(&mut s, &Controls::default());
    assert!(s.player.grounded);
    assert_eq!(s.player.body.y, platform.y - PLAYER_HEIGHT);
    assert_eq!(s.player.vy, 0.0);
}

#[test]
fn rising_player_passes_through_platform() {
    let mut s = make_state();
    s.platforms.push(Rect::new(0.0, 300.0, 200.0, 16.0));
    s.player.body.y = 260.0;
    s.player.vy = -8.0;

    update_player(&mut s, &Controls::default());
    assert!(!s.player.grounded);
    assert!(s.player.vy < 0.0);
}

// ── Pit fall ──────────────────────────────────────────────────────────────────

#[test]
fn falling_out_of_world_respawns_and_hurts() {
    let mut s = make_state();
    s.player.body.y = WORLD_HEIGHT + 60.0;
    update_player(&mut s, &Controls::default());
    assert_eq!(s.player.body.y, PLAYER_GROUND_Y);
    assert_eq!(s.hp, MAX_HP - DEFAULT_DAMAGE);
    assert_eq!(s.player.invincible, INVINCIBILITY_TICKS);
}

#[test]
fn pit_fall_while_invincible_is_free() {
    let mut s = make_state();
    s.player.invincible = 50;
    s.player.body.y = WORLD_HEIGHT + 60.0;
    update_player(&mut s, &Controls::default());
    assert_eq!(s.player.body.y, PLAYER_GROUND_Y);
    assert_eq!(s.player.vy, 0.0);
    assert_eq!(s.hp, MAX_HP);
}

// ── Damage intake ─────────────────────────────────────────────────────────────

#[test]
fn damage_taken_with_and_without_armor() {
    let mut p = new_player();
    assert_eq!(damage_taken(&p), 20);
    p.has_armor = true;
    assert_eq!(damage_taken(&p), 10);
}

#[test]
fn take_hit_knocks_back_away_from_facing() {
    let mut s = make_state();
    s.player.facing = 1.0;
    take_hit(&mut s);
    assert_eq!(s.player.vx, -KNOCKBACK_X);
    assert_eq!(s.player.vy, KNOCKBACK_Y);

    s.player.facing = -1.0;
    take_hit(&mut s);
    assert_eq!(s.player.vx, KNOCKBACK_X);
}

#[test]
fn take_hit_at_zero_hp_is_defeat() {
    let mut s = make_state();
    s.hp = 15;
    take_hit(&mut s);
    assert!(s.hp <= 0);
    assert_eq!(s.status, GameStatus::Defeat);
}

// ── Weapons ───────────────────────────────────────────────────────────────────

#[test]
fn firing_uses_gun_cooldown() {
    for gun in GunId::ALL {
        let mut s = make_state();
        s.player.gun = gun;
        update_player(
            &mut s,
            &Controls {
                fire: true,
                ..Controls::default()
            },
        );
        assert_eq!(s.player.shoot_cooldown, gun.stats().cooldown);
        assert_eq!(s.bullets.len(), gun.stats().spread as usize);
    }
}

#[test]
fn bullets_leave_from_muzzle_along_aim() {
    let p = new_player();
    let bullets = fire(&p);
    assert_eq!(bullets.len(), 1);
    let b = &bullets[0];
    assert_eq!(b.body.x, p.body.center_x() + MUZZLE_DISTANCE);
    assert_eq!(b.body.y, p.body.center_y());
    assert_eq!(b.vx, 12.0);
    assert_eq!(b.vy, 0.0);
}

#[test]
fn spread_gun_fans_symmetrically() {
    let mut p = new_player();
    p.gun = GunId::SpreadGun;
    let bullets = fire(&p);
    assert_eq!(bullets.len(), 3);
    assert!(approx(bullets[1].vy, 0.0));
    assert!(approx(bullets[0].vy, -bullets[2].vy));
    assert!(approx(bullets[2].vy, 14.0 * SPREAD_STEP.sin()));
}

#[test]
fn plasma_hits_harder() {
    let mut p = new_player();
    p.gun = GunId::PlasmaGun;
    assert_eq!(fire(&p)[0].damage, 2);
}
