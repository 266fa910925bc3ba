use run_and_gun::boss::*;
use run_and_gun::compute::init_state;
use run_and_gun::constants::*;
use run_and_gun::enemies::*;
use run_and_gun::entities::*;
use run_and_gun::geometry::Rect;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_state() -> GameState {
    let mut s = init_state(1, 0.0, &mut seeded_rng()).unwrap();
    s.platforms = vec![Rect::new(0.0, GROUND_Y, WORLD_WIDTH, GROUND_HEIGHT)];
    s.enemies.clear();
    s.pickups.clear();
    s.hazards.clear();
    s
}

fn walker_vx(enemy: &Enemy) -> f32 {
    match enemy.kind {
        EnemyKind::Walker { vx } => vx,
        _ => panic!("not a walker"),
    }
}

fn boss_state(enemy: &Enemy) -> &Boss {
    match &enemy.kind {
        EnemyKind::Boss(b) => b,
        _ => panic!("not a boss"),
    }
}

// ── Walkers ───────────────────────────────────────────────────────────────────

#[test]
fn walker_turns_at_platform_edge() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.platforms = vec![Rect::new(500.0, GROUND_Y, 200.0, GROUND_HEIGHT)];
    s.enemies.push(new_walker(654.0, 20, 2.0));

    for _ in 0..30 {
        update_enemies(&mut s, 0.0, &mut rng);
        assert!(s.enemies[0].body.x <= 700.0);
    }
    assert!(walker_vx(&s.enemies[0]) < 0.0);
}

#[test]
fn walker_turns_at_world_edge() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.enemies.push(new_walker(1.0, 20, -2.0));
    update_enemies(&mut s, 0.0, &mut rng);
    assert_eq!(s.enemies[0].body.x, 0.0);
    assert!(walker_vx(&s.enemies[0]) > 0.0);
}

#[test]
fn spawner_adds_walker_ahead_of_camera() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.walker_spawn_timer = WALKER_SPAWN_INTERVAL - 1;
    update_enemies(&mut s, 0.0, &mut rng);

    assert_eq!(s.walker_spawn_timer, 0);
    assert_eq!(s.enemies.len(), 1);
    let w = &s.enemies[0];
    assert_eq!(w.health, 20);
    assert!(w.body.x > s.camera_x + VIEW_WIDTH);
    assert!(walker_vx(w) < 0.0);
}

#[test]
fn spawner_comes_from_behind_near_boss() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.player.body.x = BOSS_X - 100.0;
    s.camera_x = WORLD_WIDTH - VIEW_WIDTH;
    s.walker_spawn_timer = WALKER_SPAWN_INTERVAL - 1;
    update_enemies(&mut s, 0.0, &mut rng);

    let w = &s.enemies[0];
    assert!(w.body.x < s.camera_x);
    assert!(walker_vx(w) > 0.0);
}

#[test]
fn spawner_idle_while_store_open() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.status = GameStatus::StoreOpen;
    s.walker_spawn_timer = WALKER_SPAWN_INTERVAL - 1;
    update_enemies(&mut s, 0.0, &mut rng);
    assert!(s.enemies.is_empty());
}

#[test]
fn spawned_walkers_scale_with_level() {
    assert_eq!(spawned_walker_health(1), 20);
    assert_eq!(spawned_walker_health(3), 30);
    assert_eq!(spawned_walker_health(6), 40);
    assert!((spawned_walker_speed(1) - 2.4).abs() < 1e-5);
    assert!((spawned_walker_speed(3) - 3.2).abs() < 1e-5);
}

#[test]
fn dead_enemies_removed_but_boss_kept() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.enemies.push(new_walker(800.0, 0, 0.0));
    let mut boss = new_boss(BossKind::SandPharaoh);
    boss.health = 0;
    s.enemies.push(boss);

    update_enemies(&mut s, 0.0, &mut rng);
    assert_eq!(s.enemies.len(), 1);
    assert!(matches!(s.enemies[0].kind, EnemyKind::Boss(_)));
}

// ── Throwers ──────────────────────────────────────────────────────────────────

#[test]
fn thrower_sits_on_platform() {
    let platform = Rect::new(400.0, 350.0, 100.0, 16.0);
    let t = new_thrower(&platform, 60, ProjectileKind::Knife);
    assert_eq!(t.body.bottom(), platform.y);
    assert_eq!(t.body.center_x(), platform.center_x());
    assert_eq!(t.health, THROWER_HEALTH);
}

#[test]
fn thrower_throws_at_player_in_range() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    let platform = Rect::new(300.0, 350.0, 100.0, 16.0);
    s.enemies.push(new_thrower(&platform, 1, ProjectileKind::Axe));

    update_enemies(&mut s, 0.0, &mut rng);
    assert_eq!(s.boss_projectiles.len(), 1);
    let p = &s.boss_projectiles[0];
    assert_eq!(p.kind, ProjectileKind::Axe);
    assert!(p.vx < 0.0, "player is to the left");
    assert!(p.spin > 0.0);
    assert!((p.vx.hypot(p.vy) - THROWER_PROJECTILE_SPEED).abs() < 1e-3);

    match s.enemies[0].kind {
        EnemyKind::Thrower { cooldown, .. } => {
            assert!(cooldown >= THROWER_RELOAD_BASE);
            assert!(cooldown < THROWER_RELOAD_BASE + THROWER_RELOAD_JITTER);
        }
        _ => unreachable!(),
    }
}

#[test]
fn thrower_waits_for_player() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    let platform = Rect::new(2000.0, 350.0, 100.0, 16.0);
    s.enemies.push(new_thrower(&platform, 1, ProjectileKind::Knife));

    for _ in 0..10 {
        update_enemies(&mut s, 0.0, &mut rng);
    }
    assert!(s.boss_projectiles.is_empty());

    s.player.body.x = 1800.0;
    update_enemies(&mut s, 0.0, &mut rng);
    assert_eq!(s.boss_projectiles.len(), 1);
}

// ── Bosses ────────────────────────────────────────────────────────────────────

#[test]
fn boss_ids_map_to_kinds() {
    for id in 1..=6u8 {
        let kind = BossKind::from_index(id).unwrap();
        assert_eq!(kind.index(), id);
    }
    assert_eq!(BossKind::from_index(0), None);
    assert_eq!(BossKind::from_index(7), None);
}

#[test]
fn bosses_get_tougher() {
    let healths: Vec<i32> = (1..=6u8)
        .map(|id| BossKind::from_index(id).unwrap().stats().health)
        .collect();
    assert!(healths.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn new_boss_full_health_at_arena() {
    let boss = new_boss(BossKind::CaveKraken);
    assert_eq!(boss.body.x, BOSS_X);
    assert_eq!(boss.health, boss.max_health);
    assert_eq!(health_fraction(&boss), 1.0);
    assert!(is_alive(&boss));
}

#[test]
fn health_fraction_tracks_damage() {
    let mut boss = new_boss(BossKind::SandPharaoh);
    boss.health = 15;
    assert_eq!(health_fraction(&boss), 0.5);
    boss.health = -3;
    assert_eq!(health_fraction(&boss), 0.0);
}

#[test]
fn defeated_boss_is_not_alive() {
    let mut boss = new_boss(BossKind::SandPharaoh);
    if let EnemyKind::Boss(b) = &mut boss.kind {
        b.defeated = true;
    }
    assert!(!is_alive(&boss));
    assert!(boss_of(std::slice::from_ref(&boss)).is_some());
}

#[test]
fn boss_holds_fire_until_player_is_close() {
    let mut enemy = new_boss(BossKind::SandPharaoh);
    let EnemyKind::Boss(mut boss) = enemy.kind.clone() else {
        unreachable!()
    };
    let mut player = new_player_at(100.0);
    let mut shots = Vec::new();
    update_boss(&mut enemy.body, &mut boss, &player, 0.0, &mut shots);
    assert!(shots.is_empty());

    player.body.x = enemy.body.x - 200.0;
    update_boss(&mut enemy.body, &mut boss, &player, 0.0, &mut shots);
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].kind, ProjectileKind::Coin);
    assert_eq!(boss.shoot_cooldown, BossKind::SandPharaoh.stats().cooldown);
    assert_eq!(boss.volleys, 1);
}

fn new_player_at(x: f32) -> Player {
    let mut p = run_and_gun::player::new_player();
    p.body.x = x;
    p
}

#[test]
fn volley_sizes_per_boss() {
    let player = new_player_at(3500.0);
    let expected = [
        (BossKind::SandPharaoh, 1),
        (BossKind::JungleRoc, 3),
        (BossKind::CaveKraken, 5),
        (BossKind::MagmaGolem, 8),
        (BossKind::FrostWyrm, 4),
        (BossKind::ClockworkKing, 6),
    ];
    for (kind, count) in expected {
        let enemy = new_boss(kind);
        let boss = boss_state(&enemy);
        let volley = next_volley(boss);
        let shots = volley_projectiles(&volley, enemy.body.center_x(), enemy.body.center_y(), &player);
        assert_eq!(shots.len(), count, "{}", kind.name());
    }
}

#[test]
fn golem_keeps_original_cadence() {
    assert_eq!(BossKind::MagmaGolem.stats().cooldown, 50);
    let enemy = new_boss(BossKind::MagmaGolem);
    let volley = next_volley(boss_state(&enemy));
    assert_eq!(volley.attack, Attack::Radial(8));
    assert_eq!(volley.speed, 9.0);
}

#[test]
fn clockwork_king_alternates_attacks() {
    let enemy = new_boss(BossKind::ClockworkKing);
    let mut boss = boss_state(&enemy).clone();

    let gears = next_volley(&boss);
    assert_eq!(gears.projectile, ProjectileKind::Gear);
    assert_eq!(gears.attack, Attack::Spread(6));
    assert!(gears.spin > 0.0);

    boss.volleys = 1;
    let ghost = next_volley(&boss);
    assert_eq!(ghost.projectile, ProjectileKind::Ghost);
    assert_eq!(ghost.attack, Attack::Homing);
    let shots = volley_projectiles(&ghost, 3700.0, 400.0, &new_player_at(3400.0));
    assert!(shots[0].homing);

    boss.volleys = 2;
    assert_eq!(next_volley(&boss).projectile, ProjectileKind::Gear);
}

#[test]
fn radial_burst_covers_circle() {
    let volley = Volley {
        attack: Attack::Radial(8),
        projectile: ProjectileKind::Generic,
        speed: 6.0,
        spin: 0.0,
    };
    let shots = volley_projectiles(&volley, 3700.0, 400.0, &new_player_at(3400.0));
    let sum_vx: f32 = shots.iter().map(|p| p.vx).sum();
    let sum_vy: f32 = shots.iter().map(|p| p.vy).sum();
    assert!(sum_vx.abs() < 1e-3);
    assert!(sum_vy.abs() < 1e-3);
}

#[test]
fn bosses_stay_in_their_band() {
    let player = new_player_at(3000.0);
    for id in 1..=6u8 {
        let kind = BossKind::from_index(id).unwrap();
        let stats = kind.stats();
        let mut enemy = new_boss(kind);
        let EnemyKind::Boss(mut boss) = enemy.kind.clone() else {
            unreachable!()
        };
        let mut shots = Vec::new();
        for i in 0..2000 {
            update_boss(&mut enemy.body, &mut boss, &player, i as f64 / 60.0, &mut shots);
            assert!(enemy.body.y >= stats.min_y && enemy.body.y <= stats.max_y);
        }
    }
}

#[test]
fn jungle_roc_patrols_its_perch() {
    let player = new_player_at(100.0);
    let mut enemy = new_boss(BossKind::JungleRoc);
    let EnemyKind::Boss(mut boss) = enemy.kind.clone() else {
        unreachable!()
    };
    let mut shots = Vec::new();
    let mut turned = false;
    for i in 0..500 {
        update_boss(&mut enemy.body, &mut boss, &player, i as f64 / 60.0, &mut shots);
        assert!(enemy.body.x >= BOSS_X - 80.0 && enemy.body.x <= BOSS_X + 60.0);
        turned |= boss.vx < 0.0;
    }
    assert!(turned);
}

#[test]
fn defeated_boss_neither_moves_nor_shoots() {
    let player = new_player_at(3500.0);
    let mut enemy = new_boss(BossKind::MagmaGolem);
    let EnemyKind::Boss(mut boss) = enemy.kind.clone() else {
        unreachable!()
    };
    boss.defeated = true;
    let before = enemy.body;
    let mut shots = Vec::new();
    for i in 0..100 {
        update_boss(&mut enemy.body, &mut boss, &player, i as f64 / 10.0, &mut shots);
    }
    assert_eq!(enemy.body, before);
    assert!(shots.is_empty());
}
