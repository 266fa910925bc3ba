use run_and_gun::compute::{init_state, tick};
use run_and_gun::constants::*;
use run_and_gun::entities::*;
use run_and_gun::geometry::Rect;
use run_and_gun::hazards::*;
use run_and_gun::projectiles::update_boss_projectiles;

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

fn vent(x: f32, offset: u32) -> Hazard {
    Hazard {
        body: Rect::new(x, GROUND_Y - 12.0, 70.0, 12.0),
        kind: HazardKind::Lava(eruption(offset)),
    }
}

fn lava_height(h: &Hazard) -> f32 {
    match &h.kind {
        HazardKind::Lava(e) => e.height,
        _ => panic!("not lava"),
    }
}

// ── Periodic cycles ───────────────────────────────────────────────────────────

#[test]
fn cycle_active_window_is_centred() {
    let mut c = cycle(100, 20, 0);
    let mut at = |t| {
        c.timer = t;
        cycle_active(&c)
    };
    assert!(!at(0));
    assert!(!at(39));
    assert!(at(40));
    assert!(at(59));
    assert!(!at(60));
    assert!(!at(99));
}

#[test]
fn cycle_offset_wraps() {
    let c = cycle(100, 20, 250);
    assert_eq!(c.timer, 50);
}

#[test]
fn sand_only_hurts_while_active() {
    let mut rng = seeded_rng();
    let sand = |offset| Hazard {
        body: Rect::new(80.0, GROUND_Y - 10.0, 80.0, 10.0),
        kind: HazardKind::Sand(cycle(100, 20, offset)),
    };

    let mut idle = make_state();
    idle.hazards.push(sand(0));
    let idle = tick(&idle, &Controls::default(), 0.0, &mut rng);
    assert_eq!(idle.hp, MAX_HP);

    let mut live = make_state();
    live.hazards.push(sand(45));
    let live = tick(&live, &Controls::default(), 0.0, &mut rng);
    assert_eq!(live.hp, MAX_HP - DEFAULT_DAMAGE);
}

#[test]
fn hazard_contact_waits_out_invincibility() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.player.invincible = 10;
    s.hazards.push(Hazard {
        body: Rect::new(80.0, GROUND_Y - 10.0, 80.0, 10.0),
        kind: HazardKind::IceSpike(cycle(100, 100, 0)),
    });
    s = tick(&s, &Controls::default(), 0.0, &mut rng);
    assert_eq!(s.hp, MAX_HP);
}

// ── Stalactites ───────────────────────────────────────────────────────────────

#[test]
fn stalactite_falls_and_resets() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.hazards.push(Hazard {
        body: Rect::new(900.0, -40.0, 24.0, 40.0),
        kind: HazardKind::Stalactite {
            spawn_y: -40.0,
            vy: 0.0,
        },
    });
    assert!(is_active(&s.hazards[0]));

    let mut lowest = -40.0f32;
    let mut reset = false;
    for _ in 0..100 {
        let before = s.hazards[0].body.y;
        update_hazards(&mut s, &mut rng);
        let after = s.hazards[0].body.y;
        if after < before {
            assert_eq!(after, -40.0);
            reset = true;
            break;
        }
        lowest = lowest.max(after);
    }
    assert!(reset);
    assert!(lowest <= GROUND_Y);
    match s.hazards[0].kind {
        HazardKind::Stalactite { vy, .. } => assert_eq!(vy, 0.0),
        _ => unreachable!(),
    }
}

// ── Gear traps ────────────────────────────────────────────────────────────────

#[test]
fn gear_trap_patrols_its_track() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.hazards.push(Hazard {
        body: Rect::new(200.0, GROUND_Y - 40.0, 40.0, 40.0),
        kind: HazardKind::GearTrap {
            cycle: cycle(160, 100, 0),
            min_x: 100.0,
            max_x: 300.0,
            vx: 1.5,
        },
    });
    let mut went_left = false;
    for _ in 0..500 {
        update_hazards(&mut s, &mut rng);
        let h = &s.hazards[0];
        assert!(h.body.x >= 100.0 && h.body.right() <= 300.0);
        if let HazardKind::GearTrap { vx, .. } = h.kind {
            went_left |= vx < 0.0;
        }
    }
    assert!(went_left);
}

// ── Lava vents ────────────────────────────────────────────────────────────────

#[test]
fn lava_quiet_then_rises_then_falls() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.hazards.push(vent(1000.0, 0));

    for _ in 0..(LAVA_RISE_START - 1) {
        update_hazards(&mut s, &mut rng);
    }
    assert_eq!(lava_height(&s.hazards[0]), 0.0);
    assert!(lava_column(&s.hazards[0]).is_none());

    update_hazards(&mut s, &mut rng);
    assert!(lava_height(&s.hazards[0]) > 0.0);

    while lava_phase_of(&s.hazards[0]) < LAVA_FALL_START - 1 {
        update_hazards(&mut s, &mut rng);
    }
    assert_eq!(lava_height(&s.hazards[0]), LAVA_MAX_HEIGHT);

    while lava_phase_of(&s.hazards[0]) != LAVA_CYCLE - 1 {
        update_hazards(&mut s, &mut rng);
    }
    assert_eq!(lava_height(&s.hazards[0]), 0.0);
}

fn lava_phase_of(h: &Hazard) -> u32 {
    match &h.kind {
        HazardKind::Lava(e) => lava_phase(e),
        _ => panic!("not lava"),
    }
}

#[test]
fn lava_spawns_fireballs_once_per_cycle() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.hazards.push(vent(1000.0, 0));

    for _ in 0..(LAVA_SPAWN_PHASE - 1) {
        update_hazards(&mut s, &mut rng);
    }
    assert!(s.boss_projectiles.is_empty());

    update_hazards(&mut s, &mut rng);
    let first = s.boss_projectiles.len();
    assert!((1..=2).contains(&first));
    assert!(s
        .boss_projectiles
        .iter()
        .all(|p| p.kind == ProjectileKind::LavaFireball && p.vy < 0.0));

    // Rest of this cycle: nothing new.
    for _ in LAVA_SPAWN_PHASE..LAVA_CYCLE {
        update_hazards(&mut s, &mut rng);
    }
    assert_eq!(s.boss_projectiles.len(), first);

    // Next cycle erupts again.
    for _ in 0..LAVA_CYCLE {
        update_hazards(&mut s, &mut rng);
    }
    assert!(s.boss_projectiles.len() > first);
}

#[test]
fn lava_column_hits_above_vent() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.hazards.push(vent(1000.0, 0));
    let above = Rect::new(1020.0, 380.0, 36.0, 48.0);

    assert!(!hits(&s.hazards[0], &above));
    for _ in 0..(LAVA_FALL_START - 1) {
        update_hazards(&mut s, &mut rng);
    }
    assert!(hits(&s.hazards[0], &above));
}

#[test]
fn vent_offsets_desynchronise() {
    let a = eruption(0);
    let b = eruption(60);
    assert_ne!(lava_phase(&a), lava_phase(&b));
}

#[test]
fn fireball_dies_on_the_ground() {
    let mut s = make_state();
    s.boss_projectiles.push(BossProjectile {
        body: Rect::new(600.0, GROUND_Y - 18.0, FIREBALL_SIZE, FIREBALL_SIZE),
        vx: 0.0,
        vy: 4.0,
        kind: ProjectileKind::LavaFireball,
        homing: false,
        spin: 0.0,
        angle: 0.0,
    });
    update_boss_projectiles(&mut s);
    assert!(s.boss_projectiles.is_empty());
    assert_eq!(s.hp, MAX_HP);
}
