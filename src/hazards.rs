/// Environmental hazards. Every hazard runs its own timed cycle; only the
/// active part of a cycle can hurt the player.

use rand::Rng;

use crate::constants::{
    FIREBALL_SIZE, GROUND_Y, LAVA_COLUMN_WIDTH, LAVA_CYCLE, LAVA_FALL_START, LAVA_MAX_HEIGHT,
    LAVA_RISE_START, LAVA_SPAWN_PHASE, STALACTITE_GRAVITY,
};
use crate::entities::{
    BossProjectile, Eruption, GameState, Hazard, HazardKind, PeriodicCycle, ProjectileKind,
};
use crate::geometry::Rect;

// ── Constructors ─────────────────────────────────────────────────────────────

/// A periodic cycle starting `offset` ticks in.
pub fn cycle(period: u32, active_ticks: u32, offset: u32) -> PeriodicCycle {
    let period = period.max(1);
    PeriodicCycle {
        period,
        active_ticks: active_ticks.min(period),
        timer: offset % period,
    }
}

pub fn eruption(phase_offset: u32) -> Eruption {
    Eruption {
        timer: 0,
        phase_offset: phase_offset % LAVA_CYCLE,
        height: 0.0,
        spawned_this_cycle: false,
    }
}

// ── Queries ──────────────────────────────────────────────────────────────────

/// Active while `warmup <= phase < warmup + active_ticks`, with the warmup
/// splitting the idle time evenly around the active window.
pub fn cycle_active(cycle: &PeriodicCycle) -> bool {
    let warmup = (cycle.period - cycle.active_ticks) / 2;
    let phase = cycle.timer % cycle.period;
    phase >= warmup && phase < warmup + cycle.active_ticks
}

pub fn lava_phase(eruption: &Eruption) -> u32 {
    (eruption.timer + eruption.phase_offset) % LAVA_CYCLE
}

pub fn is_active(hazard: &Hazard) -> bool {
    match &hazard.kind {
        HazardKind::Sand(c)
        | HazardKind::Vine(c)
        | HazardKind::IceSpike(c)
        | HazardKind::Steam(c)
        | HazardKind::GearTrap { cycle: c, .. } => cycle_active(c),
        HazardKind::Stalactite { .. } | HazardKind::Lava(_) => true,
    }
}

/// The erupting column above a lava vent, if it currently has height.
pub fn lava_column(hazard: &Hazard) -> Option<Rect> {
    match &hazard.kind {
        HazardKind::Lava(e) if e.height > 0.0 => Some(Rect::new(
            hazard.body.center_x() - LAVA_COLUMN_WIDTH / 2.0,
            hazard.body.y - e.height,
            LAVA_COLUMN_WIDTH,
            e.height,
        )),
        _ => None,
    }
}

/// Does this hazard hurt something occupying `target` right now?
pub fn hits(hazard: &Hazard, target: &Rect) -> bool {
    if !is_active(hazard) {
        return false;
    }
    hazard.body.overlaps(target) || lava_column(hazard).is_some_and(|c| c.overlaps(target))
}

// ── Per-tick update ──────────────────────────────────────────────────────────

pub fn update_hazards(state: &mut GameState, rng: &mut impl Rng) {
    let GameState {
        hazards,
        boss_projectiles,
        ..
    } = state;

    for hazard in hazards.iter_mut() {
        let body = &mut hazard.body;
        match &mut hazard.kind {
            HazardKind::Sand(c) | HazardKind::Vine(c) | HazardKind::IceSpike(c) | HazardKind::Steam(c) => {
                advance(c);
            }
            HazardKind::GearTrap {
                cycle,
                min_x,
                max_x,
                vx,
            } => {
                advance(cycle);
                body.x += *vx;
                if body.x <= *min_x {
                    body.x = *min_x;
                    *vx = vx.abs();
                } else if body.right() >= *max_x {
                    body.x = *max_x - body.width;
                    *vx = -vx.abs();
                }
            }
            HazardKind::Stalactite { spawn_y, vy } => {
                *vy += STALACTITE_GRAVITY;
                body.y += *vy;
                if body.y > GROUND_Y {
                    body.y = *spawn_y;
                    *vy = 0.0;
                }
            }
            HazardKind::Lava(e) => {
                e.timer = (e.timer + 1) % LAVA_CYCLE;
                let phase = lava_phase(e);
                e.height = eruption_height(phase);
                if phase < LAVA_RISE_START {
                    e.spawned_this_cycle = false;
                } else if phase >= LAVA_SPAWN_PHASE && phase < LAVA_FALL_START && !e.spawned_this_cycle {
                    e.spawned_this_cycle = true;
                    let top = body.y - e.height;
                    let count = if rng.gen_bool(0.5) { 1 } else { 2 };
                    for _ in 0..count {
                        boss_projectiles.push(fireball(body.center_x(), top, rng));
                    }
                }
            }
        }
    }
}

fn advance(cycle: &mut PeriodicCycle) {
    cycle.timer = (cycle.timer + 1) % cycle.period;
}

/// Quiescent → linear rise to full height → linear fall back to zero.
fn eruption_height(phase: u32) -> f32 {
    if phase < LAVA_RISE_START {
        0.0
    } else if phase < LAVA_FALL_START {
        let t = (phase - LAVA_RISE_START + 1) as f32 / (LAVA_FALL_START - LAVA_RISE_START) as f32;
        LAVA_MAX_HEIGHT * t
    } else {
        let t = (LAVA_CYCLE - phase - 1) as f32 / (LAVA_CYCLE - LAVA_FALL_START) as f32;
        LAVA_MAX_HEIGHT * t
    }
}

fn fireball(cx: f32, top: f32, rng: &mut impl Rng) -> BossProjectile {
    let speed_x = rng.gen_range(1.0..3.0);
    let vx = if rng.gen_bool(0.5) { speed_x } else { -speed_x };
    BossProjectile {
        body: Rect::new(
            cx - FIREBALL_SIZE / 2.0,
            top - FIREBALL_SIZE,
            FIREBALL_SIZE,
            FIREBALL_SIZE,
        ),
        vx,
        vy: -rng.gen_range(8.0..11.0),
        kind: ProjectileKind::LavaFireball,
        homing: false,
        spin: 0.0,
        angle: 0.0,
    }
}
