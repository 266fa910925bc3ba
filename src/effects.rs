/// Death-effect particle bursts. Purely cosmetic, but their lifetime is
/// simulated so the renderer only has to draw what is left.

use std::f32::consts::TAU;

use rand::Rng;

use crate::constants::{
    BOSS_DEATH_PARTICLES, DEATH_EFFECT_TICKS, DEATH_PARTICLES, PARTICLE_DRAG, PARTICLE_FADE,
};
use crate::entities::{DeathEffect, Particle};

pub fn spawn_death_effect(x: f32, y: f32, boss: bool, rng: &mut impl Rng) -> DeathEffect {
    let count = if boss { BOSS_DEATH_PARTICLES } else { DEATH_PARTICLES };
    let particles = (0..count)
        .map(|i| {
            let angle = (i as f32 / count as f32) * TAU + rng.gen::<f32>() * 0.5;
            let speed = 1.5 + rng.gen::<f32>() * 5.0;
            Particle {
                x: 0.0,
                y: 0.0,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed - 1.0,
                life: 1.0,
                size: 6.0 + rng.gen::<f32>() * 10.0,
            }
        })
        .collect();

    DeathEffect {
        x,
        y,
        particles,
        timer: DEATH_EFFECT_TICKS,
        boss,
    }
}

pub fn update_death_effects(effects: &mut Vec<DeathEffect>) {
    effects.retain_mut(|effect| {
        effect.timer = effect.timer.saturating_sub(1);
        for p in &mut effect.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.vx *= PARTICLE_DRAG;
            p.vy *= PARTICLE_DRAG;
            p.life -= PARTICLE_FADE;
        }
        effect.timer > 0
    });
}
