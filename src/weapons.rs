/// Gun stat table and bullet spawning.

use crate::constants::{MUZZLE_DISTANCE, SPREAD_STEP};
use crate::entities::{Bullet, GunId, Player};
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponStats {
    pub speed: f32,
    pub damage: i32,
    /// Ticks between shots.
    pub cooldown: i32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    /// Bullets per shot, fanned around the aim angle.
    pub spread: u32,
}

impl GunId {
    pub const ALL: [GunId; 4] = [
        GunId::Pistol,
        GunId::MachineGun,
        GunId::SpreadGun,
        GunId::PlasmaGun,
    ];

    pub fn stats(&self) -> WeaponStats {
        match self {
            GunId::Pistol => WeaponStats {
                speed: 12.0,
                damage: 1,
                cooldown: 8,
                bullet_width: 12.0,
                bullet_height: 8.0,
                spread: 1,
            },
            GunId::MachineGun => WeaponStats {
                speed: 16.0,
                damage: 1,
                cooldown: 3,
                bullet_width: 10.0,
                bullet_height: 6.0,
                spread: 1,
            },
            GunId::SpreadGun => WeaponStats {
                speed: 14.0,
                damage: 1,
                cooldown: 12,
                bullet_width: 10.0,
                bullet_height: 6.0,
                spread: 3,
            },
            GunId::PlasmaGun => WeaponStats {
                speed: 18.0,
                damage: 2,
                cooldown: 5,
                bullet_width: 8.0,
                bullet_height: 8.0,
                spread: 1,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GunId::Pistol => "Pistol",
            GunId::MachineGun => "Machine Gun",
            GunId::SpreadGun => "Spread Gun",
            GunId::PlasmaGun => "Plasma Gun",
        }
    }
}

/// Build the bullets for one trigger pull of the player's current gun.
///
/// Bullets leave from a muzzle point `MUZZLE_DISTANCE` along the aim vector
/// from the player's centre. A spread of `n` fans the shots at
/// `(i - (n - 1) / 2) * SPREAD_STEP` around the aim angle.
pub fn fire(player: &Player) -> Vec<Bullet> {
    let stats = player.gun.stats();
    let base_x = player.body.center_x() + player.aim_angle.cos() * MUZZLE_DISTANCE;
    let base_y = player.body.center_y() + player.aim_angle.sin() * MUZZLE_DISTANCE;
    let spread = stats.spread.max(1);
    let mid = (spread - 1) as f32 / 2.0;

    (0..spread)
        .map(|i| {
            let angle = player.aim_angle + (i as f32 - mid) * SPREAD_STEP;
            Bullet {
                body: Rect::new(base_x, base_y, stats.bullet_width, stats.bullet_height),
                vx: stats.speed * angle.cos(),
                vy: stats.speed * angle.sin(),
                damage: stats.damage,
                gun: player.gun,
            }
        })
        .collect()
}
