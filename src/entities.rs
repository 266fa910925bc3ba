/// All game entity types. Pure data, no logic.

use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GunId {
    Pistol,
    MachineGun,
    SpreadGun,
    PlasmaGun,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Boss beaten; the simulation is paused until the player continues.
    StoreOpen,
    Victory,
    Defeat,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Held-key snapshot consumed once per tick. Aim is not part of it: it is
/// updated from pointer events through `player::aim_at`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub crouch: bool,
    pub fire: bool,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Rect,
    pub vx: f32,
    pub vy: f32,
    pub grounded: bool,
    pub crouching: bool,
    /// +1.0 facing right, -1.0 facing left. Follows the aim, not movement.
    pub facing: f32,
    /// Radians, 0 = right, positive = down (screen coordinates).
    pub aim_angle: f32,
    pub gun: GunId,
    pub owned_guns: Vec<GunId>,
    pub gold: u32,
    pub has_armor: bool,
    /// Ticks of damage immunity left.
    pub invincible: u32,
    pub shoot_cooldown: i32,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub body: Rect,
    pub vx: f32,
    pub vy: f32,
    pub damage: i32,
    pub gun: GunId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileKind {
    Knife,
    Axe,
    Egg,
    Ghost,
    Ink,
    Coin,
    IceShard,
    Gear,
    /// Ballistic: falls under gravity and dies on the ground.
    LavaFireball,
    Generic,
}

/// Anything hostile that flies: thrower knives, boss shots, lava fireballs.
#[derive(Clone, Debug)]
pub struct BossProjectile {
    pub body: Rect,
    pub vx: f32,
    pub vy: f32,
    pub kind: ProjectileKind,
    /// Steers toward the player every tick.
    pub homing: bool,
    /// Cosmetic rotation speed in radians per tick.
    pub spin: f32,
    pub angle: f32,
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossKind {
    SandPharaoh,
    JungleRoc,
    CaveKraken,
    MagmaGolem,
    FrostWyrm,
    ClockworkKing,
}

impl BossKind {
    /// Maps the 1-based boss number used by level recipes. Unknown ids are None.
    pub fn from_index(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::SandPharaoh),
            2 => Some(Self::JungleRoc),
            3 => Some(Self::CaveKraken),
            4 => Some(Self::MagmaGolem),
            5 => Some(Self::FrostWyrm),
            6 => Some(Self::ClockworkKing),
            _ => None,
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            Self::SandPharaoh => 1,
            Self::JungleRoc => 2,
            Self::CaveKraken => 3,
            Self::MagmaGolem => 4,
            Self::FrostWyrm => 5,
            Self::ClockworkKing => 6,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SandPharaoh => "Sand Pharaoh",
            Self::JungleRoc => "Jungle Roc",
            Self::CaveKraken => "Cave Kraken",
            Self::MagmaGolem => "Magma Golem",
            Self::FrostWyrm => "Frost Wyrm",
            Self::ClockworkKing => "Clockwork King",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Boss {
    pub kind: BossKind,
    pub vx: f32,
    pub vy: f32,
    pub shoot_cooldown: i32,
    /// Volleys fired so far; the Clockwork King alternates attacks on parity.
    pub volleys: u32,
    /// Set once health reaches zero. A defeated boss stays in the enemy list
    /// until the level is left, but no longer moves, shoots or collides.
    pub defeated: bool,
}

#[derive(Clone, Debug)]
pub enum EnemyKind {
    Walker { vx: f32 },
    Thrower { cooldown: i32, projectile: ProjectileKind },
    Boss(Boss),
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub body: Rect,
    pub health: i32,
    pub max_health: i32,
    pub kind: EnemyKind,
}

// ── Pickups ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupKind {
    /// Adds its value to both gold and score.
    Gold,
    /// Adds its value to score only.
    Star,
}

#[derive(Clone, Debug)]
pub struct Pickup {
    pub body: Rect,
    pub kind: PickupKind,
    pub value: u32,
}

// ── Hazards ───────────────────────────────────────────────────────────────────

/// Inactive → active window → inactive, repeating every `period` ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeriodicCycle {
    pub period: u32,
    pub active_ticks: u32,
    pub timer: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Eruption {
    pub timer: u32,
    /// Per-instance offset so neighbouring vents do not erupt in lockstep.
    pub phase_offset: u32,
    /// Current column height above the resting footprint.
    pub height: f32,
    pub spawned_this_cycle: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum HazardKind {
    Sand(PeriodicCycle),
    Vine(PeriodicCycle),
    IceSpike(PeriodicCycle),
    Steam(PeriodicCycle),
    Stalactite { spawn_y: f32, vy: f32 },
    GearTrap { cycle: PeriodicCycle, min_x: f32, max_x: f32, vx: f32 },
    Lava(Eruption),
}

#[derive(Clone, Debug)]
pub struct Hazard {
    /// Resting footprint. Lava adds a column above it while erupting.
    pub body: Rect,
    pub kind: HazardKind,
}

// ── Effects ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Particle {
    /// Offset from the effect origin.
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub life: f32,
    pub size: f32,
}

#[derive(Clone, Debug)]
pub struct DeathEffect {
    pub x: f32,
    pub y: f32,
    pub particles: Vec<Particle>,
    pub timer: u32,
    pub boss: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state. Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub hp: i32,
    pub score: u32,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    /// Ground first, then floating platforms in generation order.
    pub platforms: Vec<Rect>,
    pub pickups: Vec<Pickup>,
    pub boss_projectiles: Vec<BossProjectile>,
    pub hazards: Vec<Hazard>,
    pub death_effects: Vec<DeathEffect>,
    pub camera_x: f32,
    pub level: u32,
    /// Wall-clock seconds at which the current level started.
    pub level_started_at: f64,
    pub walker_spawn_timer: u32,
    pub status: GameStatus,
    /// Time bonus awarded when the current store was opened.
    pub last_time_bonus: u32,
    pub frame: u64,
}
