/// Between-level store: buy guns and armor with gold, equip owned guns,
/// then continue to the next level or finish the run.

use rand::Rng;

use crate::entities::{GameState, GameStatus, GunId};
use crate::error::{GameError, StoreError};
use crate::level::{is_final_level, load_level};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreItem {
    Gun(GunId),
    /// Halves all damage taken.
    Armor,
}

impl StoreItem {
    pub fn name(&self) -> &'static str {
        match self {
            StoreItem::Gun(gun) => gun.name(),
            StoreItem::Armor => "Armor Suit",
        }
    }

    pub fn price(&self) -> u32 {
        match self {
            StoreItem::Gun(GunId::Pistol) => 0,
            StoreItem::Gun(GunId::MachineGun) => 150,
            StoreItem::Gun(GunId::SpreadGun) => 300,
            StoreItem::Gun(GunId::PlasmaGun) => 500,
            StoreItem::Armor => 250,
        }
    }
}

/// Items on sale, in display order.
pub const CATALOG: [StoreItem; 4] = [
    StoreItem::Gun(GunId::MachineGun),
    StoreItem::Gun(GunId::SpreadGun),
    StoreItem::Gun(GunId::PlasmaGun),
    StoreItem::Armor,
];

/// One row of the store as the UI shows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreEntry {
    pub item: StoreItem,
    pub name: &'static str,
    pub price: u32,
    pub owned: bool,
    pub equipped: bool,
    pub affordable: bool,
}

fn owns(state: &GameState, item: StoreItem) -> bool {
    match item {
        StoreItem::Gun(gun) => state.player.owned_guns.contains(&gun),
        StoreItem::Armor => state.player.has_armor,
    }
}

pub fn listing(state: &GameState) -> Vec<StoreEntry> {
    CATALOG
        .iter()
        .map(|&item| StoreEntry {
            item,
            name: item.name(),
            price: item.price(),
            owned: owns(state, item),
            equipped: matches!(item, StoreItem::Gun(gun) if state.player.gun == gun),
            affordable: state.player.gold >= item.price(),
        })
        .collect()
}

// ── Actions (pure) ───────────────────────────────────────────────────────────

/// Buy an item. A bought gun is equipped immediately.
pub fn purchase(state: &GameState, item: StoreItem) -> Result<GameState, StoreError> {
    if state.status != GameStatus::StoreOpen {
        return Err(StoreError::Closed);
    }
    if owns(state, item) {
        tracing::debug!(item = item.name(), "purchase refused: already owned");
        return Err(StoreError::AlreadyOwned(item.name()));
    }
    let price = item.price();
    let gold = state.player.gold;
    if gold < price {
        tracing::debug!(item = item.name(), price, gold, "purchase refused: not enough gold");
        return Err(StoreError::InsufficientGold { price, gold });
    }

    let mut next = state.clone();
    next.player.gold -= price;
    match item {
        StoreItem::Gun(gun) => {
            next.player.owned_guns.push(gun);
            next.player.gun = gun;
        }
        StoreItem::Armor => next.player.has_armor = true,
    }
    tracing::info!(item = item.name(), price, gold_left = next.player.gold, "item purchased");
    Ok(next)
}

pub fn equip(state: &GameState, gun: GunId) -> Result<GameState, StoreError> {
    if state.status != GameStatus::StoreOpen {
        return Err(StoreError::Closed);
    }
    if !state.player.owned_guns.contains(&gun) {
        return Err(StoreError::NotOwned(gun));
    }
    let mut next = state.clone();
    next.player.gun = gun;
    Ok(next)
}

/// Leave the store: load the next level, or end the run in victory after
/// the final one.
pub fn continue_from_store(
    state: &GameState,
    now: f64,
    rng: &mut impl Rng,
) -> Result<GameState, GameError> {
    if state.status != GameStatus::StoreOpen {
        return Err(StoreError::Closed.into());
    }
    if is_final_level(state.level) {
        let mut next = state.clone();
        next.status = GameStatus::Victory;
        tracing::info!(score = next.score, "run complete");
        return Ok(next);
    }
    load_level(state, state.level + 1, now, rng)
}
