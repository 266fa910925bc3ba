//! Simulation core for a side-scrolling run & gun game.
//!
//! The whole world lives in one [`entities::GameState`]. Public transitions
//! take the current state by reference and hand back the next one; the
//! terminal front end in `main.rs` only feeds input and draws snapshots.

pub mod boss;
pub mod combat;
pub mod compute;
pub mod constants;
pub mod effects;
pub mod enemies;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod hazards;
pub mod highscore;
pub mod level;
pub mod player;
pub mod projectiles;
pub mod store;
pub mod weapons;
