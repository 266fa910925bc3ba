use std::path::PathBuf;

use thiserror::Error;

use crate::entities::GunId;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("unknown level {0}")]
    UnknownLevel(u32),
    #[error("level {level} must contain exactly one boss, found {found}")]
    BossCount { level: u32, found: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("high score file {path}: {source}")]
    HighScoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("high score file {path} is not valid JSON: {source}")]
    HighScoreFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Why a store action was refused. The state is left untouched.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("the store is not open")]
    Closed,
    #[error("costs {price} gold, only {gold} available")]
    InsufficientGold { price: u32, gold: u32 },
    #[error("{0} is already owned")]
    AlreadyOwned(&'static str),
    #[error("{} is not owned", .0.name())]
    NotOwned(GunId),
}
