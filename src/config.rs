/// Front-end settings: command-line flags layered over an optional JSON
/// config file, layered over built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;

use run_and_gun::constants::{FINAL_LEVEL, FIRST_LEVEL};
use run_and_gun::level::is_valid_level;

const DEFAULT_FPS: u32 = 60;

#[derive(Debug, Parser)]
#[command(name = "run_and_gun", about = "Side-scrolling run & gun in the terminal")]
pub struct Cli {
    /// Seed for level layouts and enemy jitter (random if omitted).
    #[arg(long)]
    pub seed: Option<u64>,
    /// Level to start on.
    #[arg(long)]
    pub level: Option<u32>,
    /// Simulation ticks per second.
    #[arg(long)]
    pub fps: Option<u32>,
    /// High score table location.
    #[arg(long)]
    pub scores: Option<PathBuf>,
    /// Write logs here (the terminal is busy drawing the game).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// JSON file with any of: seed, level, fps, scores, log_file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    seed: Option<u64>,
    level: Option<u32>,
    fps: Option<u32>,
    scores: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub seed: Option<u64>,
    pub start_level: u32,
    pub fps: u32,
    pub high_score_path: PathBuf,
    pub log_file: Option<PathBuf>,
}

fn default_high_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".run_and_gun_scores.json")
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid config file {}", path.display()))
}

impl Settings {
    pub fn resolve(cli: Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => read_file_config(path)?,
            None => FileConfig::default(),
        };

        let start_level = cli.level.or(file.level).unwrap_or(FIRST_LEVEL);
        if !is_valid_level(start_level) {
            bail!("level must be between {FIRST_LEVEL} and {FINAL_LEVEL}, got {start_level}");
        }
        let fps = cli.fps.or(file.fps).unwrap_or(DEFAULT_FPS);
        if fps == 0 {
            bail!("fps must be positive");
        }

        Ok(Self {
            seed: cli.seed.or(file.seed),
            start_level,
            fps,
            high_score_path: cli
                .scores
                .or(file.scores)
                .unwrap_or_else(default_high_score_path),
            log_file: cli.log_file.or(file.log_file),
        })
    }
}
