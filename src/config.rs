use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use crate::geometry::Playfield;

// Game constants
pub const SCREEN_WIDTH: i32 = 800;
pub const SCREEN_HEIGHT: i32 = 600;
pub const CELL_SIZE: i32 = 10;
pub const BORDER_MARGIN: i32 = 20;

pub const SEGMENT_WIDTH: i32 = 15;
pub const SEGMENT_HEIGHT: i32 = 13;
pub const FOOD_SIZE: i32 = 15;
pub const BONUS_SIZE: i32 = 20;

pub const INITIAL_LENGTH: usize = 5;
pub const FOOD_REWARD: u32 = 1;
pub const BONUS_REWARD: u32 = 3;
pub const BONUS_MILESTONE: u32 = 10;
pub const BONUS_DURATION_MS: u64 = 3000;

pub const DEFAULT_FPS: u32 = 15;
pub const DEFAULT_SAVE_FILE: &str = "snake_highscore.json";

/// Command-line overrides for the arcade defaults.
#[derive(Debug, Parser)]
#[command(author, version, about = "Single-player arcade snake", long_about = None)]
pub struct CliArgs {
    /// Simulation ticks per second. Higher values make the snake faster.
    #[arg(
        long,
        value_name = "TICKS",
        default_value_t = DEFAULT_FPS,
        value_parser = clap::value_parser!(u32).range(1..=120)
    )]
    pub fps: u32,
    /// File the best score is stored in.
    #[arg(long = "save-file", value_name = "PATH", default_value = DEFAULT_SAVE_FILE)]
    pub save_file: PathBuf,
    /// Seed for food placement; random when omitted.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
    /// Start with sound effects turned off.
    #[arg(long)]
    pub mute: bool,
}

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub field: Playfield,
    pub segment_size: (i32, i32),
    pub food_size: i32,
    pub bonus_size: i32,
    pub initial_length: usize,
    pub food_reward: u32,
    pub bonus_reward: u32,
    pub bonus_milestone: u32,
    pub bonus_duration_ms: u64,
    pub fps: u32,
    pub save_path: PathBuf,
    pub seed: Option<u64>,
    pub audio: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: Playfield::new(SCREEN_WIDTH, SCREEN_HEIGHT, CELL_SIZE, BORDER_MARGIN),
            segment_size: (SEGMENT_WIDTH, SEGMENT_HEIGHT),
            food_size: FOOD_SIZE,
            bonus_size: BONUS_SIZE,
            initial_length: INITIAL_LENGTH,
            food_reward: FOOD_REWARD,
            bonus_reward: BONUS_REWARD,
            bonus_milestone: BONUS_MILESTONE,
            bonus_duration_ms: BONUS_DURATION_MS,
            fps: DEFAULT_FPS,
            save_path: PathBuf::from(DEFAULT_SAVE_FILE),
            seed: None,
            audio: true,
        }
    }
}

impl GameConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self {
            fps: args.fps,
            save_path: args.save_file,
            seed: args.seed,
            audio: !args.mute,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let f = &self.field;
        if f.cell <= 0 {
            bail!("cell size must be positive, got {}", f.cell);
        }
        if f.margin < 0 || f.margin % f.cell != 0 {
            bail!("border margin {} is not a multiple of the cell size {}", f.margin, f.cell);
        }
        if f.width % f.cell != 0 || f.height % f.cell != 0 {
            bail!("screen {}x{} is not a multiple of the cell size {}", f.width, f.height, f.cell);
        }
        // The starting line trails left from the centre and must fit inside.
        let room = (f.center().x - f.margin) / f.cell + 1;
        if f.columns() <= 0 || f.rows() <= 0 || room < self.initial_length as i32 {
            bail!(
                "playfield interior {}x{} cells cannot hold a snake of length {}",
                f.columns(),
                f.rows(),
                self.initial_length
            );
        }
        if self.initial_length == 0 {
            bail!("initial snake length must be at least 1");
        }
        if self.fps == 0 {
            bail!("tick rate must be at least 1 per second");
        }
        if self.bonus_milestone == 0 {
            bail!("bonus milestone must be positive");
        }
        Ok(())
    }
}
