use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use macroquad::window::{Conf, next_frame};
use rand::SeedableRng;
use rand::rngs::SmallRng;

mod app;
mod audio;
mod clock;
mod collision;
mod config;
mod food;
mod game;
mod geometry;
mod input;
mod render;
mod score;
mod snake;

use crate::app::App;
use crate::audio::Sounds;
use crate::clock::{FrameLimiter, GameClock};
use crate::config::{CliArgs, GameConfig, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::InputQueue;
use crate::score::JsonFileStore;

fn window_conf() -> Conf {
    Conf {
        window_title: "Snake".to_owned(),
        window_width: SCREEN_WIDTH,
        window_height: SCREEN_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

async fn run(config: GameConfig) -> Result<()> {
    let sounds = Sounds::load().await.context("loading sound effects")?;

    let rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let mut app = App::new(&config, JsonFileStore, rng);
    let mut input = InputQueue::new();
    let limiter = FrameLimiter::new(config.fps);
    let clock = GameClock::start();
    log::info!("running at {} ticks per second", config.fps);

    while app.is_running() {
        let tick_started = Instant::now();
        let now = clock.now_ms();

        let events = input.poll();
        app.tick(&events, now);
        sounds.play(&app.drain_events(), app.audio_enabled());

        render::present(&render::scene(&app, now));
        next_frame().await;
        limiter.wait(tick_started);
    }

    log::info!("shutting down, best score {}", app.best_score());
    Ok(())
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("snake starting");

    let config = match GameConfig::from_args(CliArgs::parse()) {
        Ok(config) => config,
        Err(err) => {
            log::error!("invalid configuration: {err:#}");
            process::exit(1);
        }
    };

    if let Err(err) = run(config).await {
        log::error!("{err:#}");
        process::exit(1);
    }
}
