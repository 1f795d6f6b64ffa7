use std::mem;

use rand::rngs::SmallRng;

use crate::collision::{self, Crash};
use crate::config::GameConfig;
use crate::game::{GameEvent, SnakeGame};
use crate::geometry::Rect;
use crate::input::{InputEvent, Key};
use crate::score::{HighScore, ScoreStore};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    Instructions,
    HighScore,
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuItem {
    Start,
    Instructions,
    HighScore,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::Start,
        MenuItem::Instructions,
        MenuItem::HighScore,
        MenuItem::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Start => "START",
            MenuItem::Instructions => "INSTRUCTIONS",
            MenuItem::HighScore => "HIGHSCORE",
            MenuItem::Exit => "EXIT",
        }
    }

    /// Screen area the item is drawn in and clickable on.
    pub fn hit_box(self) -> Rect {
        match self {
            MenuItem::Start => Rect::new(340, 140, 120, 44),
            MenuItem::Instructions => Rect::new(270, 220, 260, 44),
            MenuItem::HighScore => Rect::new(295, 300, 210, 44),
            MenuItem::Exit => Rect::new(355, 380, 90, 44),
        }
    }
}

/// What the game-over screen shows about the finished round.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RoundSummary {
    pub score: u32,
    pub length: usize,
    pub crash: Crash,
    pub new_best: bool,
}

/// Top-level state: which screen is up plus everything that outlives a
/// single round.
pub struct App<S: ScoreStore> {
    screen: Screen,
    selected: usize,
    game: SnakeGame,
    high_score: HighScore,
    store: S,
    last_round: Option<RoundSummary>,
    audio: bool,
    running: bool,
    events: Vec<GameEvent>,
}

impl<S: ScoreStore> App<S> {
    pub fn new(config: &GameConfig, store: S, rng: SmallRng) -> Self {
        let high_score = HighScore::load(&store, &config.save_path);
        Self {
            screen: Screen::Menu,
            selected: 0,
            game: SnakeGame::new(config, rng),
            high_score,
            store,
            last_round: None,
            audio: config.audio,
            running: true,
            events: Vec::new(),
        }
    }

    /// One tick: apply the input batch in order, then advance whatever the
    /// current screen simulates.
    pub fn tick(&mut self, input: &[InputEvent], now: u64) {
        for event in input {
            if !self.running {
                break;
            }
            self.handle_event(*event);
        }
        if self.running {
            self.update(now);
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => {
                log::info!("quit requested");
                self.running = false;
            }
            InputEvent::KeyDown(Key::ToggleAudio) => {
                self.audio = !self.audio;
                log::debug!("audio {}", if self.audio { "on" } else { "off" });
                self.events.push(GameEvent::AudioToggled(self.audio));
            }
            InputEvent::KeyDown(key) => self.handle_key(key),
            InputEvent::MouseDown { x, y } => self.handle_click(x, y),
        }
    }

    fn handle_key(&mut self, key: Key) {
        match self.screen {
            Screen::Menu => match key {
                Key::Up => self.move_selection(MenuItem::ALL.len() - 1),
                Key::Down => self.move_selection(1),
                Key::Confirm => self.choose(MenuItem::ALL[self.selected]),
                _ => {}
            },
            Screen::Playing => {
                if key == Key::Cancel {
                    log::info!("round abandoned at score {}", self.game.score());
                    self.back_to_menu();
                } else if let Some(dir) = key.direction() {
                    self.game.steer(dir);
                }
            }
            Screen::GameOver => {
                if matches!(key, Key::Confirm | Key::Cancel) {
                    self.game.reset_round();
                    self.back_to_menu();
                }
            }
            Screen::Instructions | Screen::HighScore => {
                if key == Key::Cancel {
                    self.back_to_menu();
                }
            }
        }
    }

    fn handle_click(&mut self, x: f32, y: f32) {
        if self.screen != Screen::Menu {
            return;
        }
        if let Some(idx) = MenuItem::ALL.iter().position(|item| item.hit_box().contains_point(x, y)) {
            self.selected = idx;
            self.choose(MenuItem::ALL[idx]);
        }
    }

    fn move_selection(&mut self, step: usize) {
        self.selected = (self.selected + step) % MenuItem::ALL.len();
        self.events.push(GameEvent::MenuMoved);
    }

    fn choose(&mut self, item: MenuItem) {
        log::debug!("menu: {}", item.label());
        self.events.push(GameEvent::MenuSelected);
        match item {
            MenuItem::Start => self.start_round(),
            MenuItem::Instructions => self.screen = Screen::Instructions,
            MenuItem::HighScore => self.screen = Screen::HighScore,
            MenuItem::Exit => {
                log::info!("exit selected");
                self.running = false;
            }
        }
    }

    fn start_round(&mut self) {
        self.game.reset_round();
        self.screen = Screen::Playing;
        log::info!("round started");
    }

    fn back_to_menu(&mut self) {
        self.screen = Screen::Menu;
        self.selected = 0;
    }

    pub fn update(&mut self, now: u64) {
        if self.screen != Screen::Playing {
            return;
        }
        if let Some(crash) = self.game.step(now, &mut self.events) {
            self.end_round(crash);
        }
    }

    fn end_round(&mut self, crash: Crash) {
        debug_assert!(collision::is_terminal(self.game.snake(), &self.game.field().interior()));
        let score = self.game.score();
        let new_best = self.high_score.finalize(score, &mut self.store);
        log::info!(
            "round over: snake {} with score {score}, length {}",
            crash.describe(),
            self.game.snake().len()
        );
        self.last_round = Some(RoundSummary {
            score,
            length: self.game.snake().len(),
            crash,
            new_best,
        });
        self.screen = Screen::GameOver;
    }

    /// Hands the events collected since the last call to the caller.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected_item(&self) -> MenuItem {
        MenuItem::ALL[self.selected]
    }

    pub fn game(&self) -> &SnakeGame {
        &self.game
    }

    pub fn best_score(&self) -> u32 {
        self.high_score.best()
    }

    pub fn last_round(&self) -> Option<&RoundSummary> {
        self.last_round.as_ref()
    }

    pub fn audio_enabled(&self) -> bool {
        self.audio
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    #[cfg(test)]
    pub(crate) fn game_mut(&mut self) -> &mut SnakeGame {
        &mut self.game
    }
}
