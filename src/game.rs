use rand::rngs::SmallRng;

use crate::collision::{self, Crash};
use crate::config::GameConfig;
use crate::food::{BonusFood, Food};
use crate::geometry::Playfield;
use crate::score::{self, BonusTrigger};
use crate::snake::{Direction, Snake};

/// Things that happened during a tick, consumed by the audio layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    FoodEaten,
    BonusAppeared,
    BonusEaten,
    BonusExpired,
    Crashed(Crash),
    MenuMoved,
    MenuSelected,
    AudioToggled(bool),
}

/// Simulation state of one playing attempt.
pub struct SnakeGame {
    field: Playfield,
    initial_length: usize,
    food_reward: u32,
    bonus_reward: u32,
    snake: Snake,
    food: Food,
    bonus: BonusFood,
    trigger: BonusTrigger,
    rng: SmallRng,
}

impl SnakeGame {
    pub fn new(config: &GameConfig, rng: SmallRng) -> Self {
        let field = config.field;
        let mut game = Self {
            field,
            initial_length: config.initial_length,
            food_reward: config.food_reward,
            bonus_reward: config.bonus_reward,
            snake: Snake::new(
                field.center(),
                Direction::Right,
                config.initial_length,
                field.cell,
                config.segment_size,
            ),
            food: Food::at(field.center(), config.food_size),
            bonus: BonusFood::new(config.bonus_size, config.bonus_duration_ms),
            trigger: BonusTrigger::new(config.bonus_milestone),
            rng,
        };
        game.reset_round();
        game
    }

    /// Puts the snake back at the centre, draws fresh food, and clears any
    /// bonus state. Every transition into Playing goes through here.
    pub fn reset_round(&mut self) {
        self.snake.initialize(self.field.center(), Direction::Right, self.initial_length);
        self.food.generate(&mut self.rng, &self.field);
        self.bonus.consume();
        self.trigger.reset();
    }

    pub fn steer(&mut self, dir: Direction) {
        if !self.snake.set_direction(dir) {
            log::trace!("ignored reversal to {dir:?}");
        }
    }

    /// Runs one simulation tick. Returns the crash that ended the round, if
    /// any.
    pub fn step(&mut self, now: u64, events: &mut Vec<GameEvent>) -> Option<Crash> {
        self.snake.advance();
        let head = self.snake.head_bounds();

        if self.food.check_collision(&head) {
            score::on_food_consumed(&mut self.snake, self.food_reward);
            self.food.generate(&mut self.rng, &self.field);
            events.push(GameEvent::FoodEaten);
        }

        if self.bonus.expire_if_due(now) {
            log::debug!("bonus expired");
            events.push(GameEvent::BonusExpired);
        } else if self.bonus.check_collision(&head) {
            score::on_bonus_consumed(&mut self.snake, self.bonus_reward);
            self.bonus.consume();
            log::debug!("bonus eaten, score {}", self.snake.score());
            events.push(GameEvent::BonusEaten);
        }

        if self.trigger.maybe_activate(self.snake.score(), self.bonus.is_active()) {
            self.bonus.activate(&mut self.rng, &self.field, now);
            log::debug!("bonus appeared at {:?}", self.bonus.bounds().origin());
            events.push(GameEvent::BonusAppeared);
        }

        let crash = collision::crash_cause(&self.snake, &self.field.interior());
        if let Some(crash) = crash {
            events.push(GameEvent::Crashed(crash));
        }
        crash
    }

    pub fn field(&self) -> &Playfield {
        &self.field
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn bonus(&self) -> &BonusFood {
        &self.bonus
    }

    pub fn score(&self) -> u32 {
        self.snake.score()
    }

    #[cfg(test)]
    pub(crate) fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }
}
