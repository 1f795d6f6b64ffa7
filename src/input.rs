use macroquad::input::utils::{register_input_subscriber, repeat_all_miniquad_input};
use macroquad::input::{KeyCode, MouseButton, is_quit_requested, prevent_quit};
use macroquad::miniquad::{EventHandler, KeyMods};

use crate::snake::Direction;

/// Logical keys the game reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
    ToggleAudio,
}

impl Key {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    MouseDown { x: f32, y: f32 },
}

pub fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Up | KeyCode::W => Key::Up,
        KeyCode::Down | KeyCode::S => Key::Down,
        KeyCode::Left | KeyCode::A => Key::Left,
        KeyCode::Right | KeyCode::D => Key::Right,
        KeyCode::Enter | KeyCode::KpEnter | KeyCode::Space => Key::Confirm,
        KeyCode::Escape | KeyCode::Backspace => Key::Cancel,
        KeyCode::M => Key::ToggleAudio,
        _ => return None,
    };
    Some(key)
}

/// Replays raw window events, in arrival order, into the batch for this tick.
struct Collector<'a> {
    events: &'a mut Vec<InputEvent>,
}

impl EventHandler for Collector<'_> {
    fn update(&mut self) {}

    fn draw(&mut self) {}

    fn key_down_event(&mut self, keycode: KeyCode, _keymods: KeyMods, repeat: bool) {
        if repeat {
            return;
        }
        if let Some(key) = map_key(keycode) {
            self.events.push(InputEvent::KeyDown(key));
        }
    }

    fn mouse_button_down_event(&mut self, button: MouseButton, x: f32, y: f32) {
        if button == MouseButton::Left {
            self.events.push(InputEvent::MouseDown { x, y });
        }
    }
}

/// Ordered per-tick input source.
pub struct InputQueue {
    subscriber: usize,
}

impl InputQueue {
    /// Must be created inside the macroquad main loop context.
    pub fn new() -> Self {
        prevent_quit();
        Self { subscriber: register_input_subscriber() }
    }

    pub fn poll(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        repeat_all_miniquad_input(&mut Collector { events: &mut events }, self.subscriber);
        if is_quit_requested() {
            events.push(InputEvent::Quit);
        }
        events
    }
}
