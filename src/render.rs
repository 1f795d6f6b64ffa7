use macroquad::prelude::{Color, clear_background, draw_rectangle, draw_text, measure_text};

use crate::app::{App, MenuItem, Screen};
use crate::geometry::Rect;
use crate::score::ScoreStore;

// Matrix-style palette
const BACKGROUND: Color = Color::new(0.0, 0.0, 0.0, 1.0);
const HEAD: Color = Color::new(0.64, 1.0, 0.64, 1.0); // bright green
const BODY: Color = Color::new(0.25, 0.9, 0.25, 1.0); // medium green
const WALL: Color = Color::new(0.08, 0.4, 0.08, 1.0); // dark green
const FOOD: Color = Color::new(0.9, 1.0, 0.9, 1.0); // pale bright
const BONUS: Color = Color::new(1.0, 0.85, 0.2, 1.0); // gold
const TEXT: Color = Color::new(1.0, 1.0, 1.0, 1.0);
const DIM: Color = Color::new(0.5, 0.5, 0.5, 1.0);
const HIGHLIGHT: Color = Color::new(0.1, 0.3, 0.1, 1.0);

const INSTRUCTIONS: &[&str] = &[
    "Arrow keys or WASD steer the snake.",
    "Food is worth 1 point and makes you longer.",
    "Every 10 points a golden bonus appears",
    "for 3 seconds. It is worth 3 points.",
    "Running into the wall or your own body ends the round.",
    "M turns sound on and off.",
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Center,
}

/// One item of the per-tick draw list.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Fill { rect: Rect, color: Color },
    Text { text: String, x: f32, y: f32, size: f32, color: Color, anchor: Anchor },
}

fn fill(rect: Rect, color: Color) -> DrawCommand {
    DrawCommand::Fill { rect, color }
}

fn text(text: impl Into<String>, x: f32, y: f32, size: f32, color: Color) -> DrawCommand {
    DrawCommand::Text { text: text.into(), x, y, size, color, anchor: Anchor::Left }
}

fn centered(text: impl Into<String>, y: f32, size: f32, color: Color, width: i32) -> DrawCommand {
    DrawCommand::Text {
        text: text.into(),
        x: width as f32 * 0.5,
        y,
        size,
        color,
        anchor: Anchor::Center,
    }
}

/// Builds the draw list for the current screen. Reads state only.
pub fn scene<S: ScoreStore>(app: &App<S>, now: u64) -> Vec<DrawCommand> {
    let mut out = Vec::new();
    match app.screen() {
        Screen::Menu => menu(app, &mut out),
        Screen::Playing => playfield(app, now, &mut out),
        Screen::Instructions => instructions(app, &mut out),
        Screen::HighScore => high_score(app, &mut out),
        Screen::GameOver => {
            playfield(app, now, &mut out);
            game_over(app, &mut out);
        }
    }
    out
}

fn menu<S: ScoreStore>(app: &App<S>, out: &mut Vec<DrawCommand>) {
    let w = app.game().field().width;
    let h = app.game().field().height;
    out.push(centered("SNAKE", 90.0, 64.0, HEAD, w));

    for item in MenuItem::ALL {
        let b = item.hit_box();
        let selected = item == app.selected_item();
        if selected {
            out.push(fill(b, HIGHLIGHT));
        }
        let color = if selected { TEXT } else { DIM };
        out.push(DrawCommand::Text {
            text: item.label().to_string(),
            x: (b.x + b.w / 2) as f32,
            y: (b.bottom() - 10) as f32,
            size: 40.0,
            color,
            anchor: Anchor::Center,
        });
    }

    out.push(centered(format!("Best: {}", app.best_score()), (h - 70) as f32, 22.0, BODY, w));
    let sound = if app.audio_enabled() { "on" } else { "off" };
    out.push(centered(
        format!("Up/Down + Enter or click to choose   M: sound {sound}"),
        (h - 40) as f32,
        18.0,
        DIM,
        w,
    ));
}

fn playfield<S: ScoreStore>(app: &App<S>, now: u64, out: &mut Vec<DrawCommand>) {
    let game = app.game();
    let f = game.field();

    // Border walls
    out.push(fill(Rect::new(0, 0, f.width, f.margin), WALL));
    out.push(fill(Rect::new(0, f.height - f.margin, f.width, f.margin), WALL));
    out.push(fill(Rect::new(0, 0, f.margin, f.height), WALL));
    out.push(fill(Rect::new(f.width - f.margin, 0, f.margin, f.height), WALL));

    out.push(fill(game.food().bounds(), FOOD));

    let bonus = game.bonus();
    if let Some(left) = bonus.remaining(now) {
        out.push(fill(bonus.bounds(), BONUS));
        let bar = (f.width / 4) as i64 * left as i64 / bonus.duration().max(1) as i64;
        out.push(fill(Rect::new(f.width - f.margin - f.width / 4, 4, bar as i32, 12), BONUS));
    }

    // tail first so the head stays on top
    for (i, seg) in game.snake().segments().iter().enumerate().rev() {
        out.push(fill(seg.bounds(), if i == 0 { HEAD } else { BODY }));
    }

    // HUD
    out.push(text(format!("Score: {}", game.score()), 24.0, 16.0, 20.0, TEXT));
    out.push(text(format!("Best: {}", app.best_score()), 160.0, 16.0, 20.0, TEXT));
}

fn instructions<S: ScoreStore>(app: &App<S>, out: &mut Vec<DrawCommand>) {
    let w = app.game().field().width;
    out.push(centered("INSTRUCTIONS", 100.0, 48.0, HEAD, w));
    let mut y = 180.0;
    for line in INSTRUCTIONS {
        out.push(centered(*line, y, 22.0, TEXT, w));
        y += 34.0;
    }
    out.push(centered("Esc: back", y + 40.0, 20.0, DIM, w));
}

fn high_score<S: ScoreStore>(app: &App<S>, out: &mut Vec<DrawCommand>) {
    let w = app.game().field().width;
    out.push(centered("HIGHEST SCORE", 250.0, 48.0, HEAD, w));
    out.push(centered(app.best_score().to_string(), 330.0, 64.0, TEXT, w));
    out.push(centered("Esc: back", 420.0, 20.0, DIM, w));
}

fn game_over<S: ScoreStore>(app: &App<S>, out: &mut Vec<DrawCommand>) {
    let f = app.game().field();
    let (w, h) = (f.width, f.height);
    out.push(fill(Rect::new(w / 4, h / 4, w / 2, h / 2), Color::new(0.0, 0.0, 0.0, 0.8)));
    out.push(centered("GAME OVER", (h / 4 + 70) as f32, 48.0, HEAD, w));

    if let Some(round) = app.last_round() {
        out.push(centered(
            format!("Score: {}   Length: {}", round.score, round.length),
            (h / 4 + 120) as f32,
            24.0,
            TEXT,
            w,
        ));
        out.push(centered(format!("The snake {}", round.crash.describe()), (h / 4 + 155) as f32, 20.0, DIM, w));
        if round.new_best {
            out.push(centered("NEW HIGH SCORE!", (h / 4 + 200) as f32, 30.0, BONUS, w));
        }
    }
    out.push(centered("Enter or Esc: menu", (h * 3 / 4 - 20) as f32, 20.0, DIM, w));
}

/// Draws a scene built by [`scene`].
pub fn present(commands: &[DrawCommand]) {
    clear_background(BACKGROUND);
    for command in commands {
        match command {
            DrawCommand::Fill { rect, color } => {
                draw_rectangle(rect.x as f32, rect.y as f32, rect.w as f32, rect.h as f32, *color);
            }
            DrawCommand::Text { text, x, y, size, color, anchor } => {
                let x = match anchor {
                    Anchor::Left => *x,
                    Anchor::Center => x - measure_text(text, None, *size as u16, 1.0).width * 0.5,
                };
                draw_text(text, x, *y, *size, *color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::input::{InputEvent, Key};
    use crate::score::testing::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn app() -> App<MemoryStore> {
        App::new(&GameConfig::default(), MemoryStore::default(), SmallRng::seed_from_u64(3))
    }

    fn texts(commands: &[DrawCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn fills_of(commands: &[DrawCommand], color: Color) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill { color: fc, .. } if *fc == color))
            .count()
    }

    #[test]
    fn menu_highlights_selected_item() {
        let mut app = app();
        app.tick(&[InputEvent::KeyDown(Key::Down)], 0);
        let cmds = scene(&app, 0);
        assert!(cmds.contains(&fill(MenuItem::Instructions.hit_box(), HIGHLIGHT)));
        assert_eq!(fills_of(&cmds, HIGHLIGHT), 1);
        let labels = texts(&cmds);
        for item in MenuItem::ALL {
            assert!(labels.contains(&item.label()));
        }
    }

    #[test]
    fn playing_draws_every_segment_and_hud() {
        let mut app = app();
        app.tick(&[InputEvent::KeyDown(Key::Confirm)], 0);
        let cmds = scene(&app, 0);
        let snake = app.game().snake();
        assert_eq!(fills_of(&cmds, HEAD), 1);
        assert_eq!(fills_of(&cmds, BODY), snake.len() - 1);
        assert_eq!(fills_of(&cmds, WALL), 4);
        assert_eq!(fills_of(&cmds, BONUS), 0);
        assert!(texts(&cmds).contains(&format!("Score: {}", app.game().score()).as_str()));
        // head is drawn last
        let last_fill = cmds.iter().rev().find(|c| matches!(c, DrawCommand::Fill { .. }));
        assert_eq!(last_fill, Some(&fill(snake.head_bounds(), HEAD)));
    }

    #[test]
    fn high_score_screen_shows_best() {
        let mut app = App::new(
            &GameConfig::default(),
            MemoryStore::with(crate::config::DEFAULT_SAVE_FILE, 77),
            SmallRng::seed_from_u64(3),
        );
        app.tick(&[InputEvent::KeyDown(Key::Up), InputEvent::KeyDown(Key::Up), InputEvent::KeyDown(Key::Confirm)], 0);
        assert_eq!(app.screen(), Screen::HighScore);
        let cmds = scene(&app, 0);
        assert!(texts(&cmds).contains(&"77"));
    }

    #[test]
    fn game_over_announces_new_best() {
        let mut app = app();
        app.tick(&[InputEvent::KeyDown(Key::Confirm)], 0);
        app.game_mut().snake_mut().add_score(3);
        let mut now = 0;
        while app.screen() == Screen::Playing {
            now += 66;
            app.tick(&[], now);
        }
        let cmds = scene(&app, now);
        let labels = texts(&cmds);
        assert!(labels.contains(&"GAME OVER"));
        assert!(labels.contains(&"NEW HIGH SCORE!"));
        assert!(labels.contains(&"The snake hit the wall"));
    }
}
