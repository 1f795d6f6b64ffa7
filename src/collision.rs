use crate::geometry::{Position, Rect};
use crate::snake::{Segment, Snake};

/// Why a round ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Crash {
    Wall,
    Body,
}

impl Crash {
    pub fn describe(self) -> &'static str {
        match self {
            Crash::Wall => "hit the wall",
            Crash::Body => "bit its own tail",
        }
    }
}

pub fn is_out_of_bounds(head: Position, interior: &Rect) -> bool {
    !interior.contains(head)
}

/// Head sharing a cell with any other segment.
pub fn is_self_collision(segments: &[Segment]) -> bool {
    match segments.split_first() {
        Some((head, body)) => body.iter().any(|s| s.pos == head.pos),
        None => false,
    }
}

pub fn crash_cause(snake: &Snake, interior: &Rect) -> Option<Crash> {
    if is_out_of_bounds(snake.head(), interior) {
        Some(Crash::Wall)
    } else if is_self_collision(snake.segments()) {
        Some(Crash::Body)
    } else {
        None
    }
}

/// Read-only; call after the tick's `advance` and food resolution.
pub fn is_terminal(snake: &Snake, interior: &Rect) -> bool {
    crash_cause(snake, interior).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Playfield;
    use crate::snake::Direction::{self, *};

    fn interior() -> Rect {
        Playfield::new(800, 600, 10, 20).interior()
    }

    fn snake_at(x: i32, y: i32, dir: Direction, len: usize) -> Snake {
        Snake::new(Position::new(x, y), dir, len, 10, (15, 13))
    }

    #[test]
    fn one_cell_past_each_edge_is_out() {
        let r = interior();
        let outside = [
            Position::new(r.x - 10, 300),
            Position::new(r.right(), 300),
            Position::new(400, r.y - 10),
            Position::new(400, r.bottom()),
        ];
        let inside = [
            Position::new(r.x + 10, 300),
            Position::new(r.right() - 20, 300),
            Position::new(400, r.y + 10),
            Position::new(400, r.bottom() - 20),
        ];
        for p in outside {
            assert!(is_out_of_bounds(p, &r), "{p:?} should be out");
        }
        for p in inside {
            assert!(!is_out_of_bounds(p, &r), "{p:?} should be in");
        }
    }

    #[test]
    fn edge_cells_are_inside() {
        let r = interior();
        assert!(!is_out_of_bounds(Position::new(r.x, r.y), &r));
        assert!(!is_out_of_bounds(Position::new(r.right() - 10, r.bottom() - 10), &r));
    }

    #[test]
    fn wall_crash_after_advance() {
        let mut snake = snake_at(20, 300, Left, 1);
        assert!(!is_terminal(&snake, &interior()));
        snake.advance();
        assert_eq!(crash_cause(&snake, &interior()), Some(Crash::Wall));
    }

    #[test]
    fn tight_loop_bites_the_body() {
        let r = interior();
        let mut snake = snake_at(200, 200, Right, 5);
        for dir in [Down, Left, Up] {
            assert!(!is_terminal(&snake, &r));
            snake.set_direction(dir);
            snake.advance();
        }
        assert_eq!(crash_cause(&snake, &r), Some(Crash::Body));
    }

    #[test]
    fn chasing_the_tail_tip_is_safe() {
        let r = interior();
        let mut snake = snake_at(200, 200, Right, 4);
        for dir in [Down, Left, Up] {
            snake.set_direction(dir);
            snake.advance();
        }
        assert!(!is_terminal(&snake, &r));
    }

    #[test]
    fn terminal_check_is_idempotent() {
        let r = interior();
        let mut snake = snake_at(770, 300, Right, 3);
        let before = is_terminal(&snake, &r);
        assert_eq!(before, is_terminal(&snake, &r));
        snake.advance();
        assert!(is_terminal(&snake, &r));
        assert!(is_terminal(&snake, &r));
        assert_eq!(snake.head(), Position::new(780, 300));
    }

    #[test]
    fn single_segment_never_self_collides() {
        let snake = snake_at(200, 200, Right, 1);
        assert!(!is_self_collision(snake.segments()));
        assert!(!is_self_collision(&[]));
    }
}
