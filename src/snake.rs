use crate::geometry::{Position, Rect};
use Direction::*;

/// Hard cap on the number of body segments.
pub const MAX_LENGTH: usize = 100;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// Unit vector in screen coordinates (y grows downwards).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// One body cell. The box size is only used for overlap tests and drawing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub pos: Position,
    pub w: i32,
    pub h: i32,
}

impl Segment {
    pub fn bounds(&self) -> Rect {
        Rect::at(self.pos, self.w, self.h)
    }
}

pub struct Snake {
    segments: Vec<Segment>,
    direction: Direction,
    pending: Option<Direction>,
    score: u32,
    step: i32,
    segment_size: (i32, i32),
}

impl Snake {
    pub fn new(start: Position, direction: Direction, length: usize, step: i32, segment_size: (i32, i32)) -> Self {
        let mut snake = Self {
            segments: Vec::with_capacity(MAX_LENGTH),
            direction,
            pending: None,
            score: 0,
            step,
            segment_size,
        };
        snake.initialize(start, direction, length);
        snake
    }

    /// Lays the body out in a straight line behind the head and starts a
    /// fresh run: score zero, no latched turn.
    pub fn initialize(&mut self, start: Position, direction: Direction, length: usize) {
        let length = length.clamp(1, MAX_LENGTH);
        let (dx, dy) = direction.delta();
        let (w, h) = self.segment_size;

        self.segments.clear();
        self.segments.extend((0..length as i32).map(|i| Segment {
            pos: start.offset(-dx * self.step * i, -dy * self.step * i),
            w,
            h,
        }));
        self.direction = direction;
        self.pending = None;
        self.score = 0;
    }

    /// Latches a turn for the next `advance`. A request that points straight
    /// back into the neck is ignored. Later valid requests overwrite earlier
    /// ones within the same tick.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if requested == self.direction.opposite() {
            return false;
        }
        self.pending = Some(requested);
        true
    }

    pub fn advance(&mut self) {
        if let Some(dir) = self.pending.take() {
            self.direction = dir;
        }

        for i in (1..self.segments.len()).rev() {
            self.segments[i].pos = self.segments[i - 1].pos;
        }

        let (dx, dy) = self.direction.delta();
        let head = &mut self.segments[0];
        head.pos = head.pos.offset(dx * self.step, dy * self.step);
    }

    /// Appends `n` segments stacked on the tail; they unfold as the snake
    /// moves on.
    pub fn grow(&mut self, n: usize) {
        let Some(&tail) = self.segments.last() else {
            return;
        };
        let target = (self.segments.len() + n).min(MAX_LENGTH);
        self.segments.resize(target, tail);
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn head(&self) -> Position {
        self.segments[0].pos
    }

    pub fn head_bounds(&self) -> Rect {
        self.segments[0].bounds()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[cfg(test)]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}
