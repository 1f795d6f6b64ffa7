/// Pixel-space position of a grid cell's top-left corner.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Axis-aligned box. Right and bottom edges are exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn at(origin: Position, w: i32, h: i32) -> Self {
        Self { x: origin.x, y: origin.y, w, h }
    }

    pub fn origin(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn contains(&self, p: Position) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Inclusive hit test for screen coordinates (mouse clicks).
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x as f32 && x <= self.right() as f32 && y >= self.y as f32 && y <= self.bottom() as f32
    }

    /// Strict overlap on both axes; touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Screen size, movement grid, and the border margin that walls off the
/// playable interior.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Playfield {
    pub width: i32,
    pub height: i32,
    pub cell: i32,
    pub margin: i32,
}

impl Playfield {
    pub const fn new(width: i32, height: i32, cell: i32, margin: i32) -> Self {
        Self { width, height, cell, margin }
    }

    pub fn interior(&self) -> Rect {
        Rect::new(
            self.margin,
            self.margin,
            self.width - 2 * self.margin,
            self.height - 2 * self.margin,
        )
    }

    pub fn columns(&self) -> i32 {
        self.interior().w / self.cell
    }

    pub fn rows(&self) -> i32 {
        self.interior().h / self.cell
    }

    /// Screen centre snapped down onto the movement grid.
    pub fn center(&self) -> Position {
        let cx = self.width / 2;
        let cy = self.height / 2;
        Position::new(cx - cx % self.cell, cy - cy % self.cell)
    }

    #[cfg(test)]
    pub fn is_aligned(&self, p: Position) -> bool {
        p.x % self.cell == 0 && p.y % self.cell == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_excludes_margin_on_every_side() {
        let field = Playfield::new(800, 600, 10, 20);
        let inner = field.interior();
        assert_eq!(inner, Rect::new(20, 20, 760, 560));
        assert!(inner.contains(Position::new(20, 20)));
        assert!(inner.contains(Position::new(770, 570)));
        assert!(!inner.contains(Position::new(780, 570)));
        assert!(!inner.contains(Position::new(20, 580)));
        assert_eq!(field.columns(), 76);
        assert_eq!(field.rows(), 56);
    }

    #[test]
    fn touching_boxes_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
        assert!(!a.intersects(&Rect::new(0, 10, 10, 10)));
        assert!(a.intersects(&Rect::new(9, 9, 10, 10)));
        assert!(Rect::new(60, 50, 15, 13).intersects(&Rect::new(55, 50, 15, 15)));
    }

    #[test]
    fn center_is_grid_aligned() {
        let field = Playfield::new(805, 603, 10, 20);
        let c = field.center();
        assert_eq!(c, Position::new(400, 300));
        assert!(field.is_aligned(c));
    }
}
