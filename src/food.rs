use rand::Rng;

use crate::geometry::{Playfield, Position, Rect};

/// Picks a uniformly random grid-aligned cell inside the playfield
/// interior. Cells under the snake are not excluded.
pub fn random_cell<R: Rng>(rng: &mut R, field: &Playfield) -> Position {
    let inner = field.interior();
    let col = rng.gen_range(0..field.columns());
    let row = rng.gen_range(0..field.rows());
    Position::new(inner.x + col * field.cell, inner.y + row * field.cell)
}

/// `true` once `duration` milliseconds have passed since `activated_at`.
pub fn is_expired(now: u64, activated_at: u64, duration: u64) -> bool {
    now.saturating_sub(activated_at) >= duration
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Food {
    bounds: Rect,
}

impl Food {
    pub fn at(pos: Position, size: i32) -> Self {
        Self { bounds: Rect::at(pos, size, size) }
    }

    pub fn generate<R: Rng>(&mut self, rng: &mut R, field: &Playfield) {
        let pos = random_cell(rng, field);
        self.bounds.x = pos.x;
        self.bounds.y = pos.y;
    }

    pub fn check_collision(&self, head: &Rect) -> bool {
        head.intersects(&self.bounds)
    }

    #[cfg(test)]
    pub fn position(&self) -> Position {
        self.bounds.origin()
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Time-limited food worth extra points. Inactive until `activate` and
/// gone again on expiry or consumption.
#[derive(Clone, Debug)]
pub struct BonusFood {
    item: Food,
    activated_at: Option<u64>,
    duration: u64,
}

impl BonusFood {
    pub fn new(size: i32, duration: u64) -> Self {
        Self { item: Food::at(Position::default(), size), activated_at: None, duration }
    }

    pub fn activate<R: Rng>(&mut self, rng: &mut R, field: &Playfield, now: u64) {
        self.item.generate(rng, field);
        self.activated_at = Some(now);
    }

    pub fn is_active(&self) -> bool {
        self.activated_at.is_some()
    }

    pub fn is_expired(&self, now: u64) -> bool {
        match self.activated_at {
            Some(at) => is_expired(now, at, self.duration),
            None => false,
        }
    }

    /// Deactivates the bonus if its time ran out. Returns whether it did.
    pub fn expire_if_due(&mut self, now: u64) -> bool {
        if self.is_expired(now) {
            self.activated_at = None;
            return true;
        }
        false
    }

    pub fn check_collision(&self, head: &Rect) -> bool {
        self.is_active() && self.item.check_collision(head)
    }

    pub fn consume(&mut self) {
        self.activated_at = None;
    }

    /// Milliseconds left before expiry, `None` when inactive.
    pub fn remaining(&self, now: u64) -> Option<u64> {
        self.activated_at
            .map(|at| self.duration.saturating_sub(now.saturating_sub(at)))
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn bounds(&self) -> Rect {
        self.item.bounds()
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, pos: Position, now: u64) {
        self.item = Food::at(pos, self.item.bounds().w);
        self.activated_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const RNG_SEED: u64 = 0x5EED_F00D;

    fn field() -> Playfield {
        Playfield::new(800, 600, 10, 20)
    }

    #[test]
    fn generated_food_is_aligned_and_inside() {
        let field = field();
        let inner = field.interior();
        let mut rng = SmallRng::seed_from_u64(RNG_SEED);
        let mut food = Food::at(Position::default(), 15);
        for _ in 0..2_000 {
            food.generate(&mut rng, &field);
            let p = food.position();
            assert!(inner.contains(p), "{p:?} outside {inner:?}");
            assert_eq!(p.x % 10, 0);
            assert_eq!(p.y % 10, 0);
        }
    }

    #[test]
    fn generation_reaches_the_corners() {
        let field = field();
        let mut rng = SmallRng::seed_from_u64(RNG_SEED);
        let cells: Vec<Position> = (0..50_000).map(|_| random_cell(&mut rng, &field)).collect();
        assert!(cells.contains(&Position::new(20, 20)));
        assert!(cells.contains(&Position::new(770, 570)));
    }

    #[test]
    fn collision_is_strict_bounding_box_overlap() {
        let food = Food::at(Position::new(55, 50), 15);
        assert!(food.check_collision(&Rect::new(60, 50, 15, 13)));
        assert!(food.check_collision(&Rect::new(41, 37, 15, 14)));
        assert!(!food.check_collision(&Rect::new(40, 50, 15, 13)));
        assert!(!food.check_collision(&Rect::new(70, 50, 15, 13)));
        assert!(!food.check_collision(&Rect::new(55, 65, 15, 13)));
    }

    #[test]
    fn expiry_is_measured_from_activation() {
        assert!(!is_expired(1_000, 1_000, 3_000));
        assert!(!is_expired(3_999, 1_000, 3_000));
        assert!(is_expired(4_000, 1_000, 3_000));
        assert!(is_expired(4_001, 1_000, 3_000));
        // clock going backwards never expires early
        assert!(!is_expired(500, 1_000, 3_000));
    }

    #[test]
    fn bonus_lifecycle() {
        let field = field();
        let mut rng = SmallRng::seed_from_u64(RNG_SEED);
        let mut bonus = BonusFood::new(20, 3_000);
        assert!(!bonus.is_active());
        assert!(!bonus.check_collision(&bonus.bounds()));

        bonus.activate(&mut rng, &field, 10_000);
        assert!(bonus.is_active());
        assert_eq!(bonus.remaining(11_000), Some(2_000));
        assert!(bonus.check_collision(&bonus.bounds()));
        assert!(!bonus.expire_if_due(12_999));

        assert!(bonus.expire_if_due(13_001));
        assert!(!bonus.is_active());
        assert!(!bonus.check_collision(&bonus.bounds()));
        assert_eq!(bonus.remaining(13_001), None);
    }

    #[test]
    fn consumed_bonus_is_gone() {
        let mut bonus = BonusFood::new(20, 3_000);
        bonus.place(Position::new(100, 100), 0);
        bonus.consume();
        assert!(!bonus.is_active());
        assert!(!bonus.expire_if_due(10_000));
    }
}
