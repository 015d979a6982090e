/// Paddles and the selector that decides which one is in play.
///
/// The arena is split down the middle: anything on the left half belongs
/// to the left paddle, everything else to the right one. The same rule
/// serves both pointer routing and the per-tick collision lookup.

use super::geometry::{Lane, Rect};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
    Left,
    Right,
}

/// Advisory outline shown around the active paddle. Never affects physics.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Feedback {
    #[default]
    Neutral,
    Hit,
    Miss,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Paddle {
    pub side: Side,
    pub y: f64,
    pub height: f64,
    pub feedback: Feedback,
}

impl Paddle {
    pub fn new(side: Side, height: f64) -> Self {
        Paddle { side, y: 0.0, height, feedback: Feedback::Neutral }
    }

    /// Bounding box of this paddle within its lane.
    pub fn rect(&self, lane: Lane) -> Rect {
        Rect::new(lane.x, self.y, lane.width, self.height)
    }
}

/// Both paddles, indexed by side.
#[derive(Clone, Debug, PartialEq)]
pub struct Paddles {
    pub left: Paddle,
    pub right: Paddle,
}

impl Paddles {
    pub fn new(height: f64) -> Self {
        Paddles {
            left: Paddle::new(Side::Left, height),
            right: Paddle::new(Side::Right, height),
        }
    }

    pub fn get(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Paddle> {
        [&self.left, &self.right].into_iter()
    }
}

/// Tracks which paddle is active for feedback purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaddleSelector {
    active: Side,
}

impl Default for PaddleSelector {
    fn default() -> Self {
        PaddleSelector { active: Side::Left }
    }
}

impl PaddleSelector {
    pub fn active(&self) -> Side {
        self.active
    }

    /// Pick the paddle for horizontal position `x`. Clears both outlines
    /// and marks the chosen side active.
    pub fn select(&mut self, x: f64, arena_width: f64, paddles: &mut Paddles) -> Side {
        paddles.left.feedback = Feedback::Neutral;
        paddles.right.feedback = Feedback::Neutral;

        let side = side_for(x, arena_width);
        self.active = side;
        side
    }

    /// Set the outline of `side` if it is the active paddle.
    pub fn mark(&self, side: Side, feedback: Feedback, paddles: &mut Paddles) {
        if side == self.active {
            paddles.get_mut(side).feedback = feedback;
        }
    }
}

/// Left half → left paddle, right half (including the midline) → right.
#[inline]
pub fn side_for(x: f64, arena_width: f64) -> Side {
    if x < arena_width / 2.0 { Side::Left } else { Side::Right }
}

/// Move a paddle to `y`. Rejected if the paddle would overhang the arena floor.
pub fn move_stick(paddle: &mut Paddle, y: f64, arena_height: f64) -> bool {
    if y + paddle.height > arena_height {
        return false;
    }
    paddle.y = y;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_points_pick_fixed_sides() {
        let mut sel = PaddleSelector::default();
        let mut paddles = Paddles::new(100.0);
        let w = 640.0;
        for _ in 0..3 {
            assert_eq!(sel.select(w * 0.25, w, &mut paddles), Side::Left);
            assert_eq!(sel.active(), Side::Left);
            assert_eq!(sel.select(w * 0.75, w, &mut paddles), Side::Right);
            assert_eq!(sel.active(), Side::Right);
        }
    }

    #[test]
    fn midline_belongs_to_right() {
        assert_eq!(side_for(319.999, 640.0), Side::Left);
        assert_eq!(side_for(320.0, 640.0), Side::Right);
    }

    #[test]
    fn select_clears_outlines() {
        let mut sel = PaddleSelector::default();
        let mut paddles = Paddles::new(100.0);
        paddles.left.feedback = Feedback::Hit;
        paddles.right.feedback = Feedback::Miss;
        sel.select(10.0, 100.0, &mut paddles);
        assert!(paddles.iter().all(|p| p.feedback == Feedback::Neutral));
    }

    #[test]
    fn mark_only_touches_active_side() {
        let mut sel = PaddleSelector::default();
        let mut paddles = Paddles::new(100.0);
        sel.select(90.0, 100.0, &mut paddles);
        sel.mark(Side::Left, Feedback::Hit, &mut paddles);
        assert_eq!(paddles.left.feedback, Feedback::Neutral);
        sel.mark(Side::Right, Feedback::Hit, &mut paddles);
        assert_eq!(paddles.right.feedback, Feedback::Hit);
    }

    #[test]
    fn move_stick_rejects_overhang() {
        let mut p = Paddle::new(Side::Left, 100.0);
        assert!(move_stick(&mut p, 380.0, 480.0)); // exactly flush with floor
        assert_eq!(p.y, 380.0);
        assert!(!move_stick(&mut p, 381.0, 480.0));
        assert_eq!(p.y, 380.0);
        assert!(move_stick(&mut p, 0.0, 480.0));
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn rect_uses_lane_and_paddle_band() {
        let mut p = Paddle::new(Side::Right, 90.0);
        p.y = 12.0;
        let r = p.rect(Lane { x: 600.0, width: 2.0 });
        assert_eq!(r, Rect::new(600.0, 12.0, 2.0, 90.0));
    }
}
