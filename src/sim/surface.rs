/// Surface: the geometry the simulation borrows from whatever draws it.
///
/// The core owns positions and heights; the surface owns the arena size,
/// the dot's footprint and the paddle lanes. Any of the latter may be
/// missing (e.g. a terminal too small to lay out), in which case the
/// operations that need them quietly do nothing.

use crate::domain::geometry::{Lane, Size};
use crate::domain::paddle::Side;

pub trait Surface {
    fn arena(&self) -> Size;
    fn dot_size(&self) -> Option<Size>;
    fn lane(&self, side: Side) -> Option<Lane>;
}

/// Plain in-memory surface with fixed values.
#[cfg(test)]
#[derive(Clone, Debug)]
pub struct FixedSurface {
    pub arena: Size,
    pub dot: Option<Size>,
    pub left: Option<Lane>,
    pub right: Option<Lane>,
}

#[cfg(test)]
impl FixedSurface {
    /// Arena with a point-sized dot and paddles hugging both walls.
    pub fn new(width: f64, height: f64, lane_width: f64) -> Self {
        FixedSurface {
            arena: Size::new(width, height),
            dot: Some(Size::new(0.0, 0.0)),
            left: Some(Lane { x: 0.0, width: lane_width }),
            right: Some(Lane { x: width - lane_width, width: lane_width }),
        }
    }
}

#[cfg(test)]
impl Surface for FixedSurface {
    fn arena(&self) -> Size {
        self.arena
    }

    fn dot_size(&self) -> Option<Size> {
        self.dot
    }

    fn lane(&self, side: Side) -> Option<Lane> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}
