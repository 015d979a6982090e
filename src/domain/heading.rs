/// Dot heading: two independent axes, and the per-tick displacement they imply.
///
/// The renderer shows the heading as a two-token tag (`"bottom right"`).

use super::geometry::Point;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Vertical {
    Up,
    Down,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Horizontal {
    Left,
    Right,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Heading {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
}

impl Default for Heading {
    /// Start of every game and the fallback for lost headings.
    fn default() -> Self {
        Heading { vertical: Vertical::Down, horizontal: Horizontal::Right }
    }
}

impl Heading {
    pub fn new(vertical: Vertical, horizontal: Horizontal) -> Self {
        Heading { vertical, horizontal }
    }

    pub fn with_vertical(self, vertical: Vertical) -> Self {
        Heading { vertical, ..self }
    }

    pub fn with_horizontal(self, horizontal: Horizontal) -> Self {
        Heading { horizontal, ..self }
    }

    /// Discrete tag published to the render surface.
    pub fn tag(self) -> &'static str {
        match (self.vertical, self.horizontal) {
            (Vertical::Up, Horizontal::Left) => "top left",
            (Vertical::Up, Horizontal::Right) => "top right",
            (Vertical::Down, Horizontal::Left) => "bottom left",
            (Vertical::Down, Horizontal::Right) => "bottom right",
        }
    }
}

/// Move `pos` by `distance` along both axes of `heading`.
#[inline]
pub fn advance(pos: Point, distance: f64, heading: Heading) -> Point {
    let x = match heading.horizontal {
        Horizontal::Right => pos.x + distance,
        Horizontal::Left => pos.x - distance,
    };
    let y = match heading.vertical {
        Vertical::Down => pos.y + distance,
        Vertical::Up => pos.y - distance,
    };
    Point { x, y }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_each_quadrant() {
        let p = Point::new(10.0, 10.0);
        let d = 1.5;
        assert_eq!(advance(p, d, Heading::new(Vertical::Down, Horizontal::Right)), Point::new(11.5, 11.5));
        assert_eq!(advance(p, d, Heading::new(Vertical::Down, Horizontal::Left)), Point::new(8.5, 11.5));
        assert_eq!(advance(p, d, Heading::new(Vertical::Up, Horizontal::Right)), Point::new(11.5, 8.5));
        assert_eq!(advance(p, d, Heading::new(Vertical::Up, Horizontal::Left)), Point::new(8.5, 8.5));
    }

    #[test]
    fn default_is_bottom_right() {
        assert_eq!(Heading::default().tag(), "bottom right");
    }

    #[test]
    fn tags_name_both_axes() {
        assert_eq!(Heading::new(Vertical::Up, Horizontal::Left).tag(), "top left");
        assert_eq!(Heading::new(Vertical::Up, Horizontal::Right).tag(), "top right");
        assert_eq!(Heading::new(Vertical::Down, Horizontal::Left).tag(), "bottom left");
    }

    #[test]
    fn axes_set_independently() {
        let h = Heading::new(Vertical::Up, Horizontal::Left);
        assert_eq!(h.with_horizontal(Horizontal::Right), Heading::new(Vertical::Up, Horizontal::Right));
        assert_eq!(h.with_vertical(Vertical::Down), Heading::new(Vertical::Down, Horizontal::Left));
    }
}
