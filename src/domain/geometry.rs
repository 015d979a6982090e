/// Arena geometry: points, sizes, rectangles, and the paddle hit test.
///
/// All coordinates are arena-relative, origin top-left, y grows downward.

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Fixed horizontal column a paddle lives in. Owned by the surface layout.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Lane {
    pub x: f64,
    pub width: f64,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Does the dot lie inside the paddle rectangle? Edges count as inside.
#[inline]
pub fn collides(dot: Point, paddle: Rect) -> bool {
    dot.x >= paddle.x && dot.x <= paddle.right()
        && dot.y >= paddle.y && dot.y <= paddle.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paddle() -> Rect {
        Rect::new(10.0, 20.0, 4.0, 100.0)
    }

    #[test]
    fn inside_collides() {
        assert!(collides(Point::new(12.0, 70.0), paddle()));
    }

    #[test]
    fn every_edge_is_inclusive() {
        let p = paddle();
        assert!(collides(Point::new(10.0, 70.0), p)); // left edge
        assert!(collides(Point::new(14.0, 70.0), p)); // right edge
        assert!(collides(Point::new(12.0, 20.0), p)); // top edge
        assert!(collides(Point::new(12.0, 120.0), p)); // bottom edge
        assert!(collides(Point::new(10.0, 20.0), p)); // corner
        assert!(collides(Point::new(14.0, 120.0), p)); // opposite corner
    }

    #[test]
    fn outside_misses() {
        let p = paddle();
        assert!(!collides(Point::new(9.99, 70.0), p));
        assert!(!collides(Point::new(14.01, 70.0), p));
        assert!(!collides(Point::new(12.0, 19.99), p));
        assert!(!collides(Point::new(12.0, 120.01), p));
        assert!(!collides(Point::new(200.0, 500.0), p));
    }

    #[test]
    fn center_of_size() {
        let c = Size::new(800.0, 600.0).center();
        assert_eq!(c, Point::new(400.0, 300.0));
    }
}
