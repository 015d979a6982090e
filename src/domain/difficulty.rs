/// Difficulty scaling: dot speed and paddle height react to hits and misses.
///
///   hit  → faster dot, shorter paddle
///   miss → slower dot, taller paddle
///
/// Speed is clamped into `[min_distance, max_distance]`. Paddle height is
/// not clamped: once past a threshold the adjustment is simply skipped.

use super::paddle::Paddle;

#[derive(Clone, Debug, PartialEq)]
pub struct Tuning {
    pub initial_distance: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub distance_step: f64,
    pub initial_height: f64,
    /// Shrinking stops once height is at or below this.
    pub min_height: f64,
    /// Growing stops once height is at or above this.
    pub max_height: f64,
    pub shrink_factor: f64,
    pub grow_factor: f64,
    pub hit_score: i64,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            initial_distance: 1.0,
            min_distance: 0.1,
            max_distance: 6.0,
            distance_step: 0.1,
            initial_height: 100.0,
            min_height: 15.0,
            max_height: 100.0,
            shrink_factor: 0.9,
            grow_factor: 1.1,
            hit_score: 2,
        }
    }
}

impl Tuning {
    pub fn on_hit(&self, distance: &mut f64, paddle: &mut Paddle) {
        *distance = (*distance + self.distance_step).min(self.max_distance);
        if paddle.height > self.min_height {
            paddle.height *= self.shrink_factor;
        }
    }

    pub fn on_miss(&self, distance: &mut f64, paddle: &mut Paddle) {
        *distance = (*distance - self.distance_step).max(self.min_distance);
        if paddle.height < self.max_height {
            paddle.height *= self.grow_factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::paddle::Side;

    #[test]
    fn hit_speeds_up_and_shrinks() {
        let t = Tuning::default();
        let mut d = 1.0;
        let mut p = Paddle::new(Side::Left, 100.0);
        t.on_hit(&mut d, &mut p);
        assert!((d - 1.1).abs() < 1e-9);
        assert!((p.height - 90.0).abs() < 1e-9);
    }

    #[test]
    fn miss_slows_down_and_grows() {
        let t = Tuning::default();
        let mut d = 1.0;
        let mut p = Paddle::new(Side::Left, 50.0);
        t.on_miss(&mut d, &mut p);
        assert!((d - 0.9).abs() < 1e-9);
        assert!((p.height - 55.0).abs() < 1e-9);
    }

    #[test]
    fn distance_stays_in_bounds() {
        let t = Tuning::default();
        let mut d = t.initial_distance;
        let mut p = Paddle::new(Side::Right, 100.0);
        for _ in 0..200 {
            t.on_hit(&mut d, &mut p);
            assert!(d >= t.min_distance && d <= t.max_distance);
        }
        assert_eq!(d, t.max_distance);
        for _ in 0..200 {
            t.on_miss(&mut d, &mut p);
            assert!(d >= t.min_distance && d <= t.max_distance);
        }
        assert_eq!(d, t.min_distance);
    }

    #[test]
    fn height_freezes_at_thresholds() {
        let t = Tuning::default();
        let mut d = 1.0;
        let mut p = Paddle::new(Side::Left, 100.0);
        for _ in 0..100 {
            t.on_hit(&mut d, &mut p);
        }
        // Last shrink happened from just above 15.
        assert!(p.height <= t.min_height);
        assert!(p.height > t.min_height * t.shrink_factor);
        let frozen = p.height;
        t.on_hit(&mut d, &mut p);
        assert_eq!(p.height, frozen);

        for _ in 0..100 {
            t.on_miss(&mut d, &mut p);
        }
        assert!(p.height >= t.max_height);
        assert!(p.height < t.max_height * t.grow_factor);
        let frozen = p.height;
        t.on_miss(&mut d, &mut p);
        assert_eq!(p.height, frozen);
    }

    #[test]
    fn full_height_paddle_does_not_grow() {
        let t = Tuning::default();
        let mut d = 1.0;
        let mut p = Paddle::new(Side::Left, 100.0);
        t.on_miss(&mut d, &mut p);
        assert_eq!(p.height, 100.0);
    }
}
