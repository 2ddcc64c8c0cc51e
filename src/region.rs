// src/region.rs
//
// Court-region classification. Two diagonal boundary lines (derived once per
// run, see calibration.rs) partition the frame into four regions:
//
//          ┌─────────────┐
//          │ \    2    / │
//          │   \     /   │
//          │ 1   \ /   3 │
//          │     / \     │
//          │   /     \   │
//          │ /    4    \ │
//          └─────────────┘
//
// Image coordinates: origin top-left, y increases downward, so "below a line"
// means y greater than the line's y at that x.

use crate::types::Region;

/// One boundary line as `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryLine {
    pub slope: f64,
    pub intercept: f64,
}

impl BoundaryLine {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Construct from two points. Caller guarantees `x0 != x1`.
    pub fn through(p0: (f64, f64), p1: (f64, f64)) -> Self {
        let slope = (p1.1 - p0.1) / (p1.0 - p0.0);
        let intercept = p0.1 - p0.0 * slope;
        Self { slope, intercept }
    }

    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// The two boundary lines of a run, immutable after calibration.
///
/// Holding a value of this type is the proof of calibration: there is no
/// uncalibrated state to classify against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionBoundaries {
    /// Negative-sloped diagonal (top-left to bottom-right)
    pub negative: BoundaryLine,
    /// Positive-sloped diagonal (bottom-left to top-right)
    pub positive: BoundaryLine,
}

impl RegionBoundaries {
    /// Classify a point into one of the four regions.
    ///
    /// The four branches are evaluated in order and are jointly exhaustive for
    /// finite inputs; points exactly on a line take the `<=` branch.
    /// `Undetermined` can only be reached with non-finite coordinates and
    /// signals a calibration bug, not a legitimate outcome.
    pub fn classify(&self, x: f64, y: f64) -> Region {
        let y_neg = self.negative.y_at(x);
        let y_pos = self.positive.y_at(x);

        if y <= y_pos && y > y_neg {
            Region::One
        } else if y <= y_pos && y <= y_neg {
            Region::Two
        } else if y > y_pos && y <= y_neg {
            Region::Three
        } else if y > y_pos && y > y_neg {
            Region::Four
        } else {
            Region::Undetermined
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn boundaries() -> RegionBoundaries {
        // A: y = x, B: y = -x + 100, crossing at (50, 50)
        RegionBoundaries {
            negative: BoundaryLine::new(1.0, 0.0),
            positive: BoundaryLine::new(-1.0, 100.0),
        }
    }

    #[test]
    fn test_decision_table_examples() {
        let b = boundaries();
        assert_eq!(b.classify(10.0, 5.0), Region::Two);
        assert_eq!(b.classify(60.0, 70.0), Region::Four);
        assert_eq!(b.classify(50.0, 55.0), Region::Four);
        assert_eq!(b.classify(10.0, 60.0), Region::One);
    }

    #[test]
    fn test_one_point_per_region() {
        let b = boundaries();
        assert_eq!(b.classify(10.0, 50.0), Region::One); // left
        assert_eq!(b.classify(50.0, 10.0), Region::Two); // top
        assert_eq!(b.classify(90.0, 50.0), Region::Three); // right
        assert_eq!(b.classify(50.0, 90.0), Region::Four); // bottom
    }

    #[test]
    fn test_points_on_lines_take_le_branch() {
        let b = boundaries();
        // On the negative line, above the positive one: region 1 wins over 2
        // only when strictly below the negative line, so this is region 2.
        assert_eq!(b.classify(20.0, 20.0), Region::Two);
        // On the negative line below the crossing (y == y_neg, y > y_pos)
        assert_eq!(b.classify(80.0, 80.0), Region::Three);
        // On the positive line above the crossing (y == y_pos, y <= y_neg)
        assert_eq!(b.classify(30.0, 70.0), Region::One);
        // Exactly at the crossing point
        assert_eq!(b.classify(50.0, 50.0), Region::Two);
    }

    #[test]
    fn test_classify_never_undetermined_for_finite_inputs() {
        let mut rng = SmallRng::seed_from_u64(0x7e2215);

        for _ in 0..10_000 {
            let slope_neg: f64 = rng.gen_range(0.05..4.0);
            let slope_pos: f64 = rng.gen_range(-4.0..-0.05);
            let b = RegionBoundaries {
                negative: BoundaryLine::new(slope_neg, rng.gen_range(-500.0..500.0)),
                positive: BoundaryLine::new(slope_pos, rng.gen_range(-500.0..500.0)),
            };

            let x: f64 = rng.gen_range(-2000.0..2000.0);
            let y: f64 = rng.gen_range(-2000.0..2000.0);
            let region = b.classify(x, y);
            assert!(
                region.is_determined(),
                "undetermined for finite point ({x}, {y})"
            );
        }
    }

    #[test]
    fn test_undetermined_only_on_nan() {
        let b = boundaries();
        assert_eq!(b.classify(f64::NAN, 10.0), Region::Undetermined);
        assert_eq!(b.classify(10.0, f64::NAN), Region::Undetermined);
    }

    #[test]
    fn test_line_through_two_points() {
        let line = BoundaryLine::through((0.0, 0.0), (10.0, 20.0));
        assert_eq!(line.slope, 2.0);
        assert_eq!(line.intercept, 0.0);
        assert_eq!(line.y_at(5.0), 10.0);

        let line = BoundaryLine::through((2.0, 8.0), (6.0, 0.0));
        assert_eq!(line.slope, -2.0);
        assert_eq!(line.intercept, 12.0);
    }
}
