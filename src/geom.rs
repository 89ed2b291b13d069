//! Point arithmetic shared by the simplification stages.
use nalgebra::{distance_squared, Point};

use crate::Precision;

/// Squared Euclidean distance between two points.
pub fn dist2<const D: usize>(a: &Point<Precision, D>, b: &Point<Precision, D>) -> Precision {
    distance_squared(a, b)
}

/// Whether every coordinate of the point is finite.
pub fn is_finite<const D: usize>(p: &Point<Precision, D>) -> bool {
    p.coords.iter().all(|c| c.is_finite())
}

/// Squared distance from `p` to the segment `start`-`end`.
///
/// The projection of `p` onto the line is clamped to the segment,
/// so points beyond either end measure to that endpoint.
/// A zero-length segment measures to `start`.
pub fn segment_dist2<const D: usize>(
    start: &Point<Precision, D>,
    end: &Point<Precision, D>,
    p: &Point<Precision, D>,
) -> Precision {
    let along = end - start;
    let length_sq = along.norm_squared();
    let lensq_along = (p - start).dot(&along);
    if lensq_along <= 0.0 {
        distance_squared(p, start)
    } else if length_sq <= lensq_along {
        distance_squared(p, end)
    } else {
        let b = lensq_along / length_sq;
        distance_squared(p, &(start + along * b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point2;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn perpendicular_inside_segment() {
        let d2 = segment_dist2(
            &Point2::new(0.0, 0.0),
            &Point2::new(4.0, 0.0),
            &Point2::new(1.0, 3.0),
        );
        assert_relative_eq!(d2, 9.0);
    }

    #[test]
    fn clamps_before_start() {
        let d2 = segment_dist2(
            &Point2::new(0.0, 0.0),
            &Point2::new(4.0, 0.0),
            &Point2::new(-3.0, 4.0),
        );
        assert_relative_eq!(d2, 25.0);
    }

    #[test]
    fn clamps_after_end() {
        let d2 = segment_dist2(
            &Point2::new(0.0, 0.0),
            &Point2::new(4.0, 0.0),
            &Point2::new(5.0, 1.0),
        );
        assert_relative_eq!(d2, 2.0);
    }

    #[test]
    fn zero_length_segment() {
        let a = Point2::new(1.0, 1.0);
        let d2 = segment_dist2(&a, &a, &Point2::new(4.0, 5.0));
        assert_eq!(d2, 25.0);
    }

    #[test]
    fn works_in_3d() {
        let d2 = segment_dist2(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(0.0, 0.0, 10.0),
            &Point3::new(1.0, 2.0, 5.0),
        );
        assert_relative_eq!(d2, 5.0);
    }

    #[test]
    fn finiteness() {
        assert!(is_finite(&Point2::new(1.0, -2.0)));
        assert!(!is_finite(&Point2::new(Precision::NAN, 0.0)));
        assert!(!is_finite(&Point2::new(0.0, Precision::INFINITY)));
    }

    #[test]
    fn squared_distance() {
        assert_eq!(dist2(&Point2::new(0.0, 0.0), &Point2::new(3.0, 4.0)), 25.0);
    }
}
