//! Closed-form geometry and algebra helpers.
//!
//! Everything here is a pure function over `f64`. Only the formulas that can
//! be undefined for some inputs return a `Result`.

use crate::utils::error::{MathApiError, Result};
use std::f64::consts::PI;

pub fn square_area(s: f64) -> f64 {
    s * s
}

pub fn rectangle_area(l: f64, w: f64) -> f64 {
    l * w
}

pub fn triangle_area(b: f64, h: f64) -> f64 {
    b * h / 2.0
}

/// Semi-perimeter and area of a triangle from its three sides.
///
/// Degenerate triangles (one side equal to the sum of the others) have zero
/// area. Negative sides, and sides that violate the triangle inequality,
/// have no real area.
pub fn heron_area(x: f64, y: f64, z: f64) -> Result<(f64, f64)> {
    if [x, y, z].iter().any(|side| *side < 0.0 || !side.is_finite()) {
        return Err(MathApiError::undefined(format!(
            "side lengths must be non-negative, got {}, {}, {}",
            x, y, z
        )));
    }

    let s = (x + y + z) / 2.0;
    let radicand = s * (s - x) * (s - y) * (s - z);

    if radicand >= 0.0 {
        return Ok((s, radicand.sqrt()));
    }

    // Rounding can push a degenerate triangle slightly below zero.
    let tolerance = s.powi(4).abs() * 1e-12;
    if radicand >= -tolerance {
        return Ok((s, 0.0));
    }

    Err(MathApiError::undefined(format!(
        "sides {}, {}, {} do not form a triangle",
        x, y, z
    )))
}

pub fn parallelogram_area(b: f64, h: f64) -> f64 {
    b * h
}

pub fn circle_area(r: f64) -> f64 {
    PI * r * r
}

pub fn trapezoid_area(h: f64, b1: f64, b2: f64) -> f64 {
    (b1 + b2) / 2.0 * h
}

pub fn cube_surface(s: f64) -> f64 {
    6.0 * s * s
}

pub fn sphere_surface(r: f64) -> f64 {
    4.0 * PI * r * r
}

pub fn cylinder_surface(r: f64, h: f64) -> f64 {
    2.0 * PI * r * h + 2.0 * PI * r * r
}

pub fn square_perimeter(s: f64) -> f64 {
    4.0 * s
}

pub fn rectangle_perimeter(l: f64, w: f64) -> f64 {
    2.0 * l + 2.0 * w
}

pub fn triangle_perimeter(s1: f64, s2: f64, s3: f64) -> f64 {
    s1 + s2 + s3
}

pub fn circle_circumference(d: f64) -> f64 {
    PI * d
}

pub fn cube_volume(s: f64) -> f64 {
    s * s * s
}

pub fn prism_volume(l: f64, w: f64, h: f64) -> f64 {
    l * w * h
}

/// Square-based pyramid with base edge `b`.
pub fn pyramid_volume(b: f64, h: f64) -> f64 {
    b * b * h / 3.0
}

pub fn cylinder_volume(r: f64, h: f64) -> f64 {
    PI * r * r * h
}

pub fn sphere_volume(r: f64) -> f64 {
    4.0 * PI * r * r * r / 3.0
}

pub fn cone_volume(r: f64, h: f64) -> f64 {
    PI * r * r * h / 3.0
}

pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
}

/// Slope of the line through two points. Vertical lines have no slope.
pub fn slope(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<f64> {
    let run = x2 - x1;
    if run == 0.0 {
        return Err(MathApiError::undefined(format!(
            "slope of a vertical line (x1 = x2 = {}) is undefined",
            x1
        )));
    }
    Ok((y2 - y1) / run)
}

pub fn hypotenuse(a: f64, b: f64) -> f64 {
    (a * a + b * b).sqrt()
}

/// The other leg of a right triangle with hypotenuse `c` and leg `leg`.
pub fn missing_leg(c: f64, leg: f64) -> Result<f64> {
    let square = c * c - leg * leg;
    if square < 0.0 {
        return Err(MathApiError::undefined(format!(
            "hypotenuse {} is shorter than leg {}",
            c, leg
        )));
    }
    Ok(square.sqrt())
}

pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathApiError::undefined("average of an empty list"));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(expected: f64, actual: f64) {
        assert!(
            (expected - actual).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_areas() {
        assert_eq!(square_area(7.0), 49.0);
        assert_eq!(rectangle_area(2.0, 5.0), 10.0);
        assert_eq!(triangle_area(8.0, 2.0), 8.0);
        assert_eq!(triangle_area(1.0, 1.0), 0.5);
        assert_eq!(parallelogram_area(3.0, 4.0), 12.0);
        assert_eq!(trapezoid_area(2.0, 3.0, 5.0), 8.0);
        assert_close(PI * 9.0, circle_area(3.0));
    }

    #[test]
    fn test_heron_matches_right_triangle() {
        let (s, a) = heron_area(3.0, 4.0, 5.0).unwrap();
        assert_eq!(s, 6.0);
        assert_close(6.0, a);

        let (s, a) = heron_area(100.0, 200.0, 150.0).unwrap();
        let direct = (s * (s - 100.0) * (s - 200.0) * (s - 150.0)).sqrt();
        assert_close(direct, a);
    }

    #[test]
    fn test_heron_degenerate_and_impossible() {
        assert_eq!(heron_area(1.0, 2.0, 3.0).unwrap(), (3.0, 0.0));
        assert_eq!(heron_area(3.0, 6.0, 9.0).unwrap(), (9.0, 0.0));
        assert!(matches!(
            heron_area(1.0, 1.0, 5.0),
            Err(MathApiError::UndefinedResult { .. })
        ));
    }

    #[test]
    fn test_heron_rejects_negative_sides() {
        for (x, y, z) in [(-3.0, 4.0, 5.0), (-3.0, -4.0, -5.0), (3.0, 4.0, -0.5)] {
            assert!(
                matches!(heron_area(x, y, z), Err(MathApiError::UndefinedResult { .. })),
                "sides {}, {}, {}",
                x,
                y,
                z
            );
        }
        assert_eq!(heron_area(0.0, 3.0, 3.0).unwrap(), (3.0, 0.0));
    }

    #[test]
    fn test_surfaces_and_perimeters() {
        assert_eq!(cube_surface(2.0), 24.0);
        assert_close(4.0 * PI * 25.0, sphere_surface(5.0));
        assert_close(2.0 * PI * 2.0 * 3.0 + 2.0 * PI * 4.0, cylinder_surface(2.0, 3.0));
        assert_eq!(square_perimeter(5.0), 20.0);
        assert_eq!(rectangle_perimeter(2.0, 3.0), 10.0);
        assert_eq!(triangle_perimeter(3.0, 4.0, 5.0), 12.0);
        assert_close(PI * 10.0, circle_circumference(10.0));
    }

    #[test]
    fn test_volumes() {
        assert_eq!(cube_volume(3.0), 27.0);
        assert_eq!(prism_volume(2.0, 3.0, 4.0), 24.0);
        assert_eq!(pyramid_volume(3.0, 4.0), 12.0);
        assert_close(PI * 4.0 * 5.0, cylinder_volume(2.0, 5.0));
        assert_close(4.0 * PI * 27.0 / 3.0, sphere_volume(3.0));
        assert_close(PI * 4.0 * 6.0 / 3.0, cone_volume(2.0, 6.0));
    }

    #[test]
    fn test_distance_and_slope() {
        assert_eq!(distance(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(distance(-1.0, -1.0, 2.0, 3.0), 5.0);
        assert_eq!(slope(0.0, 0.0, 2.0, 4.0).unwrap(), 2.0);
        assert_eq!(slope(1.0, 5.0, 3.0, 1.0).unwrap(), -2.0);
        assert!(matches!(
            slope(2.0, 1.0, 2.0, 9.0),
            Err(MathApiError::UndefinedResult { .. })
        ));
    }

    #[test]
    fn test_pythagorean_triples_are_exact() {
        for (a, b, c) in [(3.0, 4.0, 5.0), (5.0, 12.0, 13.0), (9.0, 40.0, 41.0), (13.0, 84.0, 85.0)] {
            assert_eq!(hypotenuse(a, b), c);
            assert_eq!(missing_leg(c, a).unwrap(), b);
            assert_eq!(missing_leg(c, b).unwrap(), a);
        }
        assert!(missing_leg(3.0, 5.0).is_err());
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
        assert!(mean(&[]).is_err());
    }
}
