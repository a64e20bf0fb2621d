//! Degree-based trigonometry and angle reduction.

pub const RADIAN_TO_DEGREE: f64 = 180.0 / std::f64::consts::PI;

#[inline]
pub fn sind(x: f64) -> f64 {
    x.to_radians().sin()
}

#[inline]
pub fn cosd(x: f64) -> f64 {
    x.to_radians().cos()
}

#[inline]
pub fn acosd(x: f64) -> f64 {
    x.acos().to_degrees()
}

#[inline]
pub fn atan2d(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

/// Reduces an angle to [0, 360) degrees.
pub fn revolution(x: f64) -> f64 {
    x - 360.0 * (x / 360.0).floor()
}

/// Reduces an angle to (-180, 180] degrees.
pub fn rev180(x: f64) -> f64 {
    let y = revolution(x);
    if y <= 180.0 {
        y
    } else {
        y - 360.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revolution_range() {
        for x in [-1080.5, -360.0, -0.1, 0.0, 12.5, 359.999, 360.0, 725.25] {
            let r = revolution(x);
            assert!((0.0..360.0).contains(&r), "revolution({x}) = {r}");
        }
        assert_eq!(revolution(-90.0), 270.0);
        assert_eq!(revolution(370.0), 10.0);
    }

    #[test]
    fn test_rev180_range() {
        for x in [-540.0, -180.0, -179.5, 0.0, 180.0, 180.5, 359.0, 900.0] {
            let r = rev180(x);
            assert!(r > -180.0 && r <= 180.0, "rev180({x}) = {r}");
        }
        assert_eq!(rev180(180.0), 180.0);
        assert_eq!(rev180(-180.0), 180.0);
        assert_eq!(rev180(270.0), -90.0);
    }

    #[test]
    fn test_degree_trig() {
        assert!((sind(30.0) - 0.5).abs() < 1e-12);
        assert!((cosd(60.0) - 0.5).abs() < 1e-12);
        assert!((acosd(0.5) - 60.0).abs() < 1e-12);
        assert!((atan2d(1.0, 1.0) - 45.0).abs() < 1e-12);
    }
}
