//! Low-precision solar ephemeris (about one arc-minute).
//!
//! `d` is the day-count produced by [`crate::calendar::days_since_2000`].

use serde::Serialize;

use crate::math::{atan2d, cosd, revolution, sind, RADIAN_TO_DEGREE};

/// Equatorial position of the Sun for one day-count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EphemerisSample {
    /// Right ascension, degrees.
    pub right_ascension: f64,
    /// Declination, degrees.
    pub declination: f64,
    /// Earth-Sun distance, astronomical units.
    pub distance: f64,
}

/// Greenwich mean sidereal time at 0h UT, generalized to any instant, in degrees.
///
/// This equals the Sun's mean longitude (`M + w`) plus 180 degrees.
pub fn gmst0(d: f64) -> f64 {
    revolution((180.0 + 356.0470 + 282.9404) + (0.9856002585 + 4.70935e-5) * d)
}

/// Ecliptic longitude (degrees) and distance (AU) of the Sun.
fn ecliptic_position(d: f64) -> (f64, f64) {
    let mean_anomaly = revolution(356.0470 + 0.9856002585 * d);
    let perihelion = 282.9404 + 4.70935e-5 * d;
    let e = 0.016709 - 1.151e-9 * d;

    // Single fixed-point step for the eccentric anomaly.
    let eccentric_anomaly = mean_anomaly
        + e * RADIAN_TO_DEGREE * sind(mean_anomaly) * (1.0 + e * cosd(mean_anomaly));

    let x = cosd(eccentric_anomaly) - e;
    let y = (1.0 - e * e).sqrt() * sind(eccentric_anomaly);
    let distance = (x * x + y * y).sqrt();
    let true_anomaly = atan2d(y, x);

    let mut longitude = true_anomaly + perihelion;
    if longitude >= 360.0 {
        longitude -= 360.0;
    }
    (longitude, distance)
}

pub fn sun_position(d: f64) -> EphemerisSample {
    let (longitude, distance) = ecliptic_position(d);

    // Ecliptic rectangular coordinates; the Sun has no ecliptic latitude.
    let xs = distance * cosd(longitude);
    let ys = distance * sind(longitude);

    let obliquity = 23.4393 - 3.563e-7 * d;

    let xe = xs;
    let ye = ys * cosd(obliquity);
    let ze = ys * sind(obliquity);

    EphemerisSample {
        right_ascension: atan2d(ye, xe),
        declination: atan2d(ze, (xe * xe + ye * ye).sqrt()),
        distance,
    }
}
