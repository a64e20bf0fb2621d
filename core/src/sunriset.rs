//! Sunrise, sunset and twilight times.
//!
//! All times are hours GMT on the day identified by the day-count, and may
//! fall outside 0..24 when the event belongs to the neighbouring GMT day.

use serde::Serialize;
use tracing::debug;

use crate::ephemeris::{gmst0, sun_position};
use crate::location::Location;
use crate::math::{acosd, cosd, rev180, revolution, sind};
use crate::twilight::TwilightAltitude;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayType {
    /// The Sun crosses the altitude twice.
    Normal,
    /// Midnight sun: the Sun stays above the altitude all day.
    PolarDay,
    /// The Sun stays below the altitude all day.
    PolarNight,
}

/// How the Sun relates to the requested altitude over the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "day_type")]
pub enum Crossing {
    Normal { rise: f64, set: f64 },
    PolarDay,
    PolarNight,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventTimes {
    /// Solar transit, always defined.
    pub noon: f64,
    #[serde(flatten)]
    pub crossing: Crossing,
}

impl EventTimes {
    pub fn day_type(&self) -> DayType {
        match self.crossing {
            Crossing::Normal { .. } => DayType::Normal,
            Crossing::PolarDay => DayType::PolarDay,
            Crossing::PolarNight => DayType::PolarNight,
        }
    }

    pub fn rise(&self) -> Option<f64> {
        match self.crossing {
            Crossing::Normal { rise, .. } => Some(rise),
            _ => None,
        }
    }

    pub fn set(&self) -> Option<f64> {
        match self.crossing {
            Crossing::Normal { set, .. } => Some(set),
            _ => None,
        }
    }

    /// Hours the Sun spends above the altitude.
    pub fn day_length(&self) -> f64 {
        match self.crossing {
            Crossing::Normal { rise, set } => set - rise,
            Crossing::PolarDay => 24.0,
            Crossing::PolarNight => 0.0,
        }
    }
}

/// Solves for the times the Sun crosses `altitude` at `location` on day-count `d`.
pub fn compute_events(location: &Location, d: f64, altitude: TwilightAltitude) -> EventTimes {
    let sidereal = revolution(gmst0(d) + 180.0 + location.longitude());

    let sun = sun_position(d);

    // 15 degrees per hour
    let tsouth = 12.0 - rev180(sidereal - sun.right_ascension) / 15.0;

    let radius = 0.2666 / sun.distance;
    let altit = if altitude.is_upper_limb() {
        altitude.degrees() - radius
    } else {
        altitude.degrees()
    };

    let latitude = location.latitude();
    let cost = (sind(altit) - sind(latitude) * sind(sun.declination))
        / (cosd(latitude) * cosd(sun.declination));

    // |cost| == 1 exactly falls to the polar branches.
    let crossing = if cost.abs() < 1.0 {
        let t = acosd(cost) / 15.0;
        Crossing::Normal {
            rise: tsouth - t,
            set: tsouth + t,
        }
    } else if cost >= 1.0 {
        Crossing::PolarNight
    } else {
        Crossing::PolarDay
    };

    debug!(
        "Day {} at {:.2} degrees: transit {:.4}h, {:?}",
        d,
        altitude.degrees(),
        tsouth,
        crossing
    );

    EventTimes {
        noon: tsouth,
        crossing,
    }
}
