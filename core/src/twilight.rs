use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Sunrise/sunset: the upper limb is 50 arc minutes below the horizon, refraction included.
pub const DAYLIGHT_DEGREES: f64 = -50.0 / 60.0;
pub const CIVIL_DEGREES: f64 = -6.0;
pub const NAUTICAL_DEGREES: f64 = -12.0;
pub const ASTRONOMICAL_DEGREES: f64 = -18.0;

/// Altitude of the Sun that separates "day" from "night".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "degrees")]
pub enum TwilightAltitude {
    #[default]
    Daylight,
    Civil,
    Nautical,
    Astronomical,
    Custom(f64),
}

impl TwilightAltitude {
    pub const PRESETS: [TwilightAltitude; 4] = [
        TwilightAltitude::Daylight,
        TwilightAltitude::Civil,
        TwilightAltitude::Nautical,
        TwilightAltitude::Astronomical,
    ];

    /// A user-specified angle, which must lie strictly between -90 and +90 degrees.
    pub fn custom(degrees: f64) -> Result<Self, ParseError> {
        if !(degrees > -90.0 && degrees < 90.0) {
            return Err(ParseError::TwilightAngle(degrees));
        }
        if degrees == DAYLIGHT_DEGREES {
            return Ok(TwilightAltitude::Daylight);
        }
        Ok(TwilightAltitude::Custom(degrees))
    }

    pub fn degrees(&self) -> f64 {
        match self {
            TwilightAltitude::Daylight => DAYLIGHT_DEGREES,
            TwilightAltitude::Civil => CIVIL_DEGREES,
            TwilightAltitude::Nautical => NAUTICAL_DEGREES,
            TwilightAltitude::Astronomical => ASTRONOMICAL_DEGREES,
            TwilightAltitude::Custom(degrees) => *degrees,
        }
    }

    /// Whether rise/set is defined by the Sun's upper limb rather than its centre.
    pub fn is_upper_limb(&self) -> bool {
        matches!(self, TwilightAltitude::Daylight)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TwilightAltitude::Daylight => "daylight",
            TwilightAltitude::Civil => "civil",
            TwilightAltitude::Nautical => "nautical",
            TwilightAltitude::Astronomical => "astronomical",
            TwilightAltitude::Custom(_) => "custom angle",
        }
    }
}

impl fmt::Display for TwilightAltitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:5.2} degrees ({})", self.degrees(), self.name())
    }
}

impl FromStr for TwilightAltitude {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daylight" | "day" | "sun" | "light" => Ok(TwilightAltitude::Daylight),
            "civil" | "civ" => Ok(TwilightAltitude::Civil),
            "nautical" | "naut" | "nau" => Ok(TwilightAltitude::Nautical),
            "astronomical" | "astro" | "astr" | "ast" => Ok(TwilightAltitude::Astronomical),
            other => match other.parse::<f64>() {
                Ok(degrees) => TwilightAltitude::custom(degrees),
                Err(_) => Err(ParseError::Twilight(s.to_string())),
            },
        }
    }
}
