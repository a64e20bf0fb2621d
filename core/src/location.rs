use serde::Serialize;
use std::str::FromStr;

use crate::error::ParseError;
use crate::math::revolution;

/// The Buttercross, Bingham, England.
pub const DEFAULT_LATITUDE: f64 = 52.952308;
pub const DEFAULT_LONGITUDE: f64 = 359.048052;

/// Observer position in degrees, north and east positive, both reduced to [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: revolution(latitude),
            longitude: revolution(longitude),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE)
    }
}

/// One half of a location as typed on the command line, e.g. `51.477932N` or `0.5W`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coordinate {
    Latitude(f64),
    Longitude(f64),
}

impl FromStr for Coordinate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::Coordinate(s.to_string());

        let compass = s.chars().last().ok_or_else(invalid)?;
        let number = &s[..s.len() - compass.len_utf8()];
        if number.is_empty() || !number.bytes().any(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let value: f64 = number.parse().map_err(|_| invalid())?;

        match compass.to_ascii_uppercase() {
            'N' => Ok(Coordinate::Latitude(revolution(value))),
            'S' => Ok(Coordinate::Latitude(revolution(-value))),
            'E' => Ok(Coordinate::Longitude(revolution(value))),
            'W' => Ok(Coordinate::Longitude(revolution(-value))),
            _ => Err(invalid()),
        }
    }
}
