use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Latest displayable morning time, just short of noon.
pub const RISE_CEILING: f64 = 11.999;
/// Latest displayable evening time, just short of midnight.
pub const SET_CEILING: f64 = 23.999;

/// Hours added after rise and taken off before set. Positive values narrow the day.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct HourOffset(pub f64);

impl HourOffset {
    pub fn hours(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl FromStr for HourOffset {
    type Err = ParseError;

    /// Accepts `MM`, `HH:MM` or `HH:MM:SS`, optionally signed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::Offset(s.to_string());

        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let fields = body
            .split(':')
            .map(|field| {
                if field.is_empty() {
                    Ok(0)
                } else if field.bytes().all(|b| b.is_ascii_digit()) {
                    field.parse::<u32>().map_err(|_| invalid())
                } else {
                    Err(invalid())
                }
            })
            .collect::<Result<Vec<u32>, ParseError>>()?;

        if body.is_empty() {
            return Err(invalid());
        }

        let hours = match fields.as_slice() {
            [minutes] => f64::from(*minutes) / 60.0,
            [hours, minutes] => f64::from(*hours) + f64::from(*minutes) / 60.0,
            [hours, minutes, seconds] => {
                f64::from(*hours) + f64::from(*minutes) / 60.0 + f64::from(*seconds) / 3600.0
            }
            _ => return Err(invalid()),
        };

        Ok(HourOffset(if negative { -hours } else { hours }))
    }
}

impl fmt::Display for HourOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = (self.0.abs() * 3600.0).round() as u64;
        let sign = if self.0 < 0.0 { "-" } else { "" };
        write!(
            f,
            "{}{:02}:{:02}:{:02}",
            sign,
            total / 3600,
            (total / 60) % 60,
            total % 60
        )
    }
}

/// Rise time moved later by the offset, clamped into the morning half of the day.
pub fn offset_rise(rise: f64, offset: HourOffset) -> f64 {
    let time = rise + offset.hours();
    if time < 0.0 {
        0.0
    } else if time >= 12.0 {
        RISE_CEILING
    } else {
        time
    }
}

/// Set time moved earlier by the offset, clamped into the evening half of the day.
///
/// A result before noon becomes `0.0`, not `12.0`.
pub fn offset_set(set: f64, offset: HourOffset) -> f64 {
    let time = set - offset.hours();
    if time < 12.0 {
        0.0
    } else if time >= 24.0 {
        SET_CEILING
    } else {
        time
    }
}
