pub mod math;
pub mod calendar;
pub mod ephemeris;
pub mod location;
pub mod twilight;
pub mod sunriset;
pub mod offset;
pub mod sleeper;
pub mod target;
pub mod config;
pub mod error;

pub use calendar::{days_since_2000, CivilDate, NowTime};
pub use location::{Coordinate, Location};
pub use offset::HourOffset;
pub use sunriset::{compute_events, Crossing, DayType, EventTimes};
pub use target::{Edge, ExitStatus, PollOutcome, Target, WaitMode, WaitOutcome};
pub use twilight::TwilightAltitude;

#[cfg(test)]
mod target_tests;
