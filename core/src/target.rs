use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calendar::{CivilDate, NowTime};
use crate::location::Location;
use crate::offset::{offset_rise, offset_set, HourOffset};
use crate::sleeper::Sleeper;
use crate::sunriset::{compute_events, DayType, EventTimes};
use crate::twilight::TwilightAltitude;

/// Interval slept instead of the real one when debugging.
pub const DEBUG_WAIT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Edge {
    Rise,
    Set,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PollOutcome {
    Day,
    Night,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WaitOutcome {
    Ok,
    EventAlreadyPassed,
    /// Polar day or night: there is no rise or set to wait for.
    NoCrossing,
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum WaitError {
    #[error("Event already passed {0:.4} hours ago")]
    EventAlreadyPassed(f64),
    #[error("The sun does not cross the twilight angle on this day ({0:?})")]
    NoCrossing(DayType),
}

impl From<WaitError> for WaitOutcome {
    fn from(err: WaitError) -> Self {
        match err {
            WaitError::EventAlreadyPassed(_) => WaitOutcome::EventAlreadyPassed,
            WaitError::NoCrossing(_) => WaitOutcome::NoCrossing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitMode {
    /// Sleep for the computed interval.
    Real,
    /// Sleep for a fixed short interval instead.
    Debug(Duration),
}

/// Process exit status handed to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Ok = 0,
    Error = 1,
    Day = 2,
    Night = 3,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn label(self) -> &'static str {
        match self {
            ExitStatus::Ok => "OK",
            ExitStatus::Error => "ERROR",
            ExitStatus::Day => "DAY",
            ExitStatus::Night => "NIGHT",
        }
    }
}

impl From<PollOutcome> for ExitStatus {
    fn from(outcome: PollOutcome) -> Self {
        match outcome {
            PollOutcome::Day => ExitStatus::Day,
            PollOutcome::Night => ExitStatus::Night,
        }
    }
}

impl From<WaitOutcome> for ExitStatus {
    fn from(outcome: WaitOutcome) -> Self {
        match outcome {
            WaitOutcome::Ok => ExitStatus::Ok,
            WaitOutcome::EventAlreadyPassed | WaitOutcome::NoCrossing => ExitStatus::Error,
        }
    }
}

/// Rise and set after the hour offset and display clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OffsetWindow {
    pub rise: f64,
    pub set: f64,
}

impl OffsetWindow {
    /// `None` unless the Sun actually rises and sets.
    pub fn new(events: &EventTimes, offset: HourOffset) -> Option<Self> {
        match (events.rise(), events.set()) {
            (Some(rise), Some(set)) => Some(Self {
                rise: offset_rise(rise, offset),
                set: offset_set(set, offset),
            }),
            _ => None,
        }
    }

    pub fn edge(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Rise => self.rise,
            Edge::Set => self.set,
        }
    }
}

/// Everything one invocation asks about: where, when, which altitude, and the current time.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub location: Location,
    pub date: CivilDate,
    pub altitude: TwilightAltitude,
    pub offset: HourOffset,
    pub now: NowTime,
}

impl Target {
    pub fn new(
        location: Location,
        date: CivilDate,
        altitude: TwilightAltitude,
        offset: HourOffset,
        now: NowTime,
    ) -> Self {
        info!(
            "Target: Lat {:.6}, Lon {:.6}, Date {}, Twilight {}",
            location.latitude(),
            location.longitude(),
            date,
            altitude
        );
        Self {
            location,
            date,
            altitude,
            offset,
            now,
        }
    }

    pub fn day_count(&self) -> i64 {
        self.date.days_since_2000()
    }

    pub fn events(&self) -> EventTimes {
        self.events_at(self.altitude)
    }

    /// Events for another altitude, leaving the target's own altitude untouched.
    pub fn events_at(&self, altitude: TwilightAltitude) -> EventTimes {
        compute_events(&self.location, self.day_count() as f64, altitude)
    }

    pub fn offset_window(&self) -> Option<OffsetWindow> {
        OffsetWindow::new(&self.events(), self.offset)
    }

    /// Is it day or night now, at the target's altitude and offset?
    pub fn poll(&self) -> PollOutcome {
        let events = self.events();
        let outcome = match events.day_type() {
            DayType::PolarDay => PollOutcome::Day,
            DayType::PolarNight => PollOutcome::Night,
            DayType::Normal => match OffsetWindow::new(&events, self.offset) {
                Some(window) if window.rise <= self.now.hours && self.now.hours < window.set => {
                    PollOutcome::Day
                }
                _ => PollOutcome::Night,
            },
        };
        debug!("Poll at {:.4}h: {:?}", self.now.hours, outcome);
        outcome
    }

    /// Hours from now until `edge` on the target date.
    pub fn wait_hours(&self, edge: Edge) -> Result<f64, WaitError> {
        let events = self.events();
        let window = OffsetWindow::new(&events, self.offset)
            .ok_or(WaitError::NoCrossing(events.day_type()))?;

        let day_delta = self.day_count() - self.now.date.days_since_2000();
        if day_delta < 0 {
            debug!("Target date is {} days before today", -day_delta);
        }

        let interval = window.edge(edge) - self.now.hours + day_delta as f64 * 24.0;
        if interval < 0.0 {
            return Err(WaitError::EventAlreadyPassed(-interval));
        }
        Ok(interval)
    }

    /// Sleeps until `edge` occurs. Never sleeps when the event cannot be waited for.
    pub fn wait<S: Sleeper + ?Sized>(
        &self,
        edge: Edge,
        mode: WaitMode,
        sleeper: &mut S,
    ) -> WaitOutcome {
        let hours = match self.wait_hours(edge) {
            Ok(hours) => hours,
            Err(err) => {
                warn!("Not waiting for {:?}: {}", edge, err);
                return err.into();
            }
        };

        let duration = match mode {
            WaitMode::Real => Duration::from_secs_f64(hours * 3600.0),
            WaitMode::Debug(short) => {
                info!(
                    "Debug mode, wait reduced from {:.4} hours to {}s",
                    hours,
                    short.as_secs()
                );
                short
            }
        };

        info!(
            "Waiting {:.0}s for {:?} ({})",
            duration.as_secs_f64(),
            edge,
            sleeper.name()
        );
        sleeper.sleep(duration);
        WaitOutcome::Ok
    }

    /// Rise/set for `days` consecutive days starting at the target date.
    pub fn list(&self, days: u32) -> DayList {
        DayList {
            location: self.location,
            altitude: self.altitude,
            offset: self.offset,
            day_count: self.day_count(),
            index: 0,
            days,
        }
    }

    /// Target times plus the four preset twilights, each computed independently.
    pub fn report(&self) -> Report {
        let events = self.events();
        let target = VariantSummary::new(self.altitude, events);
        let presets = TwilightAltitude::PRESETS
            .iter()
            .map(|altitude| VariantSummary::new(*altitude, self.events_at(*altitude)))
            .collect();

        Report {
            now: self.now,
            location: self.location,
            date: self.date,
            day_count: self.day_count(),
            offset: self.offset,
            noon: events.noon,
            offset_window: OffsetWindow::new(&events, self.offset),
            target,
            presets,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ListEntry {
    /// Days after the target date.
    pub index: u32,
    pub day_count: i64,
    pub day_type: DayType,
    pub noon: f64,
    pub window: Option<OffsetWindow>,
}

/// Lazily computed, one-shot sequence of daily results.
#[derive(Debug)]
pub struct DayList {
    location: Location,
    altitude: TwilightAltitude,
    offset: HourOffset,
    day_count: i64,
    index: u32,
    days: u32,
}

impl Iterator for DayList {
    type Item = ListEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.days {
            return None;
        }
        let events = compute_events(&self.location, self.day_count as f64, self.altitude);
        let entry = ListEntry {
            index: self.index,
            day_count: self.day_count,
            day_type: events.day_type(),
            noon: events.noon,
            window: OffsetWindow::new(&events, self.offset),
        };
        self.day_count += 1;
        self.index += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.days.saturating_sub(self.index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DayList {}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VariantSummary {
    pub altitude: TwilightAltitude,
    pub events: EventTimes,
    pub day_length: f64,
}

impl VariantSummary {
    fn new(altitude: TwilightAltitude, events: EventTimes) -> Self {
        Self {
            altitude,
            events,
            day_length: events.day_length(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub now: NowTime,
    pub location: Location,
    pub date: CivilDate,
    pub day_count: i64,
    pub offset: HourOffset,
    pub noon: f64,
    pub target: VariantSummary,
    pub offset_window: Option<OffsetWindow>,
    /// Daylight, civil, nautical and astronomical, in that order.
    pub presets: Vec<VariantSummary>,
}

impl Report {
    /// Length of each twilight band (civil, nautical, astronomical) on one side of the day.
    pub fn twilight_durations(&self) -> Vec<f64> {
        self.presets
            .windows(2)
            .map(|pair| (pair[1].day_length - pair[0].day_length) / 2.0)
            .collect()
    }
}
