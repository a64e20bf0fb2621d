use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Days elapsed before the first of each month in a common year.
static DAYS_BEFORE_MONTH: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

static MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Day-count of a civil date relative to 2000, the way the sun calculator expects it.
///
/// The leap-day term always counts 2000 itself, and the target day is not
/// included (`- 1`), so 2000-01-01 yields `1`. No calendar validation is done:
/// day 31 of a 30-day month simply rolls into the next month's count.
pub fn days_since_2000(year: i32, month: u32, day: u32) -> i64 {
    let years = i64::from(year) - 2000;
    let leap_days = years.div_euclid(4) - years.div_euclid(100) + years.div_euclid(400) + 1;

    let month_days = match month.checked_sub(1).and_then(|m| DAYS_BEFORE_MONTH.get(m as usize)) {
        Some(days) => *days,
        None => {
            warn!("Month {} is out of range, counting no month days", month);
            0
        }
    };

    years * 365 + leap_days + month_days + i64::from(day) - 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivilDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CivilDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn days_since_2000(&self) -> i64 {
        days_since_2000(self.year, self.month, self.day)
    }

    pub fn month_name(&self) -> &'static str {
        self.month
            .checked_sub(1)
            .and_then(|m| MONTH_NAMES.get(m as usize))
            .copied()
            .unwrap_or("???")
    }
}

impl From<NaiveDate> for CivilDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{}-{:04}", self.day, self.month_name(), self.year)
    }
}

/// The current GMT date plus the time of day in hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NowTime {
    pub date: CivilDate,
    pub hours: f64,
}

impl NowTime {
    pub fn new(date: CivilDate, hours: f64) -> Self {
        Self { date, hours }
    }
}

impl From<DateTime<Utc>> for NowTime {
    fn from(now: DateTime<Utc>) -> Self {
        let hours = f64::from(now.hour())
            + f64::from(now.minute()) / 60.0
            + f64::from(now.second()) / 3600.0;
        Self::new(now.date_naive().into(), hours)
    }
}
