use anyhow::Result;
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::fmt::{self, Write};
use sunwait_core::target::{ListEntry, Report, VariantSummary};
use sunwait_core::{CivilDate, DayType};

fn hours(t: f64) -> i32 {
    t.trunc() as i32
}

fn minutes(t: f64) -> i32 {
    ((t.abs() * 60.0) % 60.0).trunc() as i32
}

fn seconds(t: f64) -> i32 {
    ((t.abs() * 3600.0) % 60.0).trunc() as i32
}

pub fn hh_mm(t: f64) -> String {
    format!("{:02}:{:02}", hours(t), minutes(t))
}

pub fn hh_mm_ss(t: f64) -> String {
    format!("{:02}:{:02}:{:02}", hours(t), minutes(t), seconds(t))
}

/// One "rises: .., sets: .." line. Rise/set are ignored unless the day is normal.
pub fn situation(title: &str, day_type: DayType, rise: Option<f64>, set: Option<f64>) -> String {
    match (day_type, rise, set) {
        (DayType::Normal, Some(rise), Some(set)) => {
            format!("{} {} GMT, sets: {} GMT", title, hh_mm(rise), hh_mm(set))
        }
        (DayType::PolarNight, _, _) => {
            format!("{} --:-- GMT, sets: --:-- GMT (Never lighter)", title)
        }
        _ => format!("{} --:-- GMT, sets: --:-- GMT (Never darker)", title),
    }
}

fn variant_line(title: &str, variant: &VariantSummary) -> String {
    situation(
        title,
        variant.events.day_type(),
        variant.events.rise(),
        variant.events.set(),
    )
}

const PRESET_TITLES: [&str; 4] = [
    "                    Sun rises:",
    "         Civil twilight rises:",
    "      Nautical twilight rises:",
    "  Astronomical twilight rises:",
];

const TWILIGHT_TITLES: [&str; 3] = [
    "          with civil twilight:",
    "       with nautical twilight:",
    "   with astronomical twilight:",
];

pub fn write_report<W: Write>(out: &mut W, report: &Report, function: &str) -> fmt::Result {
    let now = &report.now;

    writeln!(out)?;
    writeln!(
        out,
        "        Current Date and Time: {}, {} GMT",
        now.date,
        hh_mm_ss(now.hours)
    )?;
    writeln!(out, "                     Function: {}", function)?;
    writeln!(out, "\n\nTarget Information ...\n")?;
    writeln!(
        out,
        "                     Location: {:10.6}N, {:10.6}E",
        report.location.latitude(),
        report.location.longitude()
    )?;
    writeln!(out, "                         Date: {}", report.date)?;
    writeln!(
        out,
        "        Sun transits meridian: {} GMT",
        hh_mm(report.noon)
    )?;
    if !report.offset.is_zero() {
        writeln!(
            out,
            "                       Offset: {} hours",
            hh_mm_ss(report.offset.hours())
        )?;
    }
    writeln!(
        out,
        "               Twilight angle: {}",
        report.target.altitude
    )?;
    writeln!(
        out,
        "{}",
        variant_line("               Twilight rises:", &report.target)
    )?;
    if !report.offset.is_zero() {
        let window = report.offset_window;
        writeln!(
            out,
            "{}",
            situation(
                "     Rises (including offset):",
                report.target.events.day_type(),
                window.map(|w| w.rise),
                window.map(|w| w.set),
            )
        )?;
    }

    writeln!(out, "\nGeneral Information ...\n")?;
    for (title, variant) in PRESET_TITLES.iter().zip(&report.presets) {
        writeln!(out, "{}", variant_line(title, variant))?;
    }

    writeln!(out)?;
    if let Some(daylight) = report.presets.first() {
        writeln!(
            out,
            "                   Day length: {} hours",
            hh_mm(daylight.day_length)
        )?;
    }
    let durations = report.twilight_durations();
    for ((title, variant), twilight) in TWILIGHT_TITLES
        .iter()
        .zip(report.presets.iter().skip(1))
        .zip(durations)
    {
        writeln!(
            out,
            "{} {} hours, twilight: {} hours",
            title,
            hh_mm(variant.day_length),
            hh_mm(twilight)
        )?;
    }
    writeln!(out)
}

pub fn render_report(report: &Report, function: &str) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, report, function)?;
    Ok(out)
}

fn entry_date(start: CivilDate, entry: &ListEntry) -> Option<CivilDate> {
    NaiveDate::from_ymd_opt(start.year, start.month, start.day)
        .and_then(|date| date.checked_add_days(Days::new(u64::from(entry.index))))
        .map(CivilDate::from)
}

pub fn render_list<I: IntoIterator<Item = ListEntry>>(start: CivilDate, entries: I) -> String {
    entries
        .into_iter()
        .map(|entry| {
            let line = situation(
                "rises:",
                entry.day_type,
                entry.window.map(|w| w.rise),
                entry.window.map(|w| w.set),
            );
            match entry_date(start, &entry) {
                Some(date) => format!("{}, {}\n", date, line),
                None => format!("{}\n", line),
            }
        })
        .collect()
}

#[derive(Serialize)]
struct ListRow {
    date: String,
    day_count: i64,
    day_type: DayType,
    noon: f64,
    rise: Option<f64>,
    set: Option<f64>,
}

pub fn render_list_csv<I: IntoIterator<Item = ListEntry>>(
    start: CivilDate,
    entries: I,
) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for entry in entries {
        wtr.serialize(ListRow {
            date: entry_date(start, &entry)
                .map(|date| date.to_string())
                .unwrap_or_default(),
            day_count: entry.day_count,
            day_type: entry.day_type,
            noon: entry.noon,
            rise: entry.window.map(|w| w.rise),
            set: entry.window.map(|w| w.set),
        })?;
    }
    let bytes = wtr.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}
