use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::exit;
use sunwait_core::config::Config;
use sunwait_core::sleeper::{NoopSleeper, Sleeper, ThreadSleeper};
use sunwait_core::{
    CivilDate, Coordinate, Edge, ExitStatus, HourOffset, Location, NowTime, Target,
    TwilightAltitude, WaitMode,
};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod report;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Sleep until sunrise or sunset, or tell whether it is day or night",
    long_about = "All times are GMT. Timings are accurate to about +/- 3 minutes.\n\n\
                  Exit codes: 0 = OK (wait, list), 1 = error, 2 = day, 3 = night (poll).",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Latitude and longitude with compass letters, e.g. 51.477932N 0.000000E
    #[arg(value_name = "COORDINATES", num_args = 1..=2)]
    location: Vec<Coordinate>,

    /// Twilight type defining day and night
    #[arg(short, long, value_enum)]
    twilight: Option<TwilightArg>,

    /// Custom twilight angle in degrees (-ve = below horizon)
    #[arg(short, long, allow_negative_numbers = true, conflicts_with = "twilight")]
    angle: Option<f64>,

    /// Time after sunrise and before sunset: MM, HH:MM or HH:MM:SS, optionally signed
    #[arg(short, long, allow_hyphen_values = true)]
    offset: Option<HourOffset>,

    /// Target year, 2000 to 2099 (two digits accepted)
    #[arg(long)]
    year: Option<i32>,

    /// Target month, 1 to 12
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// Target day of month, 1 to 31
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=31))]
    day: Option<u32>,

    /// Print a detailed report of twilight times
    #[arg(short, long)]
    report: bool,

    /// Print DAY, NIGHT, OK or ERROR on exit
    #[arg(short, long)]
    exit_report: bool,

    /// Debug logging; wait returns after a short interval
    #[arg(short, long)]
    debug: bool,

    /// Compute the wait but do not sleep
    #[arg(long)]
    dry_run: bool,

    /// Output format for report and list
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Return immediately: exit 2 if it is day (or twilight), 3 if night
    Poll,
    /// Sleep until the sun passes the twilight angle and offset
    Wait {
        #[arg(value_enum)]
        edge: EdgeArg,
    },
    /// List rise and set times for the coming days
    List {
        #[arg(default_value_t = 7)]
        days: u32,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum EdgeArg {
    Rise,
    Set,
}

impl From<EdgeArg> for Edge {
    fn from(edge: EdgeArg) -> Self {
        match edge {
            EdgeArg::Rise => Edge::Rise,
            EdgeArg::Set => Edge::Set,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TwilightArg {
    Daylight,
    Civil,
    Nautical,
    Astronomical,
}

impl From<TwilightArg> for TwilightAltitude {
    fn from(twilight: TwilightArg) -> Self {
        match twilight {
            TwilightArg::Daylight => TwilightAltitude::Daylight,
            TwilightArg::Civil => TwilightAltitude::Civil,
            TwilightArg::Nautical => TwilightAltitude::Nautical,
            TwilightArg::Astronomical => TwilightAltitude::Astronomical,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Help and version requests are not failures; every other parse error is.
fn parse_error_status(kind: ErrorKind) -> ExitStatus {
    match kind {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => ExitStatus::Ok,
        _ => ExitStatus::Error,
    }
}

/// `-e` may appear alone or in a cluster of short flags such as `-de`.
fn exit_report_requested<I: IntoIterator<Item = String>>(args: I) -> bool {
    args.into_iter().skip(1).any(|arg| {
        arg == "--exit-report"
            || (arg.len() > 1
                && arg.starts_with('-')
                && arg[1..].chars().all(|c| matches!(c, 'r' | 'e' | 'd'))
                && arg.contains('e'))
    })
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let status = parse_error_status(e.kind());
            if let Err(io) = e.print() {
                eprintln!("Error: {}", io);
            }
            let args = std::env::args_os().map(|arg| arg.to_string_lossy().into_owned());
            if exit_report_requested(args) {
                println!("{}", status.label());
            }
            exit(status.code());
        }
    };

    let status = match run(&cli) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitStatus::Error
        }
    };

    if cli.exit_report {
        println!("{}", status.label());
    }
    exit(status.code());
}

fn run(cli: &Cli) -> Result<ExitStatus> {
    let (config, config_path) = load_config(cli)?;

    let level = if cli.debug {
        Level::DEBUG
    } else {
        config.log_level()?
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    match config_path {
        Some(path) => info!("Config loaded from {:?}", path),
        None => warn!("No config file found, using defaults"),
    }

    let now = NowTime::from(Utc::now());
    let target = build_target(cli, &config, now)?;

    let command = cli.command.as_ref().unwrap_or(&Commands::Poll);
    let function = match command {
        Commands::Poll => "Poll",
        Commands::Wait { .. } => "Wait",
        Commands::List { .. } => "List",
    };

    if cli.report {
        let report = target.report();
        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            _ => print!("{}", report::render_report(&report, function)?),
        }
    }

    let status = match command {
        Commands::Poll => ExitStatus::from(target.poll()),
        Commands::Wait { edge } => {
            let mode = if cli.debug {
                WaitMode::Debug(config.debug_interval())
            } else {
                WaitMode::Real
            };
            let mut sleeper: Box<dyn Sleeper> = if cli.dry_run {
                Box::new(NoopSleeper)
            } else {
                Box::new(ThreadSleeper)
            };
            ExitStatus::from(target.wait(Edge::from(*edge), mode, sleeper.as_mut()))
        }
        Commands::List { days } => {
            let entries = target.list(*days);
            match cli.format {
                OutputFormat::Text => print!("{}", report::render_list(target.date, entries)),
                OutputFormat::Json => {
                    let entries: Vec<_> = entries.collect();
                    println!("{}", serde_json::to_string_pretty(&entries)?)
                }
                OutputFormat::Csv => print!("{}", report::render_list_csv(target.date, entries)?),
            }
            ExitStatus::Ok
        }
    };

    Ok(status)
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sunwait").join("config.toml"))
}

/// An explicit `--config` must exist; the default location is optional.
fn load_config(cli: &Cli) -> Result<(Config, Option<PathBuf>)> {
    if let Some(path) = &cli.config {
        let config = Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {:?}", path))?;
        return Ok((config, Some(path.clone())));
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            let config = Config::load_from_file(&path)
                .with_context(|| format!("Failed to load config {:?}", path))?;
            Ok((config, Some(path)))
        }
        _ => Ok((Config::default(), None)),
    }
}

fn build_target(cli: &Cli, config: &Config, now: NowTime) -> Result<Target> {
    let location = match cli.location.as_slice() {
        [] => config.location(),
        [Coordinate::Latitude(lat), Coordinate::Longitude(lon)]
        | [Coordinate::Longitude(lon), Coordinate::Latitude(lat)] => Location::new(*lat, *lon),
        _ => bail!("Location needs one latitude (N/S) and one longitude (E/W)"),
    };

    let year = match cli.year {
        Some(year) if (0..100).contains(&year) => year + 2000,
        Some(year) => year,
        None => now.date.year,
    };
    if year < 2000 {
        bail!("Year must be 2000 or later: {}", year);
    }
    let date = CivilDate::new(
        year,
        cli.month.unwrap_or(now.date.month),
        cli.day.unwrap_or(now.date.day),
    );

    let altitude = match (cli.angle, cli.twilight) {
        (Some(angle), _) => TwilightAltitude::custom(angle)?,
        (None, Some(twilight)) => twilight.into(),
        (None, None) => config.twilight_altitude()?,
    };

    Ok(Target::new(
        location,
        date,
        altitude,
        cli.offset.unwrap_or_default(),
        now,
    ))
}
