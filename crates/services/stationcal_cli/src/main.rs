// File: services/stationcal_cli/src/main.rs
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use stationcal_autocomplete::DebouncedQuery;
use stationcal_calendar::{BookingKind, ClassifiedBooking, DragDropController, WeekCalendar};
use stationcal_cli::render::render_week;
use stationcal_cli::StationStore;
use stationcal_common::{
    internal_error, log_error, log_result, logging, not_found, parse_error, Notifications,
    StationcalError,
};
use stationcal_config::{
    ensure_dotenv_loaded, load_config, load_config_from, AppConfig, DEFAULT_PREFIX,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "stationcal")]
#[command(about = "Week calendar, station search and booking moves for pickup/return stations")]
struct Cli {
    /// Directory holding default.toml and the RUN_ENV overrides
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Stations file, shaped like the /stations API response
    #[arg(long, value_name = "FILE", default_value = "stations.json")]
    stations: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show one week of pickups and dropoffs at a station
    Week {
        station_id: String,

        /// Weeks to move away from the anchor, negative for the past
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,

        /// Anchor on the booking date closest to now
        #[arg(long, conflicts_with = "date")]
        nearest: bool,

        /// Anchor on this date (YYYY-MM-DD) instead of today
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
    },
    /// Search stations the way the autocomplete field does
    Search { text: String },
    /// Move the pickup or dropoff of a booking to another date
    Move {
        booking_id: String,

        #[arg(value_enum)]
        kind: KindArg,

        /// RFC 3339 instant, or YYYY-MM-DD for midnight in the calendar time zone
        new_date: String,

        /// Write the updated stations back to the stations file
        #[arg(long)]
        write: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Pickup,
    Dropoff,
}

impl From<KindArg> for BookingKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Pickup => BookingKind::Pickup,
            KindArg::Dropoff => BookingKind::Dropoff,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_app_config(cli.config_dir.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };
    let _log_guard = logging::init_with_config(&config.logging);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error(&e, "stationcal failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_app_config(config_dir: Option<&Path>) -> Result<AppConfig, StationcalError> {
    let config = match config_dir {
        Some(dir) => {
            ensure_dotenv_loaded();
            let prefix = env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string());
            load_config_from(dir, &prefix)?
        }
        None => load_config()?,
    };
    Ok(config)
}

async fn run(cli: Cli, config: AppConfig) -> Result<(), StationcalError> {
    let notifications = Notifications::new();
    let store = Arc::new(StationStore::load(&cli.stations, notifications.clone())?);
    let mut calendar = WeekCalendar::from_config(&config.calendar)?;

    let result = match cli.command {
        Command::Week {
            station_id,
            offset,
            nearest,
            date,
        } => show_week(&store, &mut calendar, &station_id, offset, nearest, date),
        Command::Search { text } => search(Arc::clone(&store), &config, &text).await,
        Command::Move {
            booking_id,
            kind,
            new_date,
            write,
        } => match move_booking(&store, &calendar, &booking_id, kind.into(), &new_date).await {
            Ok(()) if write => log_result(
                store.save(&cli.stations),
                "Stations file updated",
                "Could not write stations file",
            ),
            other => other,
        },
    };

    for notification in notifications.list() {
        eprintln!("! {}", notification.message);
    }
    result
}

fn show_week(
    store: &StationStore,
    calendar: &mut WeekCalendar,
    station_id: &str,
    offset: i32,
    nearest: bool,
    date: Option<NaiveDate>,
) -> Result<(), StationcalError> {
    let station = store
        .station(station_id)
        .ok_or_else(|| not_found(format!("Station {station_id}")))?;

    if let Some(date) = date {
        calendar.go_to(date);
    }
    if nearest {
        calendar.jump_to_nearest_booking_date(&station.bookings);
    }
    for _ in 0..offset.unsigned_abs() {
        if offset > 0 {
            calendar.next_week();
        } else {
            calendar.previous_week();
        }
    }

    let window = calendar.current_week();
    let days = calendar.classifier().for_week(&window, Some(&station));
    print!(
        "{}",
        render_week(
            &station.name,
            &window,
            &days,
            calendar.timezone(),
            calendar.today()
        )
    );
    Ok(())
}

async fn search(
    store: Arc<StationStore>,
    config: &AppConfig,
    text: &str,
) -> Result<(), StationcalError> {
    let query = DebouncedQuery::from_config(store, &config.autocomplete);
    let stations = query.query(text).await?;

    if stations.is_empty() {
        println!("No stations match '{}'", text.trim());
    }
    for station in stations {
        println!(
            "{}\t{}\t{} bookings",
            station.id,
            station.name,
            station.bookings.len()
        );
    }
    Ok(())
}

async fn move_booking(
    store: &Arc<StationStore>,
    calendar: &WeekCalendar,
    booking_id: &str,
    kind: BookingKind,
    new_date: &str,
) -> Result<(), StationcalError> {
    let booking = store
        .find_booking(booking_id)
        .ok_or_else(|| not_found(format!("Booking {booking_id}")))?;
    let new_date = parse_new_date(new_date, calendar)?;

    let mut controller = DragDropController::new(Arc::clone(store));
    controller.on_drag_start(ClassifiedBooking::new(booking, kind));
    let pending = controller
        .on_drop(new_date)
        .ok_or_else(|| internal_error("Drop without a dragged booking"))?;
    let stored = pending
        .await
        .map_err(|e| internal_error(format!("Booking update task failed: {e}")))??;

    info!("Booking {} now runs {} to {}", stored.id, stored.start_date, stored.end_date);
    println!("{}", serde_json::to_string_pretty(&stored)?);
    Ok(())
}

fn parse_new_date(value: &str, calendar: &WeekCalendar) -> Result<DateTime<Utc>, StationcalError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    let date = value.parse::<NaiveDate>().map_err(|e| {
        parse_error(format!(
            "'{value}' is neither an RFC 3339 instant nor a YYYY-MM-DD date: {e}"
        ))
    })?;
    Ok(calendar.start_of_day(date)?)
}
