mod io;
mod provenance;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flightplan::prelude::*;
use flightplan::waypoint::{cut_waypoints, reverse_waypoints};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::io::{read_json, read_waypoints, write_json, write_waypoints_csv, FootprintFile, WaypointFile};
use crate::provenance::Payload;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Survey flight-line planner")]
struct Cmd {
    /// Planner settings JSON (sensor catalog, overlap, turn budget, CRSs)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Log at DEBUG level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Optimal coverage lines over an AOI (independent segments)
    Lines {
        #[arg(long)]
        aoi: PathBuf,
        #[arg(long)]
        sensor: String,
        /// Meters; defaults to the settings' flight altitude
        #[arg(long)]
        altitude: Option<f64>,
        #[arg(long)]
        out: PathBuf,
        /// Also write the waypoints as a CSV table
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// One continuous racetrack over an AOI within the turn budget
    Racetrack {
        #[arg(long)]
        aoi: PathBuf,
        #[arg(long)]
        sensor: String,
        #[arg(long)]
        altitude: Option<f64>,
        /// Strategy name; defaults to the settings' strategy
        #[arg(long)]
        algorithm: Option<String>,
        /// Meters; defaults to the settings' max turn distance
        #[arg(long)]
        max_turn: Option<f64>,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Sensor ground-coverage polygon of a flight line
    Footprint {
        #[arg(long)]
        line: PathBuf,
        #[arg(long)]
        sensor: String,
        #[arg(long)]
        altitude: Option<f64>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Flight distance and duration of a waypoint file (.json or .csv)
    Stats {
        #[arg(long)]
        waypoints: PathBuf,
        /// km/h; defaults to the settings' flight speed
        #[arg(long)]
        speed: Option<f64>,
    },
    /// Reverse the flight order of a waypoint file
    Reverse {
        #[arg(long)]
        waypoints: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Keep the waypoints whose id lies in `first..=last`
    Cut {
        #[arg(long)]
        waypoints: PathBuf,
        #[arg(long)]
        first: u32,
        #[arg(long)]
        last: u32,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    let settings = load_settings(cmd.settings.as_deref())?;
    match cmd.action {
        Action::Lines {
            aoi,
            sensor,
            altitude,
            out,
            csv,
        } => lines(&settings, &aoi, &sensor, altitude, &out, csv.as_deref()),
        Action::Racetrack {
            aoi,
            sensor,
            altitude,
            algorithm,
            max_turn,
            out,
            csv,
        } => racetrack(
            &settings,
            RacetrackArgs {
                aoi: &aoi,
                sensor: &sensor,
                altitude,
                algorithm,
                max_turn,
            },
            &out,
            csv.as_deref(),
        ),
        Action::Footprint {
            line,
            sensor,
            altitude,
            out,
        } => footprint(&settings, &line, &sensor, altitude, &out),
        Action::Stats { waypoints, speed } => stats(&settings, &waypoints, speed),
        Action::Reverse { waypoints, out } => reverse(&settings, &waypoints, &out),
        Action::Cut {
            waypoints,
            first,
            last,
            out,
        } => cut(&settings, &waypoints, first, last, &out),
        Action::Report => report(&settings),
    }
}

fn load_settings(path: Option<&Path>) -> Result<PlannerSettings> {
    let settings = match path {
        Some(p) => read_json::<PlannerSettings>(p)?,
        None => PlannerSettings::default(),
    };
    settings.validate().context("invalid settings")?;
    Ok(settings)
}

/// CRS assumed for CSV waypoint tables.
fn csv_crs(settings: &PlannerSettings) -> Crs {
    settings
        .coverage_crs
        .clone()
        .unwrap_or_else(|| Crs::metric("LOCAL"))
}

fn write_waypoints(
    out: &Path,
    csv: Option<&Path>,
    file: &WaypointFile,
    payload: Payload,
) -> Result<()> {
    write_json(out, file)?;
    let mut extra = Vec::new();
    if let Some(csv) = csv {
        write_waypoints_csv(csv, &file.waypoints)?;
        extra.push(csv);
    }
    let prov = provenance::write_sidecar(out, &extra, payload)?;
    tracing::info!(
        waypoints = file.waypoints.len(),
        out = %out.display(),
        provenance = %prov.display(),
        "wrote waypoints"
    );
    Ok(())
}

fn lines(
    settings: &PlannerSettings,
    aoi_path: &Path,
    sensor: &str,
    altitude: Option<f64>,
    out: &Path,
    csv: Option<&Path>,
) -> Result<()> {
    let aoi: Aoi = read_json(aoi_path)?;
    let sensor = settings.sensor(sensor)?;
    let altitude = altitude.unwrap_or(settings.flight_altitude_m);
    let planner = Planner::from_settings(settings)?;
    let waypoints = planner.generate_coverage_lines(&aoi, &sensor, altitude, settings.overlap)?;
    let payload = Payload::new(json!({
        "mode": "lines",
        "sensor": sensor,
        "altitude_m": altitude,
        "overlap": settings.overlap,
        "prefer_rotated": settings.prefer_rotated,
        "coverage_crs": settings.coverage_crs,
    }))
    .with_input(aoi_path);
    let file = WaypointFile {
        crs: aoi.crs,
        waypoints,
    };
    write_waypoints(out, csv, &file, payload)
}

struct RacetrackArgs<'a> {
    aoi: &'a Path,
    sensor: &'a str,
    altitude: Option<f64>,
    algorithm: Option<String>,
    max_turn: Option<f64>,
}

fn racetrack(
    settings: &PlannerSettings,
    args: RacetrackArgs<'_>,
    out: &Path,
    csv: Option<&Path>,
) -> Result<()> {
    let aoi: Aoi = read_json(args.aoi)?;
    let sensor = settings.sensor(args.sensor)?;
    let altitude = args.altitude.unwrap_or(settings.flight_altitude_m);
    let max_turn = match args.max_turn {
        Some(d) => d,
        None => settings.max_turn_distance()?,
    };
    let algorithm = args
        .algorithm
        .unwrap_or_else(|| settings.strategy.name().to_string());
    let planner = Planner::from_settings(settings)?;
    let waypoints = planner.generate_racetrack(
        &aoi,
        &sensor,
        altitude,
        settings.overlap,
        max_turn,
        &algorithm,
    )?;
    let stats = planner.flight_stats(&waypoints, &aoi.crs)?;
    tracing::info!(
        distance_km = stats.distance_km,
        hours = stats.duration_hours(settings.flight_speed_kmh)?,
        "racetrack"
    );
    let payload = Payload::new(json!({
        "mode": "racetrack",
        "algorithm": algorithm,
        "sensor": sensor,
        "altitude_m": altitude,
        "overlap": settings.overlap,
        "max_turn_distance_m": max_turn,
        "prefer_rotated": settings.prefer_rotated,
        "coverage_crs": settings.coverage_crs,
        "distance_km": stats.distance_km,
    }))
    .with_input(args.aoi);
    let file = WaypointFile {
        crs: aoi.crs,
        waypoints,
    };
    write_waypoints(out, csv, &file, payload)
}

fn footprint(
    settings: &PlannerSettings,
    line_path: &Path,
    sensor: &str,
    altitude: Option<f64>,
    out: &Path,
) -> Result<()> {
    let path: FlightPath = read_json(line_path)?;
    let sensor = settings.sensor(sensor)?;
    let altitude = altitude.unwrap_or(settings.flight_altitude_m);
    let planner = Planner::from_settings(settings)?;
    let footprint = planner.build_footprint(&path, &sensor, altitude)?;
    let file = FootprintFile {
        crs: path.crs,
        area: footprint.area(),
        footprint,
    };
    write_json(out, &file)?;
    let payload = Payload::new(json!({
        "mode": "footprint",
        "sensor": sensor,
        "altitude_m": altitude,
        "coverage_crs": settings.coverage_crs,
    }))
    .with_input(line_path);
    provenance::write_sidecar(out, &[], payload)?;
    tracing::info!(parts = file.footprint.parts.len(), area = file.area, "wrote footprint");
    Ok(())
}

fn stats(settings: &PlannerSettings, path: &Path, speed: Option<f64>) -> Result<()> {
    let file = read_waypoints(path, &csv_crs(settings))?;
    let planner = Planner::from_settings(settings)?;
    let stats = planner.flight_stats(&file.waypoints, &file.crs)?;
    let speed = speed.unwrap_or(settings.flight_speed_kmh);
    let hours = stats.duration_hours(speed)?;
    let obj = json!({
        "waypoints": stats.waypoint_count,
        "distance_km": stats.distance_km,
        "speed_kmh": speed,
        "duration_h": hours,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn reverse(settings: &PlannerSettings, path: &Path, out: &Path) -> Result<()> {
    let file = read_waypoints(path, &csv_crs(settings))?;
    let reversed = WaypointFile {
        crs: file.crs,
        waypoints: reverse_waypoints(&file.waypoints),
    };
    write_waypoint_file(out, &reversed)?;
    let payload = Payload::new(json!({ "mode": "reverse" })).with_input(path);
    provenance::write_sidecar(out, &[], payload)?;
    tracing::info!(waypoints = reversed.waypoints.len(), "reversed");
    Ok(())
}

fn cut(settings: &PlannerSettings, path: &Path, first: u32, last: u32, out: &Path) -> Result<()> {
    let file = read_waypoints(path, &csv_crs(settings))?;
    let cut = WaypointFile {
        crs: file.crs,
        waypoints: cut_waypoints(&file.waypoints, first, last)?,
    };
    write_waypoint_file(out, &cut)?;
    let payload = Payload::new(json!({ "mode": "cut", "first": first, "last": last })).with_input(path);
    provenance::write_sidecar(out, &[], payload)?;
    tracing::info!(waypoints = cut.waypoints.len(), first, last, "cut");
    Ok(())
}

/// CSV when `out` ends in `.csv`, JSON otherwise.
fn write_waypoint_file(out: &Path, file: &WaypointFile) -> Result<()> {
    if out.extension().is_some_and(|e| e == "csv") {
        write_waypoints_csv(out, &file.waypoints)
    } else {
        write_json(out, file)
    }
}

fn report(settings: &PlannerSettings) -> Result<()> {
    let obj = provenance::document(
        &Payload::new(serde_json::to_value(settings)?),
        &[],
    );
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
