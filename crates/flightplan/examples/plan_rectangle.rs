//! Plan both modes over a rotated rectangle and print the waypoints.
//!
//! Usage:
//!   cargo run -p flightplan --example plan_rectangle -- [strategy]
//!
//! `strategy` is a racetrack strategy name (default "Back and Forth").

use flightplan::prelude::*;

fn main() {
    let strategy = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Back and Forth".to_string());
    let th: f64 = 0.3;
    let (c, s) = (th.cos(), th.sin());
    let ring = [(0.0, 0.0), (4000.0, 0.0), (4000.0, 1500.0), (0.0, 1500.0)]
        .iter()
        .map(|&(x, y)| Point2::new(c * x - s * y, s * x + c * y))
        .collect();
    let aoi = Aoi::new(Crs::metric("LOCAL"), ring);
    let sensor = match Sensor::new("camera", 60.0) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    let planner = Planner::new(PlanarService::new());

    match planner.generate_coverage_lines(&aoi, &sensor, 300.0, 0.2) {
        Ok(wps) => {
            println!("coverage lines: {} waypoints", wps.len());
            for w in wps.iter().take(6) {
                println!("  #{:>3} ({:>9.1}, {:>9.1}) {}", w.sequence_id, w.point.x, w.point.y, w.tag);
            }
        }
        Err(e) => eprintln!("coverage lines failed: {e}"),
    }

    match planner.generate_racetrack(&aoi, &sensor, 300.0, 0.2, 1200.0, &strategy) {
        Ok(wps) => {
            let stats = FlightStats::measure(
                &wps.iter().map(|w| w.point).collect::<Vec<_>>(),
                LinearUnit::Meters,
            );
            println!(
                "{strategy}: {} waypoints, {:.2} km, {:.2} h at 200 km/h",
                wps.len(),
                stats.distance_km,
                stats.duration_hours(200.0).unwrap_or(f64::NAN)
            );
        }
        Err(e) => eprintln!("racetrack failed: {e}"),
    }
}
