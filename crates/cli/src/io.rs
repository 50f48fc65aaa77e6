//! File formats of the CLI: JSON documents and CSV waypoint tables.
//!
//! Waypoint CSV columns: `id, x, y, tag`.

use anyhow::{anyhow, bail, Context, Result};
use flightplan::prelude::{Crs, Footprint, Point2, Tag, Waypoint};
use polars::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Ordered waypoints together with the CRS of their coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaypointFile {
    pub crs: Crs,
    pub waypoints: Vec<Waypoint>,
}

/// Footprint polygon(s) with their CRS.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FootprintFile {
    pub crs: Crs,
    pub area: f64,
    pub footprint: Footprint,
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating dir {}", parent.display()))?;
        }
    }
    Ok(())
}

pub fn waypoint_frame(waypoints: &[Waypoint]) -> PolarsResult<DataFrame> {
    let ids: Vec<i64> = waypoints.iter().map(|w| i64::from(w.sequence_id)).collect();
    let xs: Vec<f64> = waypoints.iter().map(|w| w.point.x).collect();
    let ys: Vec<f64> = waypoints.iter().map(|w| w.point.y).collect();
    let tags: Vec<String> = waypoints.iter().map(|w| w.tag.to_string()).collect();
    df!("id" => ids, "x" => xs, "y" => ys, "tag" => tags)
}

pub fn write_waypoints_csv(path: &Path, waypoints: &[Waypoint]) -> Result<()> {
    ensure_parent(path)?;
    let mut df = waypoint_frame(waypoints)?;
    let mut file =
        fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(rows = df.height(), path = %path.display(), "wrote waypoint csv");
    Ok(())
}

fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let s = df.column(name)?.cast(&DataType::Float64)?;
    s.f64()?
        .into_iter()
        .map(|v| v.ok_or_else(|| anyhow!("null in column '{name}'")))
        .collect()
}

/// Read a waypoint table; rows are taken in `id` order.
pub fn read_waypoints_csv(path: &Path) -> Result<Vec<Waypoint>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()?
        .sort(["id"], SortMultipleOptions::default())
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::debug!(rows = df.height(), cols = df.width(), "waypoint csv shape");
    let ids = f64_column(&df, "id")?;
    let xs = f64_column(&df, "x")?;
    let ys = f64_column(&df, "y")?;
    let tags = df.column("tag")?.str()?;
    let mut out = Vec::with_capacity(df.height());
    for (k, tag) in tags.into_iter().enumerate() {
        let id = ids[k];
        if !(id >= 1.0 && id.fract() == 0.0 && id <= f64::from(u32::MAX)) {
            bail!("invalid waypoint id {id} in row {k}");
        }
        let tag = match tag {
            Some(t) => Tag::parse(t)?,
            None => Tag::default(),
        };
        out.push(Waypoint::new(Point2::new(xs[k], ys[k]), id as u32, tag));
    }
    Ok(out)
}

/// Waypoints from `.json` (a `WaypointFile`) or `.csv` (in `crs`).
pub fn read_waypoints(path: &Path, csv_crs: &Crs) -> Result<WaypointFile> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => Ok(WaypointFile {
            crs: csv_crs.clone(),
            waypoints: read_waypoints_csv(path)?,
        }),
        _ => read_json(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Vec<Waypoint> {
        vec![
            Waypoint::new(Point2::new(0.0, 0.0), 1, Tag::FlyOver),
            Waypoint::new(Point2::new(100.0, 0.5), 2, Tag::RightHand180),
            Waypoint::new(Point2::new(100.0, 400.0), 3, Tag::parse("cam on").unwrap()),
        ]
    }

    #[test]
    fn csv_table_has_one_row_per_waypoint() {
        let df = waypoint_frame(&sample()).unwrap();
        assert_eq!(df.shape(), (3, 4));
    }

    #[test]
    fn csv_written_then_read_keeps_order_and_tags() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out/wps.csv");
        write_waypoints_csv(&path, &sample()).unwrap();
        let back = read_waypoints_csv(&path).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn json_waypoint_file_is_read_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wps.json");
        let file = WaypointFile {
            crs: Crs::metric("LOCAL"),
            waypoints: sample(),
        };
        write_json(&path, &file).unwrap();
        let back = read_waypoints(&path, &Crs::metric("IGNORED")).unwrap();
        assert_eq!(back, file);
    }
}
