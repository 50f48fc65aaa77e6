//! Coverage-constrained flight-line planning for aerial surveys.
//!
//! Given an area of interest (AOI), a sensor opening angle, a flight altitude,
//! an overlap factor and a turn-distance budget, the crate places parallel
//! coverage lines over the AOI and orders them into a flyable waypoint list.
//!
//! Layout
//! - `geom`: point/vector primitives and 2D affine maps.
//! - `swath`: sensor half-width and linear unit conversion.
//! - `aoi`: AOI polygons, validation, seeded random AOIs.
//! - `frame`: oriented bounding box corners and the sweep frame.
//! - `lines`: overlap-controlled line placement (simple mode).
//! - `racetrack`: turn-budget-aware line ordering (ordered mode).
//! - `footprint`: sensor ground-coverage polygon of a flight line.
//! - `service`: geometry/CRS port plus the planar `geo`-backed adapter.
//! - `plan`: the two planning entry points.
//! - `waypoint`, `metrics`, `settings`: outputs, distance/duration, configuration.
//!
//! Every operation is a pure function of its inputs; nothing is cached
//! between calls.

pub mod aoi;
mod cfg;
pub mod error;
pub mod footprint;
pub mod frame;
pub mod geom;
pub mod lines;
pub mod metrics;
pub mod plan;
pub mod racetrack;
pub mod service;
pub mod settings;
pub mod swath;
pub mod waypoint;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::PlanError;
pub use geom::{Point2, Vec2};

/// Common exports for callers.
pub mod prelude {
    pub use crate::aoi::{Aoi, FlightPath};
    pub use crate::error::PlanError;
    pub use crate::footprint::{build_footprint, Footprint, FootprintPolygon};
    pub use crate::frame::{extract_frame, OrientedRect, SweepFrame};
    pub use crate::geom::{Affine2, Point2, Vec2};
    pub use crate::lines::{place_lines, FlightLine, LineOffset};
    pub use crate::metrics::FlightStats;
    pub use crate::plan::{Planner, Sensor};
    pub use crate::racetrack::{line_order, sequence_waypoints, Strategy};
    pub use crate::service::{Crs, GeometryService, PlanarService};
    pub use crate::settings::PlannerSettings;
    pub use crate::swath::{half_width, LinearUnit};
    pub use crate::waypoint::{Tag, Waypoint};
}
