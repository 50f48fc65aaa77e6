//! Geometry/CRS port and the planar adapter.
//!
//! The planner never talks to a GIS toolkit directly. It depends on the
//! capability set {oriented bounding box, CRS transform, polygon union}
//! expressed by `GeometryService`. `PlanarService` implements it with the
//! `geo` crate (minimum rotated rectangle, boolean union) and registered
//! affine maps between planar CRSs.
//!
//! Code cross-refs: `frame::OrientedRect`, `footprint::Footprint`, `geom::Affine2`

use std::collections::HashMap;

use geo::{BooleanOps, Coord, LineString, MinimumRotatedRect, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::footprint::{Footprint, FootprintPolygon};
use crate::frame::OrientedRect;
use crate::geom::{Affine2, Point2};
use crate::swath::LinearUnit;

/// Named coordinate reference system with its linear unit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crs {
    pub id: String,
    #[serde(default)]
    pub unit: LinearUnit,
}

impl Crs {
    pub fn new(id: impl Into<String>, unit: LinearUnit) -> Self {
        Self {
            id: id.into(),
            unit,
        }
    }

    /// CRS measured in meters.
    pub fn metric(id: impl Into<String>) -> Self {
        Self::new(id, LinearUnit::Meters)
    }
}

/// External geometry capabilities the planner relies on.
///
/// Implementations are synchronous; any failure is reported as
/// `GeometryServiceFailure` and aborts the planning call.
pub trait GeometryService {
    /// Minimum-area oriented rectangle of a simple polygon ring.
    fn oriented_bounding_box(&self, ring: &[Point2]) -> Result<OrientedRect, PlanError>;

    /// Transform points between two CRSs.
    fn transform(&self, points: &[Point2], from: &Crs, to: &Crs)
        -> Result<Vec<Point2>, PlanError>;

    /// Union of polygons (open rings); disjoint input yields several parts.
    fn union(&self, polygons: &[Vec<Point2>]) -> Result<Footprint, PlanError>;
}

impl<S: GeometryService + ?Sized> GeometryService for &S {
    fn oriented_bounding_box(&self, ring: &[Point2]) -> Result<OrientedRect, PlanError> {
        (**self).oriented_bounding_box(ring)
    }

    fn transform(
        &self,
        points: &[Point2],
        from: &Crs,
        to: &Crs,
    ) -> Result<Vec<Point2>, PlanError> {
        (**self).transform(points, from, to)
    }

    fn union(&self, polygons: &[Vec<Point2>]) -> Result<Footprint, PlanError> {
        (**self).union(polygons)
    }
}

/// Planar adapter backed by `geo`, with CRS transforms given as affine maps.
#[derive(Clone, Debug, Default)]
pub struct PlanarService {
    transforms: HashMap<(String, String), Affine2>,
}

impl PlanarService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `from → to` (and its inverse `to → from`).
    pub fn register(&mut self, from: &str, to: &str, map: Affine2) -> Result<(), PlanError> {
        let inv = map.inverse().ok_or_else(|| {
            PlanError::service(format!("transform {from} -> {to} is not invertible"))
        })?;
        self.transforms
            .insert((from.to_string(), to.to_string()), map);
        self.transforms.insert((to.to_string(), from.to_string()), inv);
        Ok(())
    }

    /// Builder form of `register`.
    pub fn with_transform(mut self, from: &str, to: &str, map: Affine2) -> Result<Self, PlanError> {
        self.register(from, to, map)?;
        Ok(self)
    }
}

impl GeometryService for PlanarService {
    fn oriented_bounding_box(&self, ring: &[Point2]) -> Result<OrientedRect, PlanError> {
        let rect = to_geo_polygon(ring)
            .minimum_rotated_rect()
            .ok_or_else(|| PlanError::service("minimum rotated rectangle is undefined"))?;
        let mut corners = open_ring(rect.exterior());
        // Collinear hull edges can leave an extra vertex on a side.
        corners.dedup_by(|a, b| (*a - *b).norm() <= f64::EPSILON * a.coords.norm().max(1.0));
        if corners.len() != 4 {
            return Err(PlanError::service(format!(
                "bounding rectangle has {} corners",
                corners.len()
            )));
        }
        OrientedRect::from_corners([corners[0], corners[1], corners[2], corners[3]])
    }

    fn transform(
        &self,
        points: &[Point2],
        from: &Crs,
        to: &Crs,
    ) -> Result<Vec<Point2>, PlanError> {
        if from.id == to.id {
            return Ok(points.to_vec());
        }
        let map = self
            .transforms
            .get(&(from.id.clone(), to.id.clone()))
            .ok_or_else(|| {
                PlanError::service(format!("no transform registered for {} -> {}", from.id, to.id))
            })?;
        let out: Vec<Point2> = points.iter().map(|p| map.apply(*p)).collect();
        if out.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(PlanError::service("transform produced non-finite coordinates"));
        }
        Ok(out)
    }

    fn union(&self, polygons: &[Vec<Point2>]) -> Result<Footprint, PlanError> {
        let mut parts = polygons.iter().filter(|ring| ring.len() >= 3);
        let Some(first) = parts.next() else {
            return Ok(Footprint::default());
        };
        let mut acc = MultiPolygon(vec![to_geo_polygon(first)]);
        for ring in parts {
            acc = acc.union(&MultiPolygon(vec![to_geo_polygon(ring)]));
        }
        let footprint = Footprint {
            parts: acc
                .0
                .iter()
                .map(|poly| FootprintPolygon {
                    exterior: open_ring(poly.exterior()),
                    interiors: poly.interiors().iter().map(open_ring).collect(),
                })
                .collect(),
        };
        let finite = footprint.parts.iter().all(|p| {
            p.exterior
                .iter()
                .chain(p.interiors.iter().flatten())
                .all(|q| q.x.is_finite() && q.y.is_finite())
        });
        if !finite {
            return Err(PlanError::service("union produced non-finite coordinates"));
        }
        Ok(footprint)
    }
}

fn to_geo_polygon(ring: &[Point2]) -> Polygon<f64> {
    let coords: Vec<Coord<f64>> = ring.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    Polygon::new(LineString::from(coords), vec![])
}

fn open_ring(ls: &LineString<f64>) -> Vec<Point2> {
    let mut pts: Vec<Point2> = ls.coords().map(|c| Point2::new(c.x, c.y)).collect();
    if pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    pts
}
