//! Waypoints, tags and the small list utilities used after planning.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::geom::Point2;

/// Longest custom tag accepted (characters).
pub const MAX_TAG_LEN: usize = 10;

/// Marker telling the aircraft how to treat a waypoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Tag {
    #[default]
    FlyOver,
    FlyBy,
    RightHand180,
    RightHand270,
    LeftHand180,
    LeftHand270,
    Custom(String),
}

impl Tag {
    /// Fixed names (and their Garmin spellings such as `FLYOVER`, `RH180`)
    /// match case-sensitively; anything else is a custom tag.
    pub fn parse(s: &str) -> Result<Self, PlanError> {
        Ok(match s {
            "fly-over" | "FLYOVER" => Tag::FlyOver,
            "fly-by" | "FLYBY" => Tag::FlyBy,
            "RH 180" | "RH180" => Tag::RightHand180,
            "RH 270" | "RH270" => Tag::RightHand270,
            "LH 180" | "LH180" => Tag::LeftHand180,
            "LH 270" | "LH270" => Tag::LeftHand270,
            other => Tag::custom(other)?,
        })
    }

    pub fn custom(s: &str) -> Result<Self, PlanError> {
        let len = s.chars().count();
        if len == 0 {
            return Err(PlanError::InvalidTag {
                tag: s.to_owned(),
                reason: "tag is empty".into(),
            });
        }
        if len > MAX_TAG_LEN {
            return Err(PlanError::InvalidTag {
                tag: s.to_owned(),
                reason: format!("tag has {len} characters, at most {MAX_TAG_LEN} allowed"),
            });
        }
        Ok(Tag::Custom(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Tag::FlyOver => "fly-over",
            Tag::FlyBy => "fly-by",
            Tag::RightHand180 => "RH 180",
            Tag::RightHand270 => "RH 270",
            Tag::LeftHand180 => "LH 180",
            Tag::LeftHand270 => "LH 270",
            Tag::Custom(s) => s,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Tag {
    type Error = PlanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Tag::parse(&value)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.as_str().to_owned()
    }
}

/// A point of the flight plan. `sequence_id` is 1-based flight order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub point: Point2,
    pub sequence_id: u32,
    pub tag: Tag,
}

impl Waypoint {
    pub fn new(point: Point2, sequence_id: u32, tag: Tag) -> Self {
        Self {
            point,
            sequence_id,
            tag,
        }
    }
}

/// Number points 1-based in the order given.
pub(crate) fn number_points(points: impl IntoIterator<Item = Point2>, tag: &Tag) -> Vec<Waypoint> {
    points
        .into_iter()
        .zip(1u32..)
        .map(|(p, id)| Waypoint::new(p, id, tag.clone()))
        .collect()
}

/// Flatten a (multi-part) line into waypoints, parts concatenated end-to-end.
pub fn waypoints_from_polyline(parts: &[Vec<Point2>], tag: &Tag) -> Result<Vec<Waypoint>, PlanError> {
    let out = number_points(parts.iter().flatten().copied(), tag);
    if out.is_empty() {
        return Err(PlanError::empty("line has no vertices"));
    }
    Ok(out)
}

/// Reverse flight order; ids are renumbered, tags travel with their points.
pub fn reverse_waypoints(waypoints: &[Waypoint]) -> Vec<Waypoint> {
    waypoints
        .iter()
        .rev()
        .zip(1u32..)
        .map(|(w, id)| Waypoint::new(w.point, id, w.tag.clone()))
        .collect()
}

/// Keep the waypoints whose id is in `significant`, renumbered in flight order.
pub fn reduce_to_significant(
    waypoints: &[Waypoint],
    significant: &[u32],
) -> Result<Vec<Waypoint>, PlanError> {
    let mut kept: Vec<&Waypoint> = waypoints
        .iter()
        .filter(|w| significant.contains(&w.sequence_id))
        .collect();
    kept.sort_by_key(|w| w.sequence_id);
    if kept.is_empty() {
        return Err(PlanError::empty("no waypoint marked as significant"));
    }
    Ok(kept
        .into_iter()
        .zip(1u32..)
        .map(|(w, id)| Waypoint::new(w.point, id, w.tag.clone()))
        .collect())
}

/// Keep the waypoints with `first <= id <= last`, renumbered in flight order.
pub fn cut_waypoints(waypoints: &[Waypoint], first: u32, last: u32) -> Result<Vec<Waypoint>, PlanError> {
    if first > last {
        return Err(PlanError::params(format!(
            "cut range {first}..={last} is empty: first id is after last id"
        )));
    }
    let mut kept: Vec<&Waypoint> = waypoints
        .iter()
        .filter(|w| (first..=last).contains(&w.sequence_id))
        .collect();
    kept.sort_by_key(|w| w.sequence_id);
    if kept.is_empty() {
        return Err(PlanError::empty(format!("no waypoint with id in {first}..={last}")));
    }
    Ok(kept
        .into_iter()
        .zip(1u32..)
        .map(|(w, id)| Waypoint::new(w.point, id, w.tag.clone()))
        .collect())
}

/// Retag the waypoints with the given ids; returns how many were changed.
pub fn tag_waypoints(waypoints: &mut [Waypoint], ids: &[u32], tag: &Tag) -> usize {
    let mut n = 0;
    for w in waypoints.iter_mut().filter(|w| ids.contains(&w.sequence_id)) {
        w.tag = tag.clone();
        n += 1;
    }
    n
}
