//! Error taxonomy for planning calls.
//!
//! Every failure is reported synchronously to the caller; nothing is retried
//! and no fallback geometry or parameter is ever substituted.

/// Errors surfaced by the planning engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// Sensor opening angle outside `[0, 180)` degrees (or not finite).
    #[error("sensor opening angle {angle_deg}° is outside [0, 180)")]
    InvalidSensorAngle { angle_deg: f64 },
    /// Altitude, overlap, turn distance, speed or a derived value is unusable.
    #[error("invalid flight parameters: {reason}")]
    InvalidFlightParameters { reason: String },
    /// Zero-area, too small or self-intersecting AOI polygon.
    #[error("degenerate area of interest: {reason}")]
    DegenerateAoi { reason: String },
    /// Unknown traversal strategy name.
    #[error("unsupported traversal algorithm '{name}'")]
    UnsupportedAlgorithm { name: String },
    /// The geometry/CRS service failed or returned an unusable result.
    #[error("geometry service failure: {reason}")]
    GeometryServiceFailure { reason: String },
    /// Waypoint tag empty or longer than the display limit.
    #[error("invalid waypoint tag '{tag}': {reason}")]
    InvalidTag { tag: String, reason: String },
    /// An operation produced or received no waypoints.
    #[error("empty flight plan: {reason}")]
    EmptyFlightPlan { reason: String },
}

impl PlanError {
    pub(crate) fn params(reason: impl Into<String>) -> Self {
        Self::InvalidFlightParameters {
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateAoi {
            reason: reason.into(),
        }
    }

    pub(crate) fn service(reason: impl Into<String>) -> Self {
        Self::GeometryServiceFailure {
            reason: reason.into(),
        }
    }

    pub(crate) fn empty(reason: impl Into<String>) -> Self {
        Self::EmptyFlightPlan {
            reason: reason.into(),
        }
    }
}
