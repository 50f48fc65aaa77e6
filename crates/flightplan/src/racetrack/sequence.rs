//! Transition functions and waypoint emission.

use crate::error::PlanError;
use crate::frame::SweepFrame;
use crate::cfg::MAX_LINES;
use crate::lines::{check_line_count, check_line_params, line_spacing, FlightLine, LineOffset};
use crate::waypoint::{number_points, Tag, Waypoint};

use super::types::{Direction, Phase, Strategy, TraversalState};

/// Line count and jump limit derived from the frame and the turn budget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurnBudget {
    /// `ceil(L / s)` with `s = 2w(1-o)`.
    pub number_of_lines: usize,
    /// `floor(max_turn / 2w)`, at least 1 and at most `number_of_lines`.
    pub max_batch: usize,
    pub spacing: f64,
}

impl TurnBudget {
    pub fn new(
        axis_length: f64,
        half_width: f64,
        overlap: f64,
        max_turn_distance: f64,
    ) -> Result<Self, PlanError> {
        check_line_params(half_width, overlap)?;
        if !(max_turn_distance.is_finite() && max_turn_distance > 0.0) {
            return Err(PlanError::params(format!(
                "max turn distance must be positive, got {max_turn_distance}"
            )));
        }
        if !(axis_length.is_finite() && axis_length > 0.0) {
            return Err(PlanError::degenerate(format!(
                "sweep axis length {axis_length} is not positive"
            )));
        }
        let spacing = line_spacing(half_width, overlap);
        let number_of_lines = check_line_count((axis_length / spacing).ceil())?;
        let batches = (max_turn_distance / (2.0 * half_width)).floor();
        if batches < 1.0 {
            return Err(PlanError::params(format!(
                "max turn distance {max_turn_distance} is shorter than one swath width {}",
                2.0 * half_width
            )));
        }
        // a batch wider than the line set orders lines exactly like one of that width
        let max_batch = batches.min(number_of_lines.max(1) as f64) as usize;
        Ok(Self {
            number_of_lines,
            max_batch,
            spacing,
        })
    }
}

fn first_unvisited(st: &TraversalState) -> Option<usize> {
    (1..=st.number_of_lines).find(|&k| !st.is_visited(k))
}

/// Blocks of `2b-1` lines: keep direction at a block start, flip otherwise.
fn step_back_and_forth(st: &mut TraversalState) -> Option<usize> {
    if st.phase == Phase::Cleanup {
        return first_unvisited(st);
    }
    let (j, b, n) = (st.current_index, st.max_batch, st.number_of_lines);
    let block = 2 * b - 1;
    if (j - 1) % block != 0 {
        st.direction = st.direction.flipped();
    }
    match st.direction {
        Direction::Forward if j + b <= n => {
            st.phase = Phase::Advancing;
            Some(j + b)
        }
        Direction::Forward => {
            tracing::debug!(line = j, "back-and-forth enters cleanup");
            st.phase = Phase::Cleanup;
            first_unvisited(st)
        }
        Direction::Backward => {
            st.phase = Phase::Retreating;
            Some(j + 1 - b)
        }
    }
}

/// Chains by residue mod `b`: climb with `+b`, turn onto the next chain's top,
/// descend with `-b`, step `+1` at the bottom.
fn step_fly_to_top(st: &mut TraversalState) -> Option<usize> {
    let (j, b, n) = (st.current_index, st.max_batch, st.number_of_lines);
    let last_chain = b.min(n);
    match st.phase {
        Phase::Advancing if j + b <= n => Some(j + b),
        Phase::Advancing => {
            let chain = st.line_from_bottom + 1;
            if chain > last_chain {
                return None;
            }
            st.line_from_bottom = chain;
            st.phase = Phase::Retreating;
            st.direction = Direction::Backward;
            Some(chain + b * ((n - chain) / b))
        }
        Phase::Retreating if j <= st.line_from_bottom => {
            let chain = j + 1;
            if chain > last_chain {
                return None;
            }
            st.line_from_bottom = chain;
            st.phase = Phase::Advancing;
            st.direction = Direction::Forward;
            Some(chain)
        }
        Phase::Retreating => Some(j - b),
        Phase::Cleanup => first_unvisited(st),
    }
}

/// Run the state machine; yields `(line, left_point)` in flight order.
fn traverse(strategy: Strategy, number_of_lines: usize, max_batch: usize) -> Vec<(usize, bool)> {
    if number_of_lines == 0 {
        return Vec::new();
    }
    let step: fn(&mut TraversalState) -> Option<usize> = match strategy {
        Strategy::BackAndForth => step_back_and_forth,
        Strategy::FlyToTopAndBack => step_fly_to_top,
    };
    let mut st = TraversalState::new(number_of_lines, max_batch);
    let mut out = Vec::with_capacity(number_of_lines);
    out.push((st.current_index, st.left_point));
    while st.inner_iteration < number_of_lines {
        let Some(j) = step(&mut st) else { break };
        st.visit(j);
        out.push((j, st.left_point));
    }
    out
}

/// Visiting order of lines `1..=number_of_lines`.
pub fn line_order(
    strategy: Strategy,
    number_of_lines: usize,
    max_batch: usize,
) -> Result<Vec<usize>, PlanError> {
    if max_batch == 0 {
        return Err(PlanError::params("max batch must be at least one line"));
    }
    if number_of_lines > MAX_LINES {
        return Err(PlanError::params(format!(
            "{number_of_lines} lines exceed the limit of {MAX_LINES}"
        )));
    }
    let max_batch = max_batch.min(number_of_lines.max(1));
    Ok(traverse(strategy, number_of_lines, max_batch)
        .into_iter()
        .map(|(j, _)| j)
        .collect())
}

/// Lines in flight order, each oriented so `start` is where it is entered.
pub fn sequence_lines(
    frame: &SweepFrame,
    half_width: f64,
    overlap: f64,
    max_turn_distance: f64,
    strategy: Strategy,
) -> Result<Vec<FlightLine>, PlanError> {
    let budget = TurnBudget::new(frame.axis_length(), half_width, overlap, max_turn_distance)?;
    tracing::debug!(
        strategy = %strategy,
        lines = budget.number_of_lines,
        max_batch = budget.max_batch,
        half_width,
        "sequencing racetrack"
    );
    let lines = traverse(strategy, budget.number_of_lines, budget.max_batch)
        .into_iter()
        .map(|(j, left_point)| {
            let mut line = FlightLine::new(frame, LineOffset::at(j, half_width, overlap));
            if !left_point {
                std::mem::swap(&mut line.start, &mut line.end);
            }
            line
        })
        .collect();
    Ok(lines)
}

/// One continuous waypoint sequence, two waypoints per line, ids 1-based.
pub fn sequence_waypoints(
    frame: &SweepFrame,
    half_width: f64,
    overlap: f64,
    max_turn_distance: f64,
    strategy: Strategy,
    tag: &Tag,
) -> Result<Vec<Waypoint>, PlanError> {
    let lines = sequence_lines(frame, half_width, overlap, max_turn_distance, strategy)?;
    Ok(number_points(
        lines.iter().flat_map(|l| [l.start, l.end]),
        tag,
    ))
}
