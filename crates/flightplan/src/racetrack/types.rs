//! Strategy names and traversal state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Line ordering strategy for the racetrack pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Strategy {
    /// Forward jumps of `max_batch`, interleaved backtracks, linear cleanup.
    BackAndForth,
    /// Climb one residue chain, turn at the top, descend the next.
    FlyToTopAndBack,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::BackAndForth, Strategy::FlyToTopAndBack];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::BackAndForth => "Back and Forth",
            Strategy::FlyToTopAndBack => "Fly to top and back",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Back and Forth" | "back-and-forth" | "Meander" => Ok(Strategy::BackAndForth),
            "Fly to top and back" | "fly-to-top-and-back" | "Racetrack" => {
                Ok(Strategy::FlyToTopAndBack)
            }
            other => Err(PlanError::UnsupportedAlgorithm {
                name: other.to_owned(),
            }),
        }
    }
}

impl TryFrom<String> for Strategy {
    type Error = PlanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Strategy> for String {
    fn from(s: Strategy) -> Self {
        s.name().to_owned()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Traversal phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Moving up the line indices (jumps of `+max_batch`).
    Advancing,
    /// Moving down the line indices (jumps of `-max_batch`).
    Retreating,
    /// Walking the remaining unvisited lines in ascending order.
    Cleanup,
}

/// Mutable state threaded through one sequencing call.
#[derive(Clone, Debug, PartialEq)]
pub struct TraversalState {
    pub current_index: usize,
    pub direction: Direction,
    pub max_batch: usize,
    pub number_of_lines: usize,
    /// Lines emitted so far.
    pub inner_iteration: usize,
    pub phase: Phase,
    /// Lowest line of the chain being flown (fly-to-top-and-back).
    pub line_from_bottom: usize,
    /// Emit the start anchor side of the next line first.
    pub left_point: bool,
    pub(crate) visited: Vec<bool>,
}

impl TraversalState {
    /// State positioned on line 1, already counted as visited.
    pub fn new(number_of_lines: usize, max_batch: usize) -> Self {
        let mut visited = vec![false; number_of_lines + 1];
        if number_of_lines > 0 {
            visited[1] = true;
        }
        Self {
            current_index: 1,
            direction: Direction::Forward,
            max_batch,
            number_of_lines,
            inner_iteration: 1,
            phase: Phase::Advancing,
            line_from_bottom: 1,
            left_point: true,
            visited,
        }
    }

    pub(crate) fn is_visited(&self, j: usize) -> bool {
        self.visited.get(j).copied().unwrap_or(true)
    }

    pub(crate) fn visit(&mut self, j: usize) {
        if let Some(v) = self.visited.get_mut(j) {
            *v = true;
        }
        self.current_index = j;
        self.inner_iteration += 1;
        self.left_point = !self.left_point;
    }
}
