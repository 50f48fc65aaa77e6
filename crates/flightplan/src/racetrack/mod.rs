//! Racetrack sequencing: order coverage lines into one flyable path.
//!
//! Purpose
//! - Connect the lines placed along a sweep frame into a single waypoint
//!   sequence so the aircraft never jumps more than `max_batch` lines
//!   between the exit of one line and the entry of the next.
//!
//! Layout
//! - `types.rs`: strategy names and the traversal state.
//! - `sequence.rs`: the transition functions and waypoint emission.
//!
//! Both strategies are explicit state machines over the 1-based line index;
//! each step either yields the next index or ends the traversal.

mod sequence;
mod types;

pub use sequence::{line_order, sequence_lines, sequence_waypoints, TurnBudget};
pub use types::{Direction, Phase, Strategy, TraversalState};
