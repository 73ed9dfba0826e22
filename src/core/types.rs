//! Core type definitions used throughout the codebase

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Unique identifier for agents
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[display(fmt = "#{}", _0)]
pub struct AgentId(pub u32);

/// Simulation turn counter
pub type Turn = u32;

/// A cell on the board
///
/// Ordering is row-major on `x` then `y`; deposit iteration relies on it.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Straight-line Manhattan distance (ignores wrap-around)
    pub fn manhattan(&self, other: &Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// One-cell movement step, each axis in {-1, 0, 1}
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delta {
    pub dx: i32,
    pub dy: i32,
}

impl Delta {
    pub const STAY: Delta = Delta::new(0, 0);

    /// Stay plus the eight neighbours, in the order random choices index into
    pub const ALL: [Delta; 9] = [
        Delta::new(0, 0),
        Delta::new(1, 0),
        Delta::new(-1, 0),
        Delta::new(0, 1),
        Delta::new(0, -1),
        Delta::new(1, 1),
        Delta::new(1, -1),
        Delta::new(-1, 1),
        Delta::new(-1, -1),
    ];

    /// Stay plus the four orthogonal steps
    pub const ORTHOGONAL: [Delta; 5] = [
        Delta::new(0, 0),
        Delta::new(1, 0),
        Delta::new(0, 1),
        Delta::new(-1, 0),
        Delta::new(0, -1),
    ];

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Per-axis sign of `target - from`
    ///
    /// Uses the straight-line direction, not the shortest path across the wrap.
    pub fn toward(from: Position, target: Position) -> Self {
        Self {
            dx: sign(from.x, target.x),
            dy: sign(from.y, target.y),
        }
    }

    /// Negation of [`Delta::toward`]
    pub fn away(from: Position, threat: Position) -> Self {
        let toward = Self::toward(from, threat);
        Self {
            dx: -toward.dx,
            dy: -toward.dy,
        }
    }
}

fn sign(from: u32, to: u32) -> i32 {
    match to.cmp(&from) {
        std::cmp::Ordering::Greater => 1,
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
    }
}

/// Board dimensions with wrap-around addressing on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: u32,
    pub height: u32,
}

impl WorldBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Apply `delta` to `pos`, wrapping off either edge to the opposite one
    pub fn wrap(&self, pos: Position, delta: Delta) -> Position {
        Position {
            x: wrap_axis(pos.x, delta.dx, self.width),
            y: wrap_axis(pos.y, delta.dy, self.height),
        }
    }

    pub fn cell_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

fn wrap_axis(value: u32, step: i32, extent: u32) -> u32 {
    if extent == 0 {
        return 0;
    }
    let wrapped = (i64::from(value) + i64::from(step)).rem_euclid(i64::from(extent));
    // rem_euclid keeps the result in [0, extent), which always fits in u32
    wrapped as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_off_low_edge() {
        let bounds = WorldBounds::new(4, 4);
        let pos = bounds.wrap(Position::new(0, 0), Delta::new(-1, -1));
        assert_eq!(pos, Position::new(3, 3));
    }

    #[test]
    fn test_wrap_off_high_edge() {
        let bounds = WorldBounds::new(5, 3);
        let pos = bounds.wrap(Position::new(4, 2), Delta::new(1, 1));
        assert_eq!(pos, Position::new(0, 0));
    }

    #[test]
    fn test_toward_ignores_wrap() {
        // (0,0) -> (3,0) on a 4-wide board is one step left across the wrap,
        // but the step is computed on the straight line.
        let delta = Delta::toward(Position::new(0, 0), Position::new(3, 0));
        assert_eq!(delta, Delta::new(1, 0));
    }

    #[test]
    fn test_away_negates_both_axes() {
        let delta = Delta::away(Position::new(2, 2), Position::new(3, 1));
        assert_eq!(delta, Delta::new(-1, 1));
    }

    #[test]
    fn test_toward_same_cell_is_stay() {
        assert_eq!(
            Delta::toward(Position::new(1, 1), Position::new(1, 1)),
            Delta::STAY
        );
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Position::new(0, 5).manhattan(&Position::new(3, 1)), 7);
    }

    #[test]
    fn test_agent_id_display() {
        assert_eq!(AgentId(7).to_string(), "#7");
        assert_eq!(AgentId::from(3), AgentId(3));
    }
}
