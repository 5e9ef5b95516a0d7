#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Runtime model of the generated pathfinder.
//!
//! The generated source runs inside a host that exposes the agent's position,
//! per-cell passability and rubble. This crate captures that surface as the
//! [`Host`] trait, provides a finite [`Board`] implementation, and executes a
//! [`CompiledPathfinder`](pathtable_core::CompiledPathfinder) through
//! [`Pathfinder`] exactly as the emitted code would, statement for statement.
//! The executor is what the test suite relies on to check the behaviour of the
//! generated artifact without a host runtime.

use std::fmt;

use pathtable_core::{Direction, Offset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod board;
mod executor;
mod table;

pub use board::Board;
pub use executor::Pathfinder;
pub use table::{CellRecord, CellTable, Predecessor};

/// Runtime surface the generated code calls into.
pub trait Host {
    /// Absolute position of the agent running the pathfinder.
    fn location(&self) -> Position;

    /// Whether the position lies on the map and is not occupied.
    fn is_traversable(&self, position: Position) -> bool;

    /// Rubble sensed at a traversable position, added to the step cost.
    fn rubble(&self, position: Position) -> i32;
}

/// Absolute grid position as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new absolute position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Position reached by one step in the provided direction.
    #[must_use]
    pub const fn add(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Position displaced from this one by a relative offset.
    #[must_use]
    pub const fn translate(&self, offset: Offset) -> Self {
        Self::new(self.x + offset.x(), self.y + offset.y())
    }

    /// Offset of this position relative to an origin.
    #[must_use]
    pub const fn offset_from(&self, origin: Position) -> Offset {
        Offset::new(self.x - origin.x, self.y - origin.y)
    }

    /// Squared euclidean distance between two positions.
    #[must_use]
    pub fn distance_squared_to(&self, other: Position) -> u64 {
        let dx = i64::from(other.x) - i64::from(self.x);
        let dy = i64::from(other.y) - i64::from(self.y);
        dx.unsigned_abs().pow(2) + dy.unsigned_abs().pow(2)
    }

    /// Unit direction that best approximates the heading towards `other`.
    ///
    /// The heading is rounded to the nearest of the eight compass directions;
    /// a component is never pointed away from the target.
    #[must_use]
    pub fn direction_to(&self, other: Position) -> Direction {
        let dx = i64::from(other.x) - i64::from(self.x);
        let dy = i64::from(other.y) - i64::from(self.y);
        let (adx, ady) = (dx.abs(), dy.abs());

        // tan(22.5°) scaled by 10^6.
        const TAN_EIGHTH: i64 = 414_214;
        let step_x = if adx * 1_000_000 <= ady * TAN_EIGHTH {
            0
        } else {
            dx.signum()
        };
        let step_y = if ady * 1_000_000 <= adx * TAN_EIGHTH {
            0
        } else {
            dy.signum()
        };

        Direction::from_delta(step_x as i32, step_y as i32).unwrap_or(Direction::Center)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Failures surfaced by the generated code at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The target was not clamped into the window before the table lookup.
    #[error("target offset ({dx},{dy}) lies outside the visibility window")]
    TargetOutsideWindow {
        /// Horizontal offset of the target.
        dx: i32,
        /// Vertical offset of the target.
        dy: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_to_rounds_to_nearest_octant() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.direction_to(Position::new(5, 1)), Direction::East);
        assert_eq!(origin.direction_to(Position::new(5, 4)), Direction::NorthEast);
        assert_eq!(origin.direction_to(Position::new(-1, -6)), Direction::South);
        assert_eq!(origin.direction_to(Position::new(-3, 3)), Direction::NorthWest);
        assert_eq!(origin.direction_to(origin), Direction::Center);
    }

    #[test]
    fn offsets_round_trip_through_translate() {
        let origin = Position::new(12, -4);
        let offset = Offset::new(-3, 2);
        assert_eq!(origin.translate(offset).offset_from(origin), offset);
    }
}
