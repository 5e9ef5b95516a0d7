#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the static pathfinding table compiler.
//!
//! This crate defines the vocabulary that connects the generation-time
//! systems, the reference executor and the source backends. Systems build a
//! [`Topology`] of [`Offset`] values around the origin, compile it into a
//! [`RelaxationSchedule`] and a [`DirectionTable`], and bundle the results in
//! a [`CompiledPathfinder`]. Backends only ever read these values; nothing in
//! this crate emits source text or touches a runtime host.

use std::fmt;

use serde::{Deserialize, Serialize};

mod error;
mod schedule;
mod table;
mod topology;

pub use error::GenerationError;
pub use schedule::{
    Anchor, CellRelaxation, InitialStep, PositionResolution, RelaxationSchedule, ScheduleStats,
};
pub use table::DirectionTable;
pub use topology::Topology;

/// Path length assigned to every cell before relaxation reaches it.
///
/// Strictly larger than any achievable path within [`MAX_RADIUS`] while
/// leaving enough headroom that `UNREACHED + cost` never overflows an `i32`.
pub const UNREACHED: i32 = 1_147_483_647;

/// Cost assumed for cells that were not sensed as valid this invocation.
pub const UNSENSED_COST: i32 = 110;

/// Fixed cost of a single step, added on top of the sensed rubble.
pub const STEP_COST: i32 = 10;

/// Squared distance up to which cells are seeded straight from the origin.
pub const SEED_DISTANCE: u32 = 2;

/// Smallest squared radius accepted for generation.
///
/// Below this value the window does not contain all eight neighbours of the
/// origin, so a clamped target could land outside the table.
pub const MIN_RADIUS: u32 = SEED_DISTANCE;

/// Largest squared radius accepted for generation.
pub const MAX_RADIUS: u32 = 4_096;

/// Neighbour scan order shared by fallback resolution and relaxation.
///
/// The horizontal delta is the outer loop and the vertical delta the inner
/// loop; the first entry that satisfies a predicate wins every tie.
pub const SCAN_ORDER: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Integer displacement from the agent's current position.
///
/// `x` grows towards the east and `y` grows towards the north.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Offset {
    x: i32,
    y: i32,
}

impl Offset {
    /// The agent's own cell.
    pub const ORIGIN: Offset = Offset::new(0, 0);

    /// Creates a new offset from its components.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component of the offset.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component of the offset.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Squared euclidean distance to the origin.
    #[must_use]
    pub const fn squared_distance(&self) -> u32 {
        let x = self.x.unsigned_abs();
        let y = self.y.unsigned_abs();
        x * x + y * y
    }

    /// Chebyshev distance to the origin, the number of unit steps needed to reach it.
    #[must_use]
    pub fn chebyshev_distance(&self) -> u32 {
        self.x.unsigned_abs().max(self.y.unsigned_abs())
    }

    /// Whether this is the origin.
    #[must_use]
    pub const fn is_origin(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Whether the cell is seeded directly from the origin.
    #[must_use]
    pub const fn is_seed(&self) -> bool {
        self.squared_distance() <= SEED_DISTANCE
    }

    /// Offset reached by taking one step in the provided direction.
    #[must_use]
    pub const fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Unit direction leading from this offset to an adjacent one.
    ///
    /// Returns `None` when the two offsets are not grid-adjacent.
    #[must_use]
    pub const fn direction_to(&self, other: Offset) -> Option<Direction> {
        Direction::from_delta(other.x - self.x, other.y - self.y)
    }

    /// Grid-adjacent offsets in [`SCAN_ORDER`].
    pub fn neighbors(self) -> impl Iterator<Item = Offset> {
        SCAN_ORDER
            .into_iter()
            .map(move |(dx, dy)| Offset::new(self.x + dx, self.y + dy))
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Unit movement directions, including the "no movement" symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards increasing `y`.
    North,
    /// Towards increasing `x` and `y`.
    NorthEast,
    /// Towards increasing `x`.
    East,
    /// Towards increasing `x` and decreasing `y`.
    SouthEast,
    /// Towards decreasing `y`.
    South,
    /// Towards decreasing `x` and `y`.
    SouthWest,
    /// Towards decreasing `x`.
    West,
    /// Towards decreasing `x` and increasing `y`.
    NorthWest,
    /// No movement.
    Center,
}

impl Direction {
    /// Every direction symbol, compass directions first.
    pub const ALL: [Direction; 9] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::Center,
    ];

    /// Coordinate delta applied by one step in this direction.
    #[must_use]
    pub const fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
            Direction::Center => (0, 0),
        }
    }

    /// Direction matching a delta whose components lie in `-1..=1`.
    #[must_use]
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        let direction = match (dx, dy) {
            (0, 1) => Direction::North,
            (1, 1) => Direction::NorthEast,
            (1, 0) => Direction::East,
            (1, -1) => Direction::SouthEast,
            (0, -1) => Direction::South,
            (-1, -1) => Direction::SouthWest,
            (-1, 0) => Direction::West,
            (-1, 1) => Direction::NorthWest,
            (0, 0) => Direction::Center,
            _ => return None,
        };
        Some(direction)
    }

    /// Direction pointing the other way; `Center` is its own opposite.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
            Direction::Center => Direction::Center,
        }
    }
}

/// Validated squared visibility radius used for generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Radius(u32);

impl Radius {
    /// Validates a squared radius against [`MIN_RADIUS`] and [`MAX_RADIUS`].
    pub fn new(value: u32) -> Result<Self, GenerationError> {
        if value == 0 {
            return Err(GenerationError::EmptyTopology { radius: value });
        }
        if value < MIN_RADIUS {
            return Err(GenerationError::RadiusTooSmall {
                radius: value,
                minimum: MIN_RADIUS,
            });
        }
        if value > MAX_RADIUS {
            return Err(GenerationError::RadiusTooLarge {
                radius: value,
                maximum: MAX_RADIUS,
            });
        }
        Ok(Self(value))
    }

    /// Squared radius in r² units.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Whether the offset lies inside the visibility window.
    #[must_use]
    pub const fn contains(&self, offset: Offset) -> bool {
        offset.squared_distance() <= self.0
    }
}

impl TryFrom<u32> for Radius {
    type Error = GenerationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Radius> for u32 {
    fn from(radius: Radius) -> Self {
        radius.0
    }
}

impl fmt::Display for Radius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} r^2", self.0)
    }
}

/// Dense index of a cell record inside the per-invocation table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex(usize);

impl CellIndex {
    /// Creates a new cell index.
    #[must_use]
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    /// Position of the record in the table.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything a backend needs to materialise the pathfinder for one radius.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledPathfinder {
    radius: Radius,
    topology: Topology,
    schedule: RelaxationSchedule,
    table: DirectionTable,
    clamp_steps: u32,
}

impl CompiledPathfinder {
    /// Bundles the artefacts produced by the generation systems.
    #[must_use]
    pub fn new(
        radius: Radius,
        topology: Topology,
        schedule: RelaxationSchedule,
        table: DirectionTable,
        clamp_steps: u32,
    ) -> Self {
        Self {
            radius,
            topology,
            schedule,
            table,
            clamp_steps,
        }
    }

    /// Radius the pathfinder was compiled for.
    #[must_use]
    pub const fn radius(&self) -> Radius {
        self.radius
    }

    /// Ordered cells inside the visibility window.
    #[must_use]
    pub const fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Straight-line relaxation program.
    #[must_use]
    pub const fn schedule(&self) -> &RelaxationSchedule {
        &self.schedule
    }

    /// Relative `(dx, dy)` lookup structure.
    #[must_use]
    pub const fn table(&self) -> &DirectionTable {
        &self.table
    }

    /// Number of unrolled steps used to pull an out-of-window target inside.
    #[must_use]
    pub const fn clamp_steps(&self) -> u32 {
        self.clamp_steps
    }
}
