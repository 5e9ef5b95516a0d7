use pathtable_core::{CellIndex, Direction, Offset, Topology, UNREACHED, UNSENSED_COST};

use crate::Position;

/// Cell a relaxation adopted its current estimate from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Predecessor {
    /// The cell was seeded straight from the origin.
    Origin,
    /// The cell adopted the estimate of another cell.
    Cell(CellIndex),
}

/// Snapshot of a single cell record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRecord {
    /// Resolved position, or `None` when the cell was invalid this invocation.
    pub position: Option<Position>,
    /// Shortest path length known for the cell.
    pub path_length: i32,
    /// Cost of entering the cell.
    pub cost: i32,
    /// Direction from the first cell of the route back into the origin.
    pub best_direction: Direction,
    /// Cell the current estimate was adopted from.
    pub predecessor: Option<Predecessor>,
}

impl CellRecord {
    /// Whether relaxation found any route to the cell.
    #[must_use]
    pub const fn is_reached(&self) -> bool {
        self.path_length < UNREACHED
    }
}

/// Per-invocation cell records, allocated fresh for every run.
///
/// The generated code keeps the same records in parallel local arrays; the
/// predecessor column exists only here so tests can audit the routes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellTable {
    pub(crate) positions: Vec<Option<Position>>,
    pub(crate) path_lengths: Vec<i32>,
    pub(crate) costs: Vec<i32>,
    pub(crate) best: Vec<Direction>,
    pub(crate) predecessors: Vec<Option<Predecessor>>,
}

impl CellTable {
    pub(crate) fn with_len(len: usize) -> Self {
        Self {
            positions: vec![None; len],
            path_lengths: vec![UNREACHED; len],
            costs: vec![UNSENSED_COST; len],
            best: vec![Direction::Center; len],
            predecessors: vec![None; len],
        }
    }

    /// Number of cell records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.path_lengths.len()
    }

    /// Whether the table holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path_lengths.is_empty()
    }

    /// Record stored at the provided index.
    #[must_use]
    pub fn record(&self, cell: CellIndex) -> Option<CellRecord> {
        let index = cell.get();
        Some(CellRecord {
            position: *self.positions.get(index)?,
            path_length: *self.path_lengths.get(index)?,
            cost: *self.costs.get(index)?,
            best_direction: *self.best.get(index)?,
            predecessor: *self.predecessors.get(index)?,
        })
    }

    /// Best direction stored at the provided index, `Center` when absent.
    #[must_use]
    pub fn best_direction(&self, cell: CellIndex) -> Direction {
        self.best
            .get(cell.get())
            .copied()
            .unwrap_or(Direction::Center)
    }

    /// Path lengths in topology order.
    #[must_use]
    pub fn path_lengths(&self) -> &[i32] {
        &self.path_lengths
    }

    /// Best directions in topology order.
    #[must_use]
    pub fn best_directions(&self) -> &[Direction] {
        &self.best
    }

    /// Predecessor chain from `cell` back to the seed that connects it to the origin.
    ///
    /// The chain starts with `cell` and ends with a seeded cell. Returns `None`
    /// for unreached cells and for chains that do not terminate within the
    /// table size.
    #[must_use]
    pub fn route(&self, cell: CellIndex) -> Option<Vec<CellIndex>> {
        let mut route = Vec::new();
        let mut current = cell;

        for _ in 0..=self.len() {
            route.push(current);
            match (*self.predecessors.get(current.get())?)? {
                Predecessor::Origin => return Some(route),
                Predecessor::Cell(previous) => current = previous,
            }
        }

        None
    }

    /// Record of the cell at `offset`, looked up through the topology.
    #[must_use]
    pub fn record_at(&self, topology: &Topology, offset: Offset) -> Option<CellRecord> {
        self.record(topology.index_of(offset)?)
    }
}
