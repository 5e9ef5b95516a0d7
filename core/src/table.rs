use indexmap::IndexMap;

use crate::{CellIndex, Offset};

/// Two-level `dx → dy → cell` lookup used to translate a target offset.
///
/// Columns and rows keep the order in which offsets were first inserted,
/// which makes the emitted dispatch follow the topology ordering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectionTable {
    columns: IndexMap<i32, IndexMap<i32, CellIndex>>,
}

impl DirectionTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the cell answering lookups for `offset`.
    ///
    /// Returns the previously recorded cell, if any.
    pub fn insert(&mut self, offset: Offset, cell: CellIndex) -> Option<CellIndex> {
        self.columns
            .entry(offset.x())
            .or_default()
            .insert(offset.y(), cell)
    }

    /// Cell recorded for the relative target `(dx, dy)`.
    #[must_use]
    pub fn lookup(&self, dx: i32, dy: i32) -> Option<CellIndex> {
        self.columns.get(&dx)?.get(&dy).copied()
    }

    /// Columns keyed by `dx`, each mapping `dy` to a cell.
    #[must_use]
    pub fn columns(&self) -> &IndexMap<i32, IndexMap<i32, CellIndex>> {
        &self.columns
    }

    /// Number of `(dx, dy)` entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.values().map(IndexMap::len).sum()
    }

    /// Whether the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
