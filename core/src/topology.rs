use std::collections::HashMap;

use crate::{CellIndex, GenerationError, Offset};

/// Ordered cells of the visibility window, excluding the origin.
///
/// Entries are sorted by non-decreasing squared distance to the origin, so any
/// cell only ever depends on cells that precede it. Each entry is addressed by
/// a dense [`CellIndex`] equal to its position in the ordering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topology {
    radius: u32,
    offsets: Vec<Offset>,
    indices: HashMap<Offset, CellIndex>,
}

impl Topology {
    /// Builds a topology from offsets already sorted by distance.
    ///
    /// Rejects the origin, entries outside the radius, duplicates and any
    /// entry closer to the origin than its predecessor.
    pub fn from_offsets(radius: u32, offsets: Vec<Offset>) -> Result<Self, GenerationError> {
        let mut indices = HashMap::with_capacity(offsets.len());
        let mut previous: Option<Offset> = None;

        for (position, &offset) in offsets.iter().enumerate() {
            if offset.is_origin() {
                return Err(GenerationError::OriginInTopology);
            }
            if offset.squared_distance() > radius {
                return Err(GenerationError::OutsideRadius { offset, radius });
            }
            if let Some(previous) = previous {
                if offset.squared_distance() < previous.squared_distance() {
                    return Err(GenerationError::TopologyOutOfOrder {
                        previous,
                        next: offset,
                    });
                }
            }
            if indices.insert(offset, CellIndex::new(position)).is_some() {
                return Err(GenerationError::DuplicateOffset { offset });
            }
            previous = Some(offset);
        }

        Ok(Self {
            radius,
            offsets,
            indices,
        })
    }

    /// Squared radius the topology was built for.
    #[must_use]
    pub const fn radius(&self) -> u32 {
        self.radius
    }

    /// Number of cells in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the window holds no cells besides the origin.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Offsets in distance order.
    #[must_use]
    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    /// Offset stored at the provided index.
    #[must_use]
    pub fn offset(&self, index: CellIndex) -> Option<Offset> {
        self.offsets.get(index.get()).copied()
    }

    /// Index of the provided offset, if it lies in the window.
    #[must_use]
    pub fn index_of(&self, offset: Offset) -> Option<CellIndex> {
        self.indices.get(&offset).copied()
    }

    /// Index of the provided offset, treating absence as a generation defect.
    pub fn require(&self, offset: Offset) -> Result<CellIndex, GenerationError> {
        self.index_of(offset)
            .ok_or(GenerationError::MissingCell { offset })
    }

    /// Whether the offset lies inside the window (the origin excluded).
    #[must_use]
    pub fn contains(&self, offset: Offset) -> bool {
        self.indices.contains_key(&offset)
    }

    /// Cells paired with their indices, in distance order.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, Offset)> + '_ {
        self.offsets
            .iter()
            .enumerate()
            .map(|(position, &offset)| (CellIndex::new(position), offset))
    }
}
