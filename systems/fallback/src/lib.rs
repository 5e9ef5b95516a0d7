#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fallback resolver that anchors every cell on an already-resolved neighbour.
//!
//! Generated code never computes absolute positions from scratch. Each cell
//! takes one unit step from a neighbour that was resolved before it, which is
//! either the origin (for cells touching it) or a strictly closer cell. The
//! distance ordering of the topology guarantees such a neighbour exists.

use pathtable_core::{Anchor, GenerationError, Offset, PositionResolution, Topology};

/// Closest already-initialised offset to resolve `offset` from.
///
/// Returns the origin for cells within the seed distance and otherwise the
/// first neighbour, in scan order, that is strictly closer to the origin.
pub fn nearest_initialized(offset: Offset) -> Result<Offset, GenerationError> {
    if offset.is_seed() {
        return Ok(Offset::ORIGIN);
    }

    let distance = offset.squared_distance();
    offset
        .neighbors()
        .find(|neighbor| neighbor.squared_distance() < distance)
        .ok_or(GenerationError::NoInitializedNeighbor { offset })
}

/// Position resolutions for every cell of the topology, in topology order.
pub fn resolve(topology: &Topology) -> Result<Vec<PositionResolution>, GenerationError> {
    let mut resolutions = Vec::with_capacity(topology.len());

    for (cell, offset) in topology.iter() {
        let anchor_offset = nearest_initialized(offset)?;
        let step = anchor_offset
            .direction_to(offset)
            .ok_or(GenerationError::NoInitializedNeighbor { offset })?;

        let anchor = if anchor_offset.is_origin() {
            Anchor::Origin
        } else {
            let anchor_cell = topology.require(anchor_offset)?;
            if anchor_cell >= cell {
                return Err(GenerationError::AnchorNotResolved {
                    cell: offset,
                    anchor: anchor_offset,
                });
            }
            Anchor::Cell(anchor_cell)
        };

        resolutions.push(PositionResolution { cell, anchor, step });
    }

    Ok(resolutions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathtable_core::Direction;
    use pathtable_system_topology::enumerate;
    use proptest::prelude::*;

    #[test]
    fn seeds_resolve_from_origin() {
        for x in -1..=1 {
            for y in -1..=1 {
                let offset = Offset::new(x, y);
                if offset.is_origin() {
                    continue;
                }
                assert_eq!(nearest_initialized(offset), Ok(Offset::ORIGIN));
            }
        }
    }

    #[test]
    fn first_closer_neighbour_wins() {
        assert_eq!(nearest_initialized(Offset::new(2, 2)), Ok(Offset::new(1, 1)));
        assert_eq!(nearest_initialized(Offset::new(0, 2)), Ok(Offset::new(-1, 1)));
        assert_eq!(nearest_initialized(Offset::new(-3, 0)), Ok(Offset::new(-2, -1)));
    }

    #[test]
    fn resolutions_step_from_earlier_cells() {
        let topology = Topology::from_offsets(8, enumerate(8)).expect("valid topology");
        let resolutions = resolve(&topology).expect("resolutions compile");

        assert_eq!(resolutions.len(), topology.len());
        for resolution in &resolutions {
            let offset = topology.offset(resolution.cell).expect("cell exists");
            let anchor = match resolution.anchor {
                Anchor::Origin => Offset::ORIGIN,
                Anchor::Cell(anchor) => {
                    assert!(anchor < resolution.cell);
                    topology.offset(anchor).expect("anchor exists")
                }
            };
            assert_eq!(anchor.step(resolution.step), offset);
            assert_ne!(resolution.step, Direction::Center);
        }
    }

    proptest! {
        #[test]
        fn far_cells_resolve_from_closer_neighbours(x in -40i32..40, y in -40i32..40) {
            let offset = Offset::new(x, y);
            prop_assume!(!offset.is_seed());

            let anchor = nearest_initialized(offset).expect("closer neighbour exists");
            prop_assert!(anchor.squared_distance() < offset.squared_distance());
            prop_assert!(offset.direction_to(anchor).is_some());
        }
    }
}
