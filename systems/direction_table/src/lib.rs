#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Direction table compiler mapping relative targets onto cell records.

use pathtable_core::{DirectionTable, GenerationError, Topology};

/// Groups the topology by `dx`, then `dy`, into a lookup table.
///
/// Every entry points at the cell whose best direction answers a target at
/// that offset; the table carries no directions of its own, so it always
/// agrees with the relaxation run that filled the cell records.
pub fn compile_table(topology: &Topology) -> Result<DirectionTable, GenerationError> {
    if topology.is_empty() {
        return Err(GenerationError::EmptyTopology {
            radius: topology.radius(),
        });
    }

    let mut table = DirectionTable::new();
    for (cell, offset) in topology.iter() {
        if table.insert(offset, cell).is_some() {
            return Err(GenerationError::DuplicateOffset { offset });
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathtable_core::{CellIndex, Offset};
    use pathtable_system_topology::enumerate;

    #[test]
    fn every_cell_is_reachable_through_the_table() {
        let topology = Topology::from_offsets(20, enumerate(20)).expect("valid topology");
        let table = compile_table(&topology).expect("table compiles");

        assert_eq!(table.len(), topology.len());
        for (cell, offset) in topology.iter() {
            assert_eq!(table.lookup(offset.x(), offset.y()), Some(cell));
        }
    }

    #[test]
    fn origin_and_outside_offsets_miss() {
        let topology = Topology::from_offsets(8, enumerate(8)).expect("valid topology");
        let table = compile_table(&topology).expect("table compiles");

        assert_eq!(table.lookup(0, 0), None);
        assert_eq!(table.lookup(3, 0), None);
        assert_eq!(table.lookup(2, 2), topology.index_of(Offset::new(2, 2)));
    }

    #[test]
    fn columns_follow_first_appearance() {
        let topology = Topology::from_offsets(1, enumerate(1)).expect("valid topology");
        let table = compile_table(&topology).expect("table compiles");

        let columns: Vec<i32> = table.columns().keys().copied().collect();
        assert_eq!(columns, vec![-1, 0, 1]);
        let middle: Vec<(i32, CellIndex)> = table.columns()[&0]
            .iter()
            .map(|(&dy, &cell)| (dy, cell))
            .collect();
        assert_eq!(middle, vec![(-1, CellIndex::new(1)), (1, CellIndex::new(2))]);
    }

    #[test]
    fn empty_topology_is_rejected() {
        let topology = Topology::from_offsets(0, Vec::new()).expect("empty topology is valid");
        assert_eq!(
            compile_table(&topology),
            Err(GenerationError::EmptyTopology { radius: 0 })
        );
    }
}
