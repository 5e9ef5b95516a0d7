#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Relaxation schedule compiler that unrolls a bounded Bellman-Ford pass.
//!
//! The compiler never computes path lengths itself. It decides, for every
//! cell of the topology, which neighbours the generated code compares against
//! and in which order, producing a [`RelaxationSchedule`] that backends lower
//! into straight-line code.
//!
//! The schedule has two phases. The initialisation pass walks the topology in
//! distance order: cells next to the origin are seeded in closed form and
//! every other cell is relaxed against neighbours that are strictly closer and
//! therefore already final for this pass. On an unobstructed grid that single
//! pass is already optimal. The extra round is the body of the one runtime
//! loop; it re-relaxes every non-seed cell against all non-seed neighbours
//! inside the window so that detours around obstacles can be found.

use pathtable_core::{
    CellIndex, CellRelaxation, GenerationError, InitialStep, Offset, RelaxationSchedule, Topology,
};
use pathtable_system_fallback::resolve;
use tracing::debug;

/// Compiles the full schedule: position resolutions, initialisation and one extra round.
pub fn compile_schedule(topology: &Topology) -> Result<RelaxationSchedule, GenerationError> {
    let resolutions = resolve(topology)?;
    let initialization = compile_initialization(topology)?;
    let extra_round = compile_extra_round(topology)?;
    let schedule = RelaxationSchedule::new(resolutions, initialization, extra_round);

    let stats = schedule.stats();
    debug!(
        cells = stats.cells,
        seeds = stats.seeds,
        initial_checks = stats.initial_checks,
        round_checks = stats.round_checks,
        "compiled relaxation schedule"
    );

    Ok(schedule)
}

/// Compiles the initialisation pass in topology order.
pub fn compile_initialization(topology: &Topology) -> Result<Vec<InitialStep>, GenerationError> {
    let mut steps = Vec::with_capacity(topology.len());

    for (cell, offset) in topology.iter() {
        if offset.is_seed() {
            let toward_origin = offset
                .direction_to(Offset::ORIGIN)
                .ok_or(GenerationError::NoInitializedNeighbor { offset })?;
            steps.push(InitialStep::Seed {
                cell,
                toward_origin,
            });
            continue;
        }

        let distance = offset.squared_distance();
        let sources = sources_where(topology, offset, |neighbor| {
            neighbor.squared_distance() < distance
        })?;
        if sources.is_empty() {
            return Err(GenerationError::NoInitializedNeighbor { offset });
        }

        steps.push(InitialStep::Relax(CellRelaxation { cell, sources }));
    }

    Ok(steps)
}

/// Compiles the body of one extra relaxation round.
///
/// Seeded cells are skipped both as targets and as sources: their estimate is
/// final after initialisation, where it was already offered to every cell
/// that touches them.
pub fn compile_extra_round(topology: &Topology) -> Result<Vec<CellRelaxation>, GenerationError> {
    let radius = topology.radius();
    let mut round = Vec::new();

    for (cell, offset) in topology.iter() {
        if offset.is_seed() {
            continue;
        }

        let sources = sources_where(topology, offset, |neighbor| {
            !neighbor.is_seed() && neighbor.squared_distance() <= radius
        })?;
        if sources.is_empty() {
            continue;
        }

        round.push(CellRelaxation { cell, sources });
    }

    Ok(round)
}

fn sources_where<P>(
    topology: &Topology,
    offset: Offset,
    mut accept: P,
) -> Result<Vec<CellIndex>, GenerationError>
where
    P: FnMut(Offset) -> bool,
{
    let mut sources = Vec::with_capacity(8);
    for neighbor in offset.neighbors() {
        if !accept(neighbor) {
            continue;
        }
        sources.push(topology.require(neighbor)?);
    }
    Ok(sources)
}
