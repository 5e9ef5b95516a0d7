use serde::{Deserialize, Serialize};

use crate::{CellIndex, Direction};

/// Cell whose already-resolved position anchors another cell's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// The agent's own position.
    Origin,
    /// A cell resolved earlier in the same invocation.
    Cell(CellIndex),
}

/// Instruction resolving a cell's absolute position from its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PositionResolution {
    /// Cell being resolved.
    pub cell: CellIndex,
    /// Position the step starts from.
    pub anchor: Anchor,
    /// Unit step leading from the anchor to the cell.
    pub step: Direction,
}

/// Pairwise relaxation of one cell against an ordered list of sources.
///
/// Sources are visited in order and a source is adopted only when it strictly
/// improves the cell's current path length. On adoption the cell copies the
/// source's best direction instead of deriving one from the source's
/// position: the direction describes the first step of the whole route, so it
/// has to travel unchanged along the chain of relaxations back to the seed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellRelaxation {
    /// Cell whose estimate may improve.
    pub cell: CellIndex,
    /// Neighbours offered as predecessors, in scan order.
    pub sources: Vec<CellIndex>,
}

/// One step of the initialisation pass.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum InitialStep {
    /// Cell adjacent to the origin, initialised in closed form.
    Seed {
        /// Seeded cell.
        cell: CellIndex,
        /// Unit direction from the cell back to the origin.
        toward_origin: Direction,
    },
    /// Cell further out, relaxed against strictly closer neighbours.
    Relax(CellRelaxation),
}

impl InitialStep {
    /// Cell written by this step.
    #[must_use]
    pub fn cell(&self) -> CellIndex {
        match self {
            Self::Seed { cell, .. } => *cell,
            Self::Relax(relaxation) => relaxation.cell,
        }
    }
}

/// Straight-line relaxation program executed on every invocation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RelaxationSchedule {
    resolutions: Vec<PositionResolution>,
    initialization: Vec<InitialStep>,
    extra_round: Vec<CellRelaxation>,
}

impl RelaxationSchedule {
    /// Assembles a schedule from its three phases.
    #[must_use]
    pub fn new(
        resolutions: Vec<PositionResolution>,
        initialization: Vec<InitialStep>,
        extra_round: Vec<CellRelaxation>,
    ) -> Self {
        Self {
            resolutions,
            initialization,
            extra_round,
        }
    }

    /// Position resolutions in topology order.
    #[must_use]
    pub fn resolutions(&self) -> &[PositionResolution] {
        &self.resolutions
    }

    /// Seeds and relaxations of the initialisation pass in topology order.
    #[must_use]
    pub fn initialization(&self) -> &[InitialStep] {
        &self.initialization
    }

    /// Body of one extra relaxation round.
    #[must_use]
    pub fn extra_round(&self) -> &[CellRelaxation] {
        &self.extra_round
    }

    /// Counts describing the runtime cost of the schedule.
    #[must_use]
    pub fn stats(&self) -> ScheduleStats {
        let seeds = self
            .initialization
            .iter()
            .filter(|step| matches!(step, InitialStep::Seed { .. }))
            .count();
        let initial_checks = self
            .initialization
            .iter()
            .map(|step| match step {
                InitialStep::Seed { .. } => 0,
                InitialStep::Relax(relaxation) => relaxation.sources.len(),
            })
            .sum();
        let round_checks = self
            .extra_round
            .iter()
            .map(|relaxation| relaxation.sources.len())
            .sum();

        ScheduleStats {
            cells: self.resolutions.len(),
            seeds,
            initial_checks,
            round_checks,
        }
    }
}

/// Size of the emitted program, in pairwise checks per phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStats {
    /// Number of cell records.
    pub cells: usize,
    /// Cells initialised straight from the origin.
    pub seeds: usize,
    /// Pairwise relaxation checks performed by the initialisation pass.
    pub initial_checks: usize,
    /// Pairwise relaxation checks performed by every extra round.
    pub round_checks: usize,
}

impl ScheduleStats {
    /// Relaxation checks performed by an invocation with `extra_rounds` rounds.
    #[must_use]
    pub fn checks_for(&self, extra_rounds: u32) -> usize {
        let rounds = usize::try_from(extra_rounds).unwrap_or(usize::MAX);
        self.initial_checks
            .saturating_add(self.round_checks.saturating_mul(rounds))
    }
}
