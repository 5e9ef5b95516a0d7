use pathtable_core::{
    Anchor, CellRelaxation, CompiledPathfinder, Direction, InitialStep, STEP_COST,
};
use tracing::trace;

use crate::{CellTable, Host, Position, Predecessor, RuntimeError};

/// Reference executor for a compiled pathfinder.
///
/// Runs the schedule in the same order as the generated code: resolve every
/// position, sense validity and cost, seed and relax in topology order, then
/// sweep the extra rounds. Each invocation starts from a freshly allocated
/// [`CellTable`], so nothing carries over between ticks.
#[derive(Clone, Copy, Debug)]
pub struct Pathfinder<'compiled> {
    compiled: &'compiled CompiledPathfinder,
}

impl<'compiled> Pathfinder<'compiled> {
    /// Wraps a compiled pathfinder for execution.
    #[must_use]
    pub const fn new(compiled: &'compiled CompiledPathfinder) -> Self {
        Self { compiled }
    }

    /// Compiled artefacts being executed.
    #[must_use]
    pub const fn compiled(&self) -> &'compiled CompiledPathfinder {
        self.compiled
    }

    /// Direction the agent should move in to approach `target`.
    ///
    /// Returns `Center` when the agent already stands on the target or when no
    /// route to the (clamped) target was found.
    pub fn pathfind_towards<H>(
        &self,
        host: &H,
        target: Position,
        extra_rounds: u32,
    ) -> Result<Direction, RuntimeError>
    where
        H: Host + ?Sized,
    {
        let origin = host.location();
        if origin == target {
            return Ok(Direction::Center);
        }

        let target = self.clamp_target(origin, target);
        let table = self.relax(host, extra_rounds);
        let offset = target.offset_from(origin);
        let cell = self
            .compiled
            .table()
            .lookup(offset.x(), offset.y())
            .ok_or(RuntimeError::TargetOutsideWindow {
                dx: offset.x(),
                dy: offset.y(),
            })?;

        let direction = table.best_direction(cell).opposite();
        trace!(%origin, %target, ?direction, "pathfind_towards");
        Ok(direction)
    }

    /// Replaces a target outside the window with the last in-window position on
    /// the walk towards it.
    ///
    /// The walk is bounded by the compiled clamp step count, mirroring the
    /// unrolled steps of the generated code.
    #[must_use]
    pub fn clamp_target(&self, origin: Position, target: Position) -> Position {
        let radius = u64::from(self.compiled.radius().get());
        if origin.distance_squared_to(target) <= radius {
            return target;
        }

        let mut next = origin.add(origin.direction_to(target));
        let mut safe = next;
        for _ in 0..self.compiled.clamp_steps() {
            if origin.distance_squared_to(next) <= radius {
                safe = next;
                next = next.add(next.direction_to(target));
            }
        }
        safe
    }

    /// Runs initialisation and `extra_rounds` relaxation rounds for the host's
    /// current situation.
    pub fn relax<H>(&self, host: &H, extra_rounds: u32) -> CellTable
    where
        H: Host + ?Sized,
    {
        let schedule = self.compiled.schedule();
        let origin = host.location();
        let mut table = CellTable::with_len(self.compiled.topology().len());

        let mut resolved = vec![origin; table.len()];
        for resolution in schedule.resolutions() {
            let anchor = match resolution.anchor {
                Anchor::Origin => origin,
                Anchor::Cell(cell) => resolved[cell.get()],
            };
            resolved[resolution.cell.get()] = anchor.add(resolution.step);
        }

        for (index, position) in resolved.into_iter().enumerate() {
            if host.is_traversable(position) {
                table.positions[index] = Some(position);
                table.costs[index] = host.rubble(position).saturating_add(STEP_COST);
            }
        }

        for step in schedule.initialization() {
            match step {
                InitialStep::Seed {
                    cell,
                    toward_origin,
                } => {
                    let index = cell.get();
                    if table.positions[index].is_none() {
                        continue;
                    }
                    table.path_lengths[index] = table.costs[index].saturating_add(STEP_COST);
                    table.best[index] = *toward_origin;
                    table.predecessors[index] = Some(Predecessor::Origin);
                }
                InitialStep::Relax(relaxation) => relax_cell(&mut table, relaxation),
            }
        }

        for _ in 0..extra_rounds {
            for relaxation in schedule.extra_round() {
                relax_cell(&mut table, relaxation);
            }
        }

        table
    }
}

fn relax_cell(table: &mut CellTable, relaxation: &CellRelaxation) {
    let index = relaxation.cell.get();
    if table.positions[index].is_none() {
        return;
    }

    for &source in &relaxation.sources {
        let candidate = table.path_lengths[source.get()].saturating_add(table.costs[index]);
        if candidate < table.path_lengths[index] {
            table.path_lengths[index] = candidate;
            // Copied, never recomputed: the direction belongs to the route's first step.
            table.best[index] = table.best[source.get()];
            table.predecessors[index] = Some(Predecessor::Cell(source));
        }
    }
}
