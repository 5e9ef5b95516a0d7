#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Generation pipeline that turns a visibility radius into a compiled pathfinder.

use pathtable_core::{CompiledPathfinder, GenerationError, Radius};
use pathtable_system_direction_table::compile_table;
use pathtable_system_relaxation::compile_schedule;
use tracing::info;

/// Runs every generation system for the provided squared radius.
///
/// Any failure aborts the whole pipeline; callers never observe a partially
/// compiled pathfinder.
pub fn compile(radius: u32) -> Result<CompiledPathfinder, GenerationError> {
    let radius = Radius::new(radius)?;
    let topology = pathtable_system_topology::build(radius)?;
    let schedule = compile_schedule(&topology)?;
    let table = compile_table(&topology)?;
    let clamp_steps = clamp_steps(radius);

    info!(
        radius = radius.get(),
        cells = topology.len(),
        table_entries = table.len(),
        clamp_steps,
        "compiled pathfinder"
    );

    Ok(CompiledPathfinder::new(
        radius,
        topology,
        schedule,
        table,
        clamp_steps,
    ))
}

/// Unrolled steps needed to walk an out-of-window target back inside.
///
/// Every step toward the target grows `|x| + |y|` by at least one, and no cell
/// inside the window has `|x| + |y|` above `sqrt(2R)`, so the walk leaves the
/// window within `floor(sqrt(2R)) + 1` steps.
#[must_use]
pub fn clamp_steps(radius: Radius) -> u32 {
    let bound = radius.get().saturating_mul(2);
    let mut root: u32 = 0;
    while (root + 1) * (root + 1) <= bound {
        root += 1;
    }
    root + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_steps_cover_the_window_diagonal() {
        assert_eq!(clamp_steps(Radius::new(2).expect("valid radius")), 3);
        assert_eq!(clamp_steps(Radius::new(8).expect("valid radius")), 5);
        assert_eq!(clamp_steps(Radius::new(20).expect("valid radius")), 7);
    }
}
