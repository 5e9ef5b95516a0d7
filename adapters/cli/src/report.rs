use std::fmt;

use pathtable_core::{CompiledPathfinder, ScheduleStats};
use serde::Serialize;

/// Size summary of a compiled pathfinder, printed by `pathtable inspect`.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub(crate) struct Report {
    radius: u32,
    #[serde(flatten)]
    stats: ScheduleStats,
    columns: usize,
    clamp_steps: u32,
}

impl Report {
    pub(crate) fn from_compiled(compiled: &CompiledPathfinder) -> Self {
        Self {
            radius: compiled.radius().get(),
            stats: compiled.schedule().stats(),
            columns: compiled.table().columns().len(),
            clamp_steps: compiled.clamp_steps(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "radius:                  {} r^2", self.radius)?;
        writeln!(f, "cells:                   {}", self.stats.cells)?;
        writeln!(f, "seeds:                   {}", self.stats.seeds)?;
        writeln!(f, "initial checks:          {}", self.stats.initial_checks)?;
        writeln!(f, "checks per extra round:  {}", self.stats.round_checks)?;
        writeln!(f, "table columns:           {}", self.columns)?;
        write!(f, "clamp steps:             {}", self.clamp_steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_summarises_radius_twenty() {
        let compiled = pathtable_system_compiler::compile(20).expect("radius 20 compiles");
        let report = Report::from_compiled(&compiled);

        assert_eq!(report.stats.cells, 68);
        assert_eq!(report.stats.seeds, 8);
        assert_eq!(report.stats.initial_checks, 204);
        assert_eq!(report.stats.round_checks, 360);
        assert_eq!(report.columns, 9);
        assert_eq!(report.clamp_steps, 7);
        assert!(report.to_string().contains("cells:                   68"));
    }
}
