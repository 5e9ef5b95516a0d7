use pathtable_core::{
    Anchor, CellRelaxation, CompiledPathfinder, InitialStep, Topology, STEP_COST, UNREACHED,
    UNSENSED_COST,
};
use pathtable_emitter::{EmitError, SourceEmitter};

use crate::names::direction_constant;

type Emit = Result<(), EmitError>;

const IMPORTS: [&str; 4] = [
    "battlecode.common.Direction",
    "battlecode.common.GameActionException",
    "battlecode.common.MapLocation",
    "battlecode.common.RobotController",
];

/// Writes the complete compilation unit for one radius.
pub(crate) fn emit_class(
    emitter: &mut SourceEmitter,
    compiled: &CompiledPathfinder,
    package: Option<&str>,
    class_name: &str,
) -> Emit {
    if let Some(package) = package {
        emitter.line(format!("package {package};"));
        emitter.blank();
    }

    emitter.lines(IMPORTS.iter().map(|import| format!("import {import};")));
    emitter.blank();

    emitter.block_comment([
        format!(
            "Pathfinding for a vision radius of {} using bounded Bellman-Ford relaxation.",
            compiled.radius()
        ),
        String::new(),
        "Generated by pathtable. Do not edit by hand.".to_owned(),
    ]);
    emitter.block(format!("public final class {class_name}"), |emitter| -> Emit {
        emit_constants(emitter, compiled);
        emitter.blank();
        emitter.enter_block(format!("private {class_name}()"));
        emitter.exit_block()?;
        emitter.blank();
        emit_pathfind_towards(emitter, compiled)?;
        emitter.blank();
        emit_best_direction(emitter, compiled)
    })
}

fn emit_constants(emitter: &mut SourceEmitter, compiled: &CompiledPathfinder) {
    emitter.comment("Cells inside the visibility window, in relaxation order.");
    emitter.line(format!(
        "private static final int CELLS = {};",
        compiled.topology().len()
    ));
    emitter.comment("Path length of a cell no route has reached yet.");
    emitter.line(format!("private static final int UNREACHED = {UNREACHED};"));
    emitter.comment("Cost assumed for cells that could not be sensed.");
    emitter.line(format!(
        "private static final int UNSENSED_COST = {UNSENSED_COST};"
    ));
    emitter.comment("Cost of a single step, added to the sensed rubble.");
    emitter.line(format!("private static final int STEP_COST = {STEP_COST};"));
}

fn emit_pathfind_towards(emitter: &mut SourceEmitter, compiled: &CompiledPathfinder) -> Emit {
    emitter.block_comment([
        "Direction to move in to approach {@code target}.",
        "",
        "@param rc          controller of the calling robot, its location is the origin",
        "@param target      location to approach, pulled into the window when out of range",
        "@param extraRounds relaxation rounds to run after initialisation",
        "@return the first step of the cheapest known route, CENTER when none is known",
        "@throws GameActionException when sensing a cell fails",
    ]);
    emitter.block(
        "public static Direction pathfindTowards(RobotController rc, MapLocation target, int extraRounds) throws GameActionException",
        |emitter| -> Emit {
            emitter.line("MapLocation origin = rc.getLocation();");
            emitter.block("if (origin.equals(target))", |emitter| -> Emit {
                emitter.line("return Direction.CENTER;");
                Ok(())
            })?;
            emitter.blank();

            emit_clamp(emitter, compiled)?;
            emitter.blank();

            emitter.lines([
                "MapLocation[] loc = new MapLocation[CELLS];",
                "int[] pathLength = new int[CELLS];",
                "int[] cost = new int[CELLS];",
                "Direction[] bestDir = new Direction[CELLS];",
            ]);
            emitter.blank();

            emit_resolutions(emitter, compiled);
            emitter.blank();
            emit_validity(emitter, compiled.topology())?;
            emit_initialization(emitter, compiled)?;

            emitter.comment("Further rounds refine routes around obstacles.");
            emitter.emit_loop("round", "extraRounds", |emitter| -> Emit {
                for relaxation in compiled.schedule().extra_round() {
                    emit_relaxation(emitter, compiled.topology(), relaxation)?;
                }
                Ok(())
            })?;
            emitter.blank();

            emitter.comment("The best direction points back into the origin, so move the other way.");
            emitter.line(
                "return bestDirection(target.x - origin.x, target.y - origin.y, bestDir).opposite();",
            );
            Ok(())
        },
    )
}

fn emit_clamp(emitter: &mut SourceEmitter, compiled: &CompiledPathfinder) -> Emit {
    let radius = compiled.radius().get();

    emitter.comment("Targets outside the window are replaced by the last position in range.");
    emitter.block(
        format!("if (origin.distanceSquaredTo(target) > {radius})"),
        |emitter| -> Emit {
            emitter.line("MapLocation next = origin.add(origin.directionTo(target));");
            emitter.line("MapLocation safe = next;");
            for _ in 0..compiled.clamp_steps() {
                emitter.block(
                    format!("if (origin.distanceSquaredTo(next) <= {radius})"),
                    |emitter| -> Emit {
                        emitter.line("safe = next;");
                        emitter.line("next = next.add(next.directionTo(target));");
                        Ok(())
                    },
                )?;
            }
            emitter.line("target = safe;");
            Ok(())
        },
    )
}

fn emit_resolutions(emitter: &mut SourceEmitter, compiled: &CompiledPathfinder) {
    emitter.comment("Resolve every position before any of them is invalidated.");
    for resolution in compiled.schedule().resolutions() {
        let anchor = match resolution.anchor {
            Anchor::Origin => "origin".to_owned(),
            Anchor::Cell(cell) => format!("loc[{cell}]"),
        };
        emitter.line(format!(
            "loc[{}] = {anchor}.add(Direction.{});",
            resolution.cell,
            direction_constant(resolution.step)
        ));
    }
}

fn emit_validity(emitter: &mut SourceEmitter, topology: &Topology) -> Emit {
    emitter.comment("Sense every cell; cells off the map or occupied drop out.");
    for (cell, offset) in topology.iter() {
        emitter.comment(format!("{offset}"));
        emitter.line(format!("pathLength[{cell}] = UNREACHED;"));
        emitter.line(format!("bestDir[{cell}] = Direction.CENTER;"));
        emitter.block(
            format!("if (rc.onTheMap(loc[{cell}]) && !rc.isLocationOccupied(loc[{cell}]))"),
            |emitter| -> Emit {
                emitter.line(format!(
                    "cost[{cell}] = rc.senseRubble(loc[{cell}]) + STEP_COST;"
                ));
                emitter.reopen_block("else")?;
                emitter.line(format!("cost[{cell}] = UNSENSED_COST;"));
                emitter.line(format!("loc[{cell}] = null;"));
                Ok(())
            },
        )?;
        emitter.blank();
    }
    Ok(())
}

fn emit_initialization(emitter: &mut SourceEmitter, compiled: &CompiledPathfinder) -> Emit {
    let topology = compiled.topology();

    emitter.comment("Initial pass: seed the ring around the origin, then relax outwards.");
    for step in compiled.schedule().initialization() {
        match step {
            InitialStep::Seed {
                cell,
                toward_origin,
            } => {
                if let Some(offset) = topology.offset(*cell) {
                    emitter.comment(format!("{offset} seed"));
                }
                emitter.block(format!("if (loc[{cell}] != null)"), |emitter| -> Emit {
                    emitter.line(format!("pathLength[{cell}] = cost[{cell}] + STEP_COST;"));
                    emitter.line(format!(
                        "bestDir[{cell}] = Direction.{};",
                        direction_constant(*toward_origin)
                    ));
                    Ok(())
                })?;
            }
            InitialStep::Relax(relaxation) => emit_relaxation(emitter, topology, relaxation)?,
        }
    }
    emitter.blank();
    Ok(())
}

fn emit_relaxation(
    emitter: &mut SourceEmitter,
    topology: &Topology,
    relaxation: &CellRelaxation,
) -> Emit {
    let cell = relaxation.cell;
    if let Some(offset) = topology.offset(cell) {
        emitter.comment(format!("{offset}"));
    }

    emitter.block(format!("if (loc[{cell}] != null)"), |emitter| -> Emit {
        for source in &relaxation.sources {
            emitter.block(
                format!("if (pathLength[{source}] + cost[{cell}] < pathLength[{cell}])"),
                |emitter| -> Emit {
                    emitter.line(format!(
                        "pathLength[{cell}] = pathLength[{source}] + cost[{cell}];"
                    ));
                    emitter.line(format!("bestDir[{cell}] = bestDir[{source}];"));
                    Ok(())
                },
            )?;
        }
        Ok(())
    })
}

fn emit_best_direction(emitter: &mut SourceEmitter, compiled: &CompiledPathfinder) -> Emit {
    emitter.block_comment([
        "Best direction stored for the cell at offset ({@code dx}, {@code dy}).",
        "",
        "@throws IllegalStateException when the offset lies outside the window",
    ]);
    emitter.block(
        "private static Direction bestDirection(int dx, int dy, Direction[] bestDir)",
        |emitter| -> Emit {
            emitter.block("switch (dx)", |emitter| -> Emit {
                for (dx, column) in compiled.table().columns() {
                    emitter.block(format!("case {dx}:"), |emitter| -> Emit {
                        emitter.block("switch (dy)", |emitter| -> Emit {
                            for (dy, cell) in column {
                                emitter.line(format!("case {dy}: return bestDir[{cell}];"));
                            }
                            Ok(())
                        })?;
                        emitter.line("break;");
                        Ok(())
                    })?;
                }
                Ok(())
            })?;
            emitter.line(
                "throw new IllegalStateException(\"offset (\" + dx + \",\" + dy + \") lies outside the visibility window\");",
            );
            Ok(())
        },
    )
}
