#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Java backend for compiled pathfinders.
//!
//! Renders a [`CompiledPathfinder`] as a single self-contained Java class for
//! the Battlecode runtime. The class exposes
//! `pathfindTowards(RobotController, MapLocation, int)`, keeps its cell
//! records in local arrays allocated on every call, and contains a single
//! runtime loop for the caller-selected extra relaxation rounds. Everything
//! else is straight-line code produced from the relaxation schedule.

use pathtable_core::{CompiledPathfinder, GenerationError, Radius};
use pathtable_emitter::{EmitError, SourceEmitter};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

mod class;
mod names;

/// Naming and presentation options for the generated class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JavaTarget {
    /// Package declaration, omitted when `None`.
    pub package: Option<String>,
    /// Class name, `BellmanFord{radius}` when `None`.
    pub class_name: Option<String>,
    /// Whether explanatory comments are emitted.
    pub comments: bool,
}

impl Default for JavaTarget {
    fn default() -> Self {
        Self {
            package: None,
            class_name: None,
            comments: true,
        }
    }
}

impl JavaTarget {
    /// Class name used for the provided radius.
    #[must_use]
    pub fn class_name_for(&self, radius: Radius) -> String {
        self.class_name
            .clone()
            .unwrap_or_else(|| format!("BellmanFord{}", radius.get()))
    }
}

/// Failures raised while rendering Java source.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The pathfinder could not be compiled.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The emitted blocks did not balance.
    #[error(transparent)]
    Emit(#[from] EmitError),
    /// The configured class name is not a Java identifier.
    #[error("`{name}` is not a valid Java class name")]
    InvalidClassName {
        /// Rejected class name.
        name: String,
    },
    /// The configured package is not a dotted sequence of Java identifiers.
    #[error("`{name}` is not a valid Java package name")]
    InvalidPackage {
        /// Rejected package name.
        name: String,
    },
}

/// Renders a compiled pathfinder as Java source.
pub fn render(compiled: &CompiledPathfinder, target: &JavaTarget) -> Result<String, RenderError> {
    let class_name = target.class_name_for(compiled.radius());
    if !names::is_identifier(&class_name) {
        return Err(RenderError::InvalidClassName { name: class_name });
    }
    if let Some(package) = &target.package {
        if !names::is_package(package) {
            return Err(RenderError::InvalidPackage {
                name: package.clone(),
            });
        }
    }

    let mut emitter = SourceEmitter::new();
    emitter.set_comments_enabled(target.comments);
    class::emit_class(
        &mut emitter,
        compiled,
        target.package.as_deref(),
        &class_name,
    )?;
    let source = emitter.finish()?;

    debug!(
        class = %class_name,
        bytes = source.len(),
        lines = source.lines().count(),
        "rendered java class"
    );
    Ok(source)
}

/// Compiles the pathfinder for `radius` and renders it as Java source.
///
/// Output is deterministic: the same radius and target always produce the
/// same text.
pub fn generate(radius: u32, target: &JavaTarget) -> Result<String, RenderError> {
    let compiled = pathtable_system_compiler::compile(radius)?;
    let stats = compiled.schedule().stats();
    info!(
        radius = %compiled.radius(),
        cells = stats.cells,
        initial_checks = stats.initial_checks,
        round_checks = stats.round_checks,
        "generating java pathfinder"
    );
    render(&compiled, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_class_name_carries_the_radius() {
        let radius = Radius::new(20).expect("radius 20 is valid");
        assert_eq!(JavaTarget::default().class_name_for(radius), "BellmanFord20");

        let target = JavaTarget {
            class_name: Some("Navigator".to_owned()),
            ..JavaTarget::default()
        };
        assert_eq!(target.class_name_for(radius), "Navigator");
    }

    #[test]
    fn invalid_names_are_rejected_before_emission() {
        let target = JavaTarget {
            class_name: Some("not valid".to_owned()),
            ..JavaTarget::default()
        };
        assert_eq!(
            generate(8, &target),
            Err(RenderError::InvalidClassName {
                name: "not valid".to_owned(),
            })
        );

        let target = JavaTarget {
            package: Some("bot..util".to_owned()),
            ..JavaTarget::default()
        };
        assert_eq!(
            generate(8, &target),
            Err(RenderError::InvalidPackage {
                name: "bot..util".to_owned(),
            })
        );
    }
}
