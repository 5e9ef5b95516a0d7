#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Topology enumerator that lists the cells of a visibility window.

use pathtable_core::{GenerationError, Offset, Radius, Topology};
use tracing::debug;

/// Lists every offset whose squared distance lies in `1..=radius`.
///
/// Offsets are grouped in shells of equal squared distance, innermost shell
/// first; inside a shell they follow the scan order of `x` then `y`. The
/// origin is never part of the output and a radius of zero yields no cells.
#[must_use]
pub fn enumerate(radius: u32) -> Vec<Offset> {
    let mut offsets = Vec::new();

    for shell in 1..=radius {
        let reach = ceil_sqrt(shell);
        for x in -reach..=reach {
            for y in -reach..=reach {
                let offset = Offset::new(x, y);
                if offset.squared_distance() == shell {
                    offsets.push(offset);
                }
            }
        }
    }

    offsets
}

/// Builds the validated topology for a generation radius.
pub fn build(radius: Radius) -> Result<Topology, GenerationError> {
    let offsets = enumerate(radius.get());
    debug!(radius = radius.get(), cells = offsets.len(), "enumerated topology");
    Topology::from_offsets(radius.get(), offsets)
}

fn ceil_sqrt(value: u32) -> i32 {
    let mut root: u32 = 0;
    while root * root < value {
        root += 1;
    }
    i32::try_from(root).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil_sqrt_rounds_up() {
        assert_eq!(ceil_sqrt(0), 0);
        assert_eq!(ceil_sqrt(1), 1);
        assert_eq!(ceil_sqrt(2), 2);
        assert_eq!(ceil_sqrt(4), 2);
        assert_eq!(ceil_sqrt(5), 3);
    }

    #[test]
    fn radius_zero_is_empty() {
        assert!(enumerate(0).is_empty());
    }

    #[test]
    fn first_shell_follows_scan_order() {
        assert_eq!(
            enumerate(1),
            vec![
                Offset::new(-1, 0),
                Offset::new(0, -1),
                Offset::new(0, 1),
                Offset::new(1, 0),
            ]
        );
    }
}
