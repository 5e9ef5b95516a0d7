use thiserror::Error;

use crate::Offset;

/// Failures that abort code generation.
///
/// Every variant describes a defect in the inputs or in the generator itself;
/// none of them can be recovered from by emitting partial output.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The requested radius leaves no cells to build a table from.
    #[error("radius {radius} produces an empty topology")]
    EmptyTopology {
        /// Squared radius that was requested.
        radius: u32,
    },
    /// The requested radius does not cover every neighbour of the origin.
    #[error("radius {radius} is below the supported minimum of {minimum}")]
    RadiusTooSmall {
        /// Squared radius that was requested.
        radius: u32,
        /// Smallest supported squared radius.
        minimum: u32,
    },
    /// The requested radius exceeds the supported maximum.
    #[error("radius {radius} exceeds the supported maximum of {maximum}")]
    RadiusTooLarge {
        /// Squared radius that was requested.
        radius: u32,
        /// Largest supported squared radius.
        maximum: u32,
    },
    /// No neighbour closer to the origin exists to resolve a cell from.
    #[error("no neighbour of {offset} is closer to the origin")]
    NoInitializedNeighbor {
        /// Cell whose position could not be resolved.
        offset: Offset,
    },
    /// A cell was anchored on a cell that is resolved after it.
    #[error("{cell} is anchored on {anchor}, which is resolved later")]
    AnchorNotResolved {
        /// Cell whose position depends on the anchor.
        cell: Offset,
        /// Anchor that was not yet resolved.
        anchor: Offset,
    },
    /// A referenced offset is not part of the topology.
    #[error("{offset} is not part of the topology")]
    MissingCell {
        /// Offset that could not be found.
        offset: Offset,
    },
    /// Two consecutive topology entries break the distance ordering.
    #[error("{next} follows {previous} but is closer to the origin")]
    TopologyOutOfOrder {
        /// Entry preceding the violation.
        previous: Offset,
        /// Entry that broke the ordering.
        next: Offset,
    },
    /// The origin appeared among the topology entries.
    #[error("the origin cannot be part of the topology")]
    OriginInTopology,
    /// A topology entry lies outside the requested radius.
    #[error("{offset} lies outside radius {radius}")]
    OutsideRadius {
        /// Offending entry.
        offset: Offset,
        /// Squared radius of the topology.
        radius: u32,
    },
    /// An offset was listed more than once.
    #[error("{offset} appears more than once")]
    DuplicateOffset {
        /// Repeated offset.
        offset: Offset,
    },
}
