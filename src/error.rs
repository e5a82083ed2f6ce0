//! Error types for diagram construction and clipping.

use thiserror::Error;

/// Errors raised while building or clipping a Voronoi diagram.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VoronoiError {
    /// Two sites coincide, so no bisector exists between them.
    #[error("degenerate input: sites {first} and {second} coincide")]
    DegenerateInput {
        /// Input index of the first site.
        first: usize,
        /// Input index of the second site.
        second: usize,
    },

    /// A diagram needs at least two sites.
    #[error("too few sites: need at least 2, got {count}")]
    TooFewSites {
        /// Number of sites supplied.
        count: usize,
    },

    /// A site coordinate is NaN or infinite.
    #[error("site {index} has a non-finite coordinate")]
    NonFiniteSite {
        /// Input index of the offending site.
        index: usize,
    },

    /// An unbounded edge does not meet the bound region.
    #[error("line {line} ({a}*x + {b}*y = {c}) does not intersect {bounds}")]
    UnexpectedTopology {
        /// Edge id of the offending line.
        line: usize,
        a: f64,
        b: f64,
        c: f64,
        /// Description of the bound region.
        bounds: String,
    },

    /// No single intersection of an edge with the bound region could be chosen.
    #[error("ambiguous bound intersection for line {line}: {reason}")]
    IntersectionAmbiguity {
        /// Edge id of the offending line.
        line: usize,
        reason: String,
    },

    /// A site inside the bound region lies in none of the extracted faces.
    #[error("site {site} lies in no face")]
    UnassignedSite {
        /// Input index of the site.
        site: usize,
    },
}

/// Result type for fallible diagram operations.
pub type Result<T> = std::result::Result<T, VoronoiError>;
