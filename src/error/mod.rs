//! Error handling for the prevalence estimator.

use std::io;

/// Specialized error type for the estimation pipeline.
///
/// The first five variants are dataset-level preconditions: any one of them
/// aborts the whole run before (or during) estimation. Each carries a
/// distinct process exit code so the pipeline orchestrator can tell the
/// conditions apart.
#[derive(Debug, thiserror::Error)]
pub enum PrevalenceError {
    /// The sample file contained no records at all
    #[error("the sample dataset contains no records")]
    EmptyDataset,

    /// Only positive results are present; the estimator premise requires
    /// at least one negative test
    #[error("no negative test results are present ({detected} detected, 0 not detected)")]
    NoNegativeTests {
        /// Number of Detected records observed
        detected: usize,
    },

    /// Filtering to informative result categories left nothing
    #[error("no records remain after filtering to informative result categories")]
    NoEligibleRecords,

    /// Every sub-area is mixed-status or positive-only
    #[error("no sub-area qualifies for estimation (all are mixed-status or positive-only)")]
    NoHealthyAreas,

    /// A per-area numeric search failed to converge within valid bounds
    #[error(
        "degenerate input for sub-area {sub_area_id}: search failed to converge \
         (n = {negatives}, N = {population})"
    )]
    DegenerateInput {
        /// Sub-area the search was running for
        sub_area_id: String,
        /// Negative test count n
        negatives: u64,
        /// Population size N
        population: u64,
    },

    /// A run parameter is outside its valid domain
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error opening or reading an exchange file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing an exchange file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PrevalenceError {
    /// Process exit code for this failure.
    ///
    /// Dataset preconditions get stable, distinguishing codes; ambient
    /// failures (IO, parse, parameters) share the generic code 1.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::EmptyDataset => 2,
            Self::NoNegativeTests { .. } => 3,
            Self::NoEligibleRecords => 4,
            Self::NoHealthyAreas => 5,
            Self::DegenerateInput { .. } => 6,
            Self::InvalidParameter(_) | Self::Io(_) | Self::Json(_) => 1,
        }
    }
}

/// Result type for estimation pipeline operations
pub type Result<T> = std::result::Result<T, PrevalenceError>;
