//! A Rust library for estimating an upper bound on undetected disease
//! prevalence from negative surveillance samples, per geographic sub-area.
//!
//! The pipeline classifies sample records, filters sub-areas to those whose
//! informative samples are all negative, runs three upper-bound estimators
//! (Bayesian, frequentist, frequentist with test sensitivity) and assembles
//! a report covering the full sub-area catalog.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod report;
pub mod stats;

// Re-export the most common types for easier use
// Core types
pub use config::{ExchangeDirs, Parameters};
pub use error::{PrevalenceError, Result};
pub use models::{
    AreaRecord, DemographyRecord, EligibleArea, EstimationResult, Report, ReportRow, SampleRecord,
    TestResult,
};

// Pipeline stages
pub use algorithm::{
    assemble_report, classify_samples, estimate_areas, filter_eligible_areas, run_pipeline,
};

// Estimators
pub use algorithm::{upper_bayes, upper_freq, upper_freq_se};

// Run outputs
pub use report::{Attachment, AttachmentRole, RunLog};
