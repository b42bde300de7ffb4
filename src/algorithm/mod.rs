//! The estimation pipeline
//!
//! Stages run strictly in order: classification, area eligibility,
//! estimation, report assembly. Any dataset-level failure aborts the run;
//! narrative entries accumulated up to that point are kept so the caller can
//! still persist the audit trail.

pub mod assemble;
pub mod classify;
pub mod eligibility;
pub mod estimate;

use std::collections::HashMap;

use crate::config::Parameters;
use crate::error::Result;
use crate::models::{AreaRecord, DemographyRecord, Report, SampleRecord};
use crate::report::narrative::RunLog;

pub use assemble::assemble_report;
pub use classify::{ClassifiedSamples, classify_samples};
pub use eligibility::{EligibilityOutcome, filter_eligible_areas};
pub use estimate::{EstimationOutcome, estimate_areas, upper_bayes, upper_freq, upper_freq_se};

/// Run the full pipeline over one dataset.
///
/// The narrative log records the exclusion and eligibility events as the
/// stages progress; persisting it is the caller's responsibility.
///
/// # Errors
/// Propagates the dataset-level precondition failures of the individual
/// stages (see the crate error type); all of them abort the run.
pub fn run_pipeline(
    samples: Vec<SampleRecord>,
    catalog: &[AreaRecord],
    demography: &[DemographyRecord],
    params: &Parameters,
    log: &mut RunLog,
) -> Result<Report> {
    let classified = classify_samples(samples)?;
    log.subheading("Sample classification");
    log.paragraph(format!(
        "{} samples with a detected result, {} with a not-detected result.",
        classified.detected, classified.not_detected
    ));

    let outcome = filter_eligible_areas(&classified.records)?;
    log.subheading("Sub-area eligibility");
    if outcome.missing_area_records > 0 {
        log.paragraph(format!(
            "{} samples had no sub-administrative area and were not used.",
            outcome.missing_area_records
        ));
    }
    for area in &outcome.mixed_excluded {
        log.paragraph(format!(
            "Sub-area {area} was excluded: both detected and not-detected results are present."
        ));
    }
    for area in &outcome.positive_only {
        log.paragraph(format!(
            "Sub-area {area} was not estimated: only detected results are present."
        ));
    }
    log.paragraph(format!(
        "{} sub-areas are eligible for estimation.",
        outcome.eligible.len()
    ));

    let populations: HashMap<String, u64> = demography
        .iter()
        .map(|d| (d.sub_area_id.clone(), d.population))
        .collect();
    let estimation = estimate_areas(&outcome.eligible, &populations, params)?;
    for area in &estimation.missing_demography {
        log.paragraph(format!(
            "Sub-area {area} was not estimated: no population count is available."
        ));
    }
    log.paragraph(format!(
        "Upper-bound prevalence estimated for {} sub-areas at confidence {:.3} and sensitivity {:.3}.",
        estimation.results.len(),
        params.confidence(),
        params.sensitivity
    ));

    Ok(assemble_report(catalog, &estimation.results))
}
