//! Area eligibility filtering
//!
//! Second pipeline stage: aggregate the classified samples per sub-area and
//! decide which areas can be estimated. An area qualifies only when every
//! informative sample in it is Not Detected — a mixed area cannot be
//! attributed unambiguously to a clean prevalence estimate, and a
//! positive-only area contributes no negative-test information.

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::error::{PrevalenceError, Result};
use crate::models::{EligibleArea, SampleRecord, TestResult};

/// Outcome of the eligibility filter, including the exclusion events the
/// caller reports in the run narrative.
#[derive(Debug, Clone)]
pub struct EligibilityOutcome {
    /// Areas that qualify for estimation, ordered by sub-area id
    pub eligible: Vec<EligibleArea>,
    /// Areas excluded for showing both Detected and Not Detected samples
    pub mixed_excluded: Vec<String>,
    /// Areas dropped for showing only Detected samples
    pub positive_only: Vec<String>,
    /// Number of records skipped for missing a sub-area id
    pub missing_area_records: usize,
}

/// Aggregate classified samples by sub-area and apply the eligibility rules.
///
/// Records without a sub-area id are excluded before grouping.
///
/// # Errors
/// `NoHealthyAreas` when no area qualifies for estimation.
pub fn filter_eligible_areas(records: &[SampleRecord]) -> Result<EligibilityOutcome> {
    let missing_area_records = records.iter().filter(|r| r.sub_area_id.is_none()).count();
    if missing_area_records > 0 {
        log::warn!("Skipping {missing_area_records} samples with no sub-area id");
    }

    // (sub_area_id, result) -> count; BTreeMap keeps the area order stable
    let mut counts: BTreeMap<(&str, TestResult), u64> = BTreeMap::new();
    for record in records {
        if let Some(area) = record.sub_area_id.as_deref() {
            *counts.entry((area, record.result)).or_insert(0) += 1;
        }
    }

    let mut eligible = Vec::new();
    let mut mixed_excluded = Vec::new();
    let mut positive_only = Vec::new();

    for (area, group) in &counts.iter().chunk_by(|((area, _), _)| *area) {
        let group: Vec<_> = group.collect();
        if group.len() > 1 {
            mixed_excluded.push(area.to_string());
            continue;
        }
        let ((_, result), &count) = group[0];
        match result {
            TestResult::NotDetected if count > 0 => eligible.push(EligibleArea {
                sub_area_id: area.to_string(),
                negatives: count,
            }),
            _ => positive_only.push(area.to_string()),
        }
    }

    log::info!(
        "Eligibility: {} eligible, {} mixed-status excluded, {} positive-only dropped",
        eligible.len(),
        mixed_excluded.len(),
        positive_only.len()
    );

    if eligible.is_empty() {
        return Err(PrevalenceError::NoHealthyAreas);
    }

    Ok(EligibilityOutcome {
        eligible,
        mixed_excluded,
        positive_only,
        missing_area_records,
    })
}
