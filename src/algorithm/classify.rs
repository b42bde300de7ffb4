//! Record classification
//!
//! First pipeline stage: label every sample by its test result category and
//! keep only the informative ones (Detected / Not Detected). The dataset-level
//! preconditions of the estimator are checked here, before any per-area work.

use crate::error::{PrevalenceError, Result};
use crate::models::{SampleRecord, TestResult};

/// Samples that survived classification, with per-category counts.
#[derive(Debug, Clone)]
pub struct ClassifiedSamples {
    /// Records with an informative result category
    pub records: Vec<SampleRecord>,
    /// Number of Detected records retained
    pub detected: usize,
    /// Number of Not Detected records retained
    pub not_detected: usize,
}

/// Filter samples to the informative result categories.
///
/// Non-informative categories (Inconclusive, Pending, Not Tested) are
/// silently dropped; they carry no signal for the estimator.
///
/// # Errors
/// - `EmptyDataset` when `samples` is empty
/// - `NoNegativeTests` when Detected records exist but no Not Detected
/// - `NoEligibleRecords` when filtering leaves no records at all
pub fn classify_samples(samples: Vec<SampleRecord>) -> Result<ClassifiedSamples> {
    if samples.is_empty() {
        return Err(PrevalenceError::EmptyDataset);
    }
    let total = samples.len();

    let records: Vec<SampleRecord> = samples
        .into_iter()
        .filter(|s| s.result.is_informative())
        .collect();

    let detected = records
        .iter()
        .filter(|s| s.result == TestResult::Detected)
        .count();
    let not_detected = records.len() - detected;

    log::info!(
        "Classified {total} samples: {detected} detected, {not_detected} not detected, {} dropped as non-informative",
        total - records.len()
    );

    if records.is_empty() {
        return Err(PrevalenceError::NoEligibleRecords);
    }
    if not_detected == 0 {
        return Err(PrevalenceError::NoNegativeTests { detected });
    }

    Ok(ClassifiedSamples {
        records,
        detected,
        not_detected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str, result: TestResult) -> SampleRecord {
        SampleRecord::new(id, result, Some("area-1".to_string()))
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = classify_samples(Vec::new()).unwrap_err();
        assert!(matches!(err, PrevalenceError::EmptyDataset));
    }

    #[test]
    fn non_informative_categories_are_dropped() {
        let classified = classify_samples(vec![
            sample("1", TestResult::NotDetected),
            sample("2", TestResult::Pending),
            sample("3", TestResult::Inconclusive),
            sample("4", TestResult::NotTested),
        ])
        .unwrap();
        assert_eq!(classified.records.len(), 1);
        assert_eq!(classified.not_detected, 1);
        assert_eq!(classified.detected, 0);
    }

    #[test]
    fn positives_only_is_rejected() {
        let err = classify_samples(vec![
            sample("1", TestResult::Detected),
            sample("2", TestResult::Detected),
            sample("3", TestResult::Pending),
        ])
        .unwrap_err();
        assert!(matches!(err, PrevalenceError::NoNegativeTests { detected: 2 }));
    }

    #[test]
    fn nothing_informative_is_rejected() {
        let err = classify_samples(vec![
            sample("1", TestResult::Pending),
            sample("2", TestResult::NotTested),
        ])
        .unwrap_err();
        assert!(matches!(err, PrevalenceError::NoEligibleRecords));
    }

    #[test]
    fn mixed_informative_records_pass() {
        let classified = classify_samples(vec![
            sample("1", TestResult::Detected),
            sample("2", TestResult::NotDetected),
            sample("3", TestResult::NotDetected),
        ])
        .unwrap();
        assert_eq!(classified.detected, 1);
        assert_eq!(classified.not_detected, 2);
        assert_eq!(classified.records.len(), 3);
    }
}
