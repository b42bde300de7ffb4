//! Estimation result and report models

use serde::Serialize;

/// A sub-area that passed the eligibility filter.
///
/// Exists only for areas whose informative samples are all Not Detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleArea {
    /// Sub-area identifier
    pub sub_area_id: String,
    /// Count of Not Detected samples, n
    pub negatives: u64,
}

/// Upper-bound estimates for one eligible sub-area.
///
/// All three bounds are prevalence fractions in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationResult {
    /// Sub-area identifier
    pub sub_area_id: String,
    /// Population size N used for the estimates
    pub population: u64,
    /// Negative sample count n
    pub negatives: u64,
    /// Bayesian upper bound
    pub bayes_upper: f64,
    /// Frequentist upper bound
    pub freq_upper: f64,
    /// Frequentist upper bound adjusted for test sensitivity
    pub freq_se_upper: f64,
}

/// One row of the final report, in warehouse exchange field names.
///
/// Areas that were ineligible for estimation keep their catalog attributes
/// and carry `None` in every estimate field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Sub-area display name from the catalog
    #[serde(rename = "SubAdminName")]
    pub sub_admin_name: String,
    /// Sub-area identifier from the catalog
    #[serde(rename = "SubAdminID")]
    pub sub_admin_id: String,
    /// Population size N, when the area was estimated
    #[serde(rename = "N")]
    pub population: Option<u64>,
    /// Negative sample count n, when the area was estimated
    #[serde(rename = "n")]
    pub negatives: Option<u64>,
    /// Bayesian upper bound
    #[serde(rename = "bayesUpper")]
    pub bayes_upper: Option<f64>,
    /// Frequentist upper bound
    #[serde(rename = "freqUpper")]
    pub freq_upper: Option<f64>,
    /// Sensitivity-adjusted frequentist upper bound
    #[serde(rename = "freqSeUpper")]
    pub freq_se_upper: Option<f64>,
}

impl ReportRow {
    /// Whether this row carries estimates.
    #[must_use]
    pub const fn is_estimated(&self) -> bool {
        self.bayes_upper.is_some()
    }
}

/// The final report: one row per catalog area, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Report {
    /// Report rows in catalog order
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Number of rows carrying estimates.
    #[must_use]
    pub fn estimated_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_estimated()).count()
    }
}
