//! Sample record model

use crate::models::TestResult;

/// A single diagnostic sample from the surveillance warehouse.
///
/// Immutable once read; only `result` and `sub_area_id` are used by the
/// estimation pipeline, the remaining fields are carried for audit output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRecord {
    /// Warehouse identifier for the sample
    pub id: String,
    /// Species the sample was taken from
    pub species: Option<String>,
    /// How the sample was obtained (e.g. hunter-harvested, clinical)
    pub source: Option<String>,
    /// Surveillance season-year the sample belongs to
    pub season_year: Option<String>,
    /// Age group of the sampled animal
    pub age: Option<String>,
    /// Sex of the sampled animal
    pub sex: Option<String>,
    /// Definitive diagnostic test outcome
    pub result: TestResult,
    /// Sub-administrative area the sample was collected in, when known
    pub sub_area_id: Option<String>,
}

impl SampleRecord {
    /// Create a minimal record carrying only the fields the pipeline reads.
    #[must_use]
    pub fn new(id: impl Into<String>, result: TestResult, sub_area_id: Option<String>) -> Self {
        Self {
            id: id.into(),
            species: None,
            source: None,
            season_year: None,
            age: None,
            sex: None,
            result,
            sub_area_id,
        }
    }
}
