//! Demography model

/// Population size for one sub-administrative area.
///
/// One record per area after ingestion has summed the warehouse demography
/// entries (and converted density metrics to counts). For any area entering
/// estimation the population must exceed the sample count; the estimation
/// driver guards against `population <= n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemographyRecord {
    /// Sub-area the population count applies to
    pub sub_area_id: String,
    /// Total population size N
    pub population: u64,
}
