//! Sub-administrative area catalog model

/// Canonical catalog entry for a sub-administrative area.
///
/// The catalog is the backbone the final report is joined against, so
/// excluded areas still appear (with empty estimates) in the output.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaRecord {
    /// Warehouse identifier for the sub-area
    pub id: String,
    /// Fully qualified name (e.g. "Tompkins County, New York")
    pub full_name: String,
    /// Short display name
    pub name: String,
    /// Land area in square meters
    pub land_area: f64,
}

impl AreaRecord {
    /// Land area in square kilometers, for density-to-population conversion.
    #[must_use]
    pub fn land_area_sq_km(&self) -> f64 {
        self.land_area / 1_000_000.0
    }
}
