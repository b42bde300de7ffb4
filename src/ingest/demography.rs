//! Demography processing
//!
//! The warehouse exports one demography entry per (species, metric,
//! season-year), each carrying a map of sub-area id to value. Density
//! metrics are converted to total population using the catalog land area,
//! then all entries are summed into a single population count per sub-area.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::models::{AreaRecord, DemographyRecord};

/// Metric label the warehouse uses for deer per square kilometer.
const DENSITY_METRIC: &str = "deer density";

#[derive(Debug, Deserialize)]
struct RawDemography {
    species: Option<String>,
    metric: Option<String>,
    season_year: Option<serde_json::Value>,
    data: HashMap<String, f64>,
}

/// Demography records plus the metric descriptions used in the narrative.
#[derive(Debug, Clone)]
pub struct DemographyData {
    /// One population count per sub-area, ordered by sub-area id
    pub records: Vec<DemographyRecord>,
    /// Human-readable description of each demography entry that was used
    pub metrics: Vec<String>,
}

/// Load demography from its NDJSON export and reduce it to one population
/// count per sub-area.
///
/// Density values are deer per square kilometer while the catalog land area
/// is in square meters; each density value is converted to a count against
/// its area before summation.
pub fn load_demography(path: &Path, catalog: &[AreaRecord]) -> Result<DemographyData> {
    let raw: Vec<RawDemography> = super::read_ndjson(path)?;
    let land_by_area: HashMap<&str, f64> = catalog
        .iter()
        .map(|a| (a.id.as_str(), a.land_area_sq_km()))
        .collect();

    let mut totals: HashMap<String, f64> = HashMap::new();
    let mut metrics = Vec::new();
    for entry in raw {
        let is_density = entry.metric.as_deref() == Some(DENSITY_METRIC);
        for (area_id, value) in &entry.data {
            let contribution = if is_density {
                match land_by_area.get(area_id.as_str()) {
                    Some(sq_km) => (value * sq_km).round(),
                    None => {
                        log::warn!(
                            "Density value for unknown sub-area {area_id}; no land area to convert against"
                        );
                        continue;
                    }
                }
            } else {
                *value
            };
            *totals.entry(area_id.clone()).or_insert(0.0) += contribution;
        }

        let metric = if is_density {
            "total population (converted from density)".to_string()
        } else {
            entry.metric.unwrap_or_else(|| "unknown metric".to_string())
        };
        let season_year = entry
            .season_year
            .map_or_else(|| "unknown".to_string(), |v| match v {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            });
        metrics.push(format!(
            "{} {metric} for season-year {season_year}",
            entry.species.unwrap_or_else(|| "unknown species".to_string())
        ));
    }

    let mut records: Vec<DemographyRecord> = totals
        .into_iter()
        .map(|(sub_area_id, total)| {
            if total < 0.0 {
                log::warn!("Negative population total for sub-area {sub_area_id}; clamping to 0");
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let population = total.round().max(0.0) as u64;
            DemographyRecord {
                sub_area_id,
                population,
            }
        })
        .collect();
    records.sort_by(|a, b| a.sub_area_id.cmp(&b.sub_area_id));

    log::info!("Loaded demography for {} sub-areas", records.len());
    Ok(DemographyData { records, metrics })
}
