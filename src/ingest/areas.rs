//! Sub-administrative area catalog processing

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::models::AreaRecord;

#[derive(Debug, Deserialize)]
struct RawArea {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    full_name: String,
    aland: f64,
}

/// Load the sub-area catalog from its NDJSON export.
///
/// All fields are required by the exchange contract; catalog order (file
/// order) is preserved, it defines the order of the final report.
pub fn load_areas(path: &Path) -> Result<Vec<AreaRecord>> {
    let raw: Vec<RawArea> = super::read_ndjson(path)?;
    let areas = raw
        .into_iter()
        .map(|a| AreaRecord {
            id: a.id,
            full_name: a.full_name,
            name: a.name,
            land_area: a.aland,
        })
        .collect::<Vec<_>>();
    log::info!("Loaded {} sub-administrative areas", areas.len());
    Ok(areas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn loads_catalog_in_file_order() {
        let path = std::env::temp_dir().join("prevalence_estimator_areas.ndJson");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"{{"_id": "B", "name": "Broome", "full_name": "Broome County", "aland": 1.0}}"#
        )
        .unwrap();
        writeln!(
            file,
            r#"{{"_id": "A", "name": "Albany", "full_name": "Albany County", "aland": 2.0}}"#
        )
        .unwrap();
        drop(file);

        let areas = load_areas(&path).unwrap();
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].id, "B");
        assert_eq!(areas[1].full_name, "Albany County");
        let _ = std::fs::remove_file(&path);
    }
}
