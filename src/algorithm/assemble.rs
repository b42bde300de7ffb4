//! Report assembly
//!
//! Final pipeline stage: left join of the full area catalog against the
//! estimation results. Every catalog area appears in the report, in catalog
//! order; areas without a result keep their catalog attributes with empty
//! estimate fields.

use std::collections::HashMap;

use crate::models::{AreaRecord, EstimationResult, Report, ReportRow};

/// Join the area catalog with the estimation results.
#[must_use]
pub fn assemble_report(catalog: &[AreaRecord], results: &[EstimationResult]) -> Report {
    let by_area: HashMap<&str, &EstimationResult> = results
        .iter()
        .map(|r| (r.sub_area_id.as_str(), r))
        .collect();

    let rows = catalog
        .iter()
        .map(|area| {
            let result = by_area.get(area.id.as_str());
            ReportRow {
                sub_admin_name: area.name.clone(),
                sub_admin_id: area.id.clone(),
                population: result.map(|r| r.population),
                negatives: result.map(|r| r.negatives),
                bayes_upper: result.map(|r| r.bayes_upper),
                freq_upper: result.map(|r| r.freq_upper),
                freq_se_upper: result.map(|r| r.freq_se_upper),
            }
        })
        .collect();

    Report { rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(id: &str, name: &str) -> AreaRecord {
        AreaRecord {
            id: id.to_string(),
            full_name: format!("{name} County"),
            name: name.to_string(),
            land_area: 1.0e9,
        }
    }

    fn result(id: &str) -> EstimationResult {
        EstimationResult {
            sub_area_id: id.to_string(),
            population: 100,
            negatives: 5,
            bayes_upper: 0.4,
            freq_upper: 0.9,
            freq_se_upper: 0.6,
        }
    }

    #[test]
    fn catalog_order_is_preserved() {
        let catalog = vec![area("C", "Carol"), area("A", "Alice"), area("B", "Bob")];
        let results = vec![result("A"), result("C")];
        let report = assemble_report(&catalog, &results);
        let ids: Vec<_> = report.rows.iter().map(|r| r.sub_admin_id.as_str()).collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
    }

    #[test]
    fn areas_without_results_get_empty_fields() {
        let catalog = vec![area("A", "Alice"), area("B", "Bob")];
        let results = vec![result("A")];
        let report = assemble_report(&catalog, &results);
        assert!(report.rows[0].is_estimated());
        assert!(!report.rows[1].is_estimated());
        assert_eq!(report.rows[1].population, None);
        assert_eq!(report.rows[1].sub_admin_name, "Bob");
        assert_eq!(report.estimated_count(), 1);
    }

    #[test]
    fn no_area_is_ever_dropped() {
        let catalog = vec![area("A", "Alice"), area("B", "Bob"), area("C", "Carol")];
        let report = assemble_report(&catalog, &[]);
        assert_eq!(report.rows.len(), 3);
    }
}
