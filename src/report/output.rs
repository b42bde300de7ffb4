//! Report serialization
//!
//! The report is exported twice: as the primary JSON attachment consumed by
//! the warehouse, and as the tabular CSV exchange file. The CSV follows the
//! exchange conventions of the source system: non-numeric fields quoted,
//! `NA` for missing values.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::models::Report;

/// Write the report as the primary JSON output (array of row objects).
pub fn write_output_json(report: &Report, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string(report).context("serializing report to JSON")?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote report JSON to {}", path.display());
    Ok(())
}

/// Write the report as the tabular CSV exchange file.
pub fn write_output_csv(report: &Report, path: &Path) -> anyhow::Result<()> {
    let content = render_csv(report);
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote report table to {}", path.display());
    Ok(())
}

fn render_csv(report: &Report) -> String {
    let mut out = String::new();
    out.push_str("\"SubAdminName\",\"SubAdminID\",\"N\",\"n\",\"bayesUpper\",\"freqUpper\",\"freqSeUpper\"\n");
    for row in &report.rows {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{}",
            quote(&row.sub_admin_name),
            quote(&row.sub_admin_id),
            int_or_na(row.population),
            int_or_na(row.negatives),
            float_or_na(row.bayes_upper),
            float_or_na(row.freq_upper),
            float_or_na(row.freq_se_upper),
        );
    }
    out
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn int_or_na(value: Option<u64>) -> String {
    value.map_or_else(|| "NA".to_string(), |v| v.to_string())
}

fn float_or_na(value: Option<f64>) -> String {
    value.map_or_else(|| "NA".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportRow;

    fn estimated_row() -> ReportRow {
        ReportRow {
            sub_admin_name: "Tompkins".to_string(),
            sub_admin_id: "T1".to_string(),
            population: Some(1000),
            negatives: Some(25),
            bayes_upper: Some(0.105),
            freq_upper: Some(0.974),
            freq_se_upper: Some(0.117),
        }
    }

    fn empty_row() -> ReportRow {
        ReportRow {
            sub_admin_name: "Broome".to_string(),
            sub_admin_id: "B1".to_string(),
            population: None,
            negatives: None,
            bayes_upper: None,
            freq_upper: None,
            freq_se_upper: None,
        }
    }

    #[test]
    fn csv_uses_na_for_missing_values() {
        let report = Report {
            rows: vec![estimated_row(), empty_row()],
        };
        let csv = render_csv(&report);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("\"Tompkins\",\"T1\",1000,25,"));
        assert_eq!(lines[2], "\"Broome\",\"B1\",NA,NA,NA,NA,NA");
    }

    #[test]
    fn quotes_are_escaped() {
        assert_eq!(quote(r#"a "b" c"#), r#""a ""b"" c""#);
    }

    #[test]
    fn json_rows_carry_exchange_field_names() {
        let report = Report {
            rows: vec![empty_row()],
        };
        let json = serde_json::to_value(&report).unwrap();
        let row = &json.as_array().unwrap()[0];
        assert_eq!(row["SubAdminName"], "Broome");
        assert!(row["bayesUpper"].is_null());
    }
}
