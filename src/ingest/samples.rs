//! Sample file processing

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::models::{SampleRecord, TestResult};

#[derive(Debug, Deserialize)]
struct RawTest {
    #[serde(default)]
    selected_definitive: bool,
    result: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSubArea {
    #[serde(rename = "_id")]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSample {
    #[serde(rename = "_id")]
    id: String,
    species: Option<String>,
    sample_source: Option<String>,
    season_year: Option<serde_json::Value>,
    age_group: Option<String>,
    sex: Option<String>,
    #[serde(default)]
    tests: Vec<RawTest>,
    #[serde(rename = "_sub_administrative_area")]
    sub_area: Option<RawSubArea>,
}

impl RawSample {
    /// The definitive test result for this sample.
    ///
    /// At most one test is flagged `selected_definitive` (a database
    /// constraint upstream). No flagged test, or a flagged test without a
    /// result value, means the sample was effectively not tested.
    fn definitive_result(&self) -> TestResult {
        let mut definitive = self.tests.iter().filter(|t| t.selected_definitive);
        let Some(first) = definitive.next() else {
            return TestResult::NotTested;
        };
        if definitive.next().is_some() {
            log::warn!(
                "Sample {} has more than one definitive test; using the first",
                self.id
            );
        }
        TestResult::from(first.result.as_deref())
    }
}

/// Load sample records from their NDJSON export.
pub fn load_samples(path: &Path) -> Result<Vec<SampleRecord>> {
    let raw: Vec<RawSample> = super::read_ndjson(path)?;
    let samples = raw
        .into_iter()
        .map(|s| {
            let result = s.definitive_result();
            let sub_area_id = s.sub_area.and_then(|a| a.id);
            SampleRecord {
                id: s.id,
                species: s.species,
                source: s.sample_source,
                season_year: s.season_year.map(|v| match v {
                    serde_json::Value::String(text) => text,
                    other => other.to_string(),
                }),
                age: s.age_group,
                sex: s.sex,
                result,
                sub_area_id,
            }
        })
        .collect::<Vec<_>>();
    log::info!("Loaded {} sample records", samples.len());
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_samples(name: &str, lines: &[&str]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        path
    }

    #[test]
    fn picks_the_definitive_test_result() {
        let path = write_samples(
            "prevalence_estimator_samples_definitive.ndJson",
            &[concat!(
                r#"{"_id": "s1", "tests": ["#,
                r#"{"selected_definitive": false, "result": "Detected"},"#,
                r#"{"selected_definitive": true, "result": "Not Detected"}],"#,
                r#""_sub_administrative_area": {"_id": "A"}}"#
            )],
        );
        let samples = load_samples(&path).unwrap();
        assert_eq!(samples[0].result, TestResult::NotDetected);
        assert_eq!(samples[0].sub_area_id.as_deref(), Some("A"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn no_definitive_test_means_not_tested() {
        let path = write_samples(
            "prevalence_estimator_samples_none.ndJson",
            &[
                r#"{"_id": "s1", "tests": [{"selected_definitive": false, "result": "Detected"}]}"#,
                r#"{"_id": "s2", "tests": []}"#,
            ],
        );
        let samples = load_samples(&path).unwrap();
        assert_eq!(samples[0].result, TestResult::NotTested);
        assert_eq!(samples[1].result, TestResult::NotTested);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_sub_area_id_stays_none() {
        let path = write_samples(
            "prevalence_estimator_samples_noarea.ndJson",
            &[
                r#"{"_id": "s1", "tests": [{"selected_definitive": true, "result": "Detected"}]}"#,
                concat!(
                    r#"{"_id": "s2", "tests": [{"selected_definitive": true, "result": "Detected"}],"#,
                    r#""_sub_administrative_area": {}}"#
                ),
            ],
        );
        let samples = load_samples(&path).unwrap();
        assert_eq!(samples[0].sub_area_id, None);
        assert_eq!(samples[1].sub_area_id, None);
        let _ = std::fs::remove_file(&path);
    }
}
