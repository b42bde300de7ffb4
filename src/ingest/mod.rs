//! Ingestion of the warehouse exchange files
//!
//! The upstream warehouse exports newline-delimited JSON record files plus a
//! single params.json. This module parses them into the domain models,
//! applying the same field selection and derivation rules as the warehouse
//! exchange contract: definitive-test selection for samples, and
//! density-to-population conversion for demography.

pub mod areas;
pub mod demography;
pub mod params;
pub mod samples;

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::Result;

pub use areas::load_areas;
pub use demography::{DemographyData, load_demography};
pub use params::{LoadedParams, load_params};
pub use samples::load_samples;

/// Parse a newline-delimited JSON file, one record per non-empty line.
pub(crate) fn read_ndjson<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)?;
    let mut records = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        records.push(serde_json::from_str(line)?);
    }
    Ok(records)
}
