//! params.json processing

use std::path::Path;

use serde::Deserialize;

use crate::config::Parameters;
use crate::error::Result;

#[derive(Debug, Deserialize)]
struct RawParams {
    alpha: f64,
    sensitivity: f64,
    #[serde(rename = "_provider")]
    provider: Option<RawProvider>,
}

#[derive(Debug, Deserialize)]
struct RawProvider {
    #[serde(rename = "_administrative_area")]
    administrative_area: Option<RawProviderArea>,
}

#[derive(Debug, Deserialize)]
struct RawProviderArea {
    administrative_area: Option<String>,
}

/// Validated parameters plus the provider attribution used in the narrative.
#[derive(Debug, Clone)]
pub struct LoadedParams {
    /// Validated run parameters
    pub parameters: Parameters,
    /// Administrative area of the data provider, when present
    pub provider_area: Option<String>,
}

/// Load and validate params.json.
///
/// The nested `_provider` subtree is only used for the provider-area line of
/// the run summary; everything else in it is ignored.
pub fn load_params(path: &Path) -> Result<LoadedParams> {
    let content = std::fs::read_to_string(path)?;
    let raw: RawParams = serde_json::from_str(&content)?;
    let parameters = Parameters::new(raw.alpha, raw.sensitivity)?;
    let provider_area = raw
        .provider
        .and_then(|p| p.administrative_area)
        .and_then(|a| a.administrative_area);
    log::info!(
        "Parameter file loaded: alpha = {}, sensitivity = {}",
        raw.alpha,
        raw.sensitivity
    );
    Ok(LoadedParams {
        parameters,
        provider_area,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn extracts_provider_area() {
        let path = write_temp(
            "prevalence_estimator_params_full.json",
            r#"{"alpha": 0.05, "sensitivity": 0.9,
                "_provider": {"_administrative_area": {"administrative_area": "New York"}}}"#,
        );
        let loaded = load_params(&path).unwrap();
        assert_eq!(loaded.provider_area.as_deref(), Some("New York"));
        assert!((loaded.parameters.alpha - 0.05).abs() < 1e-12);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn provider_subtree_is_optional() {
        let path = write_temp(
            "prevalence_estimator_params_min.json",
            r#"{"alpha": 0.1, "sensitivity": 1.0}"#,
        );
        let loaded = load_params(&path).unwrap();
        assert_eq!(loaded.provider_area, None);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn invalid_alpha_is_rejected() {
        let path = write_temp(
            "prevalence_estimator_params_bad.json",
            r#"{"alpha": 1.5, "sensitivity": 1.0}"#,
        );
        assert!(load_params(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
