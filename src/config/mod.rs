//! Configuration for a prevalence estimation run.

use std::path::{Path, PathBuf};

use crate::error::{PrevalenceError, Result};

/// Validated run parameters.
///
/// Both values are global: the same confidence and sensitivity apply to
/// every sub-area in a single run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    /// Significance level, in (0, 1)
    pub alpha: f64,
    /// Diagnostic test sensitivity, in (0, 1]
    pub sensitivity: f64,
}

impl Parameters {
    /// Create parameters, validating both domains.
    ///
    /// # Errors
    /// Returns `InvalidParameter` when `alpha` is outside (0, 1) or
    /// `sensitivity` is outside (0, 1].
    pub fn new(alpha: f64, sensitivity: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(PrevalenceError::InvalidParameter(format!(
                "alpha must be in (0, 1), got {alpha}"
            )));
        }
        if !(sensitivity > 0.0 && sensitivity <= 1.0) {
            return Err(PrevalenceError::InvalidParameter(format!(
                "sensitivity must be in (0, 1], got {sensitivity}"
            )));
        }
        Ok(Self { alpha, sensitivity })
    }

    /// Confidence level, `1 - alpha`.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        1.0 - self.alpha
    }
}

/// Layout of the exchange directory shared with the data warehouse.
#[derive(Debug, Clone)]
pub struct ExchangeDirs {
    /// Root of the exchange directory
    pub base: PathBuf,
}

impl ExchangeDirs {
    /// Exchange layout rooted at `base`.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Platform default: `data` on Windows, `/data` elsewhere (the Docker
    /// mount point used by the warehouse pipeline).
    #[must_use]
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            Self::new("data")
        } else {
            Self::new("/data")
        }
    }

    /// Path of `params.json`.
    #[must_use]
    pub fn params_file(&self) -> PathBuf {
        self.base.join("params.json")
    }

    /// Path of the sub-area catalog NDJSON file.
    #[must_use]
    pub fn areas_file(&self) -> PathBuf {
        self.base.join("sub_administrative_area.ndJson")
    }

    /// Path of the sample NDJSON file.
    #[must_use]
    pub fn samples_file(&self) -> PathBuf {
        self.base.join("sample.ndJson")
    }

    /// Path of the demography NDJSON file.
    #[must_use]
    pub fn demography_file(&self) -> PathBuf {
        self.base.join("demography.ndJson")
    }

    /// Directory the generated attachments are written into.
    #[must_use]
    pub fn attachments_dir(&self) -> PathBuf {
        self.base.join("attachments")
    }

    /// Path of the attachments manifest.
    #[must_use]
    pub fn attachments_manifest(&self) -> PathBuf {
        self.base.join("attachments.json")
    }

    /// Path of a named attachment.
    #[must_use]
    pub fn attachment(&self, filename: impl AsRef<Path>) -> PathBuf {
        self.attachments_dir().join(filename)
    }
}

impl Default for ExchangeDirs {
    fn default() -> Self {
        Self::platform_default()
    }
}
