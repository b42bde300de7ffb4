//! Common domain type definitions
//!
//! This module contains the enum types shared across domain models.

/// Diagnostic test outcome category for a sample.
///
/// Only `Detected` and `NotDetected` are informative for the estimator;
/// the remaining categories are carried so that records can be classified
/// and dropped explicitly rather than at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TestResult {
    /// Disease agent detected
    Detected,
    /// Disease agent not detected
    NotDetected,
    /// Test performed but inconclusive
    Inconclusive,
    /// Test result not yet available
    Pending,
    /// Sample was never tested
    NotTested,
}

impl TestResult {
    /// Whether this category contributes information to the estimator
    #[must_use]
    pub const fn is_informative(self) -> bool {
        matches!(self, Self::Detected | Self::NotDetected)
    }

    /// Warehouse label for this category
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Detected => "Detected",
            Self::NotDetected => "Not Detected",
            Self::Inconclusive => "Inconclusive",
            Self::Pending => "Pending",
            Self::NotTested => "Not Tested",
        }
    }
}

impl From<&str> for TestResult {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "detected" | "positive" => Self::Detected,
            "not detected" | "notdetected" | "negative" => Self::NotDetected,
            "inconclusive" | "suspect" => Self::Inconclusive,
            "pending" => Self::Pending,
            _ => Self::NotTested,
        }
    }
}

impl From<Option<&str>> for TestResult {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::NotTested, Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_warehouse_labels() {
        assert_eq!(TestResult::from("Detected"), TestResult::Detected);
        assert_eq!(TestResult::from("Not Detected"), TestResult::NotDetected);
        assert_eq!(TestResult::from(" not detected "), TestResult::NotDetected);
        assert_eq!(TestResult::from("Inconclusive"), TestResult::Inconclusive);
        assert_eq!(TestResult::from("Pending"), TestResult::Pending);
        assert_eq!(TestResult::from("anything else"), TestResult::NotTested);
        assert_eq!(TestResult::from(None), TestResult::NotTested);
    }

    #[test]
    fn informative_categories() {
        assert!(TestResult::Detected.is_informative());
        assert!(TestResult::NotDetected.is_informative());
        assert!(!TestResult::Inconclusive.is_informative());
        assert!(!TestResult::Pending.is_informative());
        assert!(!TestResult::NotTested.is_informative());
    }
}
