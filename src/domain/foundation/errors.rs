//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }
}

/// Error codes reported to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    NoLocations,
    UnnamedLocation,
    DuplicateLocation,
    InvalidAttribute,
    InvalidWeight,
    NothingToAnalyze,

    // AI errors
    RateLimited,
    QuotaExhausted,
    AIProviderError,
    AnalysisDisabled,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::NoLocations => "NO_LOCATIONS",
            ErrorCode::UnnamedLocation => "UNNAMED_LOCATION",
            ErrorCode::DuplicateLocation => "DUPLICATE_LOCATION",
            ErrorCode::InvalidAttribute => "INVALID_ATTRIBUTE",
            ErrorCode::InvalidWeight => "INVALID_WEIGHT",
            ErrorCode::NothingToAnalyze => "NOTHING_TO_ANALYZE",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::QuotaExhausted => "QUOTA_EXHAUSTED",
            ErrorCode::AIProviderError => "AI_PROVIDER_ERROR",
            ErrorCode::AnalysisDisabled => "ANALYSIS_DISABLED",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("name");
        assert_eq!(format!("{}", err), "Field 'name' cannot be empty");
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::NoLocations), "NO_LOCATIONS");
        assert_eq!(format!("{}", ErrorCode::QuotaExhausted), "QUOTA_EXHAUSTED");
        assert_eq!(format!("{}", ErrorCode::AIProviderError), "AI_PROVIDER_ERROR");
    }
}
