use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("No prompt fragments configured")]
    NoFragments,

    #[error("Generator request failed: {0}")]
    GeneratorTransport(#[from] reqwest::Error),

    #[error("Generator unavailable: {message}")]
    GeneratorUnavailable { message: String },

    #[error("Could not extract structured data: {reason}")]
    ExtractionFailure { reason: String },

    #[error("Itinerary schema violation: {reason}")]
    SchemaViolation { reason: String },

    #[error("Invalid fragment payload: {reason}")]
    InvalidFragment { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required config field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Generator,
    Interpretation,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlannerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NoFragments
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidFragment { .. } => ErrorCategory::Configuration,
            Self::GeneratorTransport(_) | Self::GeneratorUnavailable { .. } => {
                ErrorCategory::Generator
            }
            Self::ExtractionFailure { .. } | Self::SchemaViolation { .. } => {
                ErrorCategory::Interpretation
            }
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Critical,
            ErrorCategory::Generator => ErrorSeverity::Medium,
            ErrorCategory::Interpretation => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Opaque message safe to show to end users. Internal detail stays in logs.
    pub fn user_friendly_message(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "The planner is not configured correctly. Check the configuration and seeded prompt fragments."
            }
            ErrorCategory::Generator => {
                "The AI service is temporarily unavailable. Please try again later."
            }
            ErrorCategory::Interpretation => {
                "We couldn't interpret the AI response. Please try again with different parameters."
            }
            ErrorCategory::System => "An unexpected error occurred. Please try again later.",
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::NoFragments => "Seed prompt fragments before requesting an itinerary",
            Self::GeneratorTransport(_) | Self::GeneratorUnavailable { .. } => {
                "Verify the generator endpoint and API key, then retry"
            }
            Self::ExtractionFailure { .. } | Self::SchemaViolation { .. } => {
                "Retry the request; enable debug logging to inspect the raw generator output"
            }
            Self::InvalidFragment { .. } => "Provide both an ordinal and a body for the fragment",
            Self::IoError(_) => "Check file paths and permissions",
            Self::SerializationError(_) => "Check the input data format",
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Fix the configuration file and rerun",
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_errors_share_one_user_message() {
        let unavailable = PlannerError::GeneratorUnavailable {
            message: "status 503".to_string(),
        };
        assert_eq!(unavailable.category(), ErrorCategory::Generator);
        assert!(unavailable
            .user_friendly_message()
            .contains("temporarily unavailable"));
    }

    #[test]
    fn interpretation_errors_hide_internal_detail() {
        let extraction = PlannerError::ExtractionFailure {
            reason: "no opening brace".to_string(),
        };
        let schema = PlannerError::SchemaViolation {
            reason: "missing days".to_string(),
        };
        assert_eq!(
            extraction.user_friendly_message(),
            schema.user_friendly_message()
        );
        assert!(!extraction.user_friendly_message().contains("brace"));
    }

    #[test]
    fn no_fragments_is_a_configuration_failure() {
        let err = PlannerError::NoFragments;
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
