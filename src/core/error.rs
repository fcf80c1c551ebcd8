use thiserror::Error;

/// Errors that can occur while building, submitting, or persisting a registration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistrationError {
    /// One or more validation rules failed.
    #[error("validation failed: {}", summarize(.0))]
    Validation(Vec<ValidationError>),

    /// Wizard step transition was not allowed.
    #[error("wizard error: {0}")]
    Wizard(String),

    /// Submitting the form to the registration endpoint failed.
    #[error("submit error: {0}")]
    Submit(String),

    /// Reading or writing the session failed.
    #[error("session error: {0}")]
    Session(String),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "location.postalCode").
    pub field: String,
    /// Human-readable error description, shown next to the input.
    pub message: String,
    /// Stable machine-readable code (e.g. "nip.checksum").
    pub code: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    /// Create a validation error without a code.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: None,
        }
    }

    /// Create a validation error with a machine-readable code.
    pub fn with_code(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: Some(code.into()),
        }
    }
}
