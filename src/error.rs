//! Error types.
//!
//! Two layers:
//!
//! - [`AssayError`]: what the analysis core can fail with. One variant per
//!   failure category; messages name the offending label or value.
//! - [`AppError`]: what the binary reports. A message plus a process exit code.
//!
//! Exit codes:
//! - `2`: caller/source problems (bad arguments, unreadable or malformed input, I/O)
//! - `3`: missing or malformed data inside a readable source
//! - `4`: degenerate numeric input (division by zero)

use thiserror::Error;

/// Failures of the analysis core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssayError {
    /// Caller misuse: wrong shape or out-of-range argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Source not found: '{path}' ({reason})")]
    SourceNotFound { path: String, reason: String },

    /// The source opened but is not laid out as expected.
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    #[error("Label '{label}' was not found in column {column}")]
    LabelNotFound { label: String, column: usize },

    #[error("Label '{label}' appears {count} times in column {column}; it should appear only once")]
    DuplicateLabel {
        label: String,
        column: usize,
        count: usize,
    },

    #[error("Key '{0}' was not found in the dataset")]
    KeyNotFound(String),

    #[error("No numbers were found in row '{0}'")]
    EmptyRow(String),

    #[error("At least one series has no values")]
    EmptyInput,

    #[error("Series '{0}' is empty")]
    EmptyValue(String),

    #[error("Series are not equal in length: {left} and {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Series values need to be numbers, got '{0}'")]
    NonNumericValue(String),

    #[error("Division by zero: {0}")]
    DivisionByZero(String),
}

impl AssayError {
    /// Process exit code for this failure category.
    pub fn exit_code(&self) -> u8 {
        match self {
            AssayError::InvalidArgument(_)
            | AssayError::SourceNotFound { .. }
            | AssayError::SchemaViolation(_) => 2,
            AssayError::LabelNotFound { .. }
            | AssayError::DuplicateLabel { .. }
            | AssayError::KeyNotFound(_)
            | AssayError::EmptyRow(_)
            | AssayError::EmptyInput
            | AssayError::EmptyValue(_)
            | AssayError::LengthMismatch { .. }
            | AssayError::NonNumericValue(_) => 3,
            AssayError::DivisionByZero(_) => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<AssayError> for AppError {
    fn from(err: AssayError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assay_errors_map_to_exit_codes() {
        let err: AppError = AssayError::SchemaViolation("x".to_string()).into();
        assert_eq!(err.exit_code(), 2);

        let err: AppError = AssayError::EmptyRow("Mean Sample".to_string()).into();
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.to_string(), "No numbers were found in row 'Mean Sample'");

        let err: AppError = AssayError::DivisionByZero("slope is zero".to_string()).into();
        assert_eq!(err.exit_code(), 4);
    }
}
