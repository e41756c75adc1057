// Domain errors for task operations

use thiserror::Error;

/// Rejection of a task whose required fields are blank
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Text or author is empty after trimming.
    #[error("task text and author must both be non-empty")]
    EmptyField,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::EmptyField.to_string(),
            "task text and author must both be non-empty"
        );
    }
}
