//! Error types for the chopstick CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//!
//! A failed non-blocking acquisition is deliberately *not* an error here: the
//! retry loop absorbs it. The variants below cover the surfaces that do
//! terminate the program abnormally.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for chopstick operations.
///
/// Each variant maps to a specific exit code.
#[derive(Error, Debug)]
pub enum ChopstickError {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// A worker in bounded-retry mode gave up without acquiring the resource.
    #[error("worker {worker} gave up after {attempts} failed attempts")]
    RetriesExhausted { worker: usize, attempts: u64 },

    /// A worker thread panicked (e.g., a guard contract violation).
    #[error("worker thread panicked: {0}")]
    WorkerPanicked(String),
}

impl ChopstickError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ChopstickError::UserError(_) => exit_codes::USER_ERROR,
            ChopstickError::RetriesExhausted { .. } => exit_codes::RETRIES_EXHAUSTED,
            ChopstickError::WorkerPanicked(_) => exit_codes::WORKER_FAILURE,
        }
    }
}

/// Result type alias for chopstick operations.
pub type Result<T> = std::result::Result<T, ChopstickError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = ChopstickError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn retries_exhausted_has_correct_exit_code() {
        let err = ChopstickError::RetriesExhausted {
            worker: 1,
            attempts: 10,
        };
        assert_eq!(err.exit_code(), exit_codes::RETRIES_EXHAUSTED);
    }

    #[test]
    fn worker_panicked_has_correct_exit_code() {
        let err = ChopstickError::WorkerPanicked("released without holding".to_string());
        assert_eq!(err.exit_code(), exit_codes::WORKER_FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = ChopstickError::RetriesExhausted {
            worker: 0,
            attempts: 25,
        };
        assert_eq!(
            err.to_string(),
            "worker 0 gave up after 25 failed attempts"
        );

        let err = ChopstickError::UserError("at least one worker is required".to_string());
        assert_eq!(err.to_string(), "at least one worker is required");
    }
}
