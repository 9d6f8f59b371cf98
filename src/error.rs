//! Crate error type.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors surfaced before an optimization run starts.
///
/// The evolution loop itself has no error states: infeasible inputs are
/// absorbed by fallback assignment and show up as low fitness instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimetableError {
    /// The problem or run configuration cannot be optimized.
    #[error("invalid configuration: {}", join_messages(.0))]
    InvalidConfig(Vec<ValidationError>),
}

impl TimetableError {
    /// The individual validation errors.
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            TimetableError::InvalidConfig(errors) => errors,
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
