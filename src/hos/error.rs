//! Core error type.

use thiserror::Error;

/// The HOS core's only error: malformed input, rejected before the planner
/// loop starts. Once planning begins, the algorithm is total.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlannerError {
    #[error("invalid input: {field} = {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl PlannerError {
    pub(crate) fn invalid(field: &'static str, value: impl ToString, reason: &'static str) -> Self {
        Self::InvalidInput {
            field,
            value: value.to_string(),
            reason,
        }
    }
}
