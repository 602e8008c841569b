use thiserror::Error;

use super::types::RecordId;

/// Errors that can occur while driving a review session.
///
/// Validation outcomes are never reported through this type; they are data
/// (see [`GateReport`](super::GateReport) and [`ValidationError`]).
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ReviewError {
    /// The upstream payload could not be read at all.
    #[error("payload error: {0}")]
    Payload(String),

    /// Invalid review configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The operation needs a current record but none is displayed.
    #[error("no record is currently under review")]
    NoCurrentRecord,

    /// A submission is in flight; the session is locked until it resolves.
    #[error("submission of record {0} is still in flight")]
    SubmissionInFlight(RecordId),

    /// The record does not pass the submission gate.
    #[error("record is not submittable: {}", join_violations(.0))]
    Rejected(Vec<ValidationError>),

    /// The active provider search has no hit at this position.
    #[error("no provider search result at position {0}")]
    NoSuchSearchResult(usize),

    /// A submission outcome arrived for a record that is not in flight.
    #[error("no submission in flight for record {0}")]
    UnknownSubmission(RecordId),

    /// The session already left the loading phase.
    #[error("session is already loaded")]
    AlreadyLoaded,

    /// Fetch or submit against an external collaborator failed.
    #[error("remote error: {0}")]
    Remote(String),
}

fn join_violations(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single validation finding with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Wire key of the offending field (e.g. "IdProveedor").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// Identifier of the gate check that failed, if any.
    pub rule: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "[{}] {}: {}", rule, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a validation error without a rule ID.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Create a validation error tagged with the gate check that raised it.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}
