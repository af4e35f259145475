use thiserror::Error;

use super::submission::SubmissionPhase;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("submission cannot move from `{from}` to `{to}`")]
    InvalidTransition {
        from: SubmissionPhase,
        to: SubmissionPhase,
    },
}

impl DomainError {
    pub fn invalid_transition(from: SubmissionPhase, to: SubmissionPhase) -> Self {
        Self::InvalidTransition { from, to }
    }
}
