//! Lifecycle of a single form submission.
//!
//! `Idle -> Submitting -> {Redirected | Failed}`. A failed submission may be
//! retried; a redirected one is finished.

use std::fmt;

use super::error::DomainError;
use super::posts::PostFieldErrors;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Redirected,
    Failed,
}

impl SubmissionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionPhase::Idle => "idle",
            SubmissionPhase::Submitting => "submitting",
            SubmissionPhase::Redirected => "redirected",
            SubmissionPhase::Failed => "failed",
        }
    }
}

impl fmt::Display for SubmissionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    phase: SubmissionPhase,
    errors: Option<PostFieldErrors>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// True while the write is in flight.
    pub fn is_pending(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    pub fn errors(&self) -> Option<&PostFieldErrors> {
        self.errors.as_ref()
    }

    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }

    pub fn begin(&mut self) -> Result<(), DomainError> {
        match self.phase {
            SubmissionPhase::Idle | SubmissionPhase::Failed => {
                self.phase = SubmissionPhase::Submitting;
                self.errors = None;
                Ok(())
            }
            from => Err(DomainError::invalid_transition(
                from,
                SubmissionPhase::Submitting,
            )),
        }
    }

    pub fn fail(&mut self, errors: PostFieldErrors) -> Result<(), DomainError> {
        self.settle(SubmissionPhase::Failed)?;
        self.errors = Some(errors);
        Ok(())
    }

    pub fn redirect(&mut self) -> Result<(), DomainError> {
        self.settle(SubmissionPhase::Redirected)
    }

    fn settle(&mut self, to: SubmissionPhase) -> Result<(), DomainError> {
        if self.phase != SubmissionPhase::Submitting {
            return Err(DomainError::invalid_transition(self.phase, to));
        }
        self.phase = to;
        Ok(())
    }
}
