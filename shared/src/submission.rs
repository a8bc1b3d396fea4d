//! Submission lifecycle of the report form
//!
//! ```text
//! Idle -> Validating -> Submitting -> Succeeded -> Idle (reset)
//!             |              \-----> Failed ----> Validating (retry)
//!             \-> Idle (invalid)                \-> Idle (reset)
//! ```

use std::fmt;

use thiserror::Error;

use crate::models::SubmissionReceipt;

/// Where the form is in its submission lifecycle
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Succeeded(SubmissionReceipt),
    Failed(String),
}

impl SubmissionState {
    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded(_) => "succeeded",
            SubmissionState::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A transition the lifecycle does not allow
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot {action} while {from}")]
pub struct TransitionError {
    pub from: &'static str,
    pub action: &'static str,
}

/// Guarded holder of the current [`SubmissionState`]
#[derive(Debug, Clone)]
pub struct SubmissionMachine {
    state: SubmissionState,
}

impl Default for SubmissionMachine {
    fn default() -> Self {
        Self {
            state: SubmissionState::Idle,
        }
    }
}

impl SubmissionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Whether a submission request is in flight
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            SubmissionState::Validating | SubmissionState::Submitting
        )
    }

    fn reject(&self, action: &'static str) -> TransitionError {
        TransitionError {
            from: self.state.name(),
            action,
        }
    }

    /// Idle or Failed -> Validating
    pub fn begin_validation(&mut self) -> Result<(), TransitionError> {
        match self.state {
            SubmissionState::Idle | SubmissionState::Failed(_) => {
                self.state = SubmissionState::Validating;
                Ok(())
            }
            _ => Err(self.reject("validate")),
        }
    }

    /// Validating -> Idle
    pub fn validation_failed(&mut self) -> Result<(), TransitionError> {
        match self.state {
            SubmissionState::Validating => {
                self.state = SubmissionState::Idle;
                Ok(())
            }
            _ => Err(self.reject("abandon validation")),
        }
    }

    /// Validating -> Submitting
    pub fn begin_submit(&mut self) -> Result<(), TransitionError> {
        match self.state {
            SubmissionState::Validating => {
                self.state = SubmissionState::Submitting;
                Ok(())
            }
            _ => Err(self.reject("submit")),
        }
    }

    /// Submitting -> Succeeded
    pub fn succeed(&mut self, receipt: SubmissionReceipt) -> Result<(), TransitionError> {
        match self.state {
            SubmissionState::Submitting => {
                self.state = SubmissionState::Succeeded(receipt);
                Ok(())
            }
            _ => Err(self.reject("complete")),
        }
    }

    /// Submitting -> Failed
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), TransitionError> {
        match self.state {
            SubmissionState::Submitting => {
                self.state = SubmissionState::Failed(message.into());
                Ok(())
            }
            _ => Err(self.reject("fail")),
        }
    }

    /// Back to Idle from any settled state.
    ///
    /// A request in flight cannot be reset away.
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        if self.is_busy() {
            return Err(self.reject("reset"));
        }
        self.state = SubmissionState::Idle;
        Ok(())
    }
}
