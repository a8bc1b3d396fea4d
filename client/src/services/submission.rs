//! Submission coordinator
//!
//! Drives the report through validation and the POST, guarded by the
//! [`SubmissionMachine`] so a second submit cannot overlap the first.

use std::cell::RefCell;

use chrono::{DateTime, Utc};
use shared::models::{HazardReportDraft, ReportPayload, StagedFile, SubmissionReceipt};
use shared::notify::Notification;
use shared::submission::{SubmissionMachine, SubmissionState, TransitionError};
use shared::types::Coordinate;
use shared::validation::{validate_draft, validate_location, FocusTarget, ValidationFailure};

use super::ports::{Control, FormView, MapView, Notifier, ReportSink};
use crate::error::{ClientError, ClientResult};

pub struct SubmissionCoordinator<R: ReportSink> {
    sink: R,
    machine: RefCell<SubmissionMachine>,
}

/// Page surfaces a submission talks to
pub struct SubmitContext<'a, V, N, M> {
    pub view: &'a V,
    pub notifier: &'a N,
    pub map: &'a M,
}

impl<R: ReportSink> SubmissionCoordinator<R> {
    pub fn new(sink: R) -> Self {
        Self {
            sink,
            machine: RefCell::new(SubmissionMachine::new()),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.machine.borrow().state().clone()
    }

    /// Validate the draft and post it.
    ///
    /// On failure the form is left as it was so the user can retry.
    pub async fn submit<V, N, M>(
        &self,
        draft: HazardReportDraft,
        marker: Option<Coordinate>,
        files: &[StagedFile],
        ctx: SubmitContext<'_, V, N, M>,
        now: DateTime<Utc>,
    ) -> ClientResult<SubmissionReceipt>
    where
        V: FormView,
        N: Notifier,
        M: MapView,
    {
        if let Err(e) = self.transition(|m| m.begin_validation()) {
            ctx.notifier.notify(Notification::warning(self.refusal_message()));
            return Err(e);
        }

        if let Err(failure) = self.check(&draft, marker) {
            self.transition(|m| m.validation_failed())?;
            ctx.notifier
                .notify(Notification::warning(failure.to_string()));
            match failure.focus_target() {
                Some(FocusTarget::Field(name)) => {
                    ctx.view.set_field_invalid(name, true);
                    ctx.view.focus_field(name);
                }
                Some(FocusTarget::Map) => ctx.map.scroll_into_view(),
                None => {}
            }
            return Err(failure.into());
        }

        self.transition(|m| m.begin_submit())?;
        ctx.view.set_busy(Control::Submit, true);

        let payload = ReportPayload::assemble(&draft, files, now);
        tracing::debug!(
            hazard_type = %draft.hazard_type,
            severity = draft.severity,
            "Report passed validation"
        );
        let result = self.sink.submit(payload).await;
        ctx.view.set_busy(Control::Submit, false);

        match result {
            Ok(receipt) => {
                self.transition(|m| m.succeed(receipt.clone()))?;
                tracing::info!(report_id = %receipt.report_id, "Report submitted");
                ctx.notifier
                    .notify(Notification::success("Report submitted successfully!"));
                ctx.view.show_receipt(&receipt);
                Ok(receipt)
            }
            Err(e) => {
                let message = e.user_message();
                tracing::error!("Submission error: {}", e);
                ctx.notifier.notify(Notification::danger(format!(
                    "Submission failed: {}",
                    message
                )));
                self.transition(|m| m.fail(message))?;
                Err(e)
            }
        }
    }

    /// Return the lifecycle to Idle; refused while a request is in flight
    pub fn reset(&self) -> Result<(), TransitionError> {
        self.machine.borrow_mut().reset()
    }

    fn refusal_message(&self) -> &'static str {
        match self.machine.borrow().state() {
            SubmissionState::Succeeded(_) => {
                "This report was already submitted. The form will reset shortly."
            }
            _ => "A submission is already in progress. Please wait.",
        }
    }

    fn check(
        &self,
        draft: &HazardReportDraft,
        marker: Option<Coordinate>,
    ) -> Result<Coordinate, ValidationFailure> {
        validate_draft(draft)?;
        validate_location(marker, &draft.latitude, &draft.longitude)
    }

    fn transition(
        &self,
        step: impl FnOnce(&mut SubmissionMachine) -> Result<(), TransitionError>,
    ) -> ClientResult<()> {
        step(&mut self.machine.borrow_mut()).map_err(|e| {
            tracing::warn!("{}", e);
            ClientError::from(e)
        })
    }
}
