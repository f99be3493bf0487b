//! Contact form submission lifecycle.
//!
//! ```text
//! idle ──submit──▶ submitting ──ok──▶ success   (fields cleared)
//!                      │
//!                      └──err──▶ error          (fields kept)
//! ```
//!
//! `success` and `error` only describe the last attempt; the form stays
//! usable and the next submit starts over at `submitting`. There is no
//! automatic retry, and each submit makes exactly one API call.
//!
//! A [`ContactFlow`] lives for one form post. Across posts, [`PendingSubmissions`]
//! keeps a resent or double-clicked form from being delivered twice while the
//! first delivery is still in flight.

use crate::api::{ApiError, ChurchApi};
use crate::types::ContactForm;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

/// Reasons a submission never reached the API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("a submission is already in progress")]
    InFlight,
}

#[derive(Debug, Clone, Default)]
pub struct ContactFlow {
    form: ContactForm,
    status: SubmitStatus,
}

impl ContactFlow {
    /// A flow holding `form` as the visitor's current input.
    pub fn new(form: ContactForm) -> Self {
        Self {
            form,
            status: SubmitStatus::Idle,
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Field edits. Allowed in every state.
    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// Enter `submitting` and hand out the payload to send.
    ///
    /// Rejected while another submission is in flight, or when a required
    /// field is blank; neither case changes the flow.
    pub fn begin(&mut self) -> Result<ContactForm, ContactError> {
        if self.is_submitting() {
            return Err(ContactError::InFlight);
        }
        if let Some(field) = self.form.missing_field() {
            return Err(ContactError::MissingField(field));
        }
        self.status = SubmitStatus::Submitting;
        Ok(self.form.clone())
    }

    /// Settle the in-flight submission.
    pub fn finish(&mut self, outcome: Result<(), ApiError>) {
        match outcome {
            Ok(()) => {
                info!("contact message delivered");
                self.form = ContactForm::default();
                self.status = SubmitStatus::Success;
            }
            Err(err) => {
                warn!(error = %err, "contact message failed");
                self.status = SubmitStatus::Error;
            }
        }
    }

    /// Run one full submission against `api`.
    pub async fn submit(&mut self, api: &dyn ChurchApi) -> Result<SubmitStatus, ContactError> {
        let payload = self.begin()?;
        let outcome = api.submit_contact(&payload).await;
        self.finish(outcome);
        Ok(self.status)
    }

    /// [`ContactFlow::submit`], unless an identical form from another flow
    /// is still being delivered.
    pub async fn submit_once(
        &mut self,
        api: &dyn ChurchApi,
        pending: &PendingSubmissions,
    ) -> Result<SubmitStatus, ContactError> {
        let Some(_claim) = pending.claim(&self.form) else {
            return Err(ContactError::InFlight);
        };
        self.submit(api).await
    }
}

/// Forms currently being delivered, shared by every request.
#[derive(Debug, Clone, Default)]
pub struct PendingSubmissions {
    forms: Arc<Mutex<HashSet<ContactForm>>>,
}

impl PendingSubmissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `form` for delivery. `None` if an identical form is already
    /// in flight. The reservation ends when the returned claim is dropped.
    pub fn claim(&self, form: &ContactForm) -> Option<SubmissionClaim> {
        if !self.lock().insert(form.clone()) {
            debug!("identical contact form already in flight");
            return None;
        }
        Some(SubmissionClaim {
            pending: self.clone(),
            form: form.clone(),
        })
    }

    pub fn is_pending(&self, form: &ContactForm) -> bool {
        self.lock().contains(form)
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<ContactForm>> {
        self.forms.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Reservation handed out by [`PendingSubmissions::claim`].
#[derive(Debug)]
pub struct SubmissionClaim {
    pending: PendingSubmissions,
    form: ContactForm,
}

impl Drop for SubmissionClaim {
    fn drop(&mut self) {
        self.pending.lock().remove(&self.form);
    }
}
