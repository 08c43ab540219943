//! Join flow
//!
//! The join screen is a linear state machine:
//!
//! ```text
//! loading ──► ready ──► submitting ──► success
//!    │          ▲           │
//!    ▼          │           ▼
//!  error ◄──────┴──────── error
//! ```
//!
//! [`JoinFlow`] owns the state and only exposes the transitions that are legal from the
//! current one. It performs no I/O: the caller fetches the deal and sends the join request,
//! then reports the outcome back.

use std::mem;

use jiff::Timestamp;
use serde::Serialize;
use thiserror::Error;

use crate::{
    deals::{Deal, DealId, DealStatus},
    locale::Language,
    validation::{
        PaymentMethod, ValidationErrors, validate_email, validate_name, validate_payment,
        validate_phone,
    },
};

/// Join form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinForm {
    /// Participant name.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone.
    pub phone: String,

    /// Selected payment method.
    pub payment: Option<PaymentMethod>,
}

impl JoinForm {
    /// Check every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns the collected [`ValidationErrors`] when any field fails.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.check(validate_name(&self.name));
        errors.check(validate_email(&self.email));
        errors.check(validate_phone(&self.phone));
        errors.check(validate_payment(self.payment));

        errors.into_result()
    }
}

/// Join request body sent to `POST /deals/:id/join`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    /// Deal being joined.
    #[serde(skip)]
    pub deal_id: DealId,

    /// Participant name.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone.
    pub phone: String,

    /// Selected payment method.
    pub payment_method: PaymentMethod,
}

/// Share affordances shown after a successful join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    /// Path other users open to join the same deal.
    pub share_path: String,

    /// Participants still needed after this join.
    pub remaining_after_join: u32,
}

impl Invitation {
    /// Share text inviting friends to the deal.
    #[must_use]
    pub fn message(&self, language: Language) -> String {
        match (language, self.remaining_after_join) {
            (Language::English, 0) => {
                format!("The group is complete! Share the deal: {}", self.share_path)
            }
            (Language::English, remaining) => format!(
                "Only {remaining} more needed to unlock the price. Invite friends: {}",
                self.share_path
            ),
            (Language::Arabic, 0) => {
                format!("اكتملت المجموعة! شارك العرض: {}", self.share_path)
            }
            (Language::Arabic, remaining) => format!(
                "باقي {remaining} فقط لتفعيل السعر. ادعُ أصدقاءك: {}",
                self.share_path
            ),
        }
    }
}

/// Why the flow is in its error state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinFailure {
    /// The deal could not be fetched.
    Load(String),

    /// One or more fields failed validation.
    Validation(ValidationErrors),

    /// The deal no longer accepts participants.
    NotJoinable(DealStatus),

    /// The join request failed.
    Network(String),
}

impl JoinFailure {
    /// Inline alert text.
    #[must_use]
    pub fn message(&self, language: Language) -> String {
        match (self, language) {
            (Self::Load(message) | Self::Network(message), _) => message.clone(),
            (Self::Validation(errors), _) => errors
                .iter()
                .map(|error| error.message(language))
                .collect::<Vec<_>>()
                .join("\n"),
            (Self::NotJoinable(status), Language::English) => {
                format!("This deal is {} and can no longer be joined", status.label(language))
            }
            (Self::NotJoinable(status), Language::Arabic) => {
                format!("هذا العرض {} ولا يمكن الانضمام إليه", status.label(language))
            }
        }
    }
}

/// Join flow states.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinState {
    /// Fetching the deal.
    Loading {
        /// Deal being fetched.
        deal_id: DealId,
    },

    /// Form displayed.
    Ready {
        /// Deal being joined.
        deal: Deal,
        /// Current form values.
        form: JoinForm,
    },

    /// Join request in flight.
    Submitting {
        /// Deal being joined.
        deal: Deal,
        /// Submitted form values.
        form: JoinForm,
    },

    /// Joined; the deal carries the optimistic participant count.
    Success {
        /// Deal after the optimistic increment.
        deal: Deal,
        /// Share affordances.
        invitation: Invitation,
    },

    /// Something failed; see `failure`.
    Error {
        /// Deal the flow was opened for.
        deal_id: DealId,
        /// Loaded deal, absent when loading itself failed.
        deal: Option<Deal>,
        /// Form values at the time of failure.
        form: JoinForm,
        /// What went wrong.
        failure: JoinFailure,
    },
}

impl JoinState {
    /// Short state name, for logs and transition errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Loading { .. } => "loading",
            Self::Ready { .. } => "ready",
            Self::Submitting { .. } => "submitting",
            Self::Success { .. } => "success",
            Self::Error { .. } => "error",
        }
    }
}

/// Rejected join flow transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinFlowError {
    /// A join request is already in flight.
    #[error("a join request is already in flight")]
    AlreadySubmitting,

    /// The form failed validation.
    #[error(transparent)]
    Invalid(ValidationErrors),

    /// The deal does not accept participants in its current status.
    #[error("deal is {0} and cannot be joined")]
    NotJoinable(DealStatus),

    /// The event is not valid in the current state.
    #[error("cannot {event} while {state}")]
    InvalidTransition {
        /// State the flow was in.
        state: &'static str,
        /// Event that was attempted.
        event: &'static str,
    },
}

/// Join flow state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinFlow {
    deal_id: DealId,
    state: JoinState,
}

impl JoinFlow {
    /// Start loading `deal_id`.
    #[must_use]
    pub fn new(deal_id: DealId) -> Self {
        Self {
            state: JoinState::Loading {
                deal_id: deal_id.clone(),
            },
            deal_id,
        }
    }

    /// Deal this flow was opened for.
    #[must_use]
    pub fn deal_id(&self) -> &DealId {
        &self.deal_id
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &JoinState {
        &self.state
    }

    /// `true` while a join request is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self.state, JoinState::Submitting { .. })
    }

    /// Whether the submit button is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        matches!(
            self.state,
            JoinState::Ready { .. } | JoinState::Error { deal: Some(_), .. }
        )
    }

    /// Deal as currently displayed, if loaded.
    #[must_use]
    pub fn deal(&self) -> Option<&Deal> {
        match &self.state {
            JoinState::Ready { deal, .. }
            | JoinState::Submitting { deal, .. }
            | JoinState::Success { deal, .. }
            | JoinState::Error {
                deal: Some(deal), ..
            } => Some(deal),
            JoinState::Loading { .. } | JoinState::Error { deal: None, .. } => None,
        }
    }

    /// Editable form, when the form is shown.
    pub fn form_mut(&mut self) -> Option<&mut JoinForm> {
        match &mut self.state {
            JoinState::Ready { form, .. } | JoinState::Error { deal: Some(_), form, .. } => {
                Some(form)
            }
            JoinState::Loading { .. }
            | JoinState::Submitting { .. }
            | JoinState::Success { .. }
            | JoinState::Error { deal: None, .. } => None,
        }
    }

    /// The deal arrived: show the form.
    ///
    /// # Errors
    ///
    /// Returns [`JoinFlowError::InvalidTransition`] unless loading.
    pub fn loaded(&mut self, deal: Deal) -> Result<(), JoinFlowError> {
        self.transition("load deal", |state| match state {
            JoinState::Loading { .. } => Ok(JoinState::Ready {
                deal,
                form: JoinForm::default(),
            }),
            other => Err(other),
        })
    }

    /// The deal fetch failed.
    ///
    /// # Errors
    ///
    /// Returns [`JoinFlowError::InvalidTransition`] unless loading.
    pub fn load_failed(&mut self, message: impl Into<String>) -> Result<(), JoinFlowError> {
        let deal_id = self.deal_id.clone();
        let message = message.into();

        self.transition("fail loading", |state| match state {
            JoinState::Loading { .. } => Ok(JoinState::Error {
                deal_id,
                deal: None,
                form: JoinForm::default(),
                failure: JoinFailure::Load(message),
            }),
            other => Err(other),
        })
    }

    /// Re-enter loading after a failed fetch.
    ///
    /// # Errors
    ///
    /// Returns [`JoinFlowError::InvalidTransition`] unless loading previously failed.
    pub fn retry(&mut self) -> Result<(), JoinFlowError> {
        let deal_id = self.deal_id.clone();

        self.transition("retry", |state| match state {
            JoinState::Error { deal: None, .. } => Ok(JoinState::Loading { deal_id }),
            other => Err(other),
        })
    }

    /// Attempt to submit the form.
    ///
    /// On success the flow enters `submitting` and the returned request must be sent exactly
    /// once. Validation and status failures move the flow into `error` with the form kept, so
    /// the user can correct and resubmit.
    ///
    /// # Errors
    ///
    /// - [`JoinFlowError::AlreadySubmitting`] while a request is in flight.
    /// - [`JoinFlowError::Invalid`] when a field fails validation.
    /// - [`JoinFlowError::NotJoinable`] when the deal is no longer open at `now`.
    /// - [`JoinFlowError::InvalidTransition`] when no form is shown.
    pub fn submit(&mut self, now: Timestamp) -> Result<JoinRequest, JoinFlowError> {
        if self.is_submitting() {
            return Err(JoinFlowError::AlreadySubmitting);
        }

        let placeholder = self.placeholder();
        let (deal, form) = match mem::replace(&mut self.state, placeholder) {
            JoinState::Ready { deal, form }
            | JoinState::Error {
                deal: Some(deal),
                form,
                ..
            } => (deal, form),
            other => {
                let error = JoinFlowError::InvalidTransition {
                    state: other.name(),
                    event: "submit",
                };
                self.state = other;
                return Err(error);
            }
        };

        let status = deal.status(now);

        if !status.is_joinable() {
            self.state = self.error_state(deal, form, JoinFailure::NotJoinable(status));
            return Err(JoinFlowError::NotJoinable(status));
        }

        let checked = form
            .validate()
            .and_then(|()| form.payment.ok_or_else(ValidationErrors::new));

        let payment_method = match checked {
            Ok(payment_method) => payment_method,
            Err(errors) => {
                self.state = self.error_state(deal, form, JoinFailure::Validation(errors.clone()));
                return Err(JoinFlowError::Invalid(errors));
            }
        };

        let request = JoinRequest {
            deal_id: deal.id.clone(),
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            payment_method,
        };

        self.state = JoinState::Submitting { deal, form };

        Ok(request)
    }

    /// The join request succeeded: count the user optimistically and show the invitation.
    ///
    /// # Errors
    ///
    /// Returns [`JoinFlowError::InvalidTransition`] unless submitting.
    pub fn join_succeeded(&mut self) -> Result<(), JoinFlowError> {
        self.transition("complete join", |state| match state {
            JoinState::Submitting { deal, .. } => {
                let invitation = Invitation {
                    share_path: format!("/jam3a/join/{}", deal.id),
                    remaining_after_join: deal.remaining_after_join(),
                };

                Ok(JoinState::Success {
                    deal: deal.with_joined_participant(),
                    invitation,
                })
            }
            other => Err(other),
        })
    }

    /// The join request failed; keep the form for a resubmit.
    ///
    /// # Errors
    ///
    /// Returns [`JoinFlowError::InvalidTransition`] unless submitting.
    pub fn join_failed(&mut self, message: impl Into<String>) -> Result<(), JoinFlowError> {
        let deal_id = self.deal_id.clone();
        let message = message.into();

        self.transition("fail join", |state| match state {
            JoinState::Submitting { deal, form } => Ok(JoinState::Error {
                deal_id,
                deal: Some(deal),
                form,
                failure: JoinFailure::Network(message),
            }),
            other => Err(other),
        })
    }

    fn placeholder(&self) -> JoinState {
        JoinState::Loading {
            deal_id: self.deal_id.clone(),
        }
    }

    fn error_state(&self, deal: Deal, form: JoinForm, failure: JoinFailure) -> JoinState {
        JoinState::Error {
            deal_id: self.deal_id.clone(),
            deal: Some(deal),
            form,
            failure,
        }
    }

    fn transition(
        &mut self,
        event: &'static str,
        apply: impl FnOnce(JoinState) -> Result<JoinState, JoinState>,
    ) -> Result<(), JoinFlowError> {
        let placeholder = self.placeholder();
        let current = mem::replace(&mut self.state, placeholder);

        match apply(current) {
            Ok(next) => {
                self.state = next;
                Ok(())
            }
            Err(unchanged) => {
                let state = unchanged.name();
                self.state = unchanged;
                Err(JoinFlowError::InvalidTransition { state, event })
            }
        }
    }
}
