//! Multi-step wizards
//!
//! A wizard walks one form object through an ordered list of steps. Each step's checks
//! gate moving forward; moving back is always allowed and never re-checks. Submitting from
//! the last step re-checks every step, then the caller performs the single API call and
//! reports the outcome.
//!
//! ```text
//! editing(step 0) ⇄ editing(step 1) ⇄ … ⇄ editing(last)
//!                                              │ submit
//!                                              ▼
//!                       editing(last) ◄── submitting ──► confirmed
//!                               (failed)               (succeeded)
//! ```
//!
//! A rejected transition returns an error and leaves the wizard untouched.

use std::fmt::Debug;

use thiserror::Error;

use crate::{locale::Language, validation::ValidationErrors};

pub mod seller;
pub mod start_jam3a;

/// One step of a wizard.
pub trait WizardStep: Copy + Eq + Debug + 'static {
    /// Short identifier, for logs and errors.
    fn name(self) -> &'static str;

    /// Step heading.
    fn title(self, language: Language) -> &'static str;
}

/// A form driven by a [`Wizard`].
pub trait WizardForm {
    /// Step type.
    type Step: WizardStep;

    /// Request built from a complete form.
    type Submission;

    /// Steps in order. Must not be empty.
    const STEPS: &'static [Self::Step];

    /// Check the fields that belong to `step`.
    ///
    /// # Errors
    ///
    /// Returns every failing field of the step.
    fn validate_step(&self, step: Self::Step) -> Result<(), ValidationErrors>;

    /// Build the request from a form that passed every step.
    ///
    /// `None` means a required value is still missing.
    fn submission(&self) -> Option<Self::Submission>;
}

/// Wizard states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState<S> {
    /// Showing a step.
    Editing(S),

    /// Submission in flight.
    Submitting,

    /// Submitted; `reference` identifies what was created.
    Confirmed {
        /// Backend identifier of the created record.
        reference: String,
    },
}

/// Rejected wizard transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// The step's fields failed validation.
    #[error("step {step} is incomplete: {errors}")]
    Invalid {
        /// Step that failed.
        step: &'static str,
        /// Failing fields.
        errors: ValidationErrors,
    },

    /// Already on the first step.
    #[error("already on the first step")]
    AtFirstStep,

    /// Already on the last step; submit instead.
    #[error("already on the last step")]
    AtLastStep,

    /// Submitting is only possible from the last step.
    #[error("submit is only available on the last step")]
    NotOnLastStep,

    /// The event is not valid in the current state.
    #[error("cannot {event} while {state}")]
    InvalidTransition {
        /// State the wizard was in.
        state: &'static str,
        /// Event that was attempted.
        event: &'static str,
    },

    /// Every step passed but the form cannot build a request.
    #[error("form is incomplete")]
    Incomplete,

    /// The wizard declares no steps.
    #[error("wizard has no steps")]
    NoSteps,
}

/// Step-by-step state machine over a [`WizardForm`].
#[derive(Debug, Clone)]
pub struct Wizard<F: WizardForm> {
    form: F,
    index: usize,
    state: WizardState<F::Step>,
}

impl<F: WizardForm> Wizard<F> {
    /// Start on the first step.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::NoSteps`] when the form declares no steps.
    pub fn new(form: F) -> Result<Self, WizardError> {
        let first = *F::STEPS.first().ok_or(WizardError::NoSteps)?;

        Ok(Self {
            form,
            index: 0,
            state: WizardState::Editing(first),
        })
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &WizardState<F::Step> {
        &self.state
    }

    /// Form values.
    #[must_use]
    pub fn form(&self) -> &F {
        &self.form
    }

    /// Editable form values; `None` once submitting.
    pub fn form_mut(&mut self) -> Option<&mut F> {
        match self.state {
            WizardState::Editing(_) => Some(&mut self.form),
            WizardState::Submitting | WizardState::Confirmed { .. } => None,
        }
    }

    /// Step being shown, while editing.
    #[must_use]
    pub fn current_step(&self) -> Option<F::Step> {
        match self.state {
            WizardState::Editing(step) => Some(step),
            WizardState::Submitting | WizardState::Confirmed { .. } => None,
        }
    }

    /// Zero-based position of the current step.
    #[must_use]
    pub fn step_index(&self) -> usize {
        self.index
    }

    /// Number of steps.
    #[must_use]
    pub fn step_count(&self) -> usize {
        F::STEPS.len()
    }

    /// `true` when showing the last step.
    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.current_step().is_some() && self.index + 1 == F::STEPS.len()
    }

    /// Check the current step's fields without moving.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::Invalid`] for failing fields.
    pub fn check_current(&self) -> Result<(), WizardError> {
        let step = self.editing_step("check")?;

        self.check(step)
    }

    /// Validate the current step and move forward.
    ///
    /// # Errors
    ///
    /// - [`WizardError::Invalid`]: the current step has failing fields.
    /// - [`WizardError::AtLastStep`]: there is no next step.
    /// - [`WizardError::InvalidTransition`]: not editing.
    pub fn forward(&mut self) -> Result<F::Step, WizardError> {
        let step = self.editing_step("go forward")?;
        let next = *F::STEPS
            .get(self.index + 1)
            .ok_or(WizardError::AtLastStep)?;

        self.check(step)?;

        self.index += 1;
        self.state = WizardState::Editing(next);

        Ok(next)
    }

    /// Move back one step. Never validates.
    ///
    /// # Errors
    ///
    /// - [`WizardError::AtFirstStep`]: there is no previous step.
    /// - [`WizardError::InvalidTransition`]: not editing.
    pub fn back(&mut self) -> Result<F::Step, WizardError> {
        self.editing_step("go back")?;

        let previous_index = self.index.checked_sub(1).ok_or(WizardError::AtFirstStep)?;
        let previous = *F::STEPS
            .get(previous_index)
            .ok_or(WizardError::AtFirstStep)?;

        self.index = previous_index;
        self.state = WizardState::Editing(previous);

        Ok(previous)
    }

    /// Validate every step and enter `submitting`, returning the request to send once.
    ///
    /// # Errors
    ///
    /// - [`WizardError::NotOnLastStep`]: not on the last step.
    /// - [`WizardError::Invalid`]: the first step with failing fields.
    /// - [`WizardError::Incomplete`]: the form could not build a request.
    /// - [`WizardError::InvalidTransition`]: not editing.
    pub fn submit(&mut self) -> Result<F::Submission, WizardError> {
        self.editing_step("submit")?;

        if !self.is_last_step() {
            return Err(WizardError::NotOnLastStep);
        }

        for step in F::STEPS {
            self.check(*step)?;
        }

        let submission = self.form.submission().ok_or(WizardError::Incomplete)?;
        self.state = WizardState::Submitting;

        Ok(submission)
    }

    /// The submission succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::InvalidTransition`] unless submitting.
    pub fn confirm(&mut self, reference: impl Into<String>) -> Result<(), WizardError> {
        if self.state != WizardState::Submitting {
            return Err(self.invalid("confirm"));
        }

        self.state = WizardState::Confirmed {
            reference: reference.into(),
        };

        Ok(())
    }

    /// The submission failed; return to the last step with the form intact.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::InvalidTransition`] unless submitting.
    pub fn submission_failed(&mut self) -> Result<(), WizardError> {
        if self.state != WizardState::Submitting {
            return Err(self.invalid("fail submission"));
        }

        let last = *F::STEPS.last().ok_or(WizardError::NoSteps)?;
        self.state = WizardState::Editing(last);

        Ok(())
    }

    fn check(&self, step: F::Step) -> Result<(), WizardError> {
        self.form
            .validate_step(step)
            .map_err(|errors| WizardError::Invalid {
                step: step.name(),
                errors,
            })
    }

    fn editing_step(&self, event: &'static str) -> Result<F::Step, WizardError> {
        self.current_step().ok_or_else(|| self.invalid(event))
    }

    fn invalid(&self, event: &'static str) -> WizardError {
        let state = match self.state {
            WizardState::Editing(step) => step.name(),
            WizardState::Submitting => "submitting",
            WizardState::Confirmed { .. } => "confirmed",
        };

        WizardError::InvalidTransition { state, event }
    }
}
