//! Multi-step registration wizard.
//!
//! A linear three-step stepper over a [`RegistrationDraft`]. Moving forward
//! validates only the current step's fields; moving back is always allowed;
//! finishing re-validates the whole account-type-specific form.
//!
//! # Example
//!
//! ```
//! use konto::core::*;
//! use konto::wizard::*;
//!
//! let mut wizard = RegistrationWizard::new(AccountType::Individual, FormRules::default());
//! wizard.draft_mut().set_text(Field::Email, "jan@example.pl");
//! wizard.draft_mut().set_text(Field::Password, "bezpieczne1");
//! wizard.draft_mut().set_text(Field::ConfirmPassword, "bezpieczne1");
//! assert_eq!(wizard.next().unwrap(), Step::Step2);
//! ```

mod step;

pub use step::{Step, step_fields};

use thiserror::Error;

use crate::core::{
    AccountType, Field, FormRules, RegistrationDraft, RegistrationError, RegistrationForm,
    ValidationError, validate_field, validate_fields,
};

/// Why a wizard transition did not happen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum WizardError {
    /// Fields on the current step failed validation.
    #[error("step {step} has {} invalid field(s)", .errors.len())]
    StepInvalid {
        step: Step,
        errors: Vec<ValidationError>,
    },

    /// `next()` was called on the last step; use `finish()`.
    #[error("already on the last step")]
    AlreadyOnLastStep,

    /// `finish()` was called before reaching the last step.
    #[error("cannot finish from {0}; submit is only available on the last step")]
    NotOnLastStep(Step),

    /// The full form failed validation at finish time.
    #[error("form has {} invalid field(s)", .0.len())]
    FormInvalid(Vec<ValidationError>),
}

impl WizardError {
    /// Field errors to render next to inputs, if any.
    pub fn field_errors(&self) -> &[ValidationError] {
        match self {
            Self::StepInvalid { errors, .. } | Self::FormInvalid(errors) => errors,
            Self::AlreadyOnLastStep | Self::NotOnLastStep(_) => &[],
        }
    }
}

impl From<WizardError> for RegistrationError {
    fn from(e: WizardError) -> Self {
        match e {
            WizardError::StepInvalid { errors, .. } | WizardError::FormInvalid(errors) => {
                RegistrationError::Validation(errors)
            }
            other => RegistrationError::Wizard(other.to_string()),
        }
    }
}

/// Forward/back stepper owning one registration draft.
#[derive(Debug, Clone)]
pub struct RegistrationWizard {
    draft: RegistrationDraft,
    step: Step,
    rules: FormRules,
}

impl RegistrationWizard {
    /// Start on step 1 with an empty draft.
    pub fn new(account_type: AccountType, rules: FormRules) -> Self {
        Self::from_draft(RegistrationDraft::new(account_type), rules)
    }

    /// Start on step 1 with a prefilled draft.
    pub fn from_draft(draft: RegistrationDraft, rules: FormRules) -> Self {
        Self {
            draft,
            step: Step::Step1,
            rules,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    /// Edit the draft. Nothing is validated until a transition or blur.
    pub fn draft_mut(&mut self) -> &mut RegistrationDraft {
        &mut self.draft
    }

    pub fn rules(&self) -> &FormRules {
        &self.rules
    }

    /// Fields shown on the current step for the draft's account type.
    pub fn current_fields(&self) -> Vec<Field> {
        step_fields(self.step, self.draft.account_type)
    }

    /// Validate a single field as its input loses focus.
    pub fn blur(&self, field: Field) -> Vec<ValidationError> {
        validate_field(&self.draft, field, &self.rules)
    }

    /// Advance one step if the current step's fields are valid.
    pub fn next(&mut self) -> Result<Step, WizardError> {
        let Some(next) = self.step.next_step() else {
            return Err(WizardError::AlreadyOnLastStep);
        };

        let errors = validate_fields(&self.draft, &self.current_fields(), &self.rules);
        if !errors.is_empty() {
            tracing::debug!(
                step = %self.step,
                failures = errors.len(),
                "wizard step blocked"
            );
            return Err(WizardError::StepInvalid {
                step: self.step,
                errors,
            });
        }

        tracing::debug!(from = %self.step, to = %next, "wizard advanced");
        self.step = next;
        Ok(next)
    }

    /// Go back one step. Stays put on step 1.
    pub fn back(&mut self) -> Step {
        if let Some(prev) = self.step.prev_step() {
            tracing::debug!(from = %self.step, to = %prev, "wizard went back");
            self.step = prev;
        }
        self.step
    }

    /// Re-validate everything and produce the typed form. Only allowed on
    /// the last step.
    pub fn finish(&self) -> Result<RegistrationForm, WizardError> {
        if !self.step.is_last() {
            return Err(WizardError::NotOnLastStep(self.step));
        }
        self.draft.to_form(&self.rules).map_err(WizardError::FormInvalid)
    }

    /// Drop the draft state after a successful submission.
    pub fn reset(&mut self) {
        self.draft = RegistrationDraft::new(self.draft.account_type);
        self.step = Step::Step1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_step1(account_type: AccountType) -> RegistrationWizard {
        let mut w = RegistrationWizard::new(account_type, FormRules::default());
        let d = w.draft_mut();
        d.set_text(Field::Email, "biuro@firma.pl");
        d.set_text(Field::Password, "bezpieczne1");
        d.set_text(Field::ConfirmPassword, "bezpieczne1");
        w
    }

    #[test]
    fn next_blocked_by_current_step_only() {
        let mut w = RegistrationWizard::new(AccountType::Business, FormRules::default());
        let err = w.next().unwrap_err();
        let fields: Vec<_> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        // Step 2/3 fields are not checked yet
        assert_eq!(fields, ["email", "password"]);
        assert_eq!(w.step(), Step::Step1);
    }

    #[test]
    fn back_is_unconditional() {
        let mut w = filled_step1(AccountType::Business);
        w.next().unwrap();
        w.draft_mut().set_text(Field::Email, "");
        assert_eq!(w.back(), Step::Step1);
        assert_eq!(w.back(), Step::Step1);
    }

    #[test]
    fn finish_only_on_last_step() {
        let w = filled_step1(AccountType::Individual);
        assert_eq!(w.finish(), Err(WizardError::NotOnLastStep(Step::Step1)));
    }

    #[test]
    fn next_on_last_step_is_error() {
        let mut w = filled_step1(AccountType::Individual);
        w.draft_mut().set_text(Field::Name, "Jan");
        w.draft_mut().set_terms_accepted(true);
        w.next().unwrap();
        w.next().unwrap();
        assert_eq!(w.next(), Err(WizardError::AlreadyOnLastStep));
    }

    #[test]
    fn finish_revalidates_earlier_steps() {
        let mut w = filled_step1(AccountType::Individual);
        w.draft_mut().set_text(Field::Name, "Jan");
        w.next().unwrap();
        w.next().unwrap();
        // Step 1 field broken after passing it
        w.draft_mut().set_text(Field::ConfirmPassword, "inne-haslo");
        w.draft_mut().set_terms_accepted(true);
        let err = w.finish().unwrap_err();
        let fields: Vec<_> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["confirmPassword"]);
    }

    #[test]
    fn reset_returns_to_empty_step1() {
        let mut w = filled_step1(AccountType::Business);
        w.next().unwrap();
        w.reset();
        assert_eq!(w.step(), Step::Step1);
        assert!(w.draft().email.is_empty());
        assert_eq!(w.draft().account_type, AccountType::Business);
    }

    #[test]
    fn blur_checks_single_field() {
        let mut w = RegistrationWizard::new(AccountType::Business, FormRules::default());
        w.draft_mut().set_text(Field::Nip, "123-456-78-90");
        let errors = w.blur(Field::Nip);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code.as_deref(), Some("nip.checksum"));
    }
}
