//! Registration submission with an at-most-one in-flight guard.
//!
//! The controller validates the draft, marks itself busy, and hands the
//! typed form to a [`RegistrationEndpoint`]. A second submit while one is
//! running is refused without touching the endpoint. Whatever the outcome,
//! the busy flag is cleared so the form becomes editable again.
//!
//! # Example
//!
//! ```ignore
//! use konto::core::*;
//! use konto::submit::*;
//!
//! let endpoint = HttpRegistrationEndpoint::new("https://example.pl/api/register")?;
//! let controller = SubmissionController::new(FormRules::default());
//! let registered = controller.submit(&draft, &endpoint).await?;
//! ```

mod http;

pub use http::{DEFAULT_CONNECT_TIMEOUT, HttpRegistrationEndpoint};

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{
    AccountType, FormRules, RegistrationDraft, RegistrationError, RegistrationForm,
    ValidationError,
};

/// What the registration endpoint returns for a created account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registered {
    pub id: String,
    pub account_type: AccountType,
}

/// Error from the registration endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EndpointError {
    /// Network or HTTP client error.
    #[error("registration network error: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("registration rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
    /// The response body was not what we expected.
    #[error("registration response parse error: {0}")]
    Parse(String),
}

/// Why a submit attempt did not produce an account.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    /// Another submission from this form is still running.
    #[error("a submission is already in progress")]
    InFlight,

    /// The form did not validate; nothing was sent.
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(Vec<ValidationError>),

    /// Submit was attempted from the wizard before its last step.
    #[cfg(feature = "wizard")]
    #[error(transparent)]
    Wizard(crate::wizard::WizardError),

    #[error(transparent)]
    Endpoint(#[from] EndpointError),
}

impl SubmitError {
    /// Message for the toast shown after a failed attempt.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InFlight => "Trwa wysyłanie formularza",
            Self::Invalid(_) => "Popraw błędy w formularzu",
            #[cfg(feature = "wizard")]
            Self::Wizard(_) => "Popraw błędy w formularzu",
            Self::Endpoint(_) => "Nie udało się utworzyć konta. Spróbuj ponownie.",
        }
    }

    /// Field errors to render next to inputs, if any.
    pub fn field_errors(&self) -> &[ValidationError] {
        match self {
            Self::Invalid(errors) => errors,
            #[cfg(feature = "wizard")]
            Self::Wizard(e) => e.field_errors(),
            _ => &[],
        }
    }
}

impl From<SubmitError> for RegistrationError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::Invalid(errors) => RegistrationError::Validation(errors),
            other => RegistrationError::Submit(other.to_string()),
        }
    }
}

/// Server side of registration.
pub trait RegistrationEndpoint {
    fn register(
        &self,
        form: &RegistrationForm,
    ) -> impl Future<Output = Result<Registered, EndpointError>> + Send;
}

/// Clears the busy flag when the attempt ends, however it ends.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Submit driver for one form instance.
#[derive(Debug, Default)]
pub struct SubmissionController {
    rules: FormRules,
    in_flight: AtomicBool,
}

impl SubmissionController {
    pub fn new(rules: FormRules) -> Self {
        Self {
            rules,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a request is running; the submit button is disabled while true.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate the draft and send it.
    pub async fn submit<E: RegistrationEndpoint>(
        &self,
        draft: &RegistrationDraft,
        endpoint: &E,
    ) -> Result<Registered, SubmitError> {
        let _guard = self.acquire()?;
        let form = draft.to_form(&self.rules).map_err(SubmitError::Invalid)?;
        self.dispatch(&form, endpoint).await
    }

    /// Finish the wizard and send its form. Only allowed on the last step.
    #[cfg(feature = "wizard")]
    pub async fn submit_wizard<E: RegistrationEndpoint>(
        &self,
        wizard: &crate::wizard::RegistrationWizard,
        endpoint: &E,
    ) -> Result<Registered, SubmitError> {
        let _guard = self.acquire()?;
        let form = wizard.finish().map_err(SubmitError::Wizard)?;
        self.dispatch(&form, endpoint).await
    }

    fn acquire(&self) -> Result<InFlightGuard<'_>, SubmitError> {
        InFlightGuard::acquire(&self.in_flight).ok_or_else(|| {
            tracing::warn!("registration submit ignored: request already in flight");
            SubmitError::InFlight
        })
    }

    async fn dispatch<E: RegistrationEndpoint>(
        &self,
        form: &RegistrationForm,
        endpoint: &E,
    ) -> Result<Registered, SubmitError> {
        let account_type = form.account_type();
        tracing::info!(%account_type, "dispatching registration");
        match endpoint.register(form).await {
            Ok(registered) => {
                tracing::info!(%account_type, id = %registered.id, "registration accepted");
                Ok(registered)
            }
            Err(e) => {
                tracing::warn!(%account_type, error = %e, "registration failed");
                Err(e.into())
            }
        }
    }
}
