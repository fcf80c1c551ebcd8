use super::error::RegistrationError;
use super::rules::FormRules;
use super::types::*;

/// Builder for registration drafts, mostly for server-side callers and tests.
///
/// ```
/// use konto::core::*;
///
/// let form = DraftBuilder::business("biuro@firma.pl", "bezpieczne1")
///     .company_name("Firma Sp. z o.o.")
///     .nip("526-000-12-46")
///     .category("motoryzacja")
///     .location("Warszawa", "00-001")
///     .accept_terms()
///     .build(&FormRules::default())
///     .unwrap();
///
/// assert_eq!(form.account_type(), AccountType::Business);
/// ```
pub struct DraftBuilder {
    draft: RegistrationDraft,
}

impl DraftBuilder {
    /// Start an individual draft; the password is also used as confirmation.
    pub fn individual(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self::with_credentials(AccountType::Individual, email.into(), password.into())
    }

    /// Start a business draft; the password is also used as confirmation.
    pub fn business(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self::with_credentials(AccountType::Business, email.into(), password.into())
    }

    fn with_credentials(account_type: AccountType, email: String, password: String) -> Self {
        let mut draft = RegistrationDraft::new(account_type);
        draft.email = email;
        draft.confirm_password = password.clone();
        draft.password = password;
        Self { draft }
    }

    pub fn confirm_password(mut self, confirm: impl Into<String>) -> Self {
        self.draft.confirm_password = confirm.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.draft.name = name.into();
        self
    }

    pub fn company_name(mut self, name: impl Into<String>) -> Self {
        self.draft.company_name = name.into();
        self
    }

    pub fn nip(mut self, nip: impl Into<String>) -> Self {
        self.draft.nip = nip.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.draft.categories.push(category.into());
        self
    }

    pub fn location(mut self, city: impl Into<String>, postal_code: impl Into<String>) -> Self {
        self.draft.city = city.into();
        self.draft.postal_code = postal_code.into();
        self
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.draft.street = street.into();
        self
    }

    pub fn accept_terms(mut self) -> Self {
        self.draft.terms_accepted = true;
        self
    }

    /// The unvalidated draft, e.g. to hand to a wizard.
    pub fn draft(self) -> RegistrationDraft {
        self.draft
    }

    /// Validate and build the typed form.
    /// Returns all validation errors (not just the first).
    pub fn build(self, rules: &FormRules) -> Result<RegistrationForm, RegistrationError> {
        self.draft
            .to_form(rules)
            .map_err(RegistrationError::Validation)
    }
}
