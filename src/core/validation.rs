use std::collections::BTreeSet;

use super::error::ValidationError;
use super::nip::{Nip, validate_nip};
use super::rules::FormRules;
use super::types::*;

/// Message shown under the NIP input when the checksum fails.
pub const NIP_INVALID_MESSAGE: &str = "Wprowadź poprawny NIP";

/// Validate a whole draft for its account type.
/// Returns all validation errors found (not just the first).
///
/// Business-only fields are not looked at for individual drafts, even if
/// they hold stale values.
pub fn validate_registration(draft: &RegistrationDraft, rules: &FormRules) -> Vec<ValidationError> {
    let fields: Vec<Field> = Field::ALL
        .into_iter()
        .filter(|f| f.applies_to(draft.account_type))
        .collect();
    let errors = validate_fields(draft, &fields, rules);
    tracing::debug!(
        account_type = %draft.account_type,
        failures = errors.len(),
        "registration draft validated"
    );
    errors
}

/// Validate a subset of fields, e.g. one wizard step.
pub fn validate_fields(
    draft: &RegistrationDraft,
    fields: &[Field],
    rules: &FormRules,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for &field in fields {
        check_field(draft, field, rules, &mut errors);
    }
    errors
}

/// Validate a single field, e.g. when its input loses focus.
pub fn validate_field(draft: &RegistrationDraft, field: Field, rules: &FormRules) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    check_field(draft, field, rules, &mut errors);
    errors
}

fn err(field: Field, kind: &str, message: impl Into<String>) -> ValidationError {
    ValidationError::with_code(field.path(), message, format!("{}.{kind}", field.path()))
}

fn check_field(
    draft: &RegistrationDraft,
    field: Field,
    rules: &FormRules,
    errors: &mut Vec<ValidationError>,
) {
    if !field.applies_to(draft.account_type) {
        return;
    }

    match field {
        // Always a valid variant once it is an enum
        Field::AccountType => {}

        Field::Email => {
            let email = draft.email.trim();
            if email.is_empty() {
                errors.push(err(field, "required", "Podaj adres e-mail"));
            } else if !is_plausible_email(email) {
                errors.push(err(field, "format", "Podaj poprawny adres e-mail"));
            }
        }

        Field::Password => {
            if draft.password.is_empty() {
                errors.push(err(field, "required", "Podaj hasło"));
            } else if draft.password.chars().count() < rules.min_password_len {
                errors.push(err(
                    field,
                    "too_short",
                    format!(
                        "Hasło musi mieć co najmniej {} znaków",
                        rules.min_password_len
                    ),
                ));
            }
        }

        Field::ConfirmPassword => {
            // Byte-for-byte, no trimming or normalization
            if draft.confirm_password.as_bytes() != draft.password.as_bytes() {
                errors.push(err(field, "mismatch", "Hasła muszą być identyczne"));
            }
        }

        Field::TermsAccepted => {
            if !draft.terms_accepted {
                errors.push(err(field, "required", "Musisz zaakceptować regulamin"));
            }
        }

        Field::Name => {
            if draft.name.trim().is_empty() {
                errors.push(err(field, "required", "Podaj imię"));
            }
        }

        Field::CompanyName => {
            if draft.company_name.trim().is_empty() {
                errors.push(err(field, "required", "Podaj nazwę firmy"));
            }
        }

        Field::Nip => {
            if draft.nip.trim().is_empty() {
                errors.push(err(field, "required", "NIP jest wymagany"));
            } else if !validate_nip(&draft.nip) {
                errors.push(err(field, "checksum", NIP_INVALID_MESSAGE));
            }
        }

        Field::Categories => {
            let selected = distinct_categories(&draft.categories);
            if selected.is_empty() {
                errors.push(err(
                    field,
                    "too_few",
                    "Wybierz co najmniej jedną kategorię",
                ));
            } else if selected.len() > rules.category_cap() {
                errors.push(err(
                    field,
                    "too_many",
                    format!(
                        "Możesz wybrać maksymalnie {} kategorie",
                        rules.category_cap()
                    ),
                ));
            }
        }

        Field::City => {
            if draft.city.trim().is_empty() {
                errors.push(err(field, "required", "Podaj miejscowość"));
            }
        }

        Field::PostalCode => {
            let code = draft.postal_code.trim();
            if code.is_empty() {
                errors.push(err(field, "required", "Podaj kod pocztowy"));
            } else if !is_valid_postal_code(code) {
                errors.push(err(
                    field,
                    "format",
                    "Kod pocztowy musi mieć format 00-000",
                ));
            }
        }

        // Optional
        Field::Street => {}
    }
}

/// Distinct, non-blank, trimmed categories.
fn distinct_categories(categories: &[String]) -> BTreeSet<String> {
    categories
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// Polish postal code: two digits, a hyphen, three digits.
pub fn is_valid_postal_code(code: &str) -> bool {
    let b = code.as_bytes();
    b.len() == 6
        && b[2] == b'-'
        && b[..2].iter().all(u8::is_ascii_digit)
        && b[3..].iter().all(u8::is_ascii_digit)
}

/// Cheap structural e-mail check; deliverability is the server's problem.
pub fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

impl RegistrationDraft {
    /// Validate and convert into the typed form.
    pub fn to_form(&self, rules: &FormRules) -> Result<RegistrationForm, Vec<ValidationError>> {
        let errors = validate_registration(self, rules);
        if !errors.is_empty() {
            return Err(errors);
        }

        let credentials = Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };

        let form = match self.account_type {
            AccountType::Individual => RegistrationForm::Individual(IndividualAccount {
                credentials,
                name: self.name.trim().to_string(),
            }),
            AccountType::Business => {
                let nip = Nip::parse(&self.nip)
                    .map_err(|_| vec![err(Field::Nip, "checksum", NIP_INVALID_MESSAGE)])?;
                let street = self.street.trim();
                RegistrationForm::Business(BusinessAccount {
                    credentials,
                    company_name: self.company_name.trim().to_string(),
                    nip,
                    categories: distinct_categories(&self.categories),
                    location: Location {
                        city: self.city.trim().to_string(),
                        postal_code: self.postal_code.trim().to_string(),
                        street: (!street.is_empty()).then(|| street.to_string()),
                    },
                })
            }
        };
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn business() -> RegistrationDraft {
        RegistrationDraft {
            account_type: AccountType::Business,
            email: "biuro@firma.pl".into(),
            password: "bezpieczne1".into(),
            confirm_password: "bezpieczne1".into(),
            terms_accepted: true,
            company_name: "Firma Sp. z o.o.".into(),
            nip: "526-000-12-46".into(),
            categories: vec!["motoryzacja".into()],
            city: "Warszawa".into(),
            postal_code: "00-001".into(),
            ..RegistrationDraft::default()
        }
    }

    fn fields_of(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn valid_business_passes() {
        assert!(validate_registration(&business(), &FormRules::default()).is_empty());
    }

    #[test]
    fn empty_nip_is_required_error() {
        let mut d = business();
        d.nip.clear();
        let errors = validate_registration(&d, &FormRules::default());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "nip");
        assert_eq!(errors[0].code.as_deref(), Some("nip.required"));
    }

    #[test]
    fn bad_checksum_rejects() {
        let mut d = business();
        d.nip = "5260001247".into();
        let errors = validate_registration(&d, &FormRules::default());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, NIP_INVALID_MESSAGE);
        assert_eq!(errors[0].code.as_deref(), Some("nip.checksum"));
    }

    #[test]
    fn password_mismatch_keyed_to_confirm() {
        let mut d = business();
        d.confirm_password = "bezpieczne2".into();
        let errors = validate_registration(&d, &FormRules::default());
        assert_eq!(fields_of(&errors), ["confirmPassword"]);
    }

    #[test]
    fn category_bounds() {
        let rules = FormRules::default();
        let mut d = business();
        d.categories.clear();
        assert_eq!(
            validate_field(&d, Field::Categories, &rules)[0].code.as_deref(),
            Some("categories.too_few")
        );

        d.categories = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        assert_eq!(
            validate_field(&d, Field::Categories, &rules)[0].code.as_deref(),
            Some("categories.too_many")
        );

        // Duplicates and blanks do not count
        d.categories = vec!["a".into(), "a".into(), " ".into(), "b".into()];
        assert!(validate_field(&d, Field::Categories, &rules).is_empty());
    }

    #[test]
    fn tighter_category_cap_from_rules() {
        let rules = FormRules::default().with_max_categories(2);
        let mut d = business();
        d.categories = vec!["a".into(), "b".into(), "c".into()];
        assert_eq!(validate_field(&d, Field::Categories, &rules).len(), 1);
    }

    #[test]
    fn individual_ignores_business_fields() {
        let d = RegistrationDraft {
            account_type: AccountType::Individual,
            email: "jan@example.pl".into(),
            password: "bezpieczne1".into(),
            confirm_password: "bezpieczne1".into(),
            terms_accepted: true,
            name: "Jan".into(),
            nip: "garbage".into(),
            ..RegistrationDraft::default()
        };
        assert!(validate_registration(&d, &FormRules::default()).is_empty());
        assert!(validate_field(&d, Field::Nip, &FormRules::default()).is_empty());
    }

    #[test]
    fn collects_all_errors() {
        let d = RegistrationDraft::new(AccountType::Business);
        let errors = validate_registration(&d, &FormRules::default());
        assert_eq!(
            fields_of(&errors),
            [
                "email",
                "password",
                "termsAccepted",
                "companyName",
                "nip",
                "categories",
                "location.city",
                "location.postalCode",
            ]
        );
    }

    #[test]
    fn postal_codes() {
        assert!(is_valid_postal_code("00-950"));
        assert!(!is_valid_postal_code("00950"));
        assert!(!is_valid_postal_code("0-0950"));
        assert!(!is_valid_postal_code("ab-cde"));
    }

    #[test]
    fn emails() {
        assert!(is_plausible_email("jan@example.pl"));
        assert!(!is_plausible_email("jan@example"));
        assert!(!is_plausible_email("@example.pl"));
        assert!(!is_plausible_email("jan@@example.pl"));
        assert!(!is_plausible_email("jan kowalski@example.pl"));
    }

    #[test]
    fn to_form_builds_business_variant() {
        let form = business().to_form(&FormRules::default()).unwrap();
        let RegistrationForm::Business(acc) = form else {
            panic!("expected business form");
        };
        assert_eq!(acc.nip.as_str(), "5260001246");
        assert_eq!(acc.location.street, None);
        assert!(acc.categories.contains("motoryzacja"));
    }

    #[test]
    fn to_form_returns_errors() {
        let mut d = business();
        d.terms_accepted = false;
        let errors = d.to_form(&FormRules::default()).unwrap_err();
        assert_eq!(fields_of(&errors), ["termsAccepted"]);
    }
}
