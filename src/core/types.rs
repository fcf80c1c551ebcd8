use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::RegistrationError;
use super::nip::Nip;
use super::rules::FormRules;

/// Registration form discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountType {
    /// Private person posting ads.
    #[default]
    Individual,
    /// Company listed in the business directory.
    Business,
}

impl AccountType {
    /// Wire name, as used in the `accountType` tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Business => "business",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(Self::Individual),
            "business" => Ok(Self::Business),
            other => Err(format!("unknown account type '{other}'")),
        }
    }
}

/// Every field of the registration draft, addressable by its form path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    AccountType,
    Email,
    Password,
    ConfirmPassword,
    TermsAccepted,
    Name,
    CompanyName,
    Nip,
    Categories,
    City,
    PostalCode,
    Street,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::AccountType,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
        Field::TermsAccepted,
        Field::Name,
        Field::CompanyName,
        Field::Nip,
        Field::Categories,
        Field::City,
        Field::PostalCode,
        Field::Street,
    ];

    /// Path used to key error messages to inputs.
    pub fn path(&self) -> &'static str {
        match self {
            Self::AccountType => "accountType",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
            Self::TermsAccepted => "termsAccepted",
            Self::Name => "name",
            Self::CompanyName => "companyName",
            Self::Nip => "nip",
            Self::Categories => "categories",
            Self::City => "location.city",
            Self::PostalCode => "location.postalCode",
            Self::Street => "location.street",
        }
    }

    /// Fields that exist only on the business variant.
    pub fn is_business_only(&self) -> bool {
        matches!(
            self,
            Self::CompanyName
                | Self::Nip
                | Self::Categories
                | Self::City
                | Self::PostalCode
                | Self::Street
        )
    }

    /// Fields that exist only on the individual variant.
    pub fn is_individual_only(&self) -> bool {
        matches!(self, Self::Name)
    }

    /// Whether this field is part of the given account type's form.
    pub fn applies_to(&self, account_type: AccountType) -> bool {
        match account_type {
            AccountType::Individual => !self.is_business_only(),
            AccountType::Business => !self.is_individual_only(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.path() == s)
            .ok_or_else(|| format!("unknown form field '{s}'"))
    }
}

/// Login credentials shared by both account types.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Business address shown in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub city: String,
    /// Polish postal code, `NN-NNN`.
    pub postal_code: String,
    pub street: Option<String>,
}

/// Validated individual registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualAccount {
    #[serde(flatten)]
    pub credentials: Credentials,
    pub name: String,
}

/// Validated business registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessAccount {
    #[serde(flatten)]
    pub credentials: Credentials,
    pub company_name: String,
    pub nip: Nip,
    pub categories: BTreeSet<String>,
    pub location: Location,
}

/// A registration that passed validation, tagged by `accountType`.
///
/// Deserializing runs the same checks as [`RegistrationDraft::to_form`]
/// with the default [`FormRules`], so a form read from JSON is as valid as
/// one built from a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "accountType",
    rename_all = "camelCase",
    try_from = "WireForm"
)]
pub enum RegistrationForm {
    Individual(IndividualAccount),
    Business(BusinessAccount),
}

/// Unchecked JSON shape of [`RegistrationForm`].
#[derive(Deserialize)]
#[serde(tag = "accountType", rename_all = "camelCase")]
enum WireForm {
    Individual(WireIndividual),
    Business(WireBusiness),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireIndividual {
    #[serde(flatten)]
    credentials: Credentials,
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireBusiness {
    #[serde(flatten)]
    credentials: Credentials,
    company_name: String,
    nip: String,
    categories: Vec<String>,
    location: Location,
}

impl TryFrom<WireForm> for RegistrationForm {
    type Error = RegistrationError;

    fn try_from(wire: WireForm) -> Result<Self, Self::Error> {
        // A submitted form has already confirmed its password and terms
        let draft = match wire {
            WireForm::Individual(w) => RegistrationDraft {
                account_type: AccountType::Individual,
                confirm_password: w.credentials.password.clone(),
                email: w.credentials.email,
                password: w.credentials.password,
                terms_accepted: true,
                name: w.name,
                ..RegistrationDraft::default()
            },
            WireForm::Business(w) => RegistrationDraft {
                account_type: AccountType::Business,
                confirm_password: w.credentials.password.clone(),
                email: w.credentials.email,
                password: w.credentials.password,
                terms_accepted: true,
                company_name: w.company_name,
                nip: w.nip,
                categories: w.categories,
                city: w.location.city,
                postal_code: w.location.postal_code,
                street: w.location.street.unwrap_or_default(),
                ..RegistrationDraft::default()
            },
        };
        draft
            .to_form(&FormRules::default())
            .map_err(RegistrationError::Validation)
    }
}

impl RegistrationForm {
    /// Which variant this is.
    pub fn account_type(&self) -> AccountType {
        match self {
            Self::Individual(_) => AccountType::Individual,
            Self::Business(_) => AccountType::Business,
        }
    }

    /// Login credentials common to both variants.
    pub fn credentials(&self) -> &Credentials {
        match self {
            Self::Individual(a) => &a.credentials,
            Self::Business(a) => &a.credentials,
        }
    }

    /// Name shown on the user's ads or directory entry.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Individual(a) => &a.name,
            Self::Business(a) => &a.company_name,
        }
    }
}

/// Mutable, unvalidated form state for one registration attempt.
///
/// Starts empty, is edited field by field, and is validated only when
/// asked to (see [`super::validate_registration`]).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub account_type: AccountType,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub terms_accepted: bool,
    pub name: String,
    pub company_name: String,
    pub nip: String,
    /// Selected categories, in selection order.
    pub categories: Vec<String>,
    pub city: String,
    pub postal_code: String,
    pub street: String,
}

impl fmt::Debug for RegistrationDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationDraft")
            .field("account_type", &self.account_type)
            .field("email", &self.email)
            .field("terms_accepted", &self.terms_accepted)
            .field("name", &self.name)
            .field("company_name", &self.company_name)
            .field("categories", &self.categories)
            .field("city", &self.city)
            .field("postal_code", &self.postal_code)
            .finish_non_exhaustive()
    }
}

impl RegistrationDraft {
    /// Empty draft for the given account type.
    pub fn new(account_type: AccountType) -> Self {
        Self {
            account_type,
            ..Self::default()
        }
    }

    /// Switch account type, clearing fields the new type does not have.
    pub fn set_account_type(&mut self, account_type: AccountType) {
        if self.account_type == account_type {
            return;
        }
        self.account_type = account_type;
        match account_type {
            AccountType::Individual => {
                self.company_name.clear();
                self.nip.clear();
                self.categories.clear();
                self.city.clear();
                self.postal_code.clear();
                self.street.clear();
            }
            AccountType::Business => self.name.clear(),
        }
    }

    /// Set a free-text field. Returns `false` for fields that are not text
    /// (`accountType`, `termsAccepted`, `categories`) or that do not apply to
    /// the current account type.
    pub fn set_text(&mut self, field: Field, value: impl Into<String>) -> bool {
        if !field.applies_to(self.account_type) {
            return false;
        }
        let slot = match field {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
            Field::Name => &mut self.name,
            Field::CompanyName => &mut self.company_name,
            Field::Nip => &mut self.nip,
            Field::City => &mut self.city,
            Field::PostalCode => &mut self.postal_code,
            Field::Street => &mut self.street,
            Field::AccountType | Field::TermsAccepted | Field::Categories => return false,
        };
        *slot = value.into();
        true
    }

    pub fn set_terms_accepted(&mut self, accepted: bool) {
        self.terms_accepted = accepted;
    }

    /// Select or deselect a category. Returns whether it is now selected.
    ///
    /// Selection is not capped here; the limit is a validation rule.
    pub fn toggle_category(&mut self, category: &str) -> bool {
        if self.account_type != AccountType::Business {
            return false;
        }
        if let Some(pos) = self.categories.iter().position(|c| c == category) {
            self.categories.remove(pos);
            false
        } else {
            self.categories.push(category.to_string());
            true
        }
    }
}
