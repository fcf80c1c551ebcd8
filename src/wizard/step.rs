//! Wizard steps and which fields each one shows.

use std::fmt;

use crate::core::{AccountType, Field};

/// Position in the three-step registration wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    /// Account type and credentials.
    Step1,
    /// Who you are: name, or company, NIP and categories.
    Step2,
    /// Address (business only) and terms.
    Step3,
}

impl Step {
    /// The step after this one, or `None` on the last step.
    pub fn next_step(self) -> Option<Step> {
        match self {
            Self::Step1 => Some(Self::Step2),
            Self::Step2 => Some(Self::Step3),
            Self::Step3 => None,
        }
    }

    /// The step before this one, or `None` on the first step.
    pub fn prev_step(self) -> Option<Step> {
        match self {
            Self::Step1 => None,
            Self::Step2 => Some(Self::Step1),
            Self::Step3 => Some(Self::Step2),
        }
    }

    pub fn is_last(self) -> bool {
        self.next_step().is_none()
    }

    /// 1-based step number for progress indicators.
    pub fn number(self) -> u8 {
        match self {
            Self::Step1 => 1,
            Self::Step2 => 2,
            Self::Step3 => 3,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {}", self.number())
    }
}

/// Fields validated when leaving `step` for the given account type.
pub fn step_fields(step: Step, account_type: AccountType) -> Vec<Field> {
    let fields: &[Field] = match (step, account_type) {
        (Step::Step1, _) => &[
            Field::AccountType,
            Field::Email,
            Field::Password,
            Field::ConfirmPassword,
        ],
        (Step::Step2, AccountType::Individual) => &[Field::Name],
        (Step::Step2, AccountType::Business) => {
            &[Field::CompanyName, Field::Nip, Field::Categories]
        }
        (Step::Step3, AccountType::Individual) => &[Field::TermsAccepted],
        (Step::Step3, AccountType::Business) => &[
            Field::City,
            Field::PostalCode,
            Field::Street,
            Field::TermsAccepted,
        ],
    };
    fields.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_order() {
        assert_eq!(Step::Step1.next_step(), Some(Step::Step2));
        assert_eq!(Step::Step2.next_step(), Some(Step::Step3));
        assert_eq!(Step::Step3.next_step(), None);
        assert_eq!(Step::Step1.prev_step(), None);
        assert_eq!(Step::Step3.prev_step(), Some(Step::Step2));
        assert!(Step::Step3.is_last());
        assert!(!Step::Step2.is_last());
    }

    #[test]
    fn every_applicable_field_is_on_exactly_one_step() {
        for account_type in [AccountType::Individual, AccountType::Business] {
            let mut seen: Vec<Field> = [Step::Step1, Step::Step2, Step::Step3]
                .into_iter()
                .flat_map(|s| step_fields(s, account_type))
                .collect();
            seen.sort();
            let mut expected: Vec<Field> = Field::ALL
                .into_iter()
                .filter(|f| f.applies_to(account_type))
                .collect();
            expected.sort();
            assert_eq!(seen, expected, "{account_type}");
        }
    }

    #[test]
    fn display() {
        assert_eq!(Step::Step2.to_string(), "step 2");
    }
}
