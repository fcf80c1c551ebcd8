use serde::{Deserialize, Deserializer, Serialize};

/// Default upper bound on business categories.
pub const DEFAULT_MAX_CATEGORIES: usize = 3;

/// Default minimum password length, in characters.
pub const DEFAULT_MIN_PASSWORD_LEN: usize = 8;

/// Tunable limits for registration validation.
///
/// Missing keys fall back to the defaults when deserialized, so a config
/// file only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormRules {
    /// Business accounts must pick between 1 and this many categories.
    /// A configured 0 is read as 1.
    #[serde(deserialize_with = "at_least_one")]
    pub max_categories: usize,
    /// Shortest accepted password, counted in characters.
    pub min_password_len: usize,
}

fn at_least_one<'de, D: Deserializer<'de>>(d: D) -> Result<usize, D::Error> {
    usize::deserialize(d).map(|n| n.max(1))
}

impl Default for FormRules {
    fn default() -> Self {
        Self {
            max_categories: DEFAULT_MAX_CATEGORIES,
            min_password_len: DEFAULT_MIN_PASSWORD_LEN,
        }
    }
}

impl FormRules {
    /// Set the category cap. Values below 1 are raised to 1.
    pub fn with_max_categories(mut self, max: usize) -> Self {
        self.max_categories = max.max(1);
        self
    }

    /// Category cap in effect, never below 1 even if the field was set directly.
    pub fn category_cap(&self) -> usize {
        self.max_categories.max(1)
    }

    /// Set the minimum password length.
    pub fn with_min_password_len(mut self, len: usize) -> Self {
        self.min_password_len = len;
        self
    }
}
