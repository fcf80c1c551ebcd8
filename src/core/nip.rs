//! Polish NIP (Numer Identyfikacji Podatkowej) validation.
//!
//! A NIP is 10 decimal digits. The last one is a check digit: the first nine
//! are weighted by [`NIP_WEIGHTS`], summed, and reduced modulo 11. A result
//! of 10 cannot be a check digit, so such numbers are never issued.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of digits in a NIP.
pub const NIP_LENGTH: usize = 10;

/// Positional weights applied to the first nine digits.
pub const NIP_WEIGHTS: [u32; 9] = [6, 5, 7, 2, 3, 4, 5, 6, 7];

/// Why a NIP was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum NipError {
    /// Input did not contain exactly 10 digits after stripping separators.
    #[error("NIP must have exactly 10 digits, got {found}")]
    Length { found: usize },

    /// The weighted sum gives 10, which no NIP can carry.
    #[error("NIP check digit would be 10; no such number is issued")]
    UnassignableCheckDigit,

    /// The last digit does not match the computed check digit.
    #[error("NIP check digit mismatch: expected {expected}, found {found}")]
    CheckDigitMismatch { expected: u8, found: u8 },
}

/// Strip everything that is not an ASCII digit.
///
/// Accepts display forms like "123-456-32-18" or "123 456 32 18".
pub fn normalize_nip(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Compute the check digit for the first nine digits of a NIP.
///
/// Returns `None` when the weighted sum reduces to 10.
pub fn nip_check_digit(first_nine: &[u8; 9]) -> Option<u8> {
    let sum: u32 = first_nine
        .iter()
        .zip(NIP_WEIGHTS)
        .map(|(&d, w)| u32::from(d) * w)
        .sum();
    match sum % 11 {
        10 => None,
        check => Some(check as u8),
    }
}

/// Check whether `input` is a structurally and checksum-valid NIP.
///
/// Separators are ignored. Never panics; malformed input is simply `false`.
///
/// ```
/// use konto::core::validate_nip;
///
/// assert!(validate_nip("526-000-12-46"));
/// assert!(!validate_nip("5260001247"));
/// assert!(!validate_nip(""));
/// ```
pub fn validate_nip(input: &str) -> bool {
    Nip::parse(input).is_ok()
}

/// A validated NIP, stored as its 10 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Nip(String);

impl Nip {
    /// Parse and validate a NIP from user input.
    pub fn parse(input: &str) -> Result<Self, NipError> {
        let digits = normalize_nip(input);
        if digits.len() != NIP_LENGTH {
            return Err(NipError::Length {
                found: digits.len(),
            });
        }

        let bytes = digits.as_bytes();
        let mut first_nine = [0u8; 9];
        for (slot, b) in first_nine.iter_mut().zip(bytes) {
            *slot = b - b'0';
        }
        let found = bytes[9] - b'0';

        let expected = nip_check_digit(&first_nine).ok_or(NipError::UnassignableCheckDigit)?;
        if expected != found {
            return Err(NipError::CheckDigitMismatch { expected, found });
        }
        Ok(Self(digits))
    }

    /// The bare 10 digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The usual printed grouping, `XXX-XXX-XX-XX`.
    pub fn formatted(&self) -> String {
        let d = &self.0;
        format!("{}-{}-{}-{}", &d[..3], &d[3..6], &d[6..8], &d[8..])
    }
}

impl fmt::Display for Nip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl std::str::FromStr for Nip {
    type Err = NipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for Nip {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
