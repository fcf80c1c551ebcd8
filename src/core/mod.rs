//! Core registration types, NIP validation, and form validation.
//!
//! This module provides the Polish NIP checksum validator and the
//! individual/business registration form it guards.

mod builder;
mod error;
pub mod nip;
mod rules;
mod types;
mod validation;

pub use builder::*;
pub use error::*;
pub use nip::{Nip, NipError, nip_check_digit, normalize_nip, validate_nip};
pub use rules::*;
pub use types::*;
pub use validation::*;
