//! # konto
//!
//! Account registration for a Polish classifieds marketplace: NIP checksum
//! validation, individual/business registration forms, a multi-step
//! wizard, guarded submission, and swappable session storage.
//!
//! A business account must carry a valid NIP (Numer Identyfikacji
//! Podatkowej). Individual accounts never have their business fields looked
//! at.
//!
//! ## Quick Start
//!
//! ```rust
//! use konto::core::*;
//!
//! assert!(validate_nip("526-000-12-46"));
//!
//! let mut draft = RegistrationDraft::new(AccountType::Business);
//! draft.set_text(Field::Nip, "526-000-12-47");
//!
//! let errors = validate_field(&draft, Field::Nip, &FormRules::default());
//! assert_eq!(errors[0].message, "Wprowadź poprawny NIP");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | NIP validation, form types, field validation |
//! | `wizard` | Three-step registration stepper |
//! | `session` | Logged-in user context with memory/file stores |
//! | `submit` | At-most-one in-flight submission, HTTP endpoint |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "wizard")]
pub mod wizard;

#[cfg(feature = "session")]
pub mod session;

#[cfg(feature = "submit")]
pub mod submit;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
