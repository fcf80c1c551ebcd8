//! Logged-in user context.
//!
//! Components that branch on "who is logged in" take a [`SessionContext`]
//! instead of reading global storage. The backing medium is a
//! [`SessionStore`] and can be swapped without touching callers.
//!
//! # Example
//!
//! ```
//! use konto::session::*;
//!
//! let ctx = SessionContext::load(MemorySessionStore::new()).unwrap();
//! assert!(!ctx.is_logged_in());
//! ```

mod store;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{AccountType, RegistrationError, RegistrationForm};

/// Error from a session backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session data is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

impl From<SessionError> for RegistrationError {
    fn from(e: SessionError) -> Self {
        RegistrationError::Session(e.to_string())
    }
}

/// What the UI knows about the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// Server-assigned account id.
    pub id: String,
    pub email: String,
    pub account_type: AccountType,
    /// Person's name or company name.
    pub display_name: String,
    pub logged_in_at: DateTime<Utc>,
}

impl SessionUser {
    /// Session for a freshly registered account.
    pub fn from_registration(
        id: impl Into<String>,
        form: &RegistrationForm,
        logged_in_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            email: form.credentials().email.clone(),
            account_type: form.account_type(),
            display_name: form.display_name().to_string(),
            logged_in_at,
        }
    }
}

/// Request-scoped view of the session, passed down to components.
#[derive(Debug)]
pub struct SessionContext<S: SessionStore> {
    store: S,
    user: Option<SessionUser>,
}

impl<S: SessionStore> SessionContext<S> {
    /// Read the current user from the store.
    pub fn load(store: S) -> Result<Self, SessionError> {
        let user = store.load()?;
        Ok(Self { store, user })
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_business(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.account_type == AccountType::Business)
    }

    /// Promotions are sold to business accounts only.
    pub fn can_publish_promotions(&self) -> bool {
        self.is_business()
    }

    pub fn login(&mut self, user: SessionUser) -> Result<(), SessionError> {
        self.store.save(&user)?;
        tracing::info!(account_type = %user.account_type, "session started");
        self.user = Some(user);
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.store.clear()?;
        if self.user.take().is_some() {
            tracing::info!("session ended");
        }
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
