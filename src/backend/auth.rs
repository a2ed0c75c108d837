//! Authentication provider seam.
//!
//! Core logic only ever needs the current user's id and email. The hosted
//! deployment plugs in the platform's auth client; locally and in tests,
//! [`SessionAuth`] keeps a single in-process session.

use crate::errors::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// The authenticated user as seen by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Opaque user id; used to scope every row-store query
    pub id: String,
    /// Account email, used as the export receiver fallback
    pub email: Option<String>,
}

/// Contract for the hosting platform's authentication service.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Returns the currently signed-in user, if any.
    fn current_user(&self) -> Option<AuthUser>;

    /// Signs a user in with email/password credentials.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser>;

    /// Registers a new account and signs it in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser>;

    /// Ends the current session. Signing out without a session is a no-op.
    async fn sign_out(&self) -> Result<()>;
}

/// Returns the current user or [`Error::NoSession`].
///
/// Every user action starts with this check; mutations additionally scope
/// their queries by the returned id.
pub fn require_user(auth: &dyn AuthProvider) -> Result<AuthUser> {
    auth.current_user().ok_or(Error::NoSession)
}

#[derive(Debug)]
struct Account {
    id: String,
    password: String,
}

/// Single-session, in-process auth provider.
///
/// Suitable for local runs and tests only; passwords are compared in plain
/// text and nothing is persisted.
#[derive(Debug, Default)]
pub struct SessionAuth {
    accounts: Mutex<HashMap<String, Account>>,
    session: Mutex<Option<AuthUser>>,
    next_id: Mutex<u64>,
}

impl SessionAuth {
    /// Creates an empty provider with no accounts and no session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider already signed in as the given user.
    #[must_use]
    pub fn signed_in(id: &str, email: &str) -> Self {
        let auth = Self::new();
        *auth.session.lock().unwrap_or_else(std::sync::PoisonError::into_inner) =
            Some(AuthUser {
                id: id.to_string(),
                email: Some(email.to_string()),
            });
        auth
    }

    fn lock_accounts(&self) -> std::sync::MutexGuard<'_, HashMap<String, Account>> {
        self.accounts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn lock_session(&self) -> std::sync::MutexGuard<'_, Option<AuthUser>> {
        self.session
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl AuthProvider for SessionAuth {
    fn current_user(&self) -> Option<AuthUser> {
        self.lock_session().clone()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser> {
        let accounts = self.lock_accounts();
        let account = accounts.get(email).ok_or_else(|| Error::Credentials {
            message: "unknown email or wrong password".to_string(),
        })?;
        if account.password != password {
            return Err(Error::Credentials {
                message: "unknown email or wrong password".to_string(),
            });
        }
        let user = AuthUser {
            id: account.id.clone(),
            email: Some(email.to_string()),
        };
        drop(accounts);
        *self.lock_session() = Some(user.clone());
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser> {
        let mut accounts = self.lock_accounts();
        if accounts.contains_key(email) {
            return Err(Error::Credentials {
                message: format!("an account already exists for {email}"),
            });
        }
        let mut next_id = self
            .next_id
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *next_id += 1;
        let id = format!("user-{next_id}");
        drop(next_id);
        accounts.insert(
            email.to_string(),
            Account {
                id: id.clone(),
                password: password.to_string(),
            },
        );
        drop(accounts);
        let user = AuthUser {
            id,
            email: Some(email.to_string()),
        };
        *self.lock_session() = Some(user.clone());
        Ok(user)
    }

    async fn sign_out(&self) -> Result<()> {
        *self.lock_session() = None;
        Ok(())
    }
}
