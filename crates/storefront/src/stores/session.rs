//! Authentication and session state.
//!
//! Two slots back this store: the credential directory (every registered
//! account, keyed by normalized email) and the current session user. The
//! directory is the source of truth for "does this email exist"; the session
//! slot only ever holds a copy of a user that directory produced. Passwords
//! compare by plain equality - this is a browser demo, not an auth system.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use shopkart_core::{Email, EmailError, UserId};

use crate::storage::{Storage, slots};

/// Errors reported by registration and login.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The email is structurally invalid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The email already has a credential record.
    #[error("an account with this email already exists")]
    UserAlreadyExists,

    /// Unknown email or wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,
}

/// A registered account holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
}

/// One entry in the credential directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CredentialRecord {
    user: User,
    password: String,
}

/// Partial profile fields merged by [`SessionStore::update_profile`].
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<Email>,
}

/// Registers and authenticates users; holds the current session.
pub struct SessionStore {
    storage: Storage,
    current: Option<User>,
}

impl SessionStore {
    /// Re-hydrate the session from durable storage.
    #[must_use]
    pub fn open(storage: Storage) -> Self {
        let current = storage.load(slots::SESSION_USER);
        Self { storage, current }
    }

    /// The currently authenticated user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Whether a session is active.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Register a new account and sign it in.
    ///
    /// The email is normalized to lowercase before the duplicate check, so
    /// registration is case-insensitive. On failure the credential directory
    /// is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidEmail`] for a malformed email and
    /// [`AuthError::UserAlreadyExists`] when the email is already registered.
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        let mut directory = self.directory();
        if directory.contains_key(email.as_str()) {
            return Err(AuthError::UserAlreadyExists);
        }

        let user = User {
            id: UserId::generate(),
            name: name.to_owned(),
            email: email.clone(),
        };

        directory.insert(
            email.as_str().to_owned(),
            CredentialRecord {
                user: user.clone(),
                password: password.to_owned(),
            },
        );
        self.save_directory(&directory);
        self.set_session(user.clone());

        tracing::info!(user_id = %user.id, "registered new account");
        Ok(user)
    }

    /// Sign in an existing account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidEmail`] for a malformed email and
    /// [`AuthError::InvalidCredentials`] for an unknown email or a password
    /// mismatch.
    pub fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        let directory = self.directory();
        let record = directory
            .get(email.as_str())
            .ok_or(AuthError::InvalidCredentials)?;

        if record.password != password {
            return Err(AuthError::InvalidCredentials);
        }

        let user = record.user.clone();
        self.set_session(user.clone());

        tracing::info!(user_id = %user.id, "logged in");
        Ok(user)
    }

    /// Clear the current session, in memory and on disk.
    pub fn logout(&mut self) {
        self.current = None;
        self.storage.clear(slots::SESSION_USER);
    }

    /// Merge profile fields into the current user.
    ///
    /// No-op without a session. The credential directory entry is found by
    /// the pre-update email and overwritten with the merged user, so future
    /// logins (still under the original email key) see the change.
    pub fn update_profile(&mut self, update: ProfileUpdate) {
        let Some(user) = self.current.as_ref() else {
            return;
        };

        let directory_key = user.email.as_str().to_owned();
        let mut updated = user.clone();
        if let Some(name) = update.name {
            updated.name = name;
        }
        if let Some(email) = update.email {
            updated.email = email;
        }

        let mut directory = self.directory();
        if let Some(record) = directory.get_mut(&directory_key) {
            record.user = updated.clone();
            self.save_directory(&directory);
        }

        self.set_session(updated);
    }

    fn set_session(&mut self, user: User) {
        self.storage.save(slots::SESSION_USER, &user);
        self.current = Some(user);
    }

    fn directory(&self) -> HashMap<String, CredentialRecord> {
        self.storage
            .load(slots::CREDENTIAL_DIRECTORY)
            .unwrap_or_default()
    }

    fn save_directory(&self, directory: &HashMap<String, CredentialRecord>) {
        self.storage.save(slots::CREDENTIAL_DIRECTORY, directory);
    }
}
