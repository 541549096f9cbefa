//! # Admin Sessions
//!
//! Email/password sign-in for the admin console. Accounts come from configuration and passwords
//! are stored as Argon2 PHC strings. The current session is held in a `watch` channel so that
//! views can react to sign-in and sign-out.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Password hashing failed: {0}")]
    Hash(String),
}

/// An admin allowed to sign in.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct AuthService {
    accounts: Vec<AdminAccount>,
    session: watch::Sender<Option<Session>>,
}

impl AuthService {
    pub fn new(accounts: Vec<AdminAccount>) -> Self {
        let (session, _) = watch::channel(None);
        Self { accounts, session }
    }

    pub fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let account = self
            .accounts
            .iter()
            .find(|account| account.email.eq_ignore_ascii_case(email));
        let verified = account.is_some_and(|a| verify_password(password, &a.password_hash));
        if !verified {
            warn!(email, "Sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let session = Session {
            email: email.to_string(),
            signed_in_at: Utc::now(),
        };
        self.session.send_replace(Some(session.clone()));
        info!(email, "Signed in");
        Ok(session)
    }

    pub fn sign_out(&self) {
        if let Some(previous) = self.session.send_replace(None) {
            info!(email = %previous.email, "Signed out");
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    pub fn require_session(&self) -> Result<Session, AuthError> {
        self.current().ok_or(AuthError::NotSignedIn)
    }

    /// Receiver that observes every sign-in and sign-out from now on.
    pub fn on_session_change(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }
}

/// Hashes a password into an Argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::encode_b64(uuid::Uuid::new_v4().as_bytes())
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
