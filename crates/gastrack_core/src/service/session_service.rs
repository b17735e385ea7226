//! Session gate for interior pages.
//!
//! # Responsibility
//! - Track the anonymous/authenticated state behind login and logout.
//! - Guard interior pages behind `require_authenticated`.
//!
//! # Invariants
//! - Credentials are compared by plain string equality against one fixed
//!   expected pair; there is no credential storage or protocol.
//! - The gate never touches ledger or stock state.

use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Built-in credential pair carried over from the legacy deployment.
pub const DEFAULT_IDENTIFIER: &str = "admin@gastrack";
pub const DEFAULT_SECRET: &str = "Admin@123";

/// Gate states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

/// Session gate failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// Identifier/secret pair did not match; the gate stays anonymous.
    InvalidCredentials,
    /// An interior page was requested without an authenticated session.
    NotAuthenticated,
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid login credentials"),
            Self::NotAuthenticated => write!(f, "authentication required"),
        }
    }
}

impl Error for SessionError {}

/// Expected identifier/secret pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCredentials {
    identifier: String,
    secret: String,
}

impl SessionCredentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    fn matches(&self, identifier: &str, secret: &str) -> bool {
        self.identifier == identifier && self.secret == secret
    }
}

impl Default for SessionCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTIFIER, DEFAULT_SECRET)
    }
}

/// Two-state session gate: anonymous until a successful login.
#[derive(Debug)]
pub struct SessionGate {
    credentials: SessionCredentials,
    state: SessionState,
}

impl SessionGate {
    /// Creates an anonymous gate with the provided expected credentials.
    pub fn new(credentials: SessionCredentials) -> Self {
        Self {
            credentials,
            state: SessionState::Anonymous,
        }
    }

    /// Creates an anonymous gate with the built-in credential pair.
    pub fn with_default_credentials() -> Self {
        Self::new(SessionCredentials::default())
    }

    /// Attempts a login; the gate transitions to `Authenticated` only on an
    /// exact credential match.
    ///
    /// # Errors
    /// - `InvalidCredentials` on mismatch; the gate stays anonymous.
    pub fn login(&mut self, identifier: &str, secret: &str) -> Result<(), SessionError> {
        if self.credentials.matches(identifier, secret) {
            self.state = SessionState::Authenticated;
            info!("event=login module=session status=ok");
            Ok(())
        } else {
            warn!("event=login module=session status=denied");
            Err(SessionError::InvalidCredentials)
        }
    }

    /// Drops back to `Anonymous` unconditionally.
    pub fn logout(&mut self) {
        self.state = SessionState::Anonymous;
        info!("event=logout module=session status=ok");
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    /// Guard for interior pages.
    ///
    /// # Errors
    /// - `NotAuthenticated` while the gate is anonymous.
    pub fn require_authenticated(&self) -> Result<(), SessionError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(SessionError::NotAuthenticated)
        }
    }
}
