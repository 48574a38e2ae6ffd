//! Admin authentication gate: a two-state machine (logged out / logged in)
//! with a bounded number of login attempts per session.
use serde::Deserialize;

use crate::{ResultEngine, error::EngineError};

/// Mismatches allowed before a session locks.
pub const MAX_LOGIN_ATTEMPTS: u8 = 3;

/// Username/password pair guarding the admin menu.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl Default for AdminCredentials {
    /// Factory credentials; deployments override them via configuration.
    fn default() -> Self {
        Self::new("admin", "1234")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GateState {
    LoggedOut,
    LoggedIn,
}

/// Guards the admin mode.
///
/// A session starts logged out. Each [`login`] mismatch counts toward
/// [`MAX_LOGIN_ATTEMPTS`]; the last one locks the session
/// ([`EngineError::TooManyAttempts`]) until the caller starts a new one with
/// [`logout`]. A successful login resets the counter.
///
/// [`login`]: AdminGate::login
/// [`logout`]: AdminGate::logout
#[derive(Clone, Debug)]
pub struct AdminGate {
    credentials: AdminCredentials,
    state: GateState,
    failed_attempts: u8,
}

impl AdminGate {
    #[must_use]
    pub fn new(credentials: AdminCredentials) -> Self {
        Self {
            credentials,
            state: GateState::LoggedOut,
            failed_attempts: 0,
        }
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.state == GateState::LoggedIn
    }

    /// Attempts left in the current session.
    #[must_use]
    pub fn remaining_attempts(&self) -> u8 {
        MAX_LOGIN_ATTEMPTS - self.failed_attempts
    }

    /// Tries to open the gate with the given credentials.
    ///
    /// Errors: [`EngineError::TooManyAttempts`] when the session is already
    /// locked or this mismatch was the last allowed one;
    /// [`EngineError::LoginFailed`] (with the remaining count) otherwise.
    pub fn login(&mut self, username: &str, password: &str) -> ResultEngine<()> {
        if self.failed_attempts >= MAX_LOGIN_ATTEMPTS {
            return Err(EngineError::TooManyAttempts);
        }

        if self.credentials.matches(username.trim(), password.trim()) {
            self.state = GateState::LoggedIn;
            self.failed_attempts = 0;
            return Ok(());
        }

        self.failed_attempts += 1;
        if self.failed_attempts >= MAX_LOGIN_ATTEMPTS {
            Err(EngineError::TooManyAttempts)
        } else {
            Err(EngineError::LoginFailed {
                remaining: self.remaining_attempts(),
            })
        }
    }

    /// Ends the session: back to logged out with a fresh attempt counter.
    pub fn logout(&mut self) {
        self.state = GateState::LoggedOut;
        self.failed_attempts = 0;
    }

    /// Replaces the credentials.
    ///
    /// Preconditions, all checked before any mutation:
    /// - the current credentials must match ([`EngineError::CredentialMismatch`];
    ///   not attempt-limited, unlike [`login`]),
    /// - the new username and password must be non-empty
    ///   ([`EngineError::EmptyCredentialField`]),
    /// - `confirm` must be `true`; otherwise the change is cancelled and
    ///   `Ok(false)` is returned.
    ///
    /// Returns `Ok(true)` when the credentials were replaced.
    ///
    /// [`login`]: AdminGate::login
    pub fn change_credentials(
        &mut self,
        current_username: &str,
        current_password: &str,
        new_username: &str,
        new_password: &str,
        confirm: bool,
    ) -> ResultEngine<bool> {
        if !self
            .credentials
            .matches(current_username.trim(), current_password.trim())
        {
            return Err(EngineError::CredentialMismatch);
        }

        let new_username = new_username.trim();
        let new_password = new_password.trim();
        if new_username.is_empty() || new_password.is_empty() {
            return Err(EngineError::EmptyCredentialField);
        }

        if !confirm {
            return Ok(false);
        }

        self.credentials = AdminCredentials::new(new_username, new_password);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AdminGate {
        AdminGate::new(AdminCredentials::default())
    }

    #[test]
    fn login_succeeds_with_factory_credentials() {
        let mut gate = gate();
        gate.login("admin", "1234").unwrap();
        assert!(gate.is_logged_in());
    }

    #[test]
    fn third_mismatch_locks_the_session() {
        let mut gate = gate();

        assert_eq!(
            gate.login("admin", "wrong").unwrap_err(),
            EngineError::LoginFailed { remaining: 2 }
        );
        assert_eq!(
            gate.login("admin", "wrong").unwrap_err(),
            EngineError::LoginFailed { remaining: 1 }
        );
        assert_eq!(
            gate.login("admin", "wrong").unwrap_err(),
            EngineError::TooManyAttempts
        );
        // Locked even with the right credentials until a new session starts.
        assert_eq!(
            gate.login("admin", "1234").unwrap_err(),
            EngineError::TooManyAttempts
        );

        gate.logout();
        gate.login("admin", "1234").unwrap();
        assert!(gate.is_logged_in());
    }

    #[test]
    fn successful_login_resets_the_counter() {
        let mut gate = gate();
        let _ = gate.login("admin", "wrong");
        gate.login("admin", "1234").unwrap();
        assert_eq!(gate.remaining_attempts(), MAX_LOGIN_ATTEMPTS);
    }

    #[test]
    fn change_requires_current_credentials() {
        let mut gate = gate();
        let err = gate
            .change_credentials("admin", "wrong", "root", "secret", true)
            .unwrap_err();
        assert_eq!(err, EngineError::CredentialMismatch);
        // Not attempt-limited.
        assert_eq!(gate.remaining_attempts(), MAX_LOGIN_ATTEMPTS);
        gate.login("admin", "1234").unwrap();
    }

    #[test]
    fn change_rejects_empty_fields() {
        let mut gate = gate();
        let err = gate
            .change_credentials("admin", "1234", "", "secret", true)
            .unwrap_err();
        assert_eq!(err, EngineError::EmptyCredentialField);
        let err = gate
            .change_credentials("admin", "1234", "root", "   ", true)
            .unwrap_err();
        assert_eq!(err, EngineError::EmptyCredentialField);
        gate.login("admin", "1234").unwrap();
    }

    #[test]
    fn unconfirmed_change_is_cancelled() {
        let mut gate = gate();
        let applied = gate
            .change_credentials("admin", "1234", "root", "secret", false)
            .unwrap();
        assert!(!applied);
        gate.login("admin", "1234").unwrap();
    }

    #[test]
    fn confirmed_change_replaces_credentials() {
        let mut gate = gate();
        let applied = gate
            .change_credentials("admin", "1234", "root", "secret", true)
            .unwrap();
        assert!(applied);

        assert!(gate.login("admin", "1234").is_err());
        gate.logout();
        gate.login("root", "secret").unwrap();
        assert!(gate.is_logged_in());
    }
}
