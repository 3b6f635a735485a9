//! Login credentials.
//!
//! The BFF only checks that both values are present; whitespace, casing and
//! password rules are the upstream's business, so inputs are forwarded
//! exactly as received.

use std::fmt;

use zeroize::Zeroizing;

/// Returned when a login payload is missing a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Username was missing or empty.
    #[error("username must not be empty")]
    MissingUsername,
    /// Password was missing or empty.
    #[error("password must not be empty")]
    MissingPassword,
}

/// Credentials consumed by a single login call.
///
/// ## Invariants
/// - Neither `username` nor `password` is empty.
/// - The password buffer is wiped on drop and never printed by `Debug`.
///
/// # Examples
/// ```
/// use bff::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("alice", "pw").unwrap();
/// assert_eq!(creds.username(), "alice");
/// assert!(!format!("{creds:?}").contains("pw\""));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Build credentials from raw inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        if username.is_empty() {
            return Err(CredentialsValidationError::MissingUsername);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::MissingPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username as supplied.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password as supplied.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
