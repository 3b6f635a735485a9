//! Employee administration inputs.
//!
//! Employee records themselves are upstream-owned JSON documents and are never
//! modelled here; these types cover only what the BFF must assemble before
//! forwarding: the create/update payloads and the path identifier.

use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};
use zeroize::Zeroizing;

/// Numeric upstream employee identifier taken from the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(i64);

impl EmployeeId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for EmployeeId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returned when an employee payload lacks a required value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EmployeeValidationError {
    /// Creation needs name, username and password.
    #[error("Name, username, and password are required")]
    MissingCreateFields,
    /// Updates need name and username.
    #[error("Name and username are required")]
    MissingUpdateFields,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

/// Payload for creating an employee.
#[derive(Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    name: String,
    username: String,
    password: Zeroizing<String>,
}

impl EmployeeDraft {
    /// Build a draft when every field is present and non-empty.
    ///
    /// # Examples
    /// ```
    /// use bff::domain::{EmployeeDraft, EmployeeValidationError};
    ///
    /// let draft = EmployeeDraft::try_from_parts(Some("Bob"), Some("bob"), Some("pw")).unwrap();
    /// assert_eq!(draft.name(), "Bob");
    /// assert_eq!(
    ///     EmployeeDraft::try_from_parts(Some("Bob"), Some("bob"), None),
    ///     Err(EmployeeValidationError::MissingCreateFields)
    /// );
    /// ```
    pub fn try_from_parts(
        name: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, EmployeeValidationError> {
        match (present(name), present(username), present(password)) {
            (Some(name), Some(username), Some(password)) => Ok(Self {
                name: name.to_owned(),
                username: username.to_owned(),
                password: Zeroizing::new(password.to_owned()),
            }),
            _ => Err(EmployeeValidationError::MissingCreateFields),
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Login name.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Initial password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Upstream JSON body `{name, username, password}`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert("name".to_owned(), Value::from(self.name()));
        body.insert("username".to_owned(), Value::from(self.username()));
        body.insert("password".to_owned(), Value::from(self.password()));
        Value::Object(body)
    }
}

impl fmt::Debug for EmployeeDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmployeeDraft")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Payload for updating an employee; the password is optional.
#[derive(Clone, PartialEq, Eq)]
pub struct EmployeeUpdate {
    name: String,
    username: String,
    password: Option<Zeroizing<String>>,
}

impl EmployeeUpdate {
    /// Build an update when name and username are present.
    ///
    /// An empty password is treated as "unchanged" and dropped.
    pub fn try_from_parts(
        name: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, EmployeeValidationError> {
        let (Some(name), Some(username)) = (present(name), present(username)) else {
            return Err(EmployeeValidationError::MissingUpdateFields);
        };
        Ok(Self {
            name: name.to_owned(),
            username: username.to_owned(),
            password: present(password).map(|pw| Zeroizing::new(pw.to_owned())),
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Login name.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Replacement password, when one was supplied.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().map(|pw| pw.as_str())
    }

    /// Upstream JSON body `{name, username, password?}`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert("name".to_owned(), Value::from(self.name()));
        body.insert("username".to_owned(), Value::from(self.username()));
        if let Some(password) = self.password() {
            body.insert("password".to_owned(), Value::from(password));
        }
        Value::Object(body)
    }
}

impl fmt::Debug for EmployeeUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmployeeUpdate")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password_changed", &self.password.is_some())
            .finish()
    }
}
