//! Opaque bearer token supplied by the browser.

use std::fmt;

/// Bearer credential forwarded verbatim to the upstream.
///
/// The BFF never decodes, validates or caches the token. The only rule is
/// that it is not empty, mirroring the route layer's "is a token present"
/// check.
///
/// # Examples
/// ```
/// use bff::domain::BearerToken;
///
/// let token = BearerToken::new("abc").expect("non-empty");
/// assert_eq!(token.authorization_value(), "Bearer abc");
/// assert!(BearerToken::new("").is_none());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token, rejecting the empty string.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        (!raw.is_empty()).then_some(Self(raw))
    }

    /// Raw token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// `Bearer <token>` header value.
    #[must_use]
    pub fn authorization_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}
