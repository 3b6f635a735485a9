//! Request and response transforms applied around every upstream call.
//!
//! Outbound, [`normalize_authorization`] settles the authorization header
//! spelling before the request reaches reqwest's case-insensitive header map.
//! Inbound, [`decode_body`] and [`classify`] turn the raw status and body into
//! either an [`UpstreamResponse`] or a normalized [`UpstreamError`].

use std::num::FpCategory;

use serde_json::Value;

use crate::domain::ports::{AUTHORIZATION, BACKEND_ERROR_FALLBACK, UpstreamError, UpstreamResponse};

/// Reconcile authorization headers under the canonical `Authorization` name.
///
/// An existing `Authorization` entry wins. Otherwise the first differently
/// cased variant (for example `authorization`) is renamed to the canonical
/// spelling. Any remaining variants are dropped so exactly one authorization
/// header reaches the wire. Requests without one are left untouched; a token
/// is never synthesised.
pub fn normalize_authorization(headers: &mut Vec<(String, String)>) {
    let is_variant = |name: &str| name.eq_ignore_ascii_case(AUTHORIZATION);
    let canonical = headers
        .iter()
        .position(|(name, _)| name == AUTHORIZATION)
        .or_else(|| headers.iter().position(|(name, _)| is_variant(name)));
    let Some(keep) = canonical else {
        return;
    };

    let mut index = 0;
    headers.retain_mut(|(name, _)| {
        let current = index;
        index += 1;
        if current == keep {
            AUTHORIZATION.clone_into(name);
            true
        } else {
            !is_variant(name)
        }
    });
}

/// Decode a raw response body.
///
/// Empty bodies become `None`; bodies that are not JSON are surfaced as a JSON
/// string holding the (lossily decoded) text.
#[must_use]
pub fn decode_body(bytes: &[u8]) -> Option<Value> {
    if bytes.is_empty() {
        return None;
    }
    Some(
        serde_json::from_slice(bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned())),
    )
}

/// Text of a field that a loose truthiness check would accept.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number)
            if number
                .as_f64()
                .is_some_and(|n| matches!(n.classify(), FpCategory::Zero)) =>
        {
            None
        }
        other => Some(other.to_string()),
    }
}

/// Client-facing message for an upstream error body.
///
/// Prefers `error`, then `message`, then [`BACKEND_ERROR_FALLBACK`].
#[must_use]
pub fn error_message(body: Option<&Value>) -> String {
    body.and_then(|body| {
        ["error", "message"]
            .into_iter()
            .find_map(|key| body.get(key).and_then(truthy_text))
    })
    .unwrap_or_else(|| BACKEND_ERROR_FALLBACK.to_owned())
}

/// Classify an upstream answer by status.
///
/// # Errors
///
/// Returns [`UpstreamError::Rejected`] for any status of 400 or above.
pub fn classify(status: u16, body: Option<Value>) -> Result<UpstreamResponse, UpstreamError> {
    if status < 400 {
        return Ok(UpstreamResponse { status, body });
    }
    let message = error_message(body.as_ref());
    Err(UpstreamError::rejected(
        status,
        message,
        body.unwrap_or(Value::Null),
    ))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the pure upstream transforms.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn headers(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[rstest]
    #[case::canonical_kept(
        &[("Authorization", "Bearer a")],
        &[("Authorization", "Bearer a")]
    )]
    #[case::lowercase_promoted(
        &[("Accept", "x"), ("authorization", "Bearer b")],
        &[("Accept", "x"), ("Authorization", "Bearer b")]
    )]
    #[case::canonical_not_overwritten(
        &[("authorization", "Bearer lower"), ("Authorization", "Bearer upper")],
        &[("Authorization", "Bearer upper")]
    )]
    #[case::first_variant_wins(
        &[("AUTHORIZATION", "Bearer first"), ("authorization", "Bearer second")],
        &[("Authorization", "Bearer first")]
    )]
    #[case::absent_left_alone(&[("Accept", "x")], &[("Accept", "x")])]
    fn normalizes_authorization_spelling(
        #[case] input: &[(&str, &str)],
        #[case] expected: &[(&str, &str)],
    ) {
        let mut actual = headers(input);
        normalize_authorization(&mut actual);
        assert_eq!(actual, headers(expected));
    }

    #[rstest]
    #[case(b"".as_slice(), None)]
    #[case(br#"{"id":1}"#.as_slice(), Some(json!({"id": 1})))]
    #[case(b"null".as_slice(), Some(Value::Null))]
    #[case(b"Bad Gateway".as_slice(), Some(json!("Bad Gateway")))]
    fn decodes_bodies(#[case] bytes: &[u8], #[case] expected: Option<Value>) {
        assert_eq!(decode_body(bytes), expected);
    }

    #[rstest]
    #[case(Some(json!({"error": "Invalid credentials"})), "Invalid credentials")]
    #[case(Some(json!({"message": "Employee not found"})), "Employee not found")]
    #[case(Some(json!({"error": "first", "message": "second"})), "first")]
    #[case(Some(json!({"error": "", "message": "second"})), "second")]
    #[case(Some(json!({"error": null, "message": "second"})), "second")]
    #[case(Some(json!({"error": false, "message": 0})), "Backend error")]
    #[case(Some(json!({"error": 42})), "42")]
    #[case(Some(json!({"error": {"code": "E1"}})), r#"{"code":"E1"}"#)]
    #[case(Some(json!({"status": 500})), "Backend error")]
    #[case(Some(json!("plain text")), "Backend error")]
    #[case(None, "Backend error")]
    fn extracts_error_message(#[case] body: Option<Value>, #[case] expected: &str) {
        assert_eq!(error_message(body.as_ref()), expected);
    }

    #[rstest]
    #[case(200)]
    #[case(201)]
    #[case(204)]
    #[case(304)]
    fn passes_through_statuses_below_400(#[case] status: u16) {
        let response = classify(status, Some(json!({"ok": true}))).expect("success status");
        assert_eq!(response.status, status);
        assert_eq!(response.body, Some(json!({"ok": true})));
    }

    #[test]
    fn rejects_error_statuses_with_body_as_data() {
        let body = json!({"error": "Username already exists"});
        let err = classify(409, Some(body.clone())).expect_err("409 is a rejection");
        assert_eq!(err.status(), 409);
        assert_eq!(err.message(), "Username already exists");
        assert_eq!(err.data(), Some(&body));
    }

    #[test]
    fn rejects_empty_error_body_with_fallback() {
        let err = classify(502, None).expect_err("502 is a rejection");
        assert_eq!(err.message(), BACKEND_ERROR_FALLBACK);
        assert!(err.data().is_none());
    }
}
