use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use secrecy::{ExposeSecret, SecretString};

use crate::error::ServerError;

/// Reject requests whose bearer credential does not match the configured secret
///
/// The scheme is matched case-insensitively; the token itself byte-for-byte.
pub(crate) async fn require_api_key(
    State(expected): State<Arc<SecretString>>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .is_some_and(|token| token.as_bytes() == expected.expose_secret().as_bytes());

    if !authorized {
        tracing::debug!(path = %request.uri().path(), "rejected request with missing or invalid API key");
        return ServerError::Unauthorized.into_response();
    }

    next.run(request).await
}

fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    scheme.eq_ignore_ascii_case("bearer").then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_token_after_scheme() {
        assert_eq!(bearer_token("Bearer sk-local"), Some("sk-local"));
        assert_eq!(bearer_token("bearer sk-local"), Some("sk-local"));
        assert_eq!(bearer_token("BEARER sk-local"), Some("sk-local"));
    }

    #[test]
    fn other_schemes_are_ignored() {
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("sk-local"), None);
    }

    #[test]
    fn token_is_not_trimmed() {
        assert_eq!(bearer_token("Bearer  sk-local"), Some(" sk-local"));
    }
}
