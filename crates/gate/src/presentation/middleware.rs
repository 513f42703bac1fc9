//! Gate Middleware
//!
//! Request interception: forward with identity attached, or halt with the
//! login challenge.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::Gate;
use crate::error::GateError;
use crate::presentation::challenge;

/// Authenticated username, inserted into request extensions by the gate.
///
/// Downstream handlers read it via `Extension<AuthenticatedUser>`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

impl AuthenticatedUser {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Middleware admitting only requests that carry a known session token.
///
/// A missing cookie and an unrecognized token get the same challenge
/// response. A Cookie header that cannot be read at all fails closed with a
/// server error. The downstream handler runs only on a token match.
pub async fn require_session(
    State(gate): State<Gate>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if gate.config.verbose {
        tracing::debug!(method = %req.method(), uri = %req.uri(), "Gated request");
    }

    let token = match platform::cookie::extract_cookie(req.headers(), &gate.config.cookie_name) {
        Ok(Some(token)) => token,
        Ok(None) => {
            if gate.config.verbose {
                tracing::debug!(cookie = %gate.config.cookie_name, "No session cookie, sending challenge");
            }
            return challenge::challenge_response(&gate.config);
        }
        Err(_) => return GateError::CookieRetrieval.into_response(),
    };

    let Some(username) = gate.store.find_by_token(&token) else {
        if gate.config.verbose {
            tracing::debug!("Session token matches no user, sending challenge");
        }
        return challenge::challenge_response(&gate.config);
    };

    if gate.config.verbose {
        tracing::debug!(username, "Session token accepted");
    }
    req.extensions_mut()
        .insert(AuthenticatedUser(username.to_string()));
    next.run(req).await
}
