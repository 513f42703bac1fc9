//! HTTP Handlers
//!
//! The credential-submission (validate) and session-void endpoints.

use axum::Form;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Redirect, Response};

use platform::cookie::CookieConfig;
use platform::password::SubmittedPassword;

use crate::Gate;
use crate::application::authenticate::{AuthOutcome, authenticate};
use crate::error::GateError;
use crate::presentation::dto::CredentialsForm;

/// POST on the configured validate path.
///
/// A wrong username and a wrong password produce the same response, so the
/// endpoint cannot be used to enumerate usernames.
pub async fn validate(
    State(gate): State<Gate>,
    headers: HeaderMap,
    Form(form): Form<CredentialsForm>,
) -> Response {
    // Referer はリダイレクト先として使うので先に取り出す
    let return_path = return_path(&headers);
    let password = SubmittedPassword::new(form.password);

    match authenticate(&gate.store, &form.username, &password) {
        Ok(AuthOutcome::Admitted { username, token }) => {
            if gate.config.verbose {
                tracing::debug!(username, "User authenticated");
            }
            let cookie = cookie_config(&gate)
                .build_set_cookie(token, gate.config.cookie_lifetime.as_secs() as i64);
            ([(header::SET_COOKIE, cookie)], Redirect::to(&return_path)).into_response()
        }
        Ok(AuthOutcome::NoMatch) => {
            if gate.config.verbose {
                tracing::debug!(username = %form.username, "Could not authenticate user");
            }
            GateError::CredentialMismatch.into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// GET on the configured void path.
///
/// Unconditional: clears the cookie and redirects whether or not the caller
/// was ever authenticated.
pub async fn void(State(gate): State<Gate>, headers: HeaderMap) -> Response {
    let return_path = return_path(&headers);

    if gate.config.verbose {
        tracing::debug!("Cookie voiding requested");
    }

    let cookie = cookie_config(&gate).build_void_cookie();
    ([(header::SET_COOKIE, cookie)], Redirect::to(&return_path)).into_response()
}

/// Where to send the client after login/logout: the referring location,
/// or the root when there is none.
fn return_path(headers: &HeaderMap) -> String {
    headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .unwrap_or("/")
        .to_string()
}

fn cookie_config(gate: &Gate) -> CookieConfig {
    CookieConfig {
        name: gate.config.cookie_name.clone(),
        ..CookieConfig::default()
    }
}
