//! Gate - Request Gate for Prototype Web Services
//!
//! A drop-in username/password gate: it intercepts every request to a
//! wrapped route, demands credentials on first contact, and thereafter
//! recognizes the caller via an opaque session token carried in a cookie.
//!
//! Clean Architecture structure:
//! - `domain/` - Credential store and session token derivation
//! - `application/` - Configuration and the credential-validation use case
//! - `presentation/` - HTTP handlers, middleware, challenge page, router
//!
//! ## Security Model
//! - Passwords verified against Argon2id PHC hashes; plaintext zeroized
//! - Tokens derived per process from (username, host, verifier); never stored
//! - Sessions are HTTP-only, SameSite=Lax cookies
//! - Login failures are uniform: no username enumeration
//! - Malformed Cookie headers fail closed
//!
//! ## Usage
//! ```ignore
//! let config = GateConfig::from_file("gate.json")?;
//! let gate = Gate::new(config, &platform::host::host_identity())?;
//!
//! let protected = Router::new().route("/", get(handler));
//! let app = gate.wrap(protected).merge(gate.router());
//! ```

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;

use crate::domain::CredentialStore;

// Re-exports for convenience
pub use application::config::{GateConfig, Lifetime};
pub use domain::{Credential, UserRecord};
pub use error::{GateError, GateResult};
pub use presentation::middleware::{AuthenticatedUser, require_session};
pub use presentation::router::gate_router;

/// The ready-to-use gate: immutable credential store plus configuration,
/// cheap to clone into handlers and middleware.
///
/// Everything inside is read-only after construction, so concurrent
/// requests share it without locking.
#[derive(Debug, Clone)]
pub struct Gate {
    pub(crate) store: Arc<CredentialStore>,
    pub(crate) config: Arc<GateConfig>,
}

impl Gate {
    /// Build the gate from materialized configuration and the host identity.
    ///
    /// All credential validation happens here; a malformed entry aborts
    /// construction instead of surfacing at first login.
    pub fn new(config: GateConfig, host_identity: &str) -> GateResult<Self> {
        for path in [&config.validate_path, &config.void_path] {
            if !path.starts_with('/') {
                return Err(GateError::Configuration(format!(
                    "route path {path:?} must begin with '/'"
                )));
            }
        }

        let store = CredentialStore::build(&config.users, host_identity)?;

        if config.verbose {
            for record in store.records() {
                tracing::debug!(
                    username = %record.username,
                    token = %record.token(),
                    "Derived session token"
                );
            }
        }

        Ok(Self {
            store: Arc::new(store),
            config: Arc::new(config),
        })
    }

    /// The gate's two endpoints: POST on the validate path, GET on the
    /// void path. Merge into the host application's router.
    pub fn router(&self) -> Router {
        presentation::router::gate_router(self)
    }

    /// Wrap a router so every route in it requires a valid session.
    ///
    /// Handlers behind the wrap can read the caller's identity via
    /// `Extension<AuthenticatedUser>`. For a single handler, use
    /// [`require_session`] with `axum::middleware::from_fn_with_state`
    /// directly.
    pub fn wrap(&self, router: Router) -> Router {
        router.layer(from_fn_with_state(
            self.clone(),
            presentation::middleware::require_session,
        ))
    }

    /// The configuration this gate was built with.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }
}
