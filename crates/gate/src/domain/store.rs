//! Credential Store
//!
//! Immutable-after-load mapping from username to a password verifier and a
//! precomputed session token. Built once at gate construction from the
//! configured users plus the host identity, read-only afterwards, and
//! therefore safe for unsynchronized concurrent reads.

use std::fmt;

use platform::crypto::{constant_time_eq, sha256, to_hex};
use platform::password::PasswordVerifier;
use serde::Deserialize;

use crate::error::{GateError, GateResult};

/// A (username, verifier) pair as it arrives from configuration.
#[derive(Clone, Deserialize)]
pub struct Credential {
    /// Case sensitive username for this user.
    pub username: String,
    /// PHC-encoded Argon2id hash of the user's password.
    #[serde(rename = "password")]
    pub verifier: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("verifier", &"[HASH]")
            .finish()
    }
}

/// One admitted user, with the session token derived for this process.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub username: String,
    pub verifier: PasswordVerifier,
    token: String,
}

impl UserRecord {
    /// The session token a cookie must carry to count as this user.
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Derive the session token binding the (user, host, credential-version)
/// triple.
///
/// Recomputed at every load and never persisted: rotating the verifier or
/// moving hosts silently invalidates every outstanding cookie.
fn derive_token(username: &str, host_identity: &str, verifier: &str) -> String {
    let mut input = String::with_capacity(username.len() + host_identity.len() + verifier.len());
    input.push_str(username);
    input.push_str(host_identity);
    input.push_str(verifier);
    to_hex(&sha256(input.as_bytes()))
}

/// The set of admitted users.
#[derive(Debug)]
pub struct CredentialStore {
    users: Vec<UserRecord>,
}

impl CredentialStore {
    /// Validate every configured credential and derive its session token.
    ///
    /// Malformed configuration fails here, at startup, not at first login.
    pub fn build(credentials: &[Credential], host_identity: &str) -> GateResult<Self> {
        let mut users: Vec<UserRecord> = Vec::with_capacity(credentials.len());

        for cred in credentials {
            if cred.verifier.is_empty() {
                return Err(GateError::Configuration(format!(
                    "user {} has no password hash set",
                    cred.username
                )));
            }
            let verifier = PasswordVerifier::from_phc_string(&cred.verifier).map_err(|_| {
                GateError::Configuration(format!(
                    "user {} does not seem to have a valid password hash",
                    cred.username
                ))
            })?;
            if users.iter().any(|u| u.username == cred.username) {
                return Err(GateError::Configuration(format!(
                    "user {} is configured more than once",
                    cred.username
                )));
            }

            let token = derive_token(&cred.username, host_identity, &cred.verifier);
            users.push(UserRecord {
                username: cred.username.clone(),
                verifier,
                token,
            });
        }

        Ok(Self { users })
    }

    /// Lookup by username; used only during credential verification.
    pub fn find_by_username(&self, username: &str) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.username == username)
    }

    /// Lookup by session token; runs on every gated request.
    pub fn find_by_token(&self, token: &str) -> Option<&str> {
        self.users
            .iter()
            .find(|u| constant_time_eq(u.token.as_bytes(), token.as_bytes()))
            .map(|u| u.username.as_str())
    }

    /// Iterate over all records (load-time logging, tests).
    pub fn records(&self) -> impl Iterator<Item = &UserRecord> {
        self.users.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Structurally valid Argon2id PHC string; build() only parses it.
    const PHC: &str = "$argon2id$v=19$m=19456,t=2,p=1$MTIzNDU2Nzg5MDEyMzQ1Ng$W/38hq/2aqDEvauXm/rfluHyPsLpBNiNQVabgX9vVXM";

    fn cred(username: &str, verifier: &str) -> Credential {
        Credential {
            username: username.to_string(),
            verifier: verifier.to_string(),
        }
    }

    #[test]
    fn test_build_rejects_empty_verifier() {
        let err = CredentialStore::build(&[cred("alice", "")], "host").unwrap_err();
        assert!(matches!(err, GateError::Configuration(_)));
        assert!(err.to_string().contains("alice"));
    }

    #[test]
    fn test_build_rejects_malformed_verifier() {
        let err =
            CredentialStore::build(&[cred("alice", "plainly-not-a-hash")], "host").unwrap_err();
        assert!(matches!(err, GateError::Configuration(_)));
    }

    #[test]
    fn test_build_rejects_duplicate_username() {
        let err =
            CredentialStore::build(&[cred("alice", PHC), cred("alice", PHC)], "host").unwrap_err();
        assert!(matches!(err, GateError::Configuration(_)));
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_build_accepts_empty_user_list() {
        let store = CredentialStore::build(&[], "host").unwrap();
        assert_eq!(store.records().count(), 0);
    }

    #[test]
    fn test_token_derivation_is_deterministic() {
        assert_eq!(
            derive_token("alice", "host", PHC),
            derive_token("alice", "host", PHC)
        );
    }

    #[test]
    fn test_token_changes_with_any_input() {
        let base = derive_token("alice", "host", PHC);
        assert_ne!(base, derive_token("alicf", "host", PHC));
        assert_ne!(base, derive_token("alice", "host2", PHC));
        assert_ne!(base, derive_token("alice", "host", "other-verifier"));
    }

    #[test]
    fn test_token_is_hex_encoded_sha256() {
        let token = derive_token("alice", "host", PHC);
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_lookups() {
        let store =
            CredentialStore::build(&[cred("alice", PHC), cred("bob", PHC)], "host").unwrap();

        let alice = store.find_by_username("alice").unwrap();
        assert_eq!(alice.username, "alice");
        assert!(store.find_by_username("Alice").is_none()); // case sensitive
        assert!(store.find_by_username("carol").is_none());

        assert_eq!(store.find_by_token(alice.token()), Some("alice"));
        assert_eq!(store.find_by_token("deadbeef"), None);
        assert_eq!(store.find_by_token(""), None);
    }

    #[test]
    fn test_tokens_unique_across_users() {
        let store =
            CredentialStore::build(&[cred("alice", PHC), cred("bob", PHC)], "host").unwrap();
        let tokens: Vec<&str> = store.records().map(|r| r.token()).collect();
        assert_ne!(tokens[0], tokens[1]);
    }
}
