//! Credential Validation Use Case
//!
//! Runs the username/password check for the validate endpoint and hands
//! back the token the session cookie should carry.

use platform::password::SubmittedPassword;

use crate::domain::CredentialStore;
use crate::error::{GateError, GateResult};

/// Outcome of a credential submission.
///
/// An unknown username and a wrong password for a known username collapse
/// into the same `NoMatch`, so responses cannot be used to enumerate
/// usernames.
#[derive(Debug)]
pub enum AuthOutcome<'a> {
    /// Credentials match; the session cookie should carry this token.
    Admitted { username: &'a str, token: &'a str },
    /// No (username, password) pair matched.
    NoMatch,
}

/// Verify a submitted credential pair against the store.
///
/// Argon2 verification is deliberately expensive; this is the one costly
/// operation per login attempt, not a fault.
pub fn authenticate<'a>(
    store: &'a CredentialStore,
    username: &str,
    password: &SubmittedPassword,
) -> GateResult<AuthOutcome<'a>> {
    let Some(record) = store.find_by_username(username) else {
        return Ok(AuthOutcome::NoMatch);
    };

    match record.verifier.verify(password) {
        Ok(true) => Ok(AuthOutcome::Admitted {
            username: &record.username,
            token: record.token(),
        }),
        Ok(false) => Ok(AuthOutcome::NoMatch),
        Err(e) => Err(GateError::VerificationFault(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Credential;
    use platform::password::hash_password;

    fn store_with(username: &str, password: &str) -> CredentialStore {
        let verifier = hash_password(&SubmittedPassword::new(password.to_string())).unwrap();
        let cred = Credential {
            username: username.to_string(),
            verifier: verifier.as_phc_string().to_string(),
        };
        CredentialStore::build(&[cred], "testhost").unwrap()
    }

    #[test]
    fn test_correct_credentials_are_admitted() {
        let store = store_with("alice", "wonderland");
        let outcome = authenticate(
            &store,
            "alice",
            &SubmittedPassword::new("wonderland".to_string()),
        )
        .unwrap();

        match outcome {
            AuthOutcome::Admitted { username, token } => {
                assert_eq!(username, "alice");
                assert_eq!(token, store.find_by_username("alice").unwrap().token());
            }
            AuthOutcome::NoMatch => panic!("expected admission"),
        }
    }

    #[test]
    fn test_wrong_password_is_no_match() {
        let store = store_with("alice", "wonderland");
        let outcome = authenticate(
            &store,
            "alice",
            &SubmittedPassword::new("looking-glass".to_string()),
        )
        .unwrap();
        assert!(matches!(outcome, AuthOutcome::NoMatch));
    }

    #[test]
    fn test_unknown_username_is_no_match() {
        let store = store_with("alice", "wonderland");
        let outcome = authenticate(
            &store,
            "bob",
            &SubmittedPassword::new("wonderland".to_string()),
        )
        .unwrap();
        assert!(matches!(outcome, AuthOutcome::NoMatch));
    }

    #[test]
    fn test_unusable_verifier_is_a_fault_not_a_mismatch() {
        // Valid PHC grammar, wrong algorithm; passes load-time validation
        // but cannot be compared.
        let cred = Credential {
            username: "alice".to_string(),
            verifier:
                "$scrypt$ln=16,r=8,p=1$MTIzNDU2Nzg5MDEyMzQ1Ng$W/38hq/2aqDEvauXm/rfluHyPsLpBNiNQVabgX9vVXM"
                    .to_string(),
        };
        let store = CredentialStore::build(&[cred], "testhost").unwrap();

        let err = authenticate(
            &store,
            "alice",
            &SubmittedPassword::new("whatever".to_string()),
        )
        .unwrap_err();
        assert!(matches!(err, GateError::VerificationFault(_)));
    }
}
