//! Form DTOs

use serde::Deserialize;

/// Credential submission form body.
///
/// Missing fields deserialize to empty strings, which then fail the
/// credential check like any other wrong input.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}
