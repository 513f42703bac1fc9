//! Host Identity
//!
//! The machine name feeds session token derivation: a token minted on one
//! host is worthless on another, and tokens silently rotate when the
//! service moves.

/// Used when the operating system reports no hostname.
const FALLBACK_IDENTITY: &str = "localhost";

/// A string unique to the running machine.
pub fn host_identity() -> String {
    match hostname::get() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(_) => FALLBACK_IDENTITY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_identity_non_empty() {
        assert!(!host_identity().is_empty());
    }

    #[test]
    fn test_host_identity_stable() {
        assert_eq!(host_identity(), host_identity());
    }
}
