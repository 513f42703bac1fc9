//! Gate Configuration
//!
//! Immutable once the gate is constructed. Loadable from a JSON file, with
//! defaults suitable for a local prototype.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde::de::{self, Deserializer, Visitor};

use crate::domain::Credential;
use crate::error::{GateError, GateResult};

/// Cookie lifetime, deserializable from either a number of seconds or a
/// duration string such as `"30s"`, `"15m"`, `"336h"` or `"14d"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifetime(pub Duration);

impl Lifetime {
    /// Lifetime in whole seconds, as it goes on the Max-Age attribute.
    pub fn as_secs(&self) -> u64 {
        self.0.as_secs()
    }
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let unit_start = s
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| format!("missing unit in duration {s:?}"))?;
    let (value, unit) = s.split_at(unit_start);
    let value: u64 = value
        .parse()
        .map_err(|_| format!("invalid number in duration {s:?}"))?;

    let secs = match unit {
        "s" => value,
        "m" => value * 60,
        "h" => value * 3600,
        "d" => value * 86_400,
        _ => return Err(format!("unknown duration unit {unit:?}")),
    };
    Ok(Duration::from_secs(secs))
}

impl<'de> Deserialize<'de> for Lifetime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LifetimeVisitor;

        impl<'de> Visitor<'de> for LifetimeVisitor {
            type Value = Lifetime;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a number of seconds or a duration string like \"336h\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Lifetime, E> {
                Ok(Lifetime(Duration::from_secs(v)))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Lifetime, E> {
                if v < 0 {
                    return Err(E::custom("cookie lifetime cannot be negative"));
                }
                Ok(Lifetime(Duration::from_secs(v as u64)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Lifetime, E> {
                if v < 0.0 {
                    return Err(E::custom("cookie lifetime cannot be negative"));
                }
                Ok(Lifetime(Duration::from_secs_f64(v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Lifetime, E> {
                parse_duration(v).map(Lifetime).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(LifetimeVisitor)
    }
}

/// Gate configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Name of the cookie set on authentication and cleared on void
    pub cookie_name: String,
    /// The lifetime (Max-Age) of the session cookie
    pub cookie_lifetime: Lifetime,
    /// Request path accepting POSTed credentials
    pub validate_path: String,
    /// Request path clearing the session cookie
    pub void_path: String,
    /// Title of the challenge page, and the header on that page
    pub auth_title: String,
    /// Optional stylesheet reference for the challenge page
    pub stylesheet: Option<String>,
    /// Chatty per-branch tracing when set; never load-bearing
    pub verbose: bool,
    /// Users admitted if the right credentials are presented
    pub users: Vec<Credential>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            cookie_name: "authentimication".to_string(),
            cookie_lifetime: Lifetime(Duration::from_secs(336 * 3600)), // 336 hours is ~14 days
            validate_path: "/auth".to_string(),
            void_path: "/logout".to_string(),
            auth_title: "Please identify yourself".to_string(),
            stylesheet: None,
            verbose: false,
            users: Vec::new(),
        }
    }
}

impl GateConfig {
    /// Load configuration from a JSON file, layered over the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> GateResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            GateError::Configuration(format!("reading {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw)
            .map_err(|e| GateError::Configuration(format!("parsing {}: {e}", path.display())))
    }
}
