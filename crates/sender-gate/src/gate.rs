//! The authorization gate.

use crate::config::GateConfig;
use crate::error::{ConfigIssue, GateError, GateResult};
use secrecy::{ExposeSecret, SecretString};
use std::path::{Path, PathBuf};
use subtle::ConstantTimeEq;
use tracing::{debug, error, info, warn};

/// Number of trailing characters left visible by [`mask_number`].
const VISIBLE_SUFFIX: usize = 4;

/// Accepts exactly one configured sender number.
///
/// The authorized number is fixed at construction. Verification only reads
/// it, so a gate can be shared across threads behind an `Arc`.
#[derive(Debug)]
pub struct AuthorizationGate {
    authorized_number: SecretString,
    config_path: PathBuf,
}

impl AuthorizationGate {
    /// Load the gate from a config file.
    ///
    /// `None` falls back to [`DEFAULT_CONFIG_PATH`](crate::DEFAULT_CONFIG_PATH).
    pub fn load(path: Option<&Path>) -> GateResult<Self> {
        let config_path = GateConfig::resolve_path(path);
        let config = GateConfig::read(&config_path).inspect_err(log_load_failure)?;
        Ok(Self::from_config(config, config_path))
    }

    /// Build a gate from an already-parsed config.
    pub fn from_config(config: GateConfig, config_path: impl Into<PathBuf>) -> Self {
        let config_path = config_path.into();
        debug!(
            event = "authorized_number_loaded",
            config_path = %config_path.display(),
            "Authorized number loaded"
        );

        Self {
            authorized_number: config.into_authorized_number(),
            config_path,
        }
    }

    /// Path the authorized number was loaded from.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Check a sender number against the authorized one.
    ///
    /// Returns true only for an exact byte match. Absent or empty input is
    /// rejected. No trimming, case folding or Unicode normalization.
    pub fn verify(&self, phone_number: Option<&str>) -> bool {
        let phone_number = match phone_number {
            Some(number) if !number.is_empty() => number,
            _ => {
                warn!(
                    event = "auth_failed_empty_number",
                    phone_number = ?phone_number,
                    "Rejected sender: empty phone number"
                );
                return false;
            }
        };

        let authorized = self.authorized_number.expose_secret();
        if constant_time_eq(phone_number, authorized) {
            info!(event = "auth_success", phone_number, "Sender authorized");
            true
        } else {
            warn!(
                event = "auth_failed_unauthorized",
                phone_number,
                authorized_number = %mask_number(authorized),
                "Rejected sender: not the authorized number"
            );
            false
        }
    }

    /// Shorthand for [`verify`](Self::verify) with a present number.
    pub fn is_authorized(&self, phone_number: &str) -> bool {
        self.verify(Some(phone_number))
    }
}

fn log_load_failure(err: &GateError) {
    match err {
        GateError::NotFound { path } => {
            error!(
                event = "config_file_not_found",
                config_path = %path.display(),
                "Config file not found"
            );
        }
        GateError::InvalidConfig { path, issue } => match issue {
            ConfigIssue::Malformed(_) | ConfigIssue::NotAnObject => {
                error!(
                    event = "config_invalid_json",
                    config_path = %path.display(),
                    error = %issue,
                    "Config file is not valid JSON"
                );
            }
            _ => {
                error!(
                    event = "config_invalid_authorized_number",
                    config_path = %path.display(),
                    error = %issue,
                    "Config file has no usable authorized number"
                );
            }
        },
        GateError::Io { path, source } => {
            error!(
                event = "config_read_failed",
                config_path = %path.display(),
                error = %source,
                "Failed to read config file"
            );
        }
    }
}

/// Byte comparison whose timing does not depend on where the inputs differ.
fn constant_time_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        // Dummy comparison to keep timing constant regardless of length match.
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

/// Hide all but the last four characters of a number for log output.
pub(crate) fn mask_number(number: &str) -> String {
    let len = number.chars().count();
    let hidden = len.saturating_sub(VISIBLE_SUFFIX);
    number
        .chars()
        .enumerate()
        .map(|(i, c)| if i < hidden || len <= VISIBLE_SUFFIX { '*' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(number: &str) -> AuthorizationGate {
        let body = serde_json::json!({ "authorized_number": number }).to_string();
        AuthorizationGate::from_config(GateConfig::from_json(&body).unwrap(), "test.json")
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("+15551234567", "+15551234567"));
        assert!(!constant_time_eq("+15551234567", "+15551234568"));
        assert!(!constant_time_eq("+1555123456", "+15551234567"));
        assert!(!constant_time_eq("", "+15551234567"));
    }

    #[test]
    fn test_mask_number() {
        assert_eq!(mask_number("+15551234567"), "********4567");
        assert_eq!(mask_number("12345"), "*2345");
        assert_eq!(mask_number("1234"), "****");
        assert_eq!(mask_number(""), "");
    }

    #[test]
    fn test_mask_number_multibyte() {
        assert_eq!(mask_number("+١٢٣٤٥٦"), "***٣٤٥٦");
    }

    #[test]
    fn test_verify_exact_match() {
        let gate = gate("+15551234567");
        assert!(gate.verify(Some("+15551234567")));
        assert!(gate.is_authorized("+15551234567"));
    }

    #[test]
    fn test_verify_rejects_absent_and_empty() {
        let gate = gate("+15551234567");
        assert!(!gate.verify(None));
        assert!(!gate.verify(Some("")));
        assert!(!gate.is_authorized(" "));
        assert!(!gate.is_authorized("\t\n"));
    }

    #[test]
    fn test_config_path_kept() {
        assert_eq!(gate("+1").config_path(), Path::new("test.json"));
    }

    #[test]
    fn test_debug_redacts_number() {
        let rendered = format!("{:?}", gate("+15551234567"));
        assert!(!rendered.contains("5551234567"));
        assert!(rendered.contains("test.json"));
    }
}
