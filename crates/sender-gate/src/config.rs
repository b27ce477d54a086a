//! Gate configuration file.
//!
//! The file is a JSON object. Only `authorized_number` is consumed here;
//! `log_level` is exposed for the enclosing application and every other
//! field is ignored.

use crate::error::{ConfigIssue, GateError, GateResult};
use secrecy::SecretString;
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};

/// Config location used when the caller does not supply one, relative to
/// the deployment root.
pub const DEFAULT_CONFIG_PATH: &str = "config/config.json";

const AUTHORIZED_NUMBER_FIELD: &str = "authorized_number";
const LOG_LEVEL_FIELD: &str = "log_level";

/// Parsed gate configuration.
#[derive(Debug)]
pub struct GateConfig {
    authorized_number: SecretString,
    log_level: Option<String>,
}

impl GateConfig {
    /// Resolve an optional caller-supplied path to the file that will be read.
    pub fn resolve_path(path: Option<&Path>) -> PathBuf {
        path.map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Read and parse the config file at `path`.
    pub fn read(path: &Path) -> GateResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                GateError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                GateError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        Self::from_json(&text).map_err(|issue| GateError::InvalidConfig {
            path: path.to_path_buf(),
            issue,
        })
    }

    /// Parse a config document.
    ///
    /// `authorized_number` must be a string with at least one
    /// non-whitespace character. The stored value is kept verbatim.
    pub fn from_json(text: &str) -> Result<Self, ConfigIssue> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| ConfigIssue::Malformed(e.to_string()))?;

        let Value::Object(fields) = value else {
            return Err(ConfigIssue::NotAnObject);
        };

        let authorized_number = match fields.get(AUTHORIZED_NUMBER_FIELD) {
            None => return Err(ConfigIssue::MissingField),
            Some(Value::String(number)) if !number.trim().is_empty() => number.clone(),
            Some(_) => return Err(ConfigIssue::InvalidValue),
        };

        let log_level = fields
            .get(LOG_LEVEL_FIELD)
            .and_then(Value::as_str)
            .map(str::to_owned);

        Ok(Self {
            authorized_number: SecretString::new(authorized_number),
            log_level,
        })
    }

    /// Log level hint carried alongside the authorized number, if any.
    pub fn log_level(&self) -> Option<&str> {
        self.log_level.as_deref()
    }

    pub(crate) fn into_authorized_number(self) -> SecretString {
        self.authorized_number
    }
}
