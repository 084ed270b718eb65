//! Validation policy shared by the placement and change-request workflows.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default minimum reason length; a reason must be strictly longer.
pub const DEFAULT_MIN_REASON_LEN: usize = 10;

/// Tunable validation constants.
///
/// Loaded from JSON, e.g. `{"min_reason_len": 20}`. Missing fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// A reason or justification must contain more than this many characters
    /// after trimming.
    pub min_reason_len: usize,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            min_reason_len: DEFAULT_MIN_REASON_LEN,
        }
    }
}

impl Policy {
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Character count of the trimmed text if it satisfies the policy.
    pub(crate) fn check_text(&self, text: &str) -> Result<usize, usize> {
        let len = text.trim().chars().count();
        if len > self.min_reason_len { Ok(len) } else { Err(len) }
    }
}
