//! Run configuration: slot time cutoffs and the operations retry ceiling.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::RosterResult;

/// Hard ceiling on operations-phase iterations.
pub const DEFAULT_OPS_RETRY_LIMIT: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RosterConfig {
    /// Early slots need a worker who starts at or before this time.
    pub early_cutoff:    NaiveTime,
    /// Late slots need a worker who stays until at least this time.
    pub late_cutoff:     NaiveTime,
    pub ops_retry_limit: u32,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            early_cutoff:    NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            late_cutoff:     NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
            ops_retry_limit: DEFAULT_OPS_RETRY_LIMIT,
        }
    }
}

impl RosterConfig {
    /// Load from a JSON file. Missing fields fall back to the defaults.
    pub fn load(path: impl AsRef<Path>) -> RosterResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: RosterConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}
