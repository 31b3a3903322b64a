//! Per-key validation verdicts.
//!
//! # Responsibility
//! - Carry one policy decision per requested override key, accepted keys
//!   included, so callers can build a complete audit trail.
//! - Convert rejected entries into one operator-facing violation error.
//!
//! # Invariants
//! - An entry is rejected iff its error-message list is non-empty.
//! - Entries echo the proposed value untransformed.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Decision for one proposed override key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigKeyVerdict {
    /// Config key the decision applies to.
    pub key: String,
    /// Proposed value, echoed back untouched (`null` when none was given).
    pub value: serde_json::Value,
    /// Acceptable/recommended values; empty for all built-in policies.
    pub recommended_values: Vec<serde_json::Value>,
    /// Human-readable rejection reasons; empty means accepted.
    pub errors: Vec<String>,
}

impl ConfigKeyVerdict {
    /// Accepted entry with no errors and no recommendations.
    pub fn accepted(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            value,
            recommended_values: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Rejected entry carrying one initial error message.
    pub fn rejected(
        key: impl Into<String>,
        value: serde_json::Value,
        message: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            value,
            recommended_values: Vec::new(),
            errors: vec![message.into()],
        }
    }

    /// Appends one more rejection reason.
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn is_rejected(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Ordered per-key results of one policy validation pass.
///
/// Entry order mirrors the request's mapping iteration order, but carries no
/// meaning; callers and tests should treat the verdict as a set keyed by
/// config key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    entries: Vec<ConfigKeyVerdict>,
}

impl ValidationVerdict {
    pub fn new(entries: Vec<ConfigKeyVerdict>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ConfigKeyVerdict] {
        &self.entries
    }

    /// Returns the entry for one config key.
    pub fn get(&self, key: &str) -> Option<&ConfigKeyVerdict> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Returns every rejected entry.
    pub fn rejected(&self) -> Vec<&ConfigKeyVerdict> {
        self.entries.iter().filter(|entry| entry.is_rejected()).collect()
    }

    pub fn has_rejections(&self) -> bool {
        self.entries.iter().any(ConfigKeyVerdict::is_rejected)
    }
}

/// One rejected key with its reasons, as carried by a [`PolicyViolation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedKey {
    pub key: String,
    pub errors: Vec<String>,
}

/// Operator-facing failure for one whole override attempt.
///
/// Any rejected key fails the entire attempt; this error names every
/// rejected key and all of its reasons in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyViolation {
    connector_name: String,
    rejections: Vec<RejectedKey>,
}

impl PolicyViolation {
    /// Builds a violation from a verdict; `None` when nothing was rejected.
    pub fn from_verdict(connector_name: &str, verdict: &ValidationVerdict) -> Option<Self> {
        let rejections: Vec<RejectedKey> = verdict
            .rejected()
            .into_iter()
            .map(|entry| RejectedKey {
                key: entry.key.clone(),
                errors: entry.errors.clone(),
            })
            .collect();
        if rejections.is_empty() {
            return None;
        }
        Some(Self {
            connector_name: connector_name.to_string(),
            rejections,
        })
    }

    pub fn connector_name(&self) -> &str {
        &self.connector_name
    }

    pub fn rejections(&self) -> &[RejectedKey] {
        &self.rejections
    }

    /// Rejected key names, for logs and assertions.
    pub fn rejected_keys(&self) -> Vec<&str> {
        self.rejections.iter().map(|r| r.key.as_str()).collect()
    }
}

impl Display for PolicyViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "client config overrides for connector `{}` were rejected by the override policy:",
            self.connector_name
        )?;
        for rejection in &self.rejections {
            write!(f, " `{}` ({})", rejection.key, rejection.errors.join("; "))?;
        }
        Ok(())
    }
}

impl Error for PolicyViolation {}
