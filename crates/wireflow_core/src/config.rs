//! Operator-facing core settings.
//!
//! # Responsibility
//! - Define the worker-core settings surface consumed at bootstrap.
//! - Carry opaque policy options through to the selected override policy.
//!
//! # Invariants
//! - Settings are plain data; nothing here touches the filesystem.
//! - Unknown policy options are preserved verbatim, never rejected.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Operator setting key naming the client config override policy.
pub const OVERRIDE_POLICY_SETTING: &str = "client.config.override.policy";

/// Opaque operator options forwarded verbatim to `OverridePolicy::configure`.
///
/// Keys are option names; values are uninterpreted JSON scalars/structures.
pub type PolicyOptions = BTreeMap<String, serde_json::Value>;

/// Core settings supplied by the surrounding worker runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreSettings {
    /// Log level for the process-wide logging bootstrap.
    #[serde(default = "default_level")]
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` skips file logging.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    /// Short name of the override policy (`principal`, `all`, `none`).
    #[serde(default = "default_policy")]
    pub override_policy: String,
    /// Opaque options handed to the selected policy's `configure`.
    #[serde(default)]
    pub policy_options: PolicyOptions,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            log_level: default_level(),
            log_dir: None,
            override_policy: default_policy(),
            policy_options: PolicyOptions::new(),
        }
    }
}

impl CoreSettings {
    /// Validates declaration-level settings invariants.
    ///
    /// # Errors
    /// - Returns an error when the policy name or log level is blank.
    ///   Whether the policy name resolves is decided later by the selector.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.override_policy.trim().is_empty() {
            return Err(SettingsError::EmptyPolicyName);
        }
        if self.log_level.trim().is_empty() {
            return Err(SettingsError::EmptyLogLevel);
        }
        Ok(())
    }
}

fn default_level() -> String {
    crate::logging::default_log_level().to_string()
}

fn default_policy() -> String {
    // Fail closed: the operator must opt in to any override surface.
    "none".to_string()
}

/// Settings validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    EmptyPolicyName,
    EmptyLogLevel,
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPolicyName => write!(
                f,
                "`{OVERRIDE_POLICY_SETTING}` must name an override policy"
            ),
            Self::EmptyLogLevel => write!(f, "log level must not be blank"),
        }
    }
}

impl Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::{CoreSettings, PolicyOptions, SettingsError};

    #[test]
    fn defaults_are_valid_and_fail_closed() {
        let settings = CoreSettings::default();
        settings.validate().expect("default settings should validate");
        assert_eq!(settings.override_policy, "none");
        assert!(settings.policy_options.is_empty());
        assert!(settings.log_dir.is_none());
    }

    #[test]
    fn empty_fields_are_rejected() {
        let mut settings = CoreSettings::default();
        settings.override_policy = "   ".to_string();
        assert_eq!(
            settings.validate().expect_err("blank policy name must fail"),
            SettingsError::EmptyPolicyName
        );

        let mut settings = CoreSettings::default();
        settings.log_level = String::new();
        assert_eq!(
            settings.validate().expect_err("blank log level must fail"),
            SettingsError::EmptyLogLevel
        );
    }

    #[test]
    fn deserializes_with_defaults_from_empty_document() {
        let settings: CoreSettings =
            serde_json::from_str("{}").expect("empty settings document should deserialize");
        assert_eq!(settings, CoreSettings::default());
    }

    #[test]
    fn policy_options_round_trip_untouched() {
        let document = r#"{
            "override_policy": "principal",
            "policy_options": {"audit": true, "team": "payments"}
        }"#;
        let settings: CoreSettings =
            serde_json::from_str(document).expect("settings document should deserialize");
        assert_eq!(settings.override_policy, "principal");

        let mut expected = PolicyOptions::new();
        expected.insert("audit".to_string(), serde_json::Value::Bool(true));
        expected.insert("team".to_string(), serde_json::json!("payments"));
        assert_eq!(settings.policy_options, expected);
    }
}
