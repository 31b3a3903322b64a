//! Principal-scoped override policy.
//!
//! # Responsibility
//! - Restrict connector client config overrides to the authentication keys
//!   needed to run each connector under its own principal.
//!
//! # Invariants
//! - The allow-list is fixed at construction and never mutated per call.
//! - Value content is never inspected; keys alone decide the verdict.

use crate::config::PolicyOptions;
use crate::policy::request::ClientConfigRequest;
use crate::policy::spi::OverridePolicy;
use crate::policy::verdict::{ConfigKeyVerdict, ValidationVerdict};
use crate::policy::PolicyResult;
use log::info;
use std::collections::BTreeSet;

/// Client config key carrying the credential identity (JAAS-style login).
pub const SASL_JAAS_CONFIG: &str = "sasl.jaas.config";
/// Client config key selecting the authentication mechanism.
pub const SASL_MECHANISM: &str = "sasl.mechanism";
/// Client config key selecting the transport security protocol.
pub const SECURITY_PROTOCOL: &str = "security.protocol";

const PRINCIPAL_ALLOWED_KEYS: &[&str] = &[SASL_JAAS_CONFIG, SASL_MECHANISM, SECURITY_PROTOCOL];

/// Allows only the three authentication keys to be overridden, so each
/// connector can supply its own principal without touching anything else.
///
/// `validate` works from construction-time defaults; calling it before
/// `configure` is defined and identical.
#[derive(Debug)]
pub struct PrincipalOverridePolicy {
    allowed: BTreeSet<&'static str>,
    closed: bool,
}

impl PrincipalOverridePolicy {
    pub fn new() -> Self {
        Self {
            allowed: PRINCIPAL_ALLOWED_KEYS.iter().copied().collect(),
            closed: false,
        }
    }

    /// Keys this policy accepts, in sorted order.
    pub fn allowed_keys(&self) -> Vec<&'static str> {
        self.allowed.iter().copied().collect()
    }

    fn rejection_message(&self) -> String {
        let allowed: Vec<&str> = self.allowed.iter().copied().collect();
        format!(
            "principal policy only allows the authentication keys [{}] to be overridden",
            allowed.join(", ")
        )
    }
}

impl Default for PrincipalOverridePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl OverridePolicy for PrincipalOverridePolicy {
    fn configure(&mut self, _options: &PolicyOptions) -> PolicyResult<()> {
        info!(
            "event=policy_configured module=policy policy=principal status=ok allowed_keys={}",
            self.allowed_keys().join(",")
        );
        Ok(())
    }

    fn validate(&self, request: &ClientConfigRequest) -> PolicyResult<ValidationVerdict> {
        let entries = request
            .overrides()
            .iter()
            .map(|(key, value)| {
                if self.allowed.contains(key.as_str()) {
                    ConfigKeyVerdict::accepted(key, value.clone())
                } else {
                    ConfigKeyVerdict::rejected(key, value.clone(), self.rejection_message())
                }
            })
            .collect();
        Ok(ValidationVerdict::new(entries))
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            info!("event=policy_closed module=policy policy=principal status=ok");
        }
    }
}
