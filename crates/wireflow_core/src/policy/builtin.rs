//! Unconditional built-in policies.
//!
//! Both ends of the restriction spectrum: `AllowAllOverridePolicy` forwards
//! every override, `DenyAllOverridePolicy` blocks every override. Like the
//! principal policy, both work from construction-time defaults and never
//! fail for a well-formed request.

use crate::config::PolicyOptions;
use crate::policy::request::ClientConfigRequest;
use crate::policy::spi::OverridePolicy;
use crate::policy::verdict::{ConfigKeyVerdict, ValidationVerdict};
use crate::policy::PolicyResult;
use log::info;

const DENY_ALL_MESSAGE: &str =
    "the configured override policy does not permit any client configuration override";

/// Accepts every proposed override key.
#[derive(Debug, Default)]
pub struct AllowAllOverridePolicy {
    closed: bool,
}

impl AllowAllOverridePolicy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OverridePolicy for AllowAllOverridePolicy {
    fn configure(&mut self, _options: &PolicyOptions) -> PolicyResult<()> {
        info!("event=policy_configured module=policy policy=all status=ok");
        Ok(())
    }

    fn validate(&self, request: &ClientConfigRequest) -> PolicyResult<ValidationVerdict> {
        let entries = request
            .overrides()
            .iter()
            .map(|(key, value)| ConfigKeyVerdict::accepted(key, value.clone()))
            .collect();
        Ok(ValidationVerdict::new(entries))
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            info!("event=policy_closed module=policy policy=all status=ok");
        }
    }
}

/// Rejects every proposed override key.
#[derive(Debug, Default)]
pub struct DenyAllOverridePolicy {
    closed: bool,
}

impl DenyAllOverridePolicy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OverridePolicy for DenyAllOverridePolicy {
    fn configure(&mut self, _options: &PolicyOptions) -> PolicyResult<()> {
        info!("event=policy_configured module=policy policy=none status=ok");
        Ok(())
    }

    fn validate(&self, request: &ClientConfigRequest) -> PolicyResult<ValidationVerdict> {
        let entries = request
            .overrides()
            .iter()
            .map(|(key, value)| ConfigKeyVerdict::rejected(key, value.clone(), DENY_ALL_MESSAGE))
            .collect();
        Ok(ValidationVerdict::new(entries))
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            info!("event=policy_closed module=policy policy=none status=ok");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AllowAllOverridePolicy, DenyAllOverridePolicy};
    use crate::policy::request::{ClientConfigRequest, ClientRole, ConnectorKind};
    use crate::policy::spi::OverridePolicy;
    use std::collections::BTreeMap;

    fn request(keys: &[&str]) -> ClientConfigRequest {
        let overrides: BTreeMap<String, serde_json::Value> = keys
            .iter()
            .map(|key| (key.to_string(), serde_json::json!("value")))
            .collect();
        ClientConfigRequest::new(
            "metrics-sink",
            ConnectorKind::Sink,
            "com.example.MetricsSink",
            overrides,
            ClientRole::Consumer,
        )
        .expect("request should build")
    }

    #[test]
    fn allow_all_accepts_arbitrary_keys() {
        let policy = AllowAllOverridePolicy::new();
        let verdict = policy
            .validate(&request(&["acks", "linger.ms", "sasl.mechanism"]))
            .expect("validate should succeed");
        assert_eq!(verdict.len(), 3);
        assert!(!verdict.has_rejections());
    }

    #[test]
    fn deny_all_rejects_every_key() {
        let policy = DenyAllOverridePolicy::new();
        let verdict = policy
            .validate(&request(&["acks", "sasl.mechanism"]))
            .expect("validate should succeed");
        assert_eq!(verdict.len(), 2);
        assert_eq!(verdict.rejected().len(), 2);
        for entry in verdict.entries() {
            assert!(!entry.errors.is_empty());
        }
    }

    #[test]
    fn both_yield_empty_verdict_for_empty_mapping() {
        let allow = AllowAllOverridePolicy::new();
        let deny = DenyAllOverridePolicy::new();
        assert!(allow
            .validate(&request(&[]))
            .expect("validate should succeed")
            .is_empty());
        assert!(deny
            .validate(&request(&[]))
            .expect("validate should succeed")
            .is_empty());
    }
}
