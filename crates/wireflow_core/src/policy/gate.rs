//! Worker-side override enforcement.
//!
//! # Responsibility
//! - Own the configured policy and route every override attempt through it.
//! - Escalate any per-key rejection into a full-attempt `PolicyViolation`.
//!
//! # Invariants
//! - No override reaches a client config without an accepted verdict.
//! - One rejected key fails the whole attempt, never a partial apply.

use crate::config::{CoreSettings, PolicyOptions};
use crate::policy::request::ClientConfigRequest;
use crate::policy::selector::{policy_for_name, PolicySelectionError};
use crate::policy::spi::OverridePolicy;
use crate::policy::verdict::{PolicyViolation, ValidationVerdict};
use crate::policy::PolicyError;
use log::{info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Enforcement-path errors.
#[derive(Debug)]
pub enum GateError {
    Selection(PolicySelectionError),
    Policy(PolicyError),
    Violation(PolicyViolation),
}

impl Display for GateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Selection(err) => write!(f, "{err}"),
            Self::Policy(err) => write!(f, "{err}"),
            Self::Violation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Selection(err) => Some(err),
            Self::Policy(err) => Some(err),
            Self::Violation(err) => Some(err),
        }
    }
}

impl From<PolicySelectionError> for GateError {
    fn from(value: PolicySelectionError) -> Self {
        Self::Selection(value)
    }
}

impl From<PolicyError> for GateError {
    fn from(value: PolicyError) -> Self {
        Self::Policy(value)
    }
}

/// Configured policy plus the caller contract around it.
#[derive(Debug)]
pub struct OverrideGate {
    policy: Box<dyn OverridePolicy>,
}

impl OverrideGate {
    /// Wraps an already-selected policy, configuring it exactly once.
    pub fn new(
        mut policy: Box<dyn OverridePolicy>,
        options: &PolicyOptions,
    ) -> Result<Self, GateError> {
        policy.configure(options)?;
        Ok(Self { policy })
    }

    /// Builds the gate from operator settings: select, then configure.
    pub fn from_settings(settings: &CoreSettings) -> Result<Self, GateError> {
        let policy = policy_for_name(&settings.override_policy)?;
        Self::new(policy, &settings.policy_options)
    }

    /// Validates one override attempt and returns the approved mapping.
    ///
    /// # Contract
    /// - Any rejected key fails the whole attempt with `GateError::Violation`
    ///   naming every rejected key and reason.
    /// - On success the full proposed mapping is returned for application to
    ///   the worker's client config.
    pub fn approve(
        &self,
        request: &ClientConfigRequest,
    ) -> Result<BTreeMap<String, serde_json::Value>, GateError> {
        let verdict = self.policy.validate(request)?;

        if let Some(violation) = PolicyViolation::from_verdict(request.connector_name(), &verdict)
        {
            warn!(
                "event=override_rejected module=policy connector={} role={} rejected_keys={}",
                request.connector_name(),
                request.client_role().as_str(),
                violation.rejected_keys().join(",")
            );
            return Err(GateError::Violation(violation));
        }

        info!(
            "event=override_approved module=policy connector={} role={} key_count={}",
            request.connector_name(),
            request.client_role().as_str(),
            verdict.len()
        );
        Ok(request.overrides().clone())
    }

    /// Runs one validation pass without escalation, for audit surfaces.
    pub fn inspect(&self, request: &ClientConfigRequest) -> Result<ValidationVerdict, GateError> {
        Ok(self.policy.validate(request)?)
    }

    /// Closes the owned policy; idempotent.
    pub fn close(&mut self) {
        self.policy.close();
    }
}
