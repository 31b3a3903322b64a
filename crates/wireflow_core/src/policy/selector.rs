//! Operator-facing policy selection.

use crate::policy::builtin::{AllowAllOverridePolicy, DenyAllOverridePolicy};
use crate::policy::principal::PrincipalOverridePolicy;
use crate::policy::spi::OverridePolicy;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Short name of the principal (authentication allow-list) policy.
pub const POLICY_NAME_PRINCIPAL: &str = "principal";
/// Short name of the no-restriction policy.
pub const POLICY_NAME_ALL: &str = "all";
/// Short name of the deny-everything policy.
pub const POLICY_NAME_NONE: &str = "none";

const SUPPORTED_POLICY_NAMES: &[&str] =
    &[POLICY_NAME_PRINCIPAL, POLICY_NAME_ALL, POLICY_NAME_NONE];

/// Returns supported override policy short names.
pub fn supported_policy_names() -> &'static [&'static str] {
    SUPPORTED_POLICY_NAMES
}

/// Constructs the override policy named by operator configuration.
///
/// Names are matched case-insensitively after trimming. The returned policy
/// is not yet configured; the caller owns the `configure` call.
pub fn policy_for_name(name: &str) -> Result<Box<dyn OverridePolicy>, PolicySelectionError> {
    let normalized = name.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Err(PolicySelectionError::EmptyPolicyName);
    }

    match normalized.as_str() {
        POLICY_NAME_PRINCIPAL => Ok(Box::new(PrincipalOverridePolicy::new())),
        POLICY_NAME_ALL => Ok(Box::new(AllowAllOverridePolicy::new())),
        POLICY_NAME_NONE => Ok(Box::new(DenyAllOverridePolicy::new())),
        other => Err(PolicySelectionError::UnknownPolicy(other.to_string())),
    }
}

/// Policy selection errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicySelectionError {
    EmptyPolicyName,
    UnknownPolicy(String),
}

impl Display for PolicySelectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPolicyName => write!(f, "override policy name must not be empty"),
            Self::UnknownPolicy(value) => write!(
                f,
                "override policy is unknown: {value}; supported policies: {}",
                SUPPORTED_POLICY_NAMES.join("|")
            ),
        }
    }
}

impl Error for PolicySelectionError {}
