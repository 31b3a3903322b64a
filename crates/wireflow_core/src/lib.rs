//! Gatekeeping core for the Wireflow worker process.
//! This crate decides which client config overrides a connector may apply
//! and keeps REST extension registration idempotent.

pub mod config;
pub mod logging;
pub mod policy;
pub mod rest;

pub use config::{CoreSettings, PolicyOptions, SettingsError, OVERRIDE_POLICY_SETTING};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use policy::builtin::{AllowAllOverridePolicy, DenyAllOverridePolicy};
pub use policy::gate::{GateError, OverrideGate};
pub use policy::principal::{
    PrincipalOverridePolicy, SASL_JAAS_CONFIG, SASL_MECHANISM, SECURITY_PROTOCOL,
};
pub use policy::request::{ClientConfigRequest, ClientRole, ConnectorKind};
pub use policy::selector::{policy_for_name, supported_policy_names, PolicySelectionError};
pub use policy::spi::OverridePolicy;
pub use policy::verdict::{ConfigKeyVerdict, PolicyViolation, RejectedKey, ValidationVerdict};
pub use policy::{PolicyError, PolicyResult};
pub use rest::extension::{install_extensions, RestExtension};
pub use rest::guarded::GuardedResourceConfig;
pub use rest::resource_config::{
    ComponentMetadata, Configuration, RegistrationError, ResourceConfig, RestComponent,
    SharedResourceConfig,
};
pub use rest::{RestConfigError, RestResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
