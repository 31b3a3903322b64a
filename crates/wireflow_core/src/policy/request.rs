//! Override request model.
//!
//! # Responsibility
//! - Capture one connector's proposed client config overrides together with
//!   the context policies may use for their decision.
//!
//! # Invariants
//! - A constructed request is well-formed: the connector name is non-empty.
//! - Override keys are unique; insertion order never affects a verdict.

use crate::policy::{PolicyError, PolicyResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed set of connector categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorKind {
    /// Produces records into the worker's data plane.
    Source,
    /// Consumes records out of the worker's data plane.
    Sink,
}

/// Closed set of client roles a connector's overrides can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientRole {
    Producer,
    Consumer,
    Admin,
}

impl ClientRole {
    /// Stable string id used in logging events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Producer => "producer",
            Self::Consumer => "consumer",
            Self::Admin => "admin",
        }
    }
}

/// Proposed client config overrides for one connector, as handed to a policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfigRequest {
    connector_name: String,
    connector_kind: ConnectorKind,
    /// Implementation identity (plugin id) for contextual policy decisions.
    connector_impl: String,
    overrides: BTreeMap<String, serde_json::Value>,
    client_role: ClientRole,
}

impl ClientConfigRequest {
    /// Builds a well-formed request.
    ///
    /// # Errors
    /// - Returns `InvalidArgument` when the connector name is blank.
    pub fn new(
        connector_name: impl Into<String>,
        connector_kind: ConnectorKind,
        connector_impl: impl Into<String>,
        overrides: BTreeMap<String, serde_json::Value>,
        client_role: ClientRole,
    ) -> PolicyResult<Self> {
        let connector_name = connector_name.into();
        if connector_name.trim().is_empty() {
            return Err(PolicyError::InvalidArgument(
                "connector name must not be blank".to_string(),
            ));
        }

        Ok(Self {
            connector_name,
            connector_kind,
            connector_impl: connector_impl.into(),
            overrides,
            client_role,
        })
    }

    pub fn connector_name(&self) -> &str {
        &self.connector_name
    }

    pub fn connector_kind(&self) -> ConnectorKind {
        self.connector_kind
    }

    pub fn connector_impl(&self) -> &str {
        &self.connector_impl
    }

    /// Proposed key/value overrides; keys are unique by construction.
    pub fn overrides(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.overrides
    }

    pub fn client_role(&self) -> ClientRole {
        self.client_role
    }
}

#[cfg(test)]
mod tests {
    use super::{ClientConfigRequest, ClientRole, ConnectorKind};
    use crate::policy::PolicyError;
    use std::collections::BTreeMap;

    fn overrides(pairs: &[(&str, &str)]) -> BTreeMap<String, serde_json::Value> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), serde_json::json!(value)))
            .collect()
    }

    #[test]
    fn builds_well_formed_request() {
        let request = ClientConfigRequest::new(
            "orders-sink",
            ConnectorKind::Sink,
            "com.example.JdbcSink",
            overrides(&[("sasl.mechanism", "PLAIN")]),
            ClientRole::Consumer,
        )
        .expect("request should build");

        assert_eq!(request.connector_name(), "orders-sink");
        assert_eq!(request.connector_kind(), ConnectorKind::Sink);
        assert_eq!(request.client_role(), ClientRole::Consumer);
        assert_eq!(request.overrides().len(), 1);
    }

    #[test]
    fn rejects_blank_connector_name() {
        let err = ClientConfigRequest::new(
            "   ",
            ConnectorKind::Source,
            "com.example.FileSource",
            BTreeMap::new(),
            ClientRole::Producer,
        )
        .expect_err("blank connector name must fail");
        assert!(matches!(err, PolicyError::InvalidArgument(_)));
    }

    #[test]
    fn serializes_closed_sets_as_snake_case() {
        let request = ClientConfigRequest::new(
            "audit-source",
            ConnectorKind::Source,
            "com.example.AuditSource",
            overrides(&[("security.protocol", "SASL_SSL")]),
            ClientRole::Admin,
        )
        .expect("request should build");

        let json = serde_json::to_value(&request).expect("request should serialize");
        assert_eq!(json["connector_kind"], "source");
        assert_eq!(json["client_role"], "admin");
        assert_eq!(json["overrides"]["security.protocol"], "SASL_SSL");

        let decoded: ClientConfigRequest =
            serde_json::from_value(json).expect("request should deserialize");
        assert_eq!(decoded, request);
    }
}
