//! Pluggable override policy contract.

use crate::config::PolicyOptions;
use crate::policy::request::ClientConfigRequest;
use crate::policy::verdict::ValidationVerdict;
use crate::policy::PolicyResult;

/// Decision function governing which client config overrides are permitted.
///
/// The worker runtime constructs exactly one implementation (selected by
/// operator configuration), calls [`configure`](Self::configure) once, then
/// routes every override attempt through [`validate`](Self::validate) before
/// applying anything. Lifecycle: construction → configured → (validate)* →
/// closed.
///
/// # Contract
/// - `validate` is a pure function of the request: no mutation, exactly one
///   verdict entry per input key, no key dropped or invented.
/// - `validate` sits on a control-plane request path: cheap, synchronous,
///   no network or blocking I/O.
/// - `validate` never fails for a well-formed request. Implementations that
///   cannot operate before `configure` return `PolicyError::NotConfigured`
///   and must document that choice; every built-in policy instead works from
///   construction-time defaults.
/// - `configure` must tolerate options it does not understand; future
///   runtimes may pass new option names.
/// - `close` is idempotent and safe to call multiple times.
/// - Once `configure` has returned, `validate` must be safe for concurrent
///   callers (`Send + Sync` bound); configuration state is read-only
///   afterwards.
pub trait OverridePolicy: Send + Sync + std::fmt::Debug {
    /// Applies operator-supplied options before first use.
    fn configure(&mut self, options: &PolicyOptions) -> PolicyResult<()>;

    /// Produces one verdict entry per proposed override key.
    fn validate(&self, request: &ClientConfigRequest) -> PolicyResult<ValidationVerdict>;

    /// Releases held resources.
    fn close(&mut self);
}
