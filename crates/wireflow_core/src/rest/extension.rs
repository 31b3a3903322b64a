//! Extension bootstrap over the guarded facade.
//!
//! Extension modules register their components through the facade so a
//! repeated bootstrap pass (re-entrant initialization, retries, multiple
//! modules contributing the same capability) stays side-effect free.

use crate::rest::guarded::GuardedResourceConfig;
use crate::rest::resource_config::{Configuration, SharedResourceConfig};
use crate::rest::RestResult;
use log::info;
use std::sync::Arc;

/// One REST extension module contributing components at bootstrap.
pub trait RestExtension: Send + Sync {
    /// Stable extension name used in logging events.
    fn extension_name(&self) -> &str;

    /// Registers this extension's components; called through the guard, so
    /// calling it again for the same components is harmless.
    fn register(&self, config: &GuardedResourceConfig);
}

/// Runs one bootstrap pass over every extension.
///
/// # Errors
/// - Returns `MissingStore` when the serving subsystem has not provided a
///   store handle yet.
pub fn install_extensions(
    extensions: &[Arc<dyn RestExtension>],
    handle: Option<SharedResourceConfig>,
) -> RestResult<Configuration> {
    let facade = GuardedResourceConfig::from_handle(handle)?;
    for extension in extensions {
        info!(
            "event=rest_extension_install module=rest extension={} status=ok",
            extension.extension_name()
        );
        extension.register(&facade);
    }
    Ok(facade.configuration())
}
