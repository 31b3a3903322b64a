//! Deduplicating registration facade.
//!
//! # Responsibility
//! - Mirror every store registration shape while making repeated
//!   registration of the same component a silent, observable no-op.
//!
//! # Invariants
//! - A call is forwarded iff the store does not already consider the
//!   component (or type) registered.
//! - Check-then-act runs under one lock acquisition, so concurrent
//!   bootstrap cannot double-forward.
//! - No registration call raises; skips surface as debug-level events.

use crate::rest::resource_config::{
    Configuration, RegistrationResult, ResourceConfig, RestComponent, SharedResourceConfig,
};
use crate::rest::{RestConfigError, RestResult};
use log::{debug, warn};
use std::any::type_name;
use std::collections::BTreeMap;
use std::sync::{Arc, MutexGuard, PoisonError};

/// Wrapper enforcing idempotent registration over one shared store.
pub struct GuardedResourceConfig {
    store: SharedResourceConfig,
}

impl std::fmt::Debug for GuardedResourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuardedResourceConfig").finish_non_exhaustive()
    }
}

impl GuardedResourceConfig {
    /// Wraps an existing store handle.
    pub fn new(store: SharedResourceConfig) -> Self {
        Self { store }
    }

    /// Builds the facade from an optional wiring handle.
    ///
    /// # Errors
    /// - Returns `MissingStore` when the serving subsystem has not provided
    ///   a store; this is a fatal configuration error at bootstrap.
    pub fn from_handle(handle: Option<SharedResourceConfig>) -> RestResult<Self> {
        match handle {
            Some(store) => Ok(Self::new(store)),
            None => Err(RestConfigError::MissingStore),
        }
    }

    /// Registers a component instance unless it is already registered.
    pub fn register(&self, component: Arc<dyn RestComponent>) -> Configuration {
        self.guard_instance(component, |store, component| store.register(component))
    }

    /// Registers a component instance with an explicit priority.
    pub fn register_with_priority(
        &self,
        component: Arc<dyn RestComponent>,
        priority: i32,
    ) -> Configuration {
        self.guard_instance(component, move |store, component| {
            store.register_with_priority(component, priority)
        })
    }

    /// Registers a component instance with an explicit contract mapping.
    pub fn register_with_contracts(
        &self,
        component: Arc<dyn RestComponent>,
        contracts: BTreeMap<String, i32>,
    ) -> Configuration {
        self.guard_instance(component, move |store, component| {
            store.register_with_contracts(component, contracts)
        })
    }

    /// Registers a component type unless it is already registered.
    pub fn register_type<T: RestComponent + 'static>(&self) -> Configuration {
        self.guard_type::<T>(|store| store.register_type::<T>())
    }

    /// Registers a component type with an explicit priority.
    pub fn register_type_with_priority<T: RestComponent + 'static>(
        &self,
        priority: i32,
    ) -> Configuration {
        self.guard_type::<T>(move |store| store.register_type_with_priority::<T>(priority))
    }

    /// Registers a component type with an explicit contract mapping.
    pub fn register_type_with_contracts<T: RestComponent + 'static>(
        &self,
        contracts: BTreeMap<String, i32>,
    ) -> Configuration {
        self.guard_type::<T>(move |store| store.register_type_with_contracts::<T>(contracts))
    }

    /// Unguarded property passthrough.
    pub fn set_property(&self, name: impl Into<String>, value: serde_json::Value) -> Configuration {
        self.lock().set_property(name, value)
    }

    /// Unguarded configuration passthrough.
    pub fn configuration(&self) -> Configuration {
        self.lock().configuration()
    }

    fn guard_instance(
        &self,
        component: Arc<dyn RestComponent>,
        forward: impl FnOnce(&mut ResourceConfig, Arc<dyn RestComponent>) -> RegistrationResult,
    ) -> Configuration {
        let mut store = self.lock();
        if store.is_registered(&component) {
            debug!(
                "event=rest_register_skipped module=rest component={} reason=already_registered",
                component.component_name()
            );
            return store.configuration();
        }
        let result = forward(&mut store, component);
        Self::forwarded(result, &store)
    }

    fn guard_type<T: RestComponent + 'static>(
        &self,
        forward: impl FnOnce(&mut ResourceConfig) -> RegistrationResult,
    ) -> Configuration {
        let mut store = self.lock();
        if store.is_type_registered::<T>() {
            debug!(
                "event=rest_register_skipped module=rest component={} reason=already_registered",
                type_name::<T>()
            );
            return store.configuration();
        }
        let result = forward(&mut store);
        Self::forwarded(result, &store)
    }

    // The guarded path never raises: the predicate ran under this same lock
    // guard, so a store fault here means the store broke its own contract.
    fn forwarded(result: RegistrationResult, store: &ResourceConfig) -> Configuration {
        match result {
            Ok(configuration) => configuration,
            Err(err) => {
                warn!("event=rest_register_fault module=rest status=absorbed error={err}");
                store.configuration()
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ResourceConfig> {
        // A poisoned lock is absorbed; the guarded path must not panic.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::GuardedResourceConfig;
    use crate::rest::resource_config::{ResourceConfig, RestComponent};
    use crate::rest::RestConfigError;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    struct LoggingFilter {
        name: String,
    }

    impl LoggingFilter {
        fn shared(name: &str) -> Arc<dyn RestComponent> {
            Arc::new(Self {
                name: name.to_string(),
            })
        }
    }

    impl RestComponent for LoggingFilter {
        fn component_name(&self) -> &str {
            &self.name
        }
    }

    #[derive(Default)]
    struct TracingResource;

    impl RestComponent for TracingResource {
        fn component_name(&self) -> &str {
            "tracing"
        }
    }

    #[test]
    fn second_registration_of_same_instance_is_a_no_op() {
        let facade = GuardedResourceConfig::new(ResourceConfig::new().into_shared());
        let component = LoggingFilter::shared("audit-filter");

        let first = facade.register(Arc::clone(&component));
        assert_eq!(first.instance_components.len(), 1);

        let second = facade.register(Arc::clone(&component));
        assert_eq!(second, first);
    }

    #[test]
    fn guard_applies_uniformly_across_instance_shapes() {
        let facade = GuardedResourceConfig::new(ResourceConfig::new().into_shared());
        let component = LoggingFilter::shared("audit-filter");

        facade.register_with_priority(Arc::clone(&component), 10);
        let mut contracts = BTreeMap::new();
        contracts.insert("filter".to_string(), 1);
        let after_retry = facade.register_with_contracts(Arc::clone(&component), contracts);

        assert_eq!(after_retry.instance_components.len(), 1);
    }

    #[test]
    fn guard_applies_uniformly_across_type_shapes() {
        let facade = GuardedResourceConfig::new(ResourceConfig::new().into_shared());

        facade.register_type::<TracingResource>();
        facade.register_type_with_priority::<TracingResource>(5);
        let mut contracts = BTreeMap::new();
        contracts.insert("resource".to_string(), 2);
        let config = facade.register_type_with_contracts::<TracingResource>(contracts);

        assert_eq!(config.type_components.len(), 1);
    }

    #[test]
    fn passthroughs_are_unguarded() {
        let store = ResourceConfig::new().into_shared();
        let facade = GuardedResourceConfig::new(Arc::clone(&store));

        facade.set_property("enable.tracing", serde_json::json!(true));
        facade.set_property("enable.tracing", serde_json::json!(false));
        assert_eq!(
            facade.configuration().properties["enable.tracing"],
            serde_json::json!(false)
        );
    }

    #[test]
    fn missing_store_handle_is_a_fatal_wiring_error() {
        let err = GuardedResourceConfig::from_handle(None)
            .expect_err("absent store handle must fail");
        assert_eq!(err, RestConfigError::MissingStore);
    }

    #[test]
    fn concurrent_bootstrap_registers_at_most_once() {
        let facade = Arc::new(GuardedResourceConfig::new(
            ResourceConfig::new().into_shared(),
        ));
        let component = LoggingFilter::shared("shared-filter");

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let facade = Arc::clone(&facade);
                let component = Arc::clone(&component);
                scope.spawn(move || {
                    facade.register(component);
                });
            }
        });

        assert_eq!(facade.configuration().instance_components.len(), 1);
    }
}
