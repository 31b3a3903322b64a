use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError};
use wireflow_core::{
    install_extensions, GuardedResourceConfig, ResourceConfig, RestComponent, RestExtension,
};

struct StaticResource {
    name: &'static str,
}

impl StaticResource {
    fn shared(name: &'static str) -> Arc<dyn RestComponent> {
        Arc::new(Self { name })
    }
}

impl RestComponent for StaticResource {
    fn component_name(&self) -> &str {
        self.name
    }
}

#[derive(Default)]
struct ConnectorStatusResource;

impl RestComponent for ConnectorStatusResource {
    fn component_name(&self) -> &str {
        "connector-status"
    }
}

struct StatusExtension {
    endpoint: Arc<dyn RestComponent>,
}

impl RestExtension for StatusExtension {
    fn extension_name(&self) -> &str {
        "status"
    }

    fn register(&self, config: &GuardedResourceConfig) {
        // Re-registers on every pass; the guard must absorb the repeats.
        config.register(Arc::clone(&self.endpoint));
        config.register_type::<ConnectorStatusResource>();
    }
}

#[test]
fn repeated_registration_mutates_the_store_at_most_once() {
    let store = ResourceConfig::new().into_shared();
    let facade = GuardedResourceConfig::new(Arc::clone(&store));
    let component = StaticResource::shared("audit-log");

    let first = facade.register(Arc::clone(&component));
    let second = facade.register(Arc::clone(&component));

    assert_eq!(first.instance_components, vec!["audit-log".to_string()]);
    assert_eq!(second, first);

    let guard = store.lock().unwrap_or_else(PoisonError::into_inner);
    assert!(guard.is_registered(&component));
    assert_eq!(guard.configuration().instance_components.len(), 1);
}

#[test]
fn first_shape_wins_and_metadata_is_forwarded_verbatim() {
    let store = ResourceConfig::new().into_shared();
    let facade = GuardedResourceConfig::new(Arc::clone(&store));
    let component = StaticResource::shared("rate-limiter");

    facade.register_with_priority(Arc::clone(&component), 12);

    let mut contracts = BTreeMap::new();
    contracts.insert("filter".to_string(), 3);
    facade.register_with_contracts(Arc::clone(&component), contracts);

    let guard = store.lock().unwrap_or_else(PoisonError::into_inner);
    let metadata = guard
        .instance_metadata(&component)
        .expect("metadata should exist");
    assert_eq!(metadata.priority, Some(12));
    assert!(metadata.contracts.is_empty());
}

#[test]
fn type_registrations_deduplicate_across_shapes() {
    let facade = GuardedResourceConfig::new(ResourceConfig::new().into_shared());

    let first = facade.register_type_with_priority::<ConnectorStatusResource>(2);
    let second = facade.register_type::<ConnectorStatusResource>();

    assert_eq!(first.type_components.len(), 1);
    assert_eq!(second, first);
}

#[test]
fn extension_bootstrap_survives_repeated_passes() {
    let store = ResourceConfig::new().into_shared();
    let extensions: Vec<Arc<dyn RestExtension>> = vec![Arc::new(StatusExtension {
        endpoint: Arc::new(ConnectorStatusResource),
    })];

    let first = install_extensions(&extensions, Some(Arc::clone(&store)))
        .expect("first bootstrap pass should succeed");
    let second = install_extensions(&extensions, Some(Arc::clone(&store)))
        .expect("repeated bootstrap pass should succeed");

    assert_eq!(first.instance_components.len(), 1);
    assert_eq!(first.type_components.len(), 1);
    assert_eq!(second, first);
}

#[test]
fn configuration_getter_reflects_unguarded_property_updates() {
    let facade = GuardedResourceConfig::new(ResourceConfig::new().into_shared());

    facade.set_property("cors.allowed.origins", serde_json::json!("*"));
    facade.set_property("cors.allowed.origins", serde_json::json!("https://ops.example"));

    let config = facade.configuration();
    assert_eq!(
        config.properties["cors.allowed.origins"],
        serde_json::json!("https://ops.example")
    );
}
