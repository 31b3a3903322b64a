//! Shared resource configuration store.
//!
//! # Responsibility
//! - Record component registrations and properties for the REST serving
//!   subsystem, which owns one store instance per server.
//!
//! # Invariants
//! - Instance registrations deduplicate on object identity (`Arc` data
//!   pointer); type registrations deduplicate on `TypeId`.
//! - A duplicate registration is a fault at this level; idempotent retry
//!   semantics live in the guarded facade, not here.

use serde::Serialize;
use std::any::{type_name, TypeId};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

/// Component that can be registered into the REST resource configuration.
pub trait RestComponent: Send + Sync {
    /// Stable component name used in snapshots and logging events.
    fn component_name(&self) -> &str;
}

/// Shared handle to one store, as held by the serving subsystem and the
/// guarded facade.
pub type SharedResourceConfig = Arc<Mutex<ResourceConfig>>;

pub type RegistrationResult = Result<Configuration, RegistrationError>;

/// Duplicate-registration faults raised by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    DuplicateInstance(String),
    DuplicateType(&'static str),
}

impl Display for RegistrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateInstance(name) => {
                write!(f, "component instance already registered: {name}")
            }
            Self::DuplicateType(name) => {
                write!(f, "component type already registered: {name}")
            }
        }
    }
}

impl Error for RegistrationError {}

/// Shape-specific registration metadata, forwarded verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentMetadata {
    /// Explicit priority, when the registration shape carried one.
    pub priority: Option<i32>,
    /// Contract name to priority mapping, when the shape carried one.
    pub contracts: BTreeMap<String, i32>,
}

/// Point-in-time view of the store, returned after every mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Configuration {
    pub properties: BTreeMap<String, serde_json::Value>,
    pub instance_components: Vec<String>,
    pub type_components: Vec<String>,
}

struct InstanceRegistration {
    component: Arc<dyn RestComponent>,
    metadata: ComponentMetadata,
}

struct TypeRegistration {
    type_name: &'static str,
    metadata: ComponentMetadata,
}

/// Mutable resource configuration owned by the serving subsystem.
#[derive(Default)]
pub struct ResourceConfig {
    properties: BTreeMap<String, serde_json::Value>,
    instances: Vec<InstanceRegistration>,
    types: BTreeMap<TypeId, TypeRegistration>,
}

impl ResourceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the store into the shared handle the facade consumes.
    pub fn into_shared(self) -> SharedResourceConfig {
        Arc::new(Mutex::new(self))
    }

    /// Whether this exact component instance is registered.
    ///
    /// Identity is the `Arc` data pointer: two equal-by-content components
    /// behind different allocations are distinct registrations.
    pub fn is_registered(&self, component: &Arc<dyn RestComponent>) -> bool {
        self.instances
            .iter()
            .any(|registration| same_instance(&registration.component, component))
    }

    /// Whether the component type `T` is registered.
    pub fn is_type_registered<T: RestComponent + 'static>(&self) -> bool {
        self.types.contains_key(&TypeId::of::<T>())
    }

    pub fn register(&mut self, component: Arc<dyn RestComponent>) -> RegistrationResult {
        self.register_instance(component, ComponentMetadata::default())
    }

    pub fn register_with_priority(
        &mut self,
        component: Arc<dyn RestComponent>,
        priority: i32,
    ) -> RegistrationResult {
        self.register_instance(
            component,
            ComponentMetadata {
                priority: Some(priority),
                contracts: BTreeMap::new(),
            },
        )
    }

    pub fn register_with_contracts(
        &mut self,
        component: Arc<dyn RestComponent>,
        contracts: BTreeMap<String, i32>,
    ) -> RegistrationResult {
        self.register_instance(
            component,
            ComponentMetadata {
                priority: None,
                contracts,
            },
        )
    }

    pub fn register_type<T: RestComponent + 'static>(&mut self) -> RegistrationResult {
        self.register_type_entry::<T>(ComponentMetadata::default())
    }

    pub fn register_type_with_priority<T: RestComponent + 'static>(
        &mut self,
        priority: i32,
    ) -> RegistrationResult {
        self.register_type_entry::<T>(ComponentMetadata {
            priority: Some(priority),
            contracts: BTreeMap::new(),
        })
    }

    pub fn register_type_with_contracts<T: RestComponent + 'static>(
        &mut self,
        contracts: BTreeMap<String, i32>,
    ) -> RegistrationResult {
        self.register_type_entry::<T>(ComponentMetadata {
            priority: None,
            contracts,
        })
    }

    /// Sets one configuration property; properties are not deduplicated.
    pub fn set_property(
        &mut self,
        name: impl Into<String>,
        value: serde_json::Value,
    ) -> Configuration {
        self.properties.insert(name.into(), value);
        self.configuration()
    }

    /// Returns the current configuration snapshot.
    pub fn configuration(&self) -> Configuration {
        Configuration {
            properties: self.properties.clone(),
            instance_components: self
                .instances
                .iter()
                .map(|registration| registration.component.component_name().to_string())
                .collect(),
            type_components: self
                .types
                .values()
                .map(|registration| registration.type_name.to_string())
                .collect(),
        }
    }

    /// Metadata stored for one registered instance.
    pub fn instance_metadata(
        &self,
        component: &Arc<dyn RestComponent>,
    ) -> Option<&ComponentMetadata> {
        self.instances
            .iter()
            .find(|registration| same_instance(&registration.component, component))
            .map(|registration| &registration.metadata)
    }

    /// Metadata stored for one registered type.
    pub fn type_metadata<T: RestComponent + 'static>(&self) -> Option<&ComponentMetadata> {
        self.types
            .get(&TypeId::of::<T>())
            .map(|registration| &registration.metadata)
    }

    fn register_instance(
        &mut self,
        component: Arc<dyn RestComponent>,
        metadata: ComponentMetadata,
    ) -> RegistrationResult {
        if self.is_registered(&component) {
            return Err(RegistrationError::DuplicateInstance(
                component.component_name().to_string(),
            ));
        }
        self.instances.push(InstanceRegistration {
            component,
            metadata,
        });
        Ok(self.configuration())
    }

    fn register_type_entry<T: RestComponent + 'static>(
        &mut self,
        metadata: ComponentMetadata,
    ) -> RegistrationResult {
        if self.is_type_registered::<T>() {
            return Err(RegistrationError::DuplicateType(type_name::<T>()));
        }
        self.types.insert(
            TypeId::of::<T>(),
            TypeRegistration {
                type_name: type_name::<T>(),
                metadata,
            },
        );
        Ok(self.configuration())
    }
}

// Compare data pointers only; vtable pointers are not stable across
// codegen units, so `Arc::ptr_eq` on trait objects can report false
// negatives.
fn same_instance(a: &Arc<dyn RestComponent>, b: &Arc<dyn RestComponent>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}
