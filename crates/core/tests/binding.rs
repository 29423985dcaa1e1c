//! Binding a bridge to a host and resolving categories

mod common;

use std::sync::Arc;

use nebula_core::engine::{BindError, NativeHost};
use nebula_core::sdk::{TypeKind, TypeToken};
use nebula_core::{
    Bridge, BridgeError, CameraComponent, Component, CoreConfig, Entity, Texture,
    TransformComponent, TypeRegistry,
};
use nebula_host::{ComponentKind, MemoryHost};

/// A category the memory host has never heard of
#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
#[component(name = "AudioSourceComponent")]
struct AudioSourceComponent {
    entity: Entity,
}

fn registry_with_audio() -> TypeRegistry {
    let registry = TypeRegistry::with_builtin();
    registry.register_component::<AudioSourceComponent>();
    registry
}

#[test]
fn test_builtin_categories_resolve() {
    let (host, bridge) = common::setup();
    let registry = bridge.registry();

    assert_eq!(registry.len(), 13);
    assert!(registry.unresolved().is_empty());
    assert_eq!(
        bridge.token_of::<CameraComponent>().unwrap(),
        host.component_token(ComponentKind::Camera)
    );
    assert_eq!(
        registry.name_of(bridge.token_of::<Texture>().unwrap()),
        Some("Texture")
    );
}

#[test]
fn test_version_mismatch_refuses_bind() {
    let host = Arc::new(MemoryHost::new().with_api_version("NebulaBridge001"));
    let result = Bridge::with_builtin(host);

    match result {
        Err(BridgeError::Bind(BindError::VersionMismatch { expected, found })) => {
            assert_eq!(expected, nebula_core::sdk::BRIDGE_API_VERSION);
            assert_eq!(found, "NebulaBridge001");
        }
        other => panic!("expected a version mismatch, got {other:?}"),
    }
}

#[test]
fn test_unknown_category_fails_at_first_use() {
    let host = Arc::new(MemoryHost::new());
    let bridge = Bridge::new(host, registry_with_audio(), CoreConfig::default()).unwrap();

    let unresolved = bridge.registry().unresolved();
    assert_eq!(unresolved.len(), 1);
    assert_eq!(unresolved[0].name, "AudioSourceComponent");
    assert_eq!(unresolved[0].kind, TypeKind::Component);

    let e = bridge.scene().create_entity("Speaker").unwrap();
    assert!(matches!(
        e.has_component::<AudioSourceComponent>(),
        Err(BridgeError::UnregisteredType {
            kind: TypeKind::Component,
            name: "AudioSourceComponent"
        })
    ));
    assert!(matches!(
        e.add_component::<AudioSourceComponent>(),
        Err(BridgeError::UnregisteredType { .. })
    ));

    // Resolved categories keep working
    assert!(e.has_component::<TransformComponent>().unwrap());
}

#[test]
fn test_strict_types_fail_the_bind() {
    let host = Arc::new(MemoryHost::new());
    let config = CoreConfig {
        strict_types: true,
        ..CoreConfig::default()
    };

    let result = Bridge::new(host, registry_with_audio(), config);
    assert!(matches!(
        result,
        Err(BridgeError::UnregisteredType {
            name: "AudioSourceComponent",
            ..
        })
    ));
}

#[test]
fn test_unregistered_category_is_an_error() {
    let host = Arc::new(MemoryHost::new());
    let registry = TypeRegistry::new();
    registry.register_component::<TransformComponent>();
    let bridge = Bridge::new(host, registry, CoreConfig::default()).unwrap();

    let e = bridge.scene().create_entity("Lonely").unwrap();
    assert!(e.has_component::<TransformComponent>().unwrap());
    assert!(matches!(
        e.get_component::<CameraComponent>(),
        Err(BridgeError::UnregisteredType {
            name: "CameraComponent",
            ..
        })
    ));
}

#[test]
fn test_injected_token_reaches_the_host() {
    let host = Arc::new(MemoryHost::new());
    let bogus = TypeToken::from_raw(0x5eed);
    let registry = TypeRegistry::new();
    registry.insert_token::<CameraComponent>(bogus);

    let bridge = Bridge::new(host.clone(), registry, CoreConfig::default()).unwrap();
    assert_eq!(bridge.token_of::<CameraComponent>().unwrap(), bogus);

    let e = bridge.scene().create_entity("Injected").unwrap();
    assert!(matches!(
        e.has_component::<CameraComponent>(),
        Err(BridgeError::Host(nebula_core::engine::HostError::UnknownTypeToken(t))) if t == bogus
    ));
    assert_eq!(
        host.resolve_type(TypeKind::Component, "CameraComponent"),
        Some(host.component_token(ComponentKind::Camera))
    );
}

#[test]
fn test_clones_share_a_binding() {
    let (_host, bridge) = common::setup();
    let clone = bridge.clone();
    assert!(bridge.same_binding(&clone));

    let (_other_host, other) = common::setup();
    assert!(!bridge.same_binding(&other));
}

#[test]
fn test_traced_calls_behave_the_same() {
    let host = Arc::new(MemoryHost::new());
    let config = CoreConfig {
        log_script_calls: true,
        ..CoreConfig::default()
    };
    let bridge = Bridge::new(host, TypeRegistry::with_builtin(), config).unwrap();

    let e = bridge.scene().create_entity("Traced").unwrap();
    e.set_name("Renamed").unwrap();
    assert_eq!(e.name().unwrap(), "Renamed");
}
