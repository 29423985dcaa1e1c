//! Process-wide host binding
//!
//! Kept in its own test binary: the globals can only be set once per
//! process.

use std::sync::Arc;

use nebula_core::engine::{self, BindError};
use nebula_core::{Bridge, BridgeError, CoreConfig, TypeRegistry};
use nebula_host::MemoryHost;

#[test]
fn test_global_binding_lifecycle() {
    assert!(!engine::is_host_bound());
    assert!(matches!(engine::host(), Err(BindError::NotBound)));
    assert!(matches!(
        Bridge::from_global(TypeRegistry::with_builtin(), CoreConfig::default()),
        Err(BridgeError::NotBound)
    ));

    let stale = Arc::new(MemoryHost::new().with_api_version("NebulaBridge001"));
    assert!(matches!(
        engine::bind_host(stale),
        Err(BindError::VersionMismatch { .. })
    ));
    assert!(!engine::is_host_bound());

    let host = Arc::new(MemoryHost::new());
    let globals = engine::bind_host(host.clone()).unwrap();
    assert_eq!(globals.api_version, nebula_core::sdk::BRIDGE_API_VERSION);
    assert!(engine::is_host_bound());
    assert!(engine::is_main_thread());

    assert!(matches!(
        engine::bind_host(Arc::new(MemoryHost::new())),
        Err(BindError::AlreadyBound)
    ));

    let bridge = Bridge::from_global(TypeRegistry::with_builtin(), CoreConfig::default()).unwrap();
    let e = bridge.scene().create_entity("Global").unwrap();
    assert_eq!(host.entity_count(), 1);

    std::thread::spawn(move || {
        assert!(!engine::is_main_thread());
        // Off-thread use is logged, not refused
        assert_eq!(e.name().unwrap(), "Global");
    })
    .join()
    .unwrap();
}
