use std::sync::Arc;

use nebula_core::Bridge;
use nebula_host::MemoryHost;

/// A fresh in-memory host and a bridge bound to it
pub fn setup() -> (Arc<MemoryHost>, Bridge) {
    let host = Arc::new(MemoryHost::new());
    let bridge = Bridge::with_builtin(host.clone()).expect("memory host should bind");
    (host, bridge)
}
