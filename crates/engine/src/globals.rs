//! Global host storage
//!
//! A process embedding the bridge binds its native host once, at startup,
//! and stores it here. Access is thread-safe via OnceLock. Binding globally
//! is optional: the managed side can also be handed a host explicitly.

use std::sync::{Arc, OnceLock};
use std::thread::ThreadId;

use crate::error::BindError;
use crate::interface::NativeHost;

/// Bound host plus the state recorded when it was bound
pub struct HostGlobals {
    /// The native host implementation
    host: Arc<dyn NativeHost>,

    /// Catalogue revision the host reported at bind time
    pub api_version: String,

    /// Thread that performed the binding; scripts run on this thread
    pub main_thread_id: ThreadId,
}

/// Global host storage
static HOST: OnceLock<HostGlobals> = OnceLock::new();

/// Initialize host globals
///
/// Called once during startup. Returns error if already initialized.
pub fn init_host(globals: HostGlobals) -> Result<(), BindError> {
    HOST.set(globals).map_err(|_| BindError::AlreadyBound)
}

/// Get host globals
///
/// Fails with [`BindError::NotBound`] if called before `init_host`.
pub fn host() -> Result<&'static HostGlobals, BindError> {
    HOST.get().ok_or(BindError::NotBound)
}

/// Try to get host globals
pub fn try_host() -> Option<&'static HostGlobals> {
    HOST.get()
}

/// Check if a host is bound
pub fn is_host_bound() -> bool {
    HOST.get().is_some()
}

/// Check if current thread is the thread the host was bound on
///
/// Always `false` when no host is bound.
pub fn is_main_thread() -> bool {
    HOST.get()
        .map(|g| std::thread::current().id() == g.main_thread_id)
        .unwrap_or(false)
}

impl HostGlobals {
    /// Create new HostGlobals, recording the current thread as main
    pub fn new(host: Arc<dyn NativeHost>) -> Self {
        let api_version = host.api_version().to_owned();
        Self {
            host,
            api_version,
            main_thread_id: std::thread::current().id(),
        }
    }

    /// Borrow the bound host
    pub fn host(&self) -> &dyn NativeHost {
        self.host.as_ref()
    }

    /// Shared handle to the bound host
    pub fn host_arc(&self) -> Arc<dyn NativeHost> {
        Arc::clone(&self.host)
    }
}

impl std::fmt::Debug for HostGlobals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostGlobals")
            .field("api_version", &self.api_version)
            .field("main_thread_id", &self.main_thread_id)
            .finish_non_exhaustive()
    }
}
