//! The managed side's connection to a native host
//!
//! A [`Bridge`] bundles the host, the resolved [`TypeRegistry`] and the
//! [`CoreConfig`]. It is cheap to clone; every proxy holds one.

use std::sync::Arc;

use tracing::{debug, info, warn};

use nebula_engine::{check_api_version, NativeHost};
use nebula_sdk::TypeToken;

use crate::config::CoreConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::registry::{Category, TypeRegistry};

struct BridgeInner {
    host: Arc<dyn NativeHost>,
    registry: TypeRegistry,
    config: CoreConfig,
    /// Host came from the process-wide globals, so thread checks apply
    global: bool,
}

/// Shared handle to a bound host
#[derive(Clone)]
pub struct Bridge {
    inner: Arc<BridgeInner>,
}

impl Bridge {
    /// Bind to a host explicitly
    ///
    /// Checks the host's catalogue revision and resolves every registered
    /// category. With `strict_types` set, any category the host does not
    /// recognise fails the bind; otherwise it is logged and fails at its
    /// first use.
    #[tracing::instrument(skip_all)]
    pub fn new(
        host: Arc<dyn NativeHost>,
        registry: TypeRegistry,
        config: CoreConfig,
    ) -> BridgeResult<Self> {
        Self::build(host, registry, config, false)
    }

    /// Bind to a host with the built-in categories and default config
    pub fn with_builtin(host: Arc<dyn NativeHost>) -> BridgeResult<Self> {
        Self::new(host, TypeRegistry::with_builtin(), CoreConfig::default())
    }

    /// Bind to the host stored in the process-wide globals
    #[tracing::instrument(skip_all)]
    pub fn from_global(registry: TypeRegistry, config: CoreConfig) -> BridgeResult<Self> {
        let globals = nebula_engine::try_host().ok_or(BridgeError::NotBound)?;
        Self::build(globals.host_arc(), registry, config, true)
    }

    fn build(
        host: Arc<dyn NativeHost>,
        registry: TypeRegistry,
        config: CoreConfig,
        global: bool,
    ) -> BridgeResult<Self> {
        check_api_version(host.as_ref())?;

        let unresolved = registry.resolve(host.as_ref());
        if let Some(first) = unresolved.first() {
            if config.strict_types {
                return Err(BridgeError::UnregisteredType {
                    kind: first.kind,
                    name: first.name,
                });
            }
            warn!(
                "{} categories unresolved; they will fail at first use",
                unresolved.len()
            );
        }

        info!(
            "Bridge bound to {} with {} categories",
            host.api_version(),
            registry.len()
        );

        Ok(Self {
            inner: Arc::new(BridgeInner {
                host,
                registry,
                config,
                global,
            }),
        })
    }

    /// The bound host
    ///
    /// Every proxy call goes through here.
    pub fn host(&self) -> &dyn NativeHost {
        if self.inner.global && !nebula_engine::is_main_thread() {
            debug!(
                "Bridge used off the main thread ({:?})",
                std::thread::current().id()
            );
        }
        self.inner.host.as_ref()
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.inner.registry
    }

    pub fn config(&self) -> &CoreConfig {
        &self.inner.config
    }

    /// Token for a registered category
    #[inline]
    pub fn token_of<T: Category>(&self) -> BridgeResult<TypeToken> {
        self.inner.registry.token_of::<T>()
    }

    /// Whether per-call tracing is enabled
    #[inline]
    pub(crate) fn traces_calls(&self) -> bool {
        self.inner.config.log_script_calls
    }

    /// Check if two bridges share the same binding
    pub fn same_binding(&self, other: &Bridge) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("api_version", &self.inner.host.api_version())
            .field("categories", &self.inner.registry.len())
            .field("global", &self.inner.global)
            .finish()
    }
}
