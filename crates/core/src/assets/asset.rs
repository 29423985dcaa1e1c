//! Untyped asset proxy and path interning

use std::fmt;
use std::hash::{Hash, Hasher};

use tracing::{debug, trace};

use nebula_engine::{HostResult, NativeHost};
use nebula_sdk::{AssetHandle, TypeToken};

use crate::bridge::Bridge;
use crate::error::{BridgeError, BridgeResult};

use super::AssetKind;

/// Proxy for a native asset record
///
/// The host interns assets by path, so two proxies loaded from the same
/// path hold the same handle and compare equal.
#[derive(Clone)]
pub struct Asset {
    handle: AssetHandle,
    bridge: Bridge,
}

impl Asset {
    /// Intern `path`, creating the native record on first use
    pub fn load(bridge: &Bridge, path: &str) -> BridgeResult<Self> {
        let handle = bridge.host().asset_get_or_create_handle(path)?;
        trace!("Interned {:?} -> {}", path, handle);
        Self::from_handle(bridge, handle).ok_or(BridgeError::Host(
            nebula_engine::HostError::InvalidAsset(handle),
        ))
    }

    /// Look up an already interned path without creating a record
    pub fn find(bridge: &Bridge, path: &str) -> Option<Self> {
        let handle = bridge.host().asset_handle_from_path(path);
        Self::from_handle(bridge, handle)
    }

    /// Wrap a handle returned by the host
    ///
    /// Returns `None` for the sentinel.
    pub fn from_handle(bridge: &Bridge, handle: AssetHandle) -> Option<Self> {
        handle.non_sentinel().map(|handle| Self {
            handle,
            bridge: bridge.clone(),
        })
    }

    #[inline]
    pub fn handle(&self) -> AssetHandle {
        self.handle
    }

    #[inline]
    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    /// Run one host call against this asset
    pub fn invoke<T>(
        &self,
        op: &'static str,
        call: impl FnOnce(&dyn NativeHost, AssetHandle) -> HostResult<T>,
    ) -> BridgeResult<T> {
        if self.bridge.traces_calls() {
            trace!(asset = %self.handle, op, "asset call");
        }
        call(self.bridge.host(), self.handle).map_err(BridgeError::from)
    }

    /// The path this asset was interned under
    pub fn path(&self) -> BridgeResult<String> {
        self.invoke("path", |host, a| host.asset_path_from_handle(a))
    }

    /// Category token the host reports for this asset
    pub fn type_token(&self) -> BridgeResult<TypeToken> {
        self.invoke("type_token", |host, a| host.asset_type(a))
    }

    /// Check the host-reported category against `T`
    pub fn is<T: AssetKind>(&self) -> BridgeResult<bool> {
        let expected = self.bridge.token_of::<T>()?;
        Ok(self.type_token()? == expected)
    }

    /// Typed view of this asset, or `None` if it is another category
    pub fn cast<T: AssetKind>(&self) -> BridgeResult<Option<T>> {
        if self.is::<T>()? {
            Ok(Some(T::bind(self.clone())))
        } else {
            debug!("{} is not a {}", self.handle, T::NAME);
            Ok(None)
        }
    }
}

impl PartialEq for Asset {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for Asset {}

impl Hash for Asset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.handle.hash(state);
    }
}

impl fmt::Debug for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Asset").field(&self.handle).finish()
    }
}
