//! Error types for native host calls and host binding

use nebula_sdk::{AssetHandle, EntityHandle, TypeToken};

/// Failure reported by a boundary call
///
/// Every variant is a recoverable, per-call failure: a host must never crash
/// or poison its state because a caller passed a stale handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// Handle is the sentinel or refers to a destroyed entity
    #[error("Invalid entity handle: {0}")]
    InvalidEntity(EntityHandle),

    /// Handle is the sentinel or was never interned
    #[error("Invalid asset handle: {0}")]
    InvalidAsset(AssetHandle),

    /// Entity is live but lacks the component the call reads or writes
    #[error("Entity {entity} has no {component}")]
    MissingComponent {
        entity: EntityHandle,
        component: &'static str,
    },

    /// Token was not minted by this host
    #[error("Unknown type token: {0:?}")]
    UnknownTypeToken(TypeToken),

    /// Path is empty or contains characters the host cannot store
    #[error("Invalid asset path: {0:?}")]
    InvalidPath(String),

    /// Asset exists but is not of the category the call expects
    #[error("Asset {asset} is not a {expected}")]
    WrongAssetType {
        asset: AssetHandle,
        expected: &'static str,
    },

    /// Host does not implement this call
    #[error("Not supported by this host: {0}")]
    NotSupported(&'static str),
}

/// Error type for binding a host to the bridge
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// A host is already bound to this process
    #[error("Host already bound")]
    AlreadyBound,

    /// No host has been bound yet
    #[error("No host bound")]
    NotBound,

    /// Host implements a different call catalogue revision
    #[error("Bridge API version mismatch: expected {expected}, host reports {found}")]
    VersionMismatch {
        expected: &'static str,
        found: String,
    },
}

/// Result alias for boundary calls
pub type HostResult<T> = Result<T, HostError>;
