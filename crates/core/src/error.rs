//! Error types for the managed side of the bridge

use nebula_engine::{BindError, HostError};
use nebula_sdk::{EntityHandle, TypeKind};

/// Error type for proxy and registry operations
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// A boundary call failed on the native side
    #[error(transparent)]
    Host(#[from] HostError),

    /// Host rejected binding
    #[error(transparent)]
    Bind(#[from] BindError),

    /// Category was never registered, or the host did not recognise it
    #[error("Unregistered {kind} type: {name}")]
    UnregisteredType { kind: TypeKind, name: &'static str },

    /// Component access on an entity that lacks it
    #[error("Entity {entity} has no {component}")]
    MissingComponent {
        entity: EntityHandle,
        component: &'static str,
    },

    /// No script class registered under this name
    #[error("Script class not found: {0}")]
    ScriptClassNotFound(String),

    /// Entity already runs an instance of a different class
    #[error("Entity {entity} already runs script {class_name}")]
    ScriptAlreadyAttached {
        entity: EntityHandle,
        class_name: String,
    },

    /// No host is bound to this process
    #[error("No native host bound")]
    NotBound,
}

impl BridgeError {
    /// Whether this error means the entity handle is no longer usable
    pub fn is_invalid_entity(&self) -> bool {
        matches!(self, BridgeError::Host(HostError::InvalidEntity(_)))
    }

    /// Whether this error reports a missing component, from either side
    pub fn is_missing_component(&self) -> bool {
        matches!(
            self,
            BridgeError::MissingComponent { .. } | BridgeError::Host(HostError::MissingComponent { .. })
        )
    }
}

/// Result type for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;
