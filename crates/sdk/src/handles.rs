//! Opaque identifiers for native-owned state
//!
//! Entities and assets live entirely inside the native engine. Scripts only
//! ever see 64-bit handles, whose meaning is owned by the engine.
//!
//! # Handle Format
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           u64 raw value                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │            opaque, assigned by the native host                   │
//! │            0 = sentinel ("no object")                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entity and asset handles are separate namespaces: an `EntityHandle(5)`
//! and an `AssetHandle(5)` are unrelated, so there is no conversion between
//! the two types.

use std::fmt;

/// Sentinel raw value shared by every handle kind
pub const NONE_HANDLE: u64 = 0;

/// Handle to a native entity
///
/// Two handles with the same raw value refer to the same entity. Validity is
/// decided by the native host; a non-sentinel handle may still refer to a
/// destroyed entity.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct EntityHandle(u64);

/// Handle to a native asset record
///
/// The host interns asset records by source path, so equal handles imply
/// equal paths within one run. Handles are not stable across restarts.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AssetHandle(u64);

/// Runtime identifier for a component or asset category
///
/// Tokens are minted by the native host when the managed side resolves a
/// category name; the bridge passes them through unchanged.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TypeToken(u64);

/// Which registry a [`TypeToken`] belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Component attached to an entity
    Component,
    /// Asset category (texture, font, ...)
    Asset,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Component => write!(f, "component"),
            TypeKind::Asset => write!(f, "asset"),
        }
    }
}

macro_rules! opaque_handle {
    ($name:ident, $label:literal) => {
        impl $name {
            /// The sentinel ("no object") value
            pub const NONE: Self = Self(NONE_HANDLE);

            /// Create a handle from a raw value
            #[inline]
            pub const fn from_raw(value: u64) -> Self {
                Self(value)
            }

            /// Get the raw handle value
            #[inline]
            pub const fn raw(&self) -> u64 {
                self.0
            }

            /// Check if this is the sentinel value
            #[inline]
            pub const fn is_none(&self) -> bool {
                self.0 == NONE_HANDLE
            }

            /// Check if this is not the sentinel value
            ///
            /// Note: the host may still reject a non-sentinel handle whose
            /// object was destroyed.
            #[inline]
            pub const fn is_some(&self) -> bool {
                !self.is_none()
            }

            /// `None` for the sentinel, `Some(self)` otherwise
            #[inline]
            pub const fn non_sentinel(self) -> Option<Self> {
                if self.is_none() {
                    None
                } else {
                    Some(self)
                }
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_none() {
                    write!(f, concat!($label, "(none)"))
                } else {
                    write!(f, concat!($label, "({:#018x})"), self.0)
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_none() {
                    write!(f, "none")
                } else {
                    write!(f, "{:#x}", self.0)
                }
            }
        }
    };
}

opaque_handle!(EntityHandle, "EntityHandle");
opaque_handle!(AssetHandle, "AssetHandle");
opaque_handle!(TypeToken, "TypeToken");
