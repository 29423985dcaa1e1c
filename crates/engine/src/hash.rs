//! FNV-1a hashing for category names
//!
//! Hosts that have no runtime type facility of their own can mint stable
//! type tokens by hashing the category name. The kind is folded into the
//! hash so a component and an asset category sharing a name get distinct
//! tokens.

use nebula_sdk::{TypeKind, TypeToken};

/// FNV-1a 64-bit hash (compile-time capable)
pub const fn fnv1a_64(data: &[u8]) -> u64 {
    const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x00000100000001B3;

    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < data.len() {
        hash ^= data[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Hash of a category name, tagged by kind
///
/// Never returns 0, so the result is always usable as a non-sentinel token.
pub const fn name_hash(kind: TypeKind, name: &str) -> u64 {
    let tag: u64 = match kind {
        TypeKind::Component => 0x01,
        TypeKind::Asset => 0x02,
    };
    let hash = fnv1a_64(name.as_bytes()) ^ tag.rotate_right(8);
    if hash == 0 {
        tag
    } else {
        hash
    }
}

/// Token for a category name
#[inline]
pub fn token_for(kind: TypeKind, name: &str) -> TypeToken {
    TypeToken::from_raw(name_hash(kind, name))
}
