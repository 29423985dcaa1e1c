//! Bridge API version strings
//!
//! A native host reports the catalogue revision it implements. The managed
//! side refuses to bind to a host reporting a different major revision.

/// Call catalogue revision implemented by this crate family
pub const BRIDGE_API_VERSION: &str = "NebulaBridge002";

/// Catalogue revisions, oldest first
///
/// `NebulaBridge001` used out-parameter getters and `category` collider fields;
/// it is listed only so hosts can report a readable mismatch.
pub const BRIDGE_API_VERSIONS: &[&str] = &["NebulaBridge001", BRIDGE_API_VERSION];

/// Check whether a host-reported version is compatible with this crate
pub fn is_compatible(version: &str) -> bool {
    version == BRIDGE_API_VERSION
}
