//! Nebula SDK - Script Bridge Type Definitions
//!
//! This crate contains the plain data types that cross the boundary between
//! the native engine and gameplay scripts. It has no dependencies so that a
//! native host and the managed side can both depend on it cheaply.
//!
//! # Modules
//!
//! - [`math`] - Fixed-layout vector and colour payloads
//! - [`handles`] - Opaque entity/asset handles and type tokens
//! - [`input`] - Key and mouse codes, log levels, body types
//! - [`versions`] - Bridge API version string

pub mod handles;
pub mod input;
pub mod math;
pub mod versions;

pub use handles::*;
pub use input::*;
pub use math::*;
pub use versions::BRIDGE_API_VERSION;
