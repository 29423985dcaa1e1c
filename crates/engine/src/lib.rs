//! Nebula Engine - Native Host Contract and Global Storage
//!
//! This crate handles:
//! - Defining the boundary call catalogue every native host implements
//! - Validating a host's catalogue revision before binding
//! - Minting stable type tokens from category names
//! - Storing the bound host in a thread-safe global static
//!
//! # Architecture
//!
//! A host is validated once at startup via [`loader::load_host`] and stored
//! in [`globals::HostGlobals`]. Access is provided via the [`host()`]
//! function.
//!
//! # Thread Safety
//!
//! The host is `Send + Sync` and lives for the rest of the process. The
//! binding thread ID is stored for runtime checks via [`is_main_thread()`].

pub mod error;
pub mod globals;
pub mod hash;
pub mod interface;
pub mod loader;

pub use error::{BindError, HostError, HostResult};
pub use globals::{host, init_host, is_host_bound, is_main_thread, try_host, HostGlobals};
pub use interface::{NativeHost, ScriptObject};
pub use loader::{bind_host, check_api_version, load_host};
