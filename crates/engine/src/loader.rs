//! Host binding with catalogue version check

use std::sync::Arc;

use nebula_sdk::{versions, BRIDGE_API_VERSION};

use crate::error::BindError;
use crate::globals::HostGlobals;
use crate::interface::NativeHost;

/// Check that a host implements the catalogue revision this crate speaks
pub fn check_api_version(host: &dyn NativeHost) -> Result<(), BindError> {
    let found = host.api_version();
    if versions::is_compatible(found) {
        Ok(())
    } else {
        Err(BindError::VersionMismatch {
            expected: BRIDGE_API_VERSION,
            found: found.to_owned(),
        })
    }
}

/// Validate a host and wrap it for global storage
///
/// The calling thread is recorded as the main thread.
#[tracing::instrument(skip_all)]
pub fn load_host(host: Arc<dyn NativeHost>) -> Result<HostGlobals, BindError> {
    if let Err(e) = check_api_version(host.as_ref()) {
        tracing::error!("Refusing to bind host: {}", e);
        return Err(e);
    }

    let globals = HostGlobals::new(host);
    tracing::info!(
        "Native host bound: {} on {:?}",
        globals.api_version,
        globals.main_thread_id
    );

    Ok(globals)
}

/// Validate a host and store it in the process-wide globals
#[tracing::instrument(skip_all)]
pub fn bind_host(host: Arc<dyn NativeHost>) -> Result<&'static HostGlobals, BindError> {
    crate::globals::init_host(load_host(host)?)?;
    crate::globals::host()
}
