//! Config path resolution
//!
//! Handles resolving paths for configuration files based on `$NEBULA_HOME`
//! or the executable's location.

use std::path::PathBuf;

use super::{ConfigError, ConfigResult};

/// Environment variable overriding the base directory
pub const NEBULA_HOME_ENV: &str = "NEBULA_HOME";

/// Returns the nebula base directory.
///
/// `$NEBULA_HOME` when set and non-empty, otherwise the directory holding
/// the running executable.
pub fn nebula_base_dir() -> ConfigResult<PathBuf> {
    if let Some(home) = std::env::var_os(NEBULA_HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }

    let exe = std::env::current_exe().map_err(ConfigError::IoError)?;
    exe.parent()
        .map(PathBuf::from)
        .ok_or(ConfigError::NoConfigDirectory)
}

/// Returns the base configs directory.
///
/// Path: `<base>/configs/`
pub fn configs_dir() -> ConfigResult<PathBuf> {
    Ok(nebula_base_dir()?.join("configs"))
}

/// Returns the path for a script's config file.
///
/// Path: `<base>/configs/scripts/{script_name}/{script_name}.toml`
pub fn script_config_path(script_name: &str) -> ConfigResult<PathBuf> {
    let base = configs_dir()?;
    Ok(base
        .join("scripts")
        .join(script_name)
        .join(format!("{}.toml", script_name)))
}

/// Returns the core config path.
///
/// Path: `<base>/configs/core.toml`
pub fn core_config_path() -> ConfigResult<PathBuf> {
    Ok(configs_dir()?.join("core.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_config_path_format() {
        let path = script_config_path("player_controller").unwrap();
        assert!(path.ends_with("configs/scripts/player_controller/player_controller.toml"));
    }

    #[test]
    fn test_core_config_path_format() {
        let path = core_config_path().unwrap();
        assert!(path.ends_with("configs/core.toml"));
    }
}
