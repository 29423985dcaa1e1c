//! TOML configuration for the bridge and for individual scripts
//!
//! [`CoreConfig`] controls how the bridge binds and logs. Scripts that want
//! tunables on disk implement [`ScriptConfig`] on a serde struct and get a
//! file of their own under `configs/scripts/`.
//!
//! Missing files are written out with defaults on first load, so a fresh
//! install always ends up with editable files next to the executable.
//!
//! # Example
//!
//! ```ignore
//! use serde::{Deserialize, Serialize};
//! use nebula_core::ScriptConfig;
//!
//! #[derive(Default, Serialize, Deserialize)]
//! #[serde(default)]
//! pub struct PlayerControllerConfig {
//!     pub speed: f32,
//!     pub jump_impulse: f32,
//! }
//!
//! impl ScriptConfig for PlayerControllerConfig {
//!     const SCRIPT_NAME: &'static str = "player_controller";
//! }
//!
//! let tuning = PlayerControllerConfig::load().unwrap_or_default();
//! ```

mod loader;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use loader::{
    configs_dir, core_config_path, nebula_base_dir, script_config_path, NEBULA_HOME_ENV,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file I/O failed: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Could not write config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Neither `$NEBULA_HOME` nor the executable location gave a base directory
    #[error("No config directory; set {}", NEBULA_HOME_ENV)]
    NoConfigDirectory,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

fn read_toml<T: DeserializeOwned>(path: &Path) -> ConfigResult<T> {
    let text = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

fn write_toml<T: Serialize>(value: &T, path: &Path) -> ConfigResult<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, toml::to_string_pretty(value)?)?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Read `path`, or write and return the default when it does not exist
fn load_or_create<T: Default + Serialize + DeserializeOwned>(path: &Path) -> ConfigResult<T> {
    if !path.exists() {
        let fresh = T::default();
        write_toml(&fresh, path)?;
        info!("No config at {}, wrote defaults", path.display());
        return Ok(fresh);
    }

    let value = read_toml(path)?;
    debug!("Read {}", path.display());
    Ok(value)
}

/// Per-script settings stored as TOML
///
/// The file lives at `<base>/configs/scripts/<SCRIPT_NAME>/<SCRIPT_NAME>.toml`
/// and is created from `Default` on first load.
pub trait ScriptConfig: Default + Serialize + DeserializeOwned + Send + Sync {
    /// Directory and file stem for this script's config
    const SCRIPT_NAME: &'static str;

    fn path() -> ConfigResult<std::path::PathBuf> {
        script_config_path(Self::SCRIPT_NAME)
    }

    fn load() -> ConfigResult<Self> {
        load_or_create(&Self::path()?)
    }

    fn save(&self) -> ConfigResult<()> {
        write_toml(self, &Self::path()?)
    }

    /// Replace `self` with what is on disk now
    ///
    /// On error `self` is left unchanged.
    fn reload(&mut self) -> ConfigResult<()> {
        *self = read_toml(&Self::path()?)?;
        debug!("Reloaded config for script {}", Self::SCRIPT_NAME);
        Ok(())
    }
}

/// Bridge settings, read from `<base>/configs/core.toml`
///
/// Absent keys take their default, so older files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// File format revision
    pub version: u32,

    /// Log at debug level when `RUST_LOG` is unset
    pub debug: bool,

    /// Fail binding when the host does not recognise a registered category
    pub strict_types: bool,

    /// Trace every proxy call
    pub log_script_calls: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            version: 1,
            debug: false,
            strict_types: false,
            log_script_calls: false,
        }
    }
}

impl CoreConfig {
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&core_config_path()?)
    }

    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        load_or_create(path)
    }

    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&core_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        write_toml(self, path)
    }

    pub fn reload(&mut self) -> ConfigResult<()> {
        self.reload_from(&core_config_path()?)
    }

    /// On error `self` is left unchanged
    pub fn reload_from(&mut self, path: &Path) -> ConfigResult<()> {
        *self = read_toml(path)?;
        debug!("Reloaded core config from {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    #[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct SpawnerConfig {
        interval: f32,
        prefab: String,
    }

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("nebula-config-{}-{}", name, std::process::id()))
            .join("core.toml")
    }

    fn cleanup(path: &Path) {
        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_script_settings_survive_toml() {
        let tuning = SpawnerConfig {
            interval: 1.5,
            prefab: "prefabs/enemy.prefab".into(),
        };

        let text = toml::to_string_pretty(&tuning).unwrap();
        assert!(text.contains("prefab = \"prefabs/enemy.prefab\""));
        assert_eq!(toml::from_str::<SpawnerConfig>(&text).unwrap(), tuning);
    }

    #[test]
    fn test_core_defaults() {
        let config = CoreConfig::default();
        assert_eq!(config.version, 1);
        assert!(!config.debug && !config.strict_types && !config.log_script_calls);
    }

    #[test]
    fn test_every_key_is_written() {
        let text = toml::to_string_pretty(&CoreConfig {
            strict_types: true,
            ..CoreConfig::default()
        })
        .unwrap();

        for key in [
            "version = 1",
            "debug = false",
            "strict_types = true",
            "log_script_calls = false",
        ] {
            assert!(text.contains(key), "{key} missing from {text}");
        }
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: CoreConfig = toml::from_str("log_script_calls = true").unwrap();
        assert!(config.log_script_calls);
        assert_eq!(config.version, 1);
        assert!(!config.strict_types);
    }

    #[test]
    fn test_first_load_writes_defaults() {
        let path = scratch("create");
        cleanup(&path);

        assert_eq!(CoreConfig::load_from(&path).unwrap(), CoreConfig::default());
        assert!(path.exists());
        assert_eq!(CoreConfig::load_from(&path).unwrap(), CoreConfig::default());

        cleanup(&path);
    }

    #[test]
    fn test_reload_picks_up_edits() {
        let path = scratch("reload");
        let mut config = CoreConfig::default();
        config.save_to(&path).unwrap();

        std::fs::write(&path, "debug = true\n").unwrap();
        config.reload_from(&path).unwrap();
        assert!(config.debug);

        cleanup(&path);
    }

    #[test]
    fn test_broken_file_keeps_current_values() {
        let path = scratch("broken");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "version = \"one\"").unwrap();

        let mut config = CoreConfig {
            strict_types: true,
            ..CoreConfig::default()
        };
        let err = config.reload_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(config.strict_types);

        cleanup(&path);
    }
}
