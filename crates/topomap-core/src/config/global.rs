//! Global configuration location (~/.config/topomap/config.toml)

use std::path::PathBuf;

use crate::error::{Result, TopoMapError};

const CONFIG_DIR: &str = "topomap";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "TOPOMAP_CONFIG_DIR";

/// Path of the global config file, honoring `TOPOMAP_CONFIG_DIR`
pub fn global_config_path() -> Result<PathBuf> {
    // Allow environment variable override for testing
    let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
        PathBuf::from(env_dir)
    } else {
        dirs::config_dir()
            .ok_or_else(|| TopoMapError::Other("unable to determine config directory".to_string()))?
            .join(CONFIG_DIR)
    };

    Ok(config_dir.join(CONFIG_FILE))
}
