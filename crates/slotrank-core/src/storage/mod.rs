pub mod config;
pub mod presets;

pub use config::Config;
pub use presets::PresetStore;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/slotrank[-dev]/` based on SLOTRANK_ENV.
///
/// Set SLOTRANK_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SLOTRANK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("slotrank-dev")
    } else {
        base_dir.join("slotrank")
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
