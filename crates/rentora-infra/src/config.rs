//! Application configuration loader for Rentora.
//!
//! Reads `config.toml` from the data directory (`~/.rentora/` in production)
//! and deserializes it into [`AppConfig`]. Falls back to sensible defaults
//! when the file is missing or malformed.

use std::path::{Path, PathBuf};

use rentora_types::config::AppConfig;

/// Load application configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`] (built-in
///   step table, file-backed storage).
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_app_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `RENTORA_DATA_DIR` environment variable
/// 2. Home directory (`~/.rentora`)
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("RENTORA_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".rentora");
    }

    // Last resort: current directory
    PathBuf::from(".rentora")
}
