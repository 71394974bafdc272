pub mod backend;
mod config;
pub mod database;
pub mod store;

pub use backend::{KvBackend, MemoryBackend};
pub use config::{Config, EstimateConfig, WorkloadConfig};
pub use database::SqliteBackend;
pub use store::{EntityStore, KEY_GROUPS, KEY_ITEMS};

use std::path::PathBuf;

/// Returns `~/.config/daymap[-dev]/` based on DAYMAP_ENV.
///
/// Set DAYMAP_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DAYMAP_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("daymap-dev")
    } else {
        base_dir.join("daymap")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
