//! Data directory and config file helpers.
//!
//! Everything bosswatch writes lives in `~/.bosswatch/`, or in the directory
//! named by `BOSSWATCH_HOME` when that is set.

use crate::core::constants::{DATA_DIR_ENV, DATA_DIR_NAME};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the data directory path, creating it if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let home_dir = dirs::home_dir().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "Could not determine home directory",
                )
            })?;
            home_dir.join(DATA_DIR_NAME)
        }
    };
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Load a JSON file from `dir`, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(dir: &Path, filename: &str) -> T {
    match fs::read_to_string(dir.join(filename)) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!(file = filename, error = %e, "ignoring malformed JSON file");
            T::default()
        }),
        Err(_) => T::default(),
    }
}
