//! User configuration, read from `config.json` in the data directory.
//!
//! Every field has a default, so a partial or missing file is fine:
//!
//! ```json
//! { "tick_interval_ms": 500, "sort_policy": "active_first" }
//! ```

use crate::core::constants::{
    CONFIG_FILE_NAME, DEFAULT_MAP_SIZE_PX, DEFAULT_MARKER_SIZE_PX, DEFAULT_TICK_INTERVAL_MS,
    MAX_TICK_INTERVAL_MS,
};
use crate::ordering::SortPolicy;
use crate::utils::persistence::load_json_or_default;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// How often countdowns are recomputed
    pub tick_interval_ms: u64,
    pub sort_policy: SortPolicy,
    pub marker_width_px: f64,
    pub marker_height_px: f64,
    /// Map canvas size used by the terminal map viewer
    pub map_width_px: f64,
    pub map_height_px: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            sort_policy: SortPolicy::default(),
            marker_width_px: DEFAULT_MARKER_SIZE_PX,
            marker_height_px: DEFAULT_MARKER_SIZE_PX,
            map_width_px: DEFAULT_MAP_SIZE_PX,
            map_height_px: DEFAULT_MAP_SIZE_PX,
        }
    }
}

impl TrackerConfig {
    /// Loads `config.json` from `dir`, falling back to defaults.
    pub fn load(dir: &Path) -> Self {
        load_json_or_default(dir, CONFIG_FILE_NAME)
    }

    /// Tick cadence, kept within 1ms..=1s so the display never lags a second.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.clamp(1, MAX_TICK_INTERVAL_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        assert_eq!(config.sort_policy, SortPolicy::RemainingTime);
        assert_eq!(config.marker_width_px, 24.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: TrackerConfig =
            serde_json::from_str(r#"{"sort_policy": "active_first"}"#).unwrap();
        assert_eq!(config.sort_policy, SortPolicy::ActiveFirst);
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.map_height_px, 512.0);
    }

    #[test]
    fn test_tick_interval_is_clamped() {
        let slow = TrackerConfig {
            tick_interval_ms: 5000,
            ..TrackerConfig::default()
        };
        assert_eq!(slow.tick_interval(), Duration::from_secs(1));

        let zero = TrackerConfig {
            tick_interval_ms: 0,
            ..TrackerConfig::default()
        };
        assert_eq!(zero.tick_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_load_missing_dir_uses_defaults() {
        let dir = std::env::temp_dir().join(format!("bosswatch-config-none-{}", std::process::id()));
        assert_eq!(TrackerConfig::load(&dir), TrackerConfig::default());
    }
}
