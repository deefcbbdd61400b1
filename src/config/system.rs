//! Machine configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::axis::AxisConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MachineConfig {
    /// Deadlines for blocking operations.
    #[serde(default)]
    pub machine: MotionSettings,

    /// Named axis configurations.
    pub axes: FnvIndexMap<String<32>, AxisConfig, 8>,
}

/// Deadlines applied by the dispatcher to blocking operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MotionSettings {
    /// Deadline for G0/G1 moves in milliseconds.
    #[serde(default = "default_move_timeout_ms")]
    pub move_timeout_ms: u32,

    /// Deadline for homing each axis in milliseconds.
    #[serde(default = "default_home_timeout_ms")]
    pub home_timeout_ms: u32,
}

fn default_move_timeout_ms() -> u32 {
    60_000
}

fn default_home_timeout_ms() -> u32 {
    30_000
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            move_timeout_ms: default_move_timeout_ms(),
            home_timeout_ms: default_home_timeout_ms(),
        }
    }
}

impl MachineConfig {
    /// Get an axis configuration by key.
    pub fn axis(&self, key: &str) -> Option<&AxisConfig> {
        self.axes
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v)
    }

    /// List all axis keys.
    pub fn axis_keys(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(|s| s.as_str())
    }
}
