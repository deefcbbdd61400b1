//! Configuration module for gantry-motion.
//!
//! Provides types for loading and validating axis and machine configuration
//! from TOML files (with `std` feature) or pre-parsed data.

mod axis;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use axis::AxisConfig;
pub use system::{MachineConfig, MotionSettings};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Steps, StepsPerSec};
