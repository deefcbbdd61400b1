//! # gantry-motion
//!
//! Non-blocking stepper axis control and a G-code subset interpreter for a
//! two-axis gantry, with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Non-blocking axes**: `update(now)` emits at most one step per call
//! - **Limit-switch gating**: steps toward an asserted switch are refused
//! - **Bounded blocking moves**: move, home and go-to-max with deadlines
//! - **G-code interpreter**: `G0`, `G1`, `G28`, `M3` with typed errors
//! - **embedded-hal 1.0**: `OutputPin` for STEP/DIR/ENABLE, `InputPin` for
//!   switches, `DelayNs` for the pulse width
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gantry_motion::{load_config, Machine, StdClock};
//! use gantry_motion::axis::GpioPins;
//!
//! let config = load_config("gantry.toml")?;
//! let x = GpioPins::new(step_x, dir_x, en_x, min_x, max_x, delay_x);
//! let y = GpioPins::new(step_y, dir_y, en_y, min_y, max_y, delay_y);
//!
//! let mut machine = Machine::from_config(&config, x, y)?;
//! machine.initialize()?;
//!
//! let mut clock = StdClock::new();
//! machine.handle_line("G28", &mut clock, &mut serial)?;
//! machine.handle_line("G1 X100 Y-50.5 F200", &mut clock, &mut serial)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and [`StdClock`]
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
mod fmt;

// Core modules
pub mod axis;
pub mod config;
pub mod error;
pub mod gcode;
pub mod machine;
pub mod protocol;

// Re-exports for ergonomic API
pub use axis::{AxisController, AxisPins, Clock, GpioPins, SimClock, SimulatedPins, Tick};
pub use config::{validate_config, AxisConfig, MachineConfig, MotionSettings};
pub use error::{Error, Result};
pub use gcode::{parse_line, MotionCommand};
pub use machine::{Machine, Report};

#[cfg(feature = "std")]
pub use axis::StdClock;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Steps, StepsPerSec};
