//! Axis module for gantry-motion.
//!
//! Provides the non-blocking stepper axis controller, its hardware
//! capability trait and the simulated backend used by tests and demos.

mod builder;
mod clock;
mod controller;
mod pins;
mod sim;
pub mod state;

pub use builder::AxisControllerBuilder;
pub use clock::{Clock, SimClock};
pub use controller::{AxisController, DEFAULT_MOVE_SPEED, DEFAULT_STEP_PULSE_US};
pub use pins::{AxisPins, GpioPins, NoPin, PinError, PinPolarity};
pub use sim::SimulatedPins;
pub use state::{Direction, MotionMode, Tick};

#[cfg(feature = "std")]
pub use clock::StdClock;

pub(crate) use clock::elapsed_ms;
