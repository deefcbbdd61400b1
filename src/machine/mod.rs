//! Machine module for gantry-motion.
//!
//! Provides the X/Y dispatcher that turns interpreted G-code into axis
//! controller calls.

mod dispatcher;
mod report;

pub use dispatcher::{Machine, X_AXIS_KEY, Y_AXIS_KEY};
pub use report::{Report, StepPoint};
