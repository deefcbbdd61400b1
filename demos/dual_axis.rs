//! Dual-axis non-blocking loop example.
//!
//! Demonstrates driving two axes from one loop by interleaving `update`
//! calls, homing against a limit switch, and a manual velocity run that
//! ends on the max switch.
//!
//! This example uses simulated pins and a simulated clock, no hardware needed.

use gantry_motion::axis::{AxisController, Clock, SimClock, SimulatedPins, Tick};
use gantry_motion::{Steps, StepsPerSec};

fn main() {
    println!("=== Dual Axis Example ===\n");

    // Carriages somewhere along 0..=400 steps of travel
    let mut x = AxisController::builder()
        .name("X")
        .pins(SimulatedPins::with_travel(120, Some(0), Some(400)))
        .move_speed(StepsPerSec(2000.0))
        .build()
        .expect("Failed to build X axis");
    let mut y = AxisController::builder()
        .name("Y")
        .pins(SimulatedPins::with_travel(35, Some(0), Some(400)))
        .move_speed(StepsPerSec(1000.0))
        .build()
        .expect("Failed to build Y axis");

    let mut clock = SimClock::new(50);

    for axis in [&mut x, &mut y] {
        axis.initialize().expect("Failed to initialize");
        axis.set_enabled(true).expect("Failed to enable");
    }

    // Homing is blocking, one axis after the other
    x.home_blocking(5_000, &mut clock).expect("X homing failed");
    y.home_blocking(5_000, &mut clock).expect("Y homing failed");
    println!("Homed at t = {} us", clock.now());

    // Non-blocking moves: both axes advance in the same loop
    x.move_to(Steps(300));
    y.move_to(Steps(150));
    let start = clock.now();
    let mut steps = (0u32, 0u32);
    while x.is_auto_move() || y.is_auto_move() {
        let now = clock.now_us();
        if x.update(now).expect("X update failed").stepped() {
            steps.0 += 1;
        }
        if y.update(now).expect("Y update failed").stepped() {
            steps.1 += 1;
        }
        clock.idle();
    }
    println!(
        "Moved to X{} Y{} in {} us ({} + {} steps)",
        x.position().0,
        y.position().0,
        clock.now() - start,
        steps.0,
        steps.1
    );

    // Manual velocity until the max switch refuses further steps
    y.set_velocity(StepsPerSec(4000.0));
    loop {
        let now = clock.now_us();
        match y.update(now).expect("Y update failed") {
            Tick::Blocked => break,
            _ => clock.idle(),
        }
    }
    println!(
        "Y stopped at the max switch: position {}, mode {}",
        y.position().0,
        y.mode().name()
    );

    for axis in [&mut x, &mut y] {
        axis.teardown().expect("Failed to tear down");
    }
    println!("\n=== Example Complete ===");
}
