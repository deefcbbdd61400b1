//! Interactive G-code console example.
//!
//! Reads G-code from stdin and executes it on a simulated gantry, printing
//! the same acknowledgments a serial controller would send.
//!
//! ```text
//! cargo run --example gcode_console
//! G28
//! G1 X100 Y-50.5 F200
//! ```
//!
//! Pass a TOML file path as the first argument to configure the axes.

use std::io::{self, Read, Write};

use gantry_motion::axis::{AxisController, SimulatedPins, StdClock};
use gantry_motion::config::{load_config, MotionSettings};
use gantry_motion::error::{Error, ParseError};
use gantry_motion::machine::Machine;
use gantry_motion::protocol::{write_error, LineAssembler, LineEvent};

/// Simulated travel of each axis in steps, switches at both ends.
const TRAVEL: i64 = 20_000;

fn simulated_axis() -> SimulatedPins {
    SimulatedPins::with_travel(TRAVEL / 2, Some(0), Some(TRAVEL))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut machine = match std::env::args().nth(1) {
        Some(path) => {
            let config = load_config(&path)?;
            Machine::from_config(&config, simulated_axis(), simulated_axis())?
        }
        None => Machine::new(
            AxisController::new(simulated_axis()),
            AxisController::new(simulated_axis()),
            MotionSettings::default(),
        ),
    };
    machine.initialize()?;

    let mut clock = StdClock::new();
    let mut assembler = LineAssembler::new();
    let mut reply = String::new();
    let stdout = io::stdout();

    println!("Gantry ready");
    for byte in io::stdin().lock().bytes() {
        reply.clear();
        match assembler.push(byte?) {
            Some(LineEvent::Line(line)) => {
                println!(">> {}", line);
                machine.handle_line(line, &mut clock, &mut reply)?;
            }
            Some(LineEvent::TooLong) => {
                write_error(&mut reply, &Error::from(ParseError::LineTooLong))?;
            }
            None => continue,
        }
        let mut out = stdout.lock();
        out.write_all(reply.as_bytes())?;
        out.flush()?;
    }

    machine.teardown()?;
    Ok(())
}
