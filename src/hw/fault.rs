// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Halt-and-signal for unrecoverable setup failures.
//!
//! Without a working IMU the robot cannot sense tilt, so there is nothing safe to fall back to.
//! The host stops the motors and calls [`halt`], which blinks an LED and repeats a message on a
//! debug terminal forever.
//!
//! ```ignore
//! if let Err(e) = balancer.setup(&mut delay) {
//!     balancer.motors_mut().set_speeds(0, 0);
//!     hw::fault::halt(&mut led, &mut usart, &mut delay, "Failed to detect and initialize IMU!");
//! }
//! ```

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::hw::Led;

/// LED half-period and message repeat interval.
pub const SIGNAL_HALF_PERIOD_MS: u32 = 200;

/// Print `message` and blink `led` once per cycle, for `cycles` cycles.
///
/// Write errors are ignored; the LED still blinks.
pub fn signal_fault<PIN, W, D>(
    led: &mut Led<PIN>,
    out: &mut W,
    delay: &mut D,
    message: &str,
    cycles: u32,
) where
    PIN: OutputPin,
    W: Write,
    D: DelayNs,
{
    for _ in 0..cycles {
        // CR for terminals that do not translate LF.
        let _ = write!(out, "{}\r\n", message);
        led.blink(delay, SIGNAL_HALF_PERIOD_MS);
    }
}

/// Signal `message` forever.
pub fn halt<PIN, W, D>(led: &mut Led<PIN>, out: &mut W, delay: &mut D, message: &str) -> !
where
    PIN: OutputPin,
    W: Write,
    D: DelayNs,
{
    #[cfg(feature = "defmt")]
    defmt::error!("Halting: {=str}", message);

    loop {
        signal_fault(led, out, delay, message, 1);
    }
}
