// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Busy-wait delay for setup-time waits (IMU settle, calibration sampling, fault blinking).

use embedded_hal::delay::DelayNs;

/// Cycle-counting delay. Accuracy depends on `sysclk_hz` matching the core clock.
pub struct AsmDelay {
    sysclk_hz: u32,
}

impl AsmDelay {
    pub fn new(sysclk_hz: u32) -> Self {
        Self { sysclk_hz }
    }
}

impl DelayNs for AsmDelay {
    fn delay_ns(&mut self, ns: u32) {
        let cycles = (ns as u64 * self.sysclk_hz as u64 / 1_000_000_000) as u32;
        cortex_m::asm::delay(cycles.max(1));
    }
}
