// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Free-running millisecond clock on TIM2.
//!
//! The prescaler divides the timer clock down to 1 kHz and the counter is read back as 16 bits,
//! matching the wrap width the controller's elapsed-time arithmetic expects.

use stm32f7xx_hal::pac;

use crate::interface::Clock;

pub struct TimerClock {
    tim: pac::TIM2,
}

impl TimerClock {
    /// Start TIM2 counting milliseconds. `timer_clk_hz` is the TIM2 kernel clock; its RCC clock
    /// must already be enabled.
    pub fn tim2(tim: pac::TIM2, timer_clk_hz: u32) -> Self {
        let psc = (timer_clk_hz / 1_000).saturating_sub(1).min(u16::MAX as u32) as u16;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        tim.psc.write(|w| unsafe { w.bits(psc as u32) });
        tim.arr.write(|w| unsafe { w.bits(0xFFFF_FFFF) });

        // Latch the prescaler now instead of at the first overflow
        tim.egr.write(|w| w.ug().set_bit());
        tim.cnt.write(|w| unsafe { w.bits(0) });

        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    /// Consume the wrapper and return the underlying timer peripheral.
    #[inline]
    pub fn free(self) -> pac::TIM2 {
        self.tim
    }
}

impl Clock for TimerClock {
    #[inline]
    fn now_ms(&mut self) -> u16 {
        self.tim.cnt.read().bits() as u16
    }
}
