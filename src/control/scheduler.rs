// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Fixed-period tick gate over a wrapping 16-bit millisecond clock.

/// Lets a tick through once at least `period_ms` has elapsed since the last one.
#[derive(Copy, Clone, Debug)]
pub struct TickScheduler {
    period_ms: u16,
    last_ms: u16,
    delayed: bool,
}

impl TickScheduler {
    pub fn new(period_ms: u16) -> Self {
        Self {
            period_ms,
            last_ms: 0,
            delayed: false,
        }
    }

    /// Restart the period from `now_ms`.
    pub fn reset(&mut self, now_ms: u16) {
        self.last_ms = now_ms;
        self.delayed = false;
    }

    /// Returns the elapsed milliseconds if a tick is due, `None` otherwise.
    ///
    /// A tick that arrives more than one millisecond late sets [`is_delayed`](Self::is_delayed).
    pub fn poll(&mut self, now_ms: u16) -> Option<u16> {
        let elapsed = now_ms.wrapping_sub(self.last_ms);
        if elapsed < self.period_ms {
            return None;
        }

        self.delayed = elapsed > self.period_ms.saturating_add(1);
        self.last_ms = now_ms;

        #[cfg(feature = "defmt")]
        if self.delayed {
            defmt::debug!("Balance tick late: {} ms", elapsed);
        }

        Some(elapsed)
    }

    /// Whether the most recent tick was late.
    #[inline]
    pub fn is_delayed(&self) -> bool {
        self.delayed
    }

    #[inline]
    pub fn period_ms(&self) -> u16 {
        self.period_ms
    }
}
