// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Consecutive-tick debounce for state transitions.

/// Fires once a condition has held on more than `dwell` consecutive ticks.
#[derive(Copy, Clone, Debug)]
pub struct Debounce {
    dwell: u8,
    /// Wider than `dwell` so `count > dwell` is reachable for every dwell.
    count: u16,
}

impl Debounce {
    pub fn new(dwell: u8) -> Self {
        Self { dwell, count: 0 }
    }

    /// Feed one tick. Returns `true` when the transition should happen; the counter then restarts.
    pub fn update(&mut self, condition: bool) -> bool {
        if !condition {
            self.count = 0;
            return false;
        }

        self.count = self.count.saturating_add(1);
        if self.count > self.dwell as u16 {
            self.count = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    #[inline]
    pub fn count(&self) -> u16 {
        self.count
    }
}
