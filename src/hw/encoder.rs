// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Wheel encoders on STM32F7 timers in quadrature encoder mode.
//!
//! TIM3 and TIM4 count the left and right wheels over their full 16-bit range. The counters wrap
//! freely; [`crate::control::Odometry`] takes wrapping deltas.

use stm32f7xx_hal::pac;

use crate::interface::{EncoderCounts, WheelEncoders};

/// A 16-bit timer configured as a quadrature counter.
pub struct Encoder<TIM> {
    tim: TIM,
}

impl<TIM> Encoder<TIM> {
    /// Consume the wrapper and return the underlying timer peripheral.
    #[inline]
    pub fn free(self) -> TIM {
        self.tim
    }
}

macro_rules! quadrature_16bit {
    ($TIM:ty, $ctor:ident) => {
        impl Encoder<$TIM> {
            /// Configure the timer as a quadrature encoder. Its RCC clock must already be enabled.
            pub fn $ctor(tim: $TIM) -> Self {
                // Disable counter while configuring
                tim.cr1.modify(|_, w| w.cen().clear_bit());

                // Full 16-bit range so the count wraps like a plain i16
                tim.arr.write(|w| unsafe { w.bits(0xFFFF) });

                // Slave mode: encoder mode 3 (count on both TI1 and TI2)
                tim.smcr.modify(|_, w| w.sms().bits(0b011));

                // CH1/CH2 as inputs from TI1/TI2
                tim.ccmr1_input().modify(|_, w| w.cc1s().ti1().cc2s().ti2());

                tim.ccer.modify(|_, w| {
                    w.cc1p()
                        .clear_bit()
                        .cc2p()
                        .clear_bit()
                        .cc1e()
                        .set_bit()
                        .cc2e()
                        .set_bit()
                });

                tim.cnt.write(|w| unsafe { w.bits(0) });
                tim.cr1.modify(|_, w| w.cen().set_bit());

                Self { tim }
            }

            /// Signed count; wraps at ±32768.
            #[inline]
            pub fn count(&self) -> i16 {
                self.tim.cnt.read().cnt().bits() as i16
            }
        }
    };
}

quadrature_16bit!(pac::TIM3, tim3);
quadrature_16bit!(pac::TIM4, tim4);

/// Left wheel on TIM3, right wheel on TIM4.
pub struct WheelEncoderPair {
    left: Encoder<pac::TIM3>,
    right: Encoder<pac::TIM4>,
    /// Set when a wheel's A/B channels are wired so that forward counts down.
    invert_left: bool,
    invert_right: bool,
}

impl WheelEncoderPair {
    pub fn new(left: Encoder<pac::TIM3>, right: Encoder<pac::TIM4>) -> Self {
        Self {
            left,
            right,
            invert_left: false,
            invert_right: false,
        }
    }

    /// Flip the counting direction of either wheel.
    pub fn with_inversion(mut self, left: bool, right: bool) -> Self {
        self.invert_left = left;
        self.invert_right = right;
        self
    }

    pub fn free(self) -> (Encoder<pac::TIM3>, Encoder<pac::TIM4>) {
        (self.left, self.right)
    }
}

impl WheelEncoders for WheelEncoderPair {
    fn counts(&mut self) -> EncoderCounts {
        let left = self.left.count();
        let right = self.right.count();
        EncoderCounts {
            left: if self.invert_left { left.wrapping_neg() } else { left },
            right: if self.invert_right { right.wrapping_neg() } else { right },
        }
    }
}
