// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Hardware Glue
//!
//! Board-facing pieces around the controller.
//!
//! - [`led`] and [`fault`] work with any `embedded-hal` pin and delay.
//! - [`encoder`], [`clock`] and [`delay`] (feature `stm32`) implement the controller's collaborator
//!   traits on STM32F7 timers.

pub mod fault;
pub mod led;

#[cfg(feature = "stm32")]
pub mod clock;
#[cfg(feature = "stm32")]
pub mod delay;
#[cfg(feature = "stm32")]
pub mod encoder;

pub use led::{ActiveLevel, Led};

#[cfg(feature = "stm32")]
pub use clock::TimerClock;
#[cfg(feature = "stm32")]
pub use delay::AsmDelay;
#[cfg(feature = "stm32")]
pub use encoder::{Encoder, WheelEncoderPair};
