#![cfg_attr(not(test), no_std)]

// must go first, so the logging macros are visible in the other modules
mod fmt;

pub mod color;
pub mod config;
pub mod leds;
pub mod midi;
pub mod mixer;
pub mod pads;
pub mod touch;

#[cfg(feature = "rp2040")]
pub mod board;
#[cfg(feature = "rp2040")]
pub mod hardware;
#[cfg(feature = "rp2040")]
pub mod pwm_audio;
#[cfg(feature = "rp2040")]
pub mod serial_midi;
#[cfg(feature = "rp2040")]
pub mod touch_sensors;
#[cfg(feature = "rp2040")]
pub mod ws2812b;
