//! Text console and polled keyboard input for the QuarkOS kernel.
//!
//! Hardware is reached through [`port::PortIo`], so every controller can also
//! be driven by the fakes in the unit tests.

#![cfg_attr(not(test), no_std)]

pub mod constants;
pub mod input;
pub mod keyboard;
pub mod logger;
pub mod port;
pub mod power;
pub mod serial;
pub mod vga_buffer;

#[cfg(test)]
mod testing;
