//! Control-signal firmware library.
//!
//! Receives an ASCII percentage over UART and drives a PWM output at the
//! proportional duty. Exposes the pure-logic modules for integration
//! testing; all ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod mailbox;
pub mod pins;

pub mod adapters;
pub mod drivers;
