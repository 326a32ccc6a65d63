//! Application core — pure domain logic, zero I/O.
//!
//! The command parser, the percentage → duty mapping and the processor
//! state machine that ties them together. All interaction with hardware
//! happens through the **port traits** in [`ports`], keeping this layer
//! testable without real peripherals.

pub mod command;
pub mod duty;
pub mod events;
pub mod ports;
pub mod processor;
