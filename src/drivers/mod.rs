//! Peripheral drivers and one-shot hardware bring-up.

pub mod hw_init;
pub mod ledc;
pub mod uart_rx;
pub mod watchdog;
