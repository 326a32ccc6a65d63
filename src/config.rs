//! System configuration parameters
//!
//! All tunable constants for the serial-to-PWM controller. The defaults
//! reproduce the shipped board: a 125-tick timer top, a 128-count mapping
//! scale and five reserved ticks at each end of the period.

use serde::{Deserialize, Serialize};

use crate::app::duty::DutyLimits;
use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlConfig {
    // --- PWM mapping ---
    /// Timer top value (`FREQ`). The upper operating bound is derived from it.
    pub timer_top: u16,
    /// Counts that represent 100 % when mapping a percentage.
    pub full_scale_counts: u16,
    /// Ticks reserved at each end of the period.
    pub margin_ticks: u16,

    // --- Serial ---
    /// UART baud rate (8N1).
    pub baud_rate: u32,

    // --- Target-only timing ---
    /// PWM carrier frequency in Hz
    pub pwm_freq_hz: u32,
    /// Main-loop yield between mailbox drains (milliseconds)
    pub poll_interval_ms: u32,
    /// Task watchdog timeout (milliseconds)
    pub watchdog_timeout_ms: u32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            timer_top: 125,
            full_scale_counts: 128,
            margin_ticks: 5,

            baud_rate: 9600,

            pwm_freq_hz: 1_000,
            poll_interval_ms: 1,
            watchdog_timeout_ms: 10_000,
        }
    }
}

impl ControlConfig {
    /// Lowest duty count the output is ever driven at (`MINIMUM_RATE`).
    pub const fn min_rate(&self) -> u16 {
        self.margin_ticks
    }

    /// Highest duty count the output is ever driven at (`MAXIMUM_RATE`).
    pub const fn max_rate(&self) -> u16 {
        self.timer_top.saturating_sub(self.margin_ticks)
    }

    pub fn limits(&self) -> DutyLimits {
        DutyLimits::new(self.full_scale_counts, self.min_rate(), self.max_rate())
    }

    /// Reject values that would let the output leave its operating window.
    pub fn validate(&self) -> Result<()> {
        if self.full_scale_counts == 0 {
            return Err(Error::Config("full_scale_counts must be non-zero"));
        }
        if self.min_rate() >= self.max_rate() {
            return Err(Error::Config("margin_ticks leaves no operating window"));
        }
        if self.max_rate() >= self.full_scale_counts {
            return Err(Error::Config("timer_top exceeds the full-scale period"));
        }
        if self.baud_rate == 0 {
            return Err(Error::Config("baud_rate must be non-zero"));
        }
        if self.pwm_freq_hz == 0 {
            return Err(Error::Config("pwm_freq_hz must be non-zero"));
        }
        Ok(())
    }
}
