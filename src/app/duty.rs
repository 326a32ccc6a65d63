//! Percentage → PWM count mapping and operating-window clamp.
//!
//! ```text
//!   percent ──▶ floor(percent · full_scale / 100) ──▶ clamp(min, max) ──▶ PwmState
//! ```

/// Operating window of the PWM output, in timer counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DutyLimits {
    full_scale: u16,
    min: u16,
    max: u16,
}

/// Result of mapping a percentage onto the operating window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapped {
    /// Raw count before clamping.
    pub requested: u16,
    /// Count actually written to the output.
    pub duty: u16,
}

impl Mapped {
    pub fn was_clamped(&self) -> bool {
        self.requested != self.duty
    }
}

impl DutyLimits {
    /// `min` and `max` are inclusive. Callers go through
    /// [`ControlConfig::validate`](crate::config::ControlConfig::validate)
    /// which guarantees `min < max < full_scale`.
    pub const fn new(full_scale: u16, min: u16, max: u16) -> Self {
        Self {
            full_scale,
            min,
            max,
        }
    }

    pub const fn min(&self) -> u16 {
        self.min
    }

    pub const fn max(&self) -> u16 {
        self.max
    }

    /// Integer (floor) scaling of a percentage onto the full-scale period.
    pub fn percent_to_counts(&self, percent: u8) -> u16 {
        (u32::from(percent) * u32::from(self.full_scale) / 100) as u16
    }

    pub fn clamp(&self, counts: u16) -> u16 {
        if counts < self.min {
            self.min
        } else if counts > self.max {
            self.max
        } else {
            counts
        }
    }

    pub fn map(&self, percent: u8) -> Mapped {
        let requested = self.percent_to_counts(percent);
        Mapped {
            requested,
            duty: self.clamp(requested),
        }
    }
}

/// The live duty value last written to the output. Always inside the
/// [`DutyLimits`] it was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmState {
    count: u16,
}

impl PwmState {
    /// Start-up value: the output is driven at the upper bound until the
    /// first valid command arrives.
    pub fn new(limits: &DutyLimits) -> Self {
        Self {
            count: limits.max(),
        }
    }

    pub fn count(&self) -> u16 {
        self.count
    }

    pub(crate) fn set(&mut self, limits: &DutyLimits, count: u16) {
        self.count = limits.clamp(count);
    }
}
