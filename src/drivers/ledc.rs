//! LEDC duty channel driving the actuator.
//!
//! Implements `embedded_hal::pwm::SetDutyCycle` so the rest of the
//! firmware only sees the HAL trait.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: latches the duty into the LEDC channel via hw_init.
//! On host/test: tracks state in-memory only.

use embedded_hal::pwm::{ErrorType, SetDutyCycle};

use crate::drivers::hw_init;
use crate::error::ActuatorError;
use crate::pins;

pub struct LedcChannel {
    channel: u32,
    hw_duty: u16,
}

impl LedcChannel {
    pub fn new(channel: u32) -> Self {
        Self {
            channel,
            hw_duty: 0,
        }
    }

    /// Duty last accepted by the peripheral.
    pub fn current_duty(&self) -> u16 {
        self.hw_duty
    }
}

impl ErrorType for LedcChannel {
    type Error = ActuatorError;
}

impl SetDutyCycle for LedcChannel {
    /// One full LEDC period. At 7-bit resolution the peripheral accepts
    /// duties in `0..=128`, with 128 holding the pin high for the whole
    /// period, and `set_duty_cycle_fully_on` writes exactly this value.
    /// The command pipeline never gets near it: its duties stay inside the
    /// configured operating window.
    fn max_duty_cycle(&self) -> u16 {
        1 << pins::PWM_RESOLUTION_BITS
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if duty > self.max_duty_cycle() {
            return Err(ActuatorError::DutyOutOfRange);
        }
        hw_init::ledc_set(self.channel, u32::from(duty))?;
        self.hw_duty = duty;
        Ok(())
    }
}
