//! PWM adapter — bridges an `embedded-hal` duty channel to [`PwmPort`].
//!
//! On target the channel is an LEDC [`LedcChannel`](crate::drivers::ledc::LedcChannel);
//! tests plug in any other [`SetDutyCycle`] implementation.

use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::ports::PwmPort;

pub struct HalPwmAdapter<P> {
    channel: P,
}

impl<P: SetDutyCycle> HalPwmAdapter<P> {
    pub fn new(channel: P) -> Self {
        Self { channel }
    }

    pub fn into_inner(self) -> P {
        self.channel
    }
}

impl<P: SetDutyCycle> PwmPort for HalPwmAdapter<P> {
    fn write_duty(&mut self, count: u16) {
        // The duty register has no error path upstream; a rejected write
        // leaves the previous duty on the pin.
        if let Err(e) = self.channel.set_duty_cycle(count) {
            warn!("PWM duty write {} failed: {:?}", count, e);
        }
    }
}
