//! Task watchdog guarding the command poll loop.
//!
//! The poll loop is the only task subscribed. It feeds the TWDT once per
//! drain, so the device resets if command processing stalls for
//! `watchdog_timeout_ms`. The UART reader blocks in the driver between
//! bytes and is deliberately left unsubscribed.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::config::ControlConfig;
use crate::error::{Error, Result};

pub struct Watchdog {
    timeout_ms: u32,
}

impl Watchdog {
    /// Arm the TWDT for the calling task with the configured timeout.
    ///
    /// The timeout must cover many poll intervals, otherwise a normal
    /// sleep between drains would trip it.
    pub fn new(config: &ControlConfig) -> Result<Self> {
        let timeout_ms = config.watchdog_timeout_ms;
        if timeout_ms <= config.poll_interval_ms.saturating_mul(2) {
            return Err(Error::Config(
                "watchdog_timeout_ms must exceed two poll intervals",
            ));
        }

        #[cfg(target_os = "espidf")]
        // SAFETY: called once from main() during bring-up, before the poll
        // loop starts feeding.
        unsafe {
            let cfg = esp_task_wdt_config_t {
                timeout_ms,
                idle_core_mask: 0,
                trigger_panic: true,
            };
            let ret = esp_task_wdt_reconfigure(&cfg);
            if ret != ESP_OK as i32 {
                log::warn!("TWDT reconfigure rc={} (may already be configured)", ret);
            }

            let ret = esp_task_wdt_add(core::ptr::null_mut());
            if ret != ESP_OK as i32 {
                log::warn!("TWDT subscribe rc={}", ret);
                return Err(Error::Init("TWDT subscribe failed"));
            }
        }

        log::info!(
            "Watchdog armed for poll loop: {}ms (poll every {}ms)",
            timeout_ms,
            config.poll_interval_ms
        );
        Ok(Self { timeout_ms })
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        // SAFETY: the calling task was subscribed in new().
        unsafe {
            esp_task_wdt_reset();
        }
    }
}
