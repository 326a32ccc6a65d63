//! One-shot hardware peripheral initialization.
//!
//! Configures the command UART and the LEDC timer/channel driving the
//! actuator using raw ESP-IDF sys calls. Called once from `main()` before
//! the poll loop starts. Clock trees and pin muxing beyond this are left
//! to the IDF defaults.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::{info, warn};

use crate::config::ControlConfig;
use crate::error::{ActuatorError, Result};
#[cfg(target_os = "espidf")]
use crate::error::{CommsError, Error};
#[cfg(target_os = "espidf")]
use crate::pins;

/// LEDC channel wired to [`pins::PWM_OUT_GPIO`](crate::pins::PWM_OUT_GPIO).
pub const LEDC_CH_OUT: u32 = 0;

/// UART driver RX ring buffer. Must exceed the 128-byte hardware FIFO.
#[cfg(target_os = "espidf")]
const UART_RX_BUF_SIZE: i32 = 256;

#[cfg(target_os = "espidf")]
pub fn init_peripherals(config: &ControlConfig) -> Result<()> {
    // SAFETY: Called once from main() before the reader task exists;
    // single-threaded.
    unsafe {
        init_uart(config)?;
        init_ledc(config)?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals(config: &ControlConfig) -> Result<()> {
    log::info!(
        "hw_init(sim): peripheral init skipped ({} baud, {} Hz)",
        config.baud_rate,
        config.pwm_freq_hz
    );
    Ok(())
}

// ── UART ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_uart(config: &ControlConfig) -> Result<()> {
    let uart_cfg = uart_config_t {
        baud_rate: config.baud_rate as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };

    let ret = unsafe { uart_param_config(pins::UART_PORT, &uart_cfg) };
    if ret != ESP_OK as i32 {
        warn!("hw_init: uart_param_config rc={}", ret);
        return Err(CommsError::UartInitFailed.into());
    }

    // -1 = UART_PIN_NO_CHANGE for RTS/CTS; there is no flow control.
    let ret = unsafe {
        uart_set_pin(pins::UART_PORT, pins::UART_TX_GPIO, pins::UART_RX_GPIO, -1, -1)
    };
    if ret != ESP_OK as i32 {
        warn!("hw_init: uart_set_pin rc={}", ret);
        return Err(CommsError::UartInitFailed.into());
    }

    let ret = unsafe {
        uart_driver_install(
            pins::UART_PORT,
            UART_RX_BUF_SIZE,
            0,
            0,
            core::ptr::null_mut(),
            0,
        )
    };
    if ret != ESP_OK as i32 {
        warn!("hw_init: uart_driver_install rc={}", ret);
        return Err(CommsError::UartInitFailed.into());
    }

    info!(
        "hw_init: UART{} configured ({} 8N1, rx=GPIO{})",
        pins::UART_PORT,
        config.baud_rate,
        pins::UART_RX_GPIO
    );
    Ok(())
}

// ── LEDC PWM ─────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_ledc(config: &ControlConfig) -> Result<()> {
    // Timer 0: actuator output, 7-bit = 128 counts per period.
    let timer0 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_7_BIT,
        freq_hz: config.pwm_freq_hz,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer0) };
    if ret != ESP_OK as i32 {
        warn!("hw_init: ledc_timer_config rc={}", ret);
        return Err(Error::Init("LEDC timer config failed"));
    }

    // The output comes up at the upper operating bound.
    let ret = unsafe {
        ledc_channel_config(&ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel: LEDC_CH_OUT,
            timer_sel: ledc_timer_t_LEDC_TIMER_0,
            gpio_num: pins::PWM_OUT_GPIO,
            duty: u32::from(config.max_rate()),
            hpoint: 0,
            ..Default::default()
        })
    };
    if ret != ESP_OK as i32 {
        warn!("hw_init: ledc_channel_config rc={}", ret);
        return Err(Error::Init("LEDC channel config failed"));
    }

    info!(
        "hw_init: LEDC configured (out=CH{} GPIO{}, {} Hz, {}-bit)",
        LEDC_CH_OUT,
        pins::PWM_OUT_GPIO,
        config.pwm_freq_hz,
        pins::PWM_RESOLUTION_BITS
    );
    Ok(())
}

/// Latch a new duty into an LEDC channel, effective from the next period.
#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u32) -> core::result::Result<(), ActuatorError> {
    // SAFETY: LEDC channels were configured in init_ledc(); duty register
    // writes are race-free since only the main loop calls this function.
    let ret = unsafe { ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty) };
    if ret != ESP_OK as i32 {
        return Err(ActuatorError::PwmWriteFailed);
    }
    let ret = unsafe { ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel) };
    if ret != ESP_OK as i32 {
        return Err(ActuatorError::PwmWriteFailed);
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, _duty: u32) -> core::result::Result<(), ActuatorError> {
    Ok(())
}
