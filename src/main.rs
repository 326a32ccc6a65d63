//! Control-signal firmware — main entry point.
//!
//! ```text
//! ┌───────────────┐  byte  ┌─────────┐  take  ┌──────────────────┐ duty ┌──────────┐
//! │ uart-rx task  │───────▶│ MAILBOX │───────▶│ CommandProcessor │─────▶│ LEDC CH0 │
//! │ (core 1)      │ drop   │ 1 slot  │        │ (poll loop)      │      │ GPIO out │
//! └───────────────┘ if full└─────────┘        └──────────────────┘      └──────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use log::info;

use control_signal::adapters::log_sink::LogEventSink;
use control_signal::adapters::pwm::HalPwmAdapter;
use control_signal::app::processor::CommandProcessor;
use control_signal::config::ControlConfig;
use control_signal::drivers::hw_init;
use control_signal::drivers::ledc::LedcChannel;
use control_signal::drivers::uart_rx;
use control_signal::drivers::watchdog::Watchdog;
use control_signal::mailbox::Mailbox;

/// Shared between the reader task and the poll loop.
static MAILBOX: Mailbox = Mailbox::new();

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("control-signal v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = ControlConfig::default();
    config.validate()?;

    // ── 3. Hardware bring-up ──────────────────────────────────
    hw_init::init_peripherals(&config)?;
    let watchdog = Watchdog::new(&config)?;

    // ── 4. Command processor ──────────────────────────────────
    let mut pwm = HalPwmAdapter::new(LedcChannel::new(hw_init::LEDC_CH_OUT));
    let mut sink = LogEventSink::new();
    let mut processor = CommandProcessor::new(&MAILBOX, &config);
    processor.start(&mut pwm, &mut sink);

    // ── 5. Receive task ───────────────────────────────────────
    let poll = Duration::from_millis(u64::from(config.poll_interval_ms));
    uart_rx::start_reader(MAILBOX.receiver(), poll)?;

    info!(
        "System ready. Entering poll loop (watchdog {}ms).",
        watchdog.timeout_ms()
    );

    // ── 6. Poll loop ──────────────────────────────────────────
    loop {
        processor.drain(&mut pwm, &mut sink);
        watchdog.feed();
        std::thread::sleep(poll);
    }
}
