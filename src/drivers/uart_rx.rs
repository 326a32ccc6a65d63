//! UART receive task — the byte source that feeds the mailbox.
//!
//! The IDF UART driver owns the hardware RX interrupt and buffers what it
//! receives in its ring buffer, often handing bytes over in bursts. A
//! dedicated FreeRTOS task, pinned to the application core, moves them into
//! the mailbox one at a time through
//! [`ByteReceiver::on_byte_received`].
//!
//! The task only pulls a byte out of the driver while the mailbox slot is
//! free. While the slot is occupied the byte stays in the ring buffer and
//! the task backs off for one poll interval, so a burst such as `"50\n"`
//! reaches the processor intact. Bytes are lost only when the ring buffer
//! itself overflows.
//!
//! The TX-ready flag is not consulted before reading; only RX status
//! matters here.

use std::time::Duration;

use crate::error::{CommsError, Result};
use crate::mailbox::ByteReceiver;

#[cfg(target_os = "espidf")]
use crate::pins;

/// FreeRTOS priority of the reader task. Above the main loop so bytes
/// are published as soon as the slot frees up.
pub const READER_PRIORITY: u8 = 10;
pub const READER_STACK_KB: usize = 4;
/// Application core (APP_CPU); core 0 keeps the IDF housekeeping tasks.
const READER_CORE: i32 = 1;

/// Where the reader gets its bytes from.
///
/// `read` follows `uart_read_bytes` for a one-byte buffer: `1` when a byte
/// was stored, `0` on timeout, negative on a driver error.
pub trait ByteSource {
    fn read(&mut self, byte: &mut u8) -> i32;
}

/// What happened to one reader step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// Byte published to the mailbox.
    Delivered,
    /// Mailbox still full; byte discarded.
    Dropped,
    /// Slot occupied; nothing read, the byte stays in the driver buffer.
    Held,
    /// Nothing read.
    Empty,
}

/// Route one driver read result into the mailbox.
pub fn deliver(receiver: &ByteReceiver<'_>, read: i32, byte: u8) -> Result<ReadStatus> {
    match read {
        1 => Ok(if receiver.on_byte_received(byte) {
            ReadStatus::Delivered
        } else {
            ReadStatus::Dropped
        }),
        0 => Ok(ReadStatus::Empty),
        rc => {
            log::debug!("uart_rx: uart_read_bytes rc={}", rc);
            Err(CommsError::UartReadFailed.into())
        }
    }
}

/// Move at most one byte from `source` into the mailbox, reading only when
/// the slot is free.
pub fn pump(receiver: &ByteReceiver<'_>, source: &mut impl ByteSource) -> Result<ReadStatus> {
    if receiver.is_pending() {
        return Ok(ReadStatus::Held);
    }
    let mut byte = 0u8;
    let read = source.read(&mut byte);
    deliver(receiver, read, byte)
}

/// One iteration of the reader task: pump, then back off while the slot
/// is still occupied.
pub fn reader_step(
    receiver: &ByteReceiver<'_>,
    source: &mut impl ByteSource,
    backoff: Duration,
) -> Result<ReadStatus> {
    let status = pump(receiver, source)?;
    if status == ReadStatus::Held {
        std::thread::sleep(backoff);
    }
    Ok(status)
}

/// Installed IDF UART driver on [`pins::UART_PORT`].
#[cfg(target_os = "espidf")]
struct UartSource;

#[cfg(target_os = "espidf")]
impl ByteSource for UartSource {
    fn read(&mut self, byte: &mut u8) -> i32 {
        // SAFETY: the driver was installed by hw_init before the reader task
        // was spawned; `byte` is a valid one-byte buffer for the call.
        unsafe {
            esp_idf_svc::sys::uart_read_bytes(
                pins::UART_PORT,
                core::ptr::from_mut(byte).cast(),
                1,
                esp_idf_svc::hal::delay::BLOCK,
            )
        }
    }
}

/// Spawn the pinned reader task. `backoff` is how long it waits for the
/// main loop to consume a pending byte.
#[cfg(target_os = "espidf")]
pub fn start_reader(receiver: ByteReceiver<'static>, backoff: Duration) -> Result<()> {
    // SAFETY: esp_pthread_set_cfg only affects the next pthread_create on
    // this thread; nothing else spawns between the two calls.
    unsafe {
        let mut cfg = esp_idf_svc::sys::esp_create_default_pthread_config();
        cfg.pin_to_core = READER_CORE;
        cfg.prio = i32::from(READER_PRIORITY);
        cfg.stack_size = (READER_STACK_KB * 1024) as i32;
        cfg.thread_name = c"uart-rx".as_ptr();
        let ret = esp_idf_svc::sys::esp_pthread_set_cfg(&cfg);
        if ret != esp_idf_svc::sys::ESP_OK as i32 {
            log::warn!("uart_rx: esp_pthread_set_cfg rc={}", ret);
            return Err(CommsError::ReaderSpawnFailed.into());
        }
    }

    log::info!(
        "Spawning 'uart-rx' on core {} (pri={}, stack={}KB, backoff={:?})",
        READER_CORE,
        READER_PRIORITY,
        READER_STACK_KB,
        backoff
    );

    std::thread::Builder::new()
        .name("uart-rx".into())
        .spawn(move || reader_loop(&receiver, backoff))
        .map(|_| ())
        .map_err(|_| CommsError::ReaderSpawnFailed.into())
}

#[cfg(target_os = "espidf")]
fn reader_loop(receiver: &ByteReceiver<'_>, backoff: Duration) {
    let mut source = UartSource;
    loop {
        if let Err(e) = reader_step(receiver, &mut source, backoff) {
            log::warn!("uart_rx: {}", e);
        }
    }
}

/// Simulation fallback — there is no UART on the host.
#[cfg(not(target_os = "espidf"))]
pub fn start_reader(_receiver: ByteReceiver<'static>, backoff: Duration) -> Result<()> {
    log::info!(
        "uart_rx(sim): reader not started (core {}, pri={}, stack={}KB, backoff={:?})",
        READER_CORE,
        READER_PRIORITY,
        READER_STACK_KB,
        backoff
    );
    Ok(())
}
