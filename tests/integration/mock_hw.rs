//! Mock hardware adapters for integration tests.
//!
//! Records every duty write and every emitted event so tests can assert
//! on the full history without touching real LEDC registers.

use control_signal::app::events::ControlEvent;
use control_signal::app::ports::{EventSink, PwmPort};
use control_signal::app::processor::{CommandProcessor, TickOutcome};
use control_signal::drivers::uart_rx::ByteSource;
use control_signal::mailbox::Mailbox;

// ── MockPwm ───────────────────────────────────────────────────

#[derive(Default)]
pub struct MockPwm {
    pub writes: Vec<u16>,
}

#[allow(dead_code)]
impl MockPwm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<u16> {
        self.writes.last().copied()
    }
}

impl PwmPort for MockPwm {
    fn write_duty(&mut self, count: u16) {
        self.writes.push(count);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<ControlEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &ControlEvent) {
        self.events.push(*event);
    }
}

// ── MockUart ──────────────────────────────────────────────────

/// UART driver ring buffer already holding a burst of received bytes.
pub struct MockUart {
    pending: std::collections::VecDeque<u8>,
}

impl MockUart {
    pub fn burst(bytes: &[u8]) -> Self {
        Self {
            pending: bytes.iter().copied().collect(),
        }
    }
}

impl ByteSource for MockUart {
    fn read(&mut self, byte: &mut u8) -> i32 {
        match self.pending.pop_front() {
            Some(b) => {
                *byte = b;
                1
            }
            None => 0,
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────

/// Deliver each byte and tick once per byte, the way the poll loop keeps
/// up with a well-paced sender.
pub fn send(
    mailbox: &Mailbox,
    processor: &mut CommandProcessor<'_>,
    pwm: &mut MockPwm,
    sink: &mut RecordingSink,
    input: &[u8],
) -> Vec<TickOutcome> {
    let rx = mailbox.receiver();
    input
        .iter()
        .map(|&b| {
            assert!(rx.on_byte_received(b), "mailbox should be free");
            processor.tick(pwm, sink)
        })
        .collect()
}
