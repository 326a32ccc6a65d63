//! Port traits — the hexagonal boundary between the command processor and
//! the outside world.
//!
//! ```text
//!   Mailbox ──▶ CommandProcessor ──▶ PwmPort
//!                     │
//!                     └──▶ EventSink
//! ```
//!
//! Driven adapters implement these traits. The processor consumes them via
//! generics, so the domain core never touches hardware directly.

use super::events::ControlEvent;

// ───────────────────────────────────────────────────────────────
// PWM port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the duty register.
pub trait PwmPort {
    /// Drive the output at `count` timer counts, effective from the next
    /// PWM cycle. The processor only ever passes values inside its
    /// operating window.
    fn write_duty(&mut self, count: u16);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

pub trait EventSink {
    fn emit(&mut self, event: &ControlEvent);
}

/// Sink that drops every event.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &ControlEvent) {}
}
