//! Outbound controller events.
//!
//! The [`CommandProcessor`](super::processor::CommandProcessor) emits these
//! through the [`EventSink`](super::ports::EventSink) port. They are
//! diagnostics only: nothing upstream of the processor ever sees them.

use super::command::DiscardReason;

/// Structured events emitted by the command processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// The processor has started and driven the initial duty.
    Started { duty: u16 },

    /// A terminated command was mapped and written to the output.
    DutyApplied {
        percent: u8,
        /// Count before clamping to the operating window.
        requested: u16,
        duty: u16,
    },

    /// The in-progress command was thrown away.
    CommandDiscarded(DiscardReason),

    /// A terminator arrived with no digits; nothing was written.
    EmptyTerminator,
}
