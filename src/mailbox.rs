//! Single-slot byte mailbox between the receive context and the main loop.
//!
//! ```text
//! ┌──────────────┐  on_byte_received  ┌───────────┐  take()  ┌────────────────┐
//! │ UART receive │───────────────────▶│  Mailbox  │─────────▶│ CommandProcessor│
//! │ (producer)   │   drop if full     │ (1 slot)  │          │ (main loop)    │
//! └──────────────┘                    └───────────┘          └────────────────┘
//! ```
//!
//! Backed by an `embassy-sync` channel of depth one. Both `try_send` and
//! `try_receive` run inside a critical section, so the producer can never
//! tear the slot while the consumer is reading and clearing it.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Depth of the mailbox. One byte, no buffering beyond it.
const SLOT_DEPTH: usize = 1;

/// The pending-byte slot plus its ready flag (`ready` == slot occupied).
pub struct Mailbox {
    slot: Channel<CriticalSectionRawMutex, u8, SLOT_DEPTH>,
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Mailbox {
    /// Empty, not-ready mailbox. `const` so it can live in a `static`.
    pub const fn new() -> Self {
        Self {
            slot: Channel::new(),
        }
    }

    /// Producer-side handle.
    pub fn receiver(&self) -> ByteReceiver<'_> {
        ByteReceiver { mailbox: self }
    }

    /// Whether a byte is waiting to be consumed.
    pub fn is_ready(&self) -> bool {
        !self.slot.is_empty()
    }

    /// Read and clear the slot in one critical section.
    pub fn take(&self) -> Option<u8> {
        self.slot.try_receive().ok()
    }

    fn offer(&self, byte: u8) -> bool {
        self.slot.try_send(byte).is_ok()
    }
}

/// Handle given to the receive context. Cheap to copy, never blocks.
#[derive(Clone, Copy)]
pub struct ByteReceiver<'a> {
    mailbox: &'a Mailbox,
}

impl ByteReceiver<'_> {
    /// Publish one received byte.
    ///
    /// Returns `false` when the previous byte has not been consumed yet;
    /// the new byte is then dropped. Callers in interrupt context ignore
    /// the result.
    pub fn on_byte_received(&self, byte: u8) -> bool {
        self.mailbox.offer(byte)
    }

    /// Whether the last published byte is still waiting to be consumed.
    pub fn is_pending(&self) -> bool {
        self.mailbox.is_ready()
    }
}
