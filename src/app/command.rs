//! In-progress serial command.
//!
//! Holds at most [`MAX_DIGITS`] validated ASCII digits. Any byte that
//! cannot extend the command discards it entirely; there is no partial
//! recovery beyond waiting for the next terminator.

use heapless::Vec;

/// Capacity of the digit buffer.
pub const MAX_DIGITS: usize = 2;

/// End-of-command marker on the wire.
pub const TERMINATOR: u8 = b'\n';

/// Why an in-progress command was thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// A byte outside `'0'..='9'` that is not the terminator.
    NotADigit(u8),
    /// A digit arrived while the buffer already held [`MAX_DIGITS`].
    Overflow,
}

impl core::fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotADigit(b) => write!(f, "non-digit byte 0x{:02x}", b),
            Self::Overflow => write!(f, "more than {} digits", MAX_DIGITS),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputCommand {
    digits: Vec<u8, MAX_DIGITS>,
}

impl InputCommand {
    pub const fn new() -> Self {
        Self { digits: Vec::new() }
    }

    /// Append one byte. On rejection the command is already reset when
    /// this returns.
    pub fn push(&mut self, byte: u8) -> Result<usize, DiscardReason> {
        if !byte.is_ascii_digit() {
            self.reset();
            return Err(DiscardReason::NotADigit(byte));
        }
        if self.digits.push(byte).is_err() {
            self.reset();
            return Err(DiscardReason::Overflow);
        }
        Ok(self.digits.len())
    }

    /// Base-10 value of the accumulated digits, `None` when empty.
    pub fn percent(&self) -> Option<u8> {
        if self.digits.is_empty() {
            return None;
        }
        Some(
            self.digits
                .iter()
                .fold(0u8, |acc, d| acc * 10 + (d - b'0')),
        )
    }

    pub fn reset(&mut self) {
        self.digits.clear();
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }
}
