//! Command processor — the parsing and duty-mapping state machine.
//!
//! ```text
//!          digit            digit
//!  Empty ────────▶ Acc(1) ────────▶ Acc(2)
//!    ▲               │                │
//!    │      '\n'     │       '\n'     │
//!    ├───────────────┴────────────────┘  (map · clamp · write)
//!    │
//!    └── any invalid byte, from any state
//! ```
//!
//! [`CommandProcessor::tick`] consumes at most one byte from the
//! [`Mailbox`] per call. It is O(1) and never blocks. A partial command
//! with no terminator is kept indefinitely: there is no idle timeout.

use log::{debug, info};

use crate::config::ControlConfig;
use crate::mailbox::Mailbox;

use super::command::{DiscardReason, InputCommand, TERMINATOR};
use super::duty::{DutyLimits, PwmState};
use super::events::ControlEvent;
use super::ports::{EventSink, PwmPort};

/// What a single [`tick`](CommandProcessor::tick) did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The mailbox was empty.
    Idle,
    /// A digit was appended; carries the new digit count.
    Accepted(usize),
    /// A terminated command was written to the output.
    Applied { percent: u8, duty: u16 },
    /// Terminator with no digits; nothing written.
    EmptyTerminator,
    /// The in-progress command was thrown away.
    Discarded(DiscardReason),
}

pub struct CommandProcessor<'a> {
    mailbox: &'a Mailbox,
    command: InputCommand,
    limits: DutyLimits,
    pwm: PwmState,
}

impl<'a> CommandProcessor<'a> {
    /// Build the processor around a shared mailbox.
    ///
    /// `config` is expected to have passed
    /// [`ControlConfig::validate`].
    pub fn new(mailbox: &'a Mailbox, config: &ControlConfig) -> Self {
        let limits = config.limits();
        Self {
            mailbox,
            command: InputCommand::new(),
            limits,
            pwm: PwmState::new(&limits),
        }
    }

    /// Drive the start-up duty (the upper operating bound).
    pub fn start(&mut self, pwm: &mut impl PwmPort, sink: &mut impl EventSink) {
        let duty = self.pwm.count();
        pwm.write_duty(duty);
        sink.emit(&ControlEvent::Started { duty });
        info!(
            "CommandProcessor started (duty={}, window={}..={})",
            duty,
            self.limits.min(),
            self.limits.max()
        );
    }

    /// Consume one pending byte, if any, and advance the state machine.
    pub fn tick(&mut self, pwm: &mut impl PwmPort, sink: &mut impl EventSink) -> TickOutcome {
        // Clearing the slot first makes the byte ours; the receive context
        // can already publish the next one.
        let Some(byte) = self.mailbox.take() else {
            return TickOutcome::Idle;
        };

        if byte == TERMINATOR {
            return self.terminate(pwm, sink);
        }

        match self.command.push(byte) {
            Ok(count) => TickOutcome::Accepted(count),
            Err(reason) => {
                debug!("command discarded: {}", reason);
                sink.emit(&ControlEvent::CommandDiscarded(reason));
                TickOutcome::Discarded(reason)
            }
        }
    }

    /// Drain the mailbox until it is empty, returning the number of bytes
    /// processed. Bytes that arrive while draining are processed too.
    pub fn drain(&mut self, pwm: &mut impl PwmPort, sink: &mut impl EventSink) -> usize {
        let mut processed = 0;
        while self.tick(pwm, sink) != TickOutcome::Idle {
            processed += 1;
        }
        processed
    }

    fn terminate(&mut self, pwm: &mut impl PwmPort, sink: &mut impl EventSink) -> TickOutcome {
        let Some(percent) = self.command.percent() else {
            sink.emit(&ControlEvent::EmptyTerminator);
            return TickOutcome::EmptyTerminator;
        };

        let mapped = self.limits.map(percent);
        self.pwm.set(&self.limits, mapped.duty);
        pwm.write_duty(self.pwm.count());
        self.command.reset();

        if mapped.was_clamped() {
            debug!(
                "duty {} clamped to {} (percent={})",
                mapped.requested, mapped.duty, percent
            );
        }
        sink.emit(&ControlEvent::DutyApplied {
            percent,
            requested: mapped.requested,
            duty: mapped.duty,
        });

        TickOutcome::Applied {
            percent,
            duty: mapped.duty,
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn is_pending(&self) -> bool {
        self.mailbox.is_ready()
    }

    pub fn command(&self) -> &InputCommand {
        &self.command
    }

    /// Duty count last written to the output.
    pub fn duty(&self) -> u16 {
        self.pwm.count()
    }
}
