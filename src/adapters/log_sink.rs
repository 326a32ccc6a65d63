//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing controller events to the `log`
//! facade (ESP-IDF logger on target, UART0 / USB-CDC in production).

use log::{debug, info, warn};

use crate::app::events::ControlEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`ControlEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ControlEvent) {
        match event {
            ControlEvent::Started { duty } => {
                info!("START | duty={}", duty);
            }
            ControlEvent::DutyApplied {
                percent,
                requested,
                duty,
            } => {
                if requested == duty {
                    info!("DUTY  | {}% -> {}", percent, duty);
                } else {
                    info!("DUTY  | {}% -> {} (clamped from {})", percent, duty, requested);
                }
            }
            ControlEvent::CommandDiscarded(reason) => {
                warn!("DROP  | command discarded: {}", reason);
            }
            ControlEvent::EmptyTerminator => {
                debug!("DROP  | empty command");
            }
        }
    }
}
