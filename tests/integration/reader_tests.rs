//! UART reader task against the poll loop, both at their real cadence.
//!
//! The driver hands bytes over in bursts; the reader must pace them into
//! the single-slot mailbox without losing any.

use std::time::Duration;

use super::mock_hw::{MockPwm, MockUart, RecordingSink};

use control_signal::app::events::ControlEvent;
use control_signal::app::processor::CommandProcessor;
use control_signal::config::ControlConfig;
use control_signal::drivers::uart_rx::{reader_step, ReadStatus};
use control_signal::mailbox::Mailbox;

/// Run a reader thread over `burst` while the main thread polls
/// `drain` + `sleep(poll_interval_ms)`. Returns the duty writes and the
/// reader's non-idle statuses.
fn run_burst(burst: &[u8]) -> (MockPwm, RecordingSink, Vec<ReadStatus>) {
    let config = ControlConfig::default();
    let poll = Duration::from_millis(u64::from(config.poll_interval_ms));
    let mailbox = Mailbox::new();
    let mut processor = CommandProcessor::new(&mailbox, &config);
    let mut pwm = MockPwm::new();
    let mut sink = RecordingSink::new();

    let statuses = std::thread::scope(|s| {
        let reader = s.spawn(|| {
            let rx = mailbox.receiver();
            let mut uart = MockUart::burst(burst);
            let mut statuses = Vec::new();
            loop {
                match reader_step(&rx, &mut uart, poll).unwrap() {
                    ReadStatus::Empty => break,
                    status => statuses.push(status),
                }
            }
            statuses
        });

        while !reader.is_finished() {
            processor.drain(&mut pwm, &mut sink);
            std::thread::sleep(poll);
        }
        reader.join().unwrap()
    });
    processor.drain(&mut pwm, &mut sink);

    (pwm, sink, statuses)
}

#[test]
fn back_to_back_burst_is_applied() {
    let (pwm, sink, statuses) = run_burst(b"50\n");

    assert_eq!(pwm.writes, vec![64]);
    assert!(!statuses.contains(&ReadStatus::Dropped));
    assert_eq!(
        statuses.iter().filter(|s| **s == ReadStatus::Delivered).count(),
        3
    );
    assert!(sink.events.contains(&ControlEvent::DutyApplied {
        percent: 50,
        requested: 64,
        duty: 64,
    }));
}

#[test]
fn several_buffered_commands_apply_in_order() {
    let (pwm, _, statuses) = run_burst(b"12\n64\n5\n");

    // 15, 81 and 6 counts; all inside the 5..=120 window.
    assert_eq!(pwm.writes, vec![15, 81, 6]);
    assert!(!statuses.contains(&ReadStatus::Dropped));
}

#[test]
fn reader_holds_instead_of_overwriting_pending_byte() {
    let mailbox = Mailbox::new();
    let rx = mailbox.receiver();
    let mut uart = MockUart::burst(b"7\n");

    assert_eq!(
        reader_step(&rx, &mut uart, Duration::ZERO),
        Ok(ReadStatus::Delivered)
    );
    assert_eq!(
        reader_step(&rx, &mut uart, Duration::ZERO),
        Ok(ReadStatus::Held)
    );
    assert_eq!(mailbox.take(), Some(b'7'));
    assert_eq!(
        reader_step(&rx, &mut uart, Duration::ZERO),
        Ok(ReadStatus::Delivered)
    );
    assert_eq!(mailbox.take(), Some(b'\n'));
}
