//! Mailbox backpressure: bytes that arrive before the previous one is
//! consumed are lost.

use super::mock_hw::{MockPwm, RecordingSink};

use control_signal::app::processor::{CommandProcessor, TickOutcome};
use control_signal::config::ControlConfig;
use control_signal::mailbox::Mailbox;

#[test]
fn second_byte_is_dropped_first_is_processed() {
    let mailbox = Mailbox::new();
    let mut processor = CommandProcessor::new(&mailbox, &ControlConfig::default());
    let mut pwm = MockPwm::new();
    let mut sink = RecordingSink::new();
    let rx = mailbox.receiver();

    assert!(rx.on_byte_received(b'6'));
    assert!(!rx.on_byte_received(b'0'), "slot still full");

    assert_eq!(processor.tick(&mut pwm, &mut sink), TickOutcome::Accepted(1));
    assert_eq!(processor.tick(&mut pwm, &mut sink), TickOutcome::Idle);

    assert!(rx.on_byte_received(b'\n'));
    processor.tick(&mut pwm, &mut sink);
    // "6\n", not "60\n"
    assert_eq!(pwm.writes, vec![7]);
}

#[test]
fn burst_without_draining_keeps_only_first_byte() {
    let mailbox = Mailbox::new();
    let mut processor = CommandProcessor::new(&mailbox, &ControlConfig::default());
    let mut pwm = MockPwm::new();
    let mut sink = RecordingSink::new();
    let rx = mailbox.receiver();

    let accepted: Vec<bool> = b"50\n".iter().map(|&b| rx.on_byte_received(b)).collect();
    assert_eq!(accepted, vec![true, false, false]);

    assert_eq!(processor.drain(&mut pwm, &mut sink), 1);
    assert_eq!(processor.command().digits(), b"5");
    assert!(pwm.writes.is_empty());
    assert!(sink.events.is_empty(), "overruns are silent");
}

#[test]
fn lost_terminator_merges_commands() {
    // "1\n" then "2\n" where the first terminator is lost to an overrun:
    // the processor sees "12\n".
    let mailbox = Mailbox::new();
    let mut processor = CommandProcessor::new(&mailbox, &ControlConfig::default());
    let mut pwm = MockPwm::new();
    let mut sink = RecordingSink::new();
    let rx = mailbox.receiver();

    rx.on_byte_received(b'1');
    rx.on_byte_received(b'\n');
    processor.tick(&mut pwm, &mut sink);
    for &b in b"2\n" {
        rx.on_byte_received(b);
        processor.tick(&mut pwm, &mut sink);
    }
    // 12 * 128 / 100 = 15
    assert_eq!(pwm.writes, vec![15]);
}

#[test]
fn producer_thread_and_poll_loop_never_tear_a_byte() {
    use std::sync::atomic::{AtomicBool, Ordering};

    static MAILBOX: Mailbox = Mailbox::new();
    static DONE: AtomicBool = AtomicBool::new(false);

    let producer = std::thread::spawn(|| {
        let rx = MAILBOX.receiver();
        let mut delivered = Vec::new();
        for round in 0..2_000u32 {
            let byte = b'0' + (round % 10) as u8;
            if rx.on_byte_received(byte) {
                delivered.push(byte);
            }
            std::thread::yield_now();
        }
        DONE.store(true, Ordering::Release);
        delivered
    });

    let mut seen = Vec::new();
    loop {
        if let Some(b) = MAILBOX.take() {
            seen.push(b);
        } else if DONE.load(Ordering::Acquire) {
            if let Some(b) = MAILBOX.take() {
                seen.push(b);
            }
            break;
        }
    }

    let delivered = producer.join().unwrap();
    assert_eq!(seen, delivered, "every accepted byte is consumed exactly once, in order");
}
