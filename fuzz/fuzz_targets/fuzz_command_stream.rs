//! Fuzz target: receiver → mailbox → `CommandProcessor::tick`
//!
//! The first input byte picks how often the poll loop drains (so some bytes
//! hit a full mailbox); the rest is the wire stream. Asserts the duty never
//! leaves the operating window and the digit buffer never exceeds two.
//!
//! cargo fuzz run fuzz_command_stream

#![no_main]

use control_signal::app::ports::{NullSink, PwmPort};
use control_signal::app::processor::CommandProcessor;
use control_signal::config::ControlConfig;
use control_signal::mailbox::Mailbox;
use libfuzzer_sys::fuzz_target;

struct BoundsCheckedPwm;

impl PwmPort for BoundsCheckedPwm {
    fn write_duty(&mut self, count: u16) {
        assert!((5..=120).contains(&count), "duty {count} outside window");
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&pace, stream)) = data.split_first() else {
        return;
    };
    let pace = usize::from(pace % 4) + 1;

    let mailbox = Mailbox::new();
    let mut processor = CommandProcessor::new(&mailbox, &ControlConfig::default());
    let mut pwm = BoundsCheckedPwm;

    for (i, &b) in stream.iter().enumerate() {
        mailbox.receiver().on_byte_received(b);
        if i % pace == 0 {
            processor.tick(&mut pwm, &mut NullSink);
        }
        assert!(processor.command().len() <= 2);
    }
    processor.drain(&mut pwm, &mut NullSink);
    assert!(!mailbox.is_ready());
});
