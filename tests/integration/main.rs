//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below exercises the receiver → mailbox → processor → PWM
//! chain against mock adapters. All tests run on the host with no real
//! hardware required.

mod mock_hw;
mod overrun_tests;
mod reader_tests;
