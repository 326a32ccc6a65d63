//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements | Connects to                          |
//! |------------|------------|--------------------------------------|
//! | `pwm`      | PwmPort    | any `embedded_hal` `SetDutyCycle`    |
//! | `log_sink` | EventSink  | Serial log output                    |

pub mod log_sink;
pub mod pwm;
