//! GPIO / peripheral pin assignments for the controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// PWM output (LEDC)
// ---------------------------------------------------------------------------

/// Actuator drive signal.
pub const PWM_OUT_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// UART command link
// ---------------------------------------------------------------------------

/// UART peripheral carrying the percentage commands.
pub const UART_PORT: i32 = 1;
pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits). 7-bit gives the 128-count period the
/// duty mapping is scaled to.
pub const PWM_RESOLUTION_BITS: u32 = 7;
