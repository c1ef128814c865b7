//! Debounces a polled switch and classifies what the user does with it:
//! press, release, double-click, short hold and long hold.
//!
//! # Implementation
//!
//! Nothing happens in the background. The debouncer reads the switch and
//! drives the gesture detection forward only when you call `check()`, passing
//! the current time in ticks (usually milliseconds). Call it at least once
//! per debounce window, at best every 1 ms to 10 ms.
//!
//! Every gesture is reported for exactly one `check()`: after the `check()`
//! that accepted a press, `is_pressed()` is true; on the next one it is false
//! again and `was_pressed()` tells that the switch is still held.
//!
//! The timing is set through a [`GestureConfig`], checked once when it is
//! built.
//!
//! # Example
//!
//! ## Switch On A Controller Pin
//!
//! ```rust,ignore
//! use gesture_button::prelude::*;
//! use gesture_button::{DirectSwitch, GestureConfig, GestureDebouncer};
//!
//! // This is up to the implementation details of the embedded_hal you are using.
//! let pin: InputPin = hal_function_which_returns_pull_up_input_pin();
//!
//! let mut button = GestureDebouncer::new(DirectSwitch::active_low(pin), GestureConfig::DEFAULT);
//! loop {
//!     button.check(millis())?;
//!     if button.is_double_clicked() {
//!         // Do something with it
//!     } else if button.is_long_held() {
//!         // Do something else
//!     }
//!     // Also hardware specific
//!     wait(1.ms());
//! }
//! ```
//!
//! ## Switch Behind A Port Expander
//!
//! ```rust,ignore
//! use gesture_button::{ExpanderSwitch, GestureConfig, GestureDebouncer};
//!
//! // Any driver implementing `PortExpander`
//! let mcp = Mcp23017::new(i2c);
//!
//! let mut up = GestureDebouncer::new(ExpanderSwitch::new(&mcp, 0), GestureConfig::DEFAULT);
//! let mut down = GestureDebouncer::new(ExpanderSwitch::new(&mcp, 1), GestureConfig::DEFAULT);
//! up.setup()?;
//! down.setup()?;
//!
//! loop {
//!     let now = millis();
//!     up.check(now)?;
//!     down.check(now)?;
//!     if up.is_pressed() {
//!         // ...
//!     }
//! }
//! ```
//!
//! ## Without Hardware Access
//!
//! [`GestureMachine`] is the IO-free core, fed with the raw state directly:
//!
//! ```rust
//! use gesture_button::{GestureConfig, GestureMachine};
//!
//! let mut machine = GestureMachine::new(GestureConfig::DEFAULT);
//!
//! machine.step(true, 0);
//! assert!(machine.is_pressed());
//!
//! machine.step(false, 50);
//! assert!(machine.is_released());
//!
//! machine.step(true, 200);
//! assert!(machine.is_double_clicked());
//! ```
//!
//! # Logging
//!
//! With the `defmt` feature, the detected transitions are logged at trace
//! level and the public types implement `defmt::Format`.

#![cfg_attr(not(test), no_std)]

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::trace!($($arg)*);
    }};
}

pub mod config;
mod debouncer;
pub mod machine;
pub mod switch;

pub use crate::config::{ConfigError, GestureConfig, MAX_BUTTON_DELAY};
pub use crate::debouncer::GestureDebouncer;
pub use crate::machine::{ClickWindow, Episode, GestureMachine};
pub use crate::switch::{DirectSwitch, ExpanderSwitch, PortExpander, RawSwitch};

/// Clock ticks as supplied by the application, usually milliseconds.
pub type Ticks = u32;

/// Unit struct for active-low switches.
pub struct ActiveLow;

/// Unit struct for active-high switches.
pub struct ActiveHigh;

/// Traits needed to use the switches.
pub mod prelude {
    pub use crate::switch::{PortExpander as _, RawSwitch as _};
    pub use embedded_hal::digital::v2::InputPin as _;
}
