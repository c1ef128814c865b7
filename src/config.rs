//! Timing configuration of the gesture detector.

use core::fmt;

use crate::Ticks;

/// Upper bound (exclusive) for [`GestureConfig::button_delay`].
///
/// A debounce window this long makes the button feel sluggish. Raise it only
/// if the switch genuinely bounces for that long.
pub const MAX_BUTTON_DELAY: Ticks = 100;

/// Reasons a [`GestureConfig`] is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `button_delay` is not below [`MAX_BUTTON_DELAY`].
    ButtonDelayTooLong,
    /// `delay_time` is not below `short_held_delay`.
    DelayTimeNotBelowShortHeld,
    /// `double_click_delay` is not below `short_held_delay`.
    DoubleClickNotBelowShortHeld,
    /// `short_held_delay` is not below `long_held_delay`.
    ShortHeldNotBelowLongHeld,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfigError::ButtonDelayTooLong => "button_delay must be less than MAX_BUTTON_DELAY",
            ConfigError::DelayTimeNotBelowShortHeld => {
                "delay_time must be less than short_held_delay"
            }
            ConfigError::DoubleClickNotBelowShortHeld => {
                "double_click_delay must be less than short_held_delay"
            }
            ConfigError::ShortHeldNotBelowLongHeld => {
                "short_held_delay must be less than long_held_delay"
            }
        })
    }
}

/// Validated timing thresholds, all in [`Ticks`].
///
/// The only way to get one is [`GestureConfig::new`] (or the validated
/// [`GestureConfig::DEFAULT`]), so every instance satisfies
/// `button_delay < 100`, `delay_time < short_held_delay`,
/// `double_click_delay < short_held_delay` and
/// `short_held_delay < long_held_delay`.
///
/// `new` is a `const fn`, which lets a misconfiguration fail the build:
///
/// ```rust
/// use gesture_button::GestureConfig;
///
/// const CONFIG: GestureConfig = match GestureConfig::new(50, 300, 400, 1500, 4000) {
///     Ok(config) => config,
///     Err(_) => panic!("invalid button timing"),
/// };
/// assert_eq!(CONFIG.button_delay(), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureConfig {
    button_delay: Ticks,
    delay_time: Ticks,
    double_click_delay: Ticks,
    short_held_delay: Ticks,
    long_held_delay: Ticks,
}

impl GestureConfig {
    /// 80 / 300 / 500 / 2000 / 5000 ticks, tuned for a millisecond clock.
    pub const DEFAULT: GestureConfig = GestureConfig {
        button_delay: 80,
        delay_time: 300,
        double_click_delay: 500,
        short_held_delay: 2000,
        long_held_delay: 5000,
    };

    /// Validates and builds a configuration.
    pub const fn new(
        button_delay: Ticks,
        delay_time: Ticks,
        double_click_delay: Ticks,
        short_held_delay: Ticks,
        long_held_delay: Ticks,
    ) -> Result<Self, ConfigError> {
        if button_delay >= MAX_BUTTON_DELAY {
            return Err(ConfigError::ButtonDelayTooLong);
        }
        if delay_time >= short_held_delay {
            return Err(ConfigError::DelayTimeNotBelowShortHeld);
        }
        if double_click_delay >= short_held_delay {
            return Err(ConfigError::DoubleClickNotBelowShortHeld);
        }
        if short_held_delay >= long_held_delay {
            return Err(ConfigError::ShortHeldNotBelowLongHeld);
        }

        Ok(GestureConfig {
            button_delay,
            delay_time,
            double_click_delay,
            short_held_delay,
            long_held_delay,
        })
    }

    /// Minimum time since the last raw transition before a new press edge is
    /// accepted.
    pub const fn button_delay(&self) -> Ticks {
        self.button_delay
    }

    /// Reserved. Validated against `short_held_delay` but not used by the
    /// state machine.
    pub const fn delay_time(&self) -> Ticks {
        self.delay_time
    }

    /// Maximum gap between the first and the second press of a double-click.
    pub const fn double_click_delay(&self) -> Ticks {
        self.double_click_delay
    }

    /// Held time after which a short hold is reported.
    pub const fn short_held_delay(&self) -> Ticks {
        self.short_held_delay
    }

    /// Held time after which a long hold is reported.
    pub const fn long_held_delay(&self) -> Ticks {
        self.long_held_delay
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
