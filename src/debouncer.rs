use crate::config::GestureConfig;
use crate::machine::{Episode, GestureMachine};
use crate::switch::RawSwitch;
use crate::Ticks;

/// A debounced switch that classifies presses into gestures.
///
/// Call [`check()`](#method.check) regularly, at least once per
/// `button_delay`, and query the gestures it detected afterwards. The queries
/// describe the last `check` only.
pub struct GestureDebouncer<S> {
    switch: S,
    machine: GestureMachine,
}

impl<S: RawSwitch> GestureDebouncer<S> {
    /// Creates a debouncer for `switch`. Nothing is read until the first
    /// [`check()`](#method.check).
    pub fn new(switch: S, config: GestureConfig) -> Self {
        Self {
            switch,
            machine: GestureMachine::new(config),
        }
    }

    /// Runs the switch's one-time hardware setup.
    pub fn setup(&mut self) -> Result<(), S::Error> {
        self.switch.setup()
    }

    /// Reads the switch once and advances the gesture detection.
    ///
    /// `time_now` is a monotonic tick count and must not decrease between
    /// calls. If reading the switch fails the state is left as it was.
    pub fn check(&mut self, time_now: Ticks) -> Result<(), S::Error> {
        let closed = self.switch.read_raw()?;
        self.machine.step(closed, time_now);
        Ok(())
    }

    /// A press was accepted on the last `check`.
    pub fn is_pressed(&self) -> bool {
        self.machine.is_pressed()
    }

    /// The switch is still held after a press reported earlier.
    pub fn was_pressed(&self) -> bool {
        self.machine.was_pressed()
    }

    /// The switch became short-held on the last `check`.
    pub fn is_short_held(&self) -> bool {
        self.machine.is_short_held()
    }

    /// The switch became long-held on the last `check`.
    pub fn is_long_held(&self) -> bool {
        self.machine.is_long_held()
    }

    /// The press on the last `check` was the second of a double-click.
    pub fn is_double_clicked(&self) -> bool {
        self.machine.is_double_clicked()
    }

    /// The switch was released on the last `check`.
    pub fn is_released(&self) -> bool {
        self.machine.is_released()
    }

    /// Where the current episode stands.
    pub fn episode(&self) -> Episode {
        self.machine.episode()
    }

    /// The underlying gesture state machine.
    pub fn machine(&self) -> &GestureMachine {
        &self.machine
    }

    /// The wrapped switch.
    pub fn switch(&self) -> &S {
        &self.switch
    }

    /// Returns the wrapped switch.
    pub fn free(self) -> S {
        self.switch
    }
}
