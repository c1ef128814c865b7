//! The gesture state machine, free of any IO.
//!
//! [`GestureMachine::step`] takes the raw switch state and the current time
//! and advances the machine by one polling tick. Everything the machine
//! detects is visible through its queries until the next `step`.
//!
//! A held-down episode escalates monotonically:
//!
//! ```text
//! Idle --edge--> Pressed --short_held_delay--> ShortHeld --long_held_delay--> LongHeld
//!   \--edge rejected by debounce--> DebouncingEdge --short_held_delay--> ShortHeld ...
//! ```
//!
//! Each tier is reported for exactly one tick: the tick after reaching it,
//! its "reported" bit is set and the query for it turns false again. A
//! release returns to `Idle` and clears every reported bit.

use crate::config::GestureConfig;
use crate::Ticks;

/// Where the current held-down episode stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Episode {
    /// The switch is open.
    Idle,
    /// The switch is closed, but its edge came too soon after the previous
    /// transition and was not accepted as a press.
    DebouncingEdge,
    /// A press edge was accepted.
    Pressed,
    /// Held for at least `short_held_delay`.
    ShortHeld,
    /// Held for at least `long_held_delay`.
    LongHeld,
}

/// Double-click arming state. It survives releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClickWindow {
    /// No first click is waiting for a partner.
    NoPendingClick,
    /// A first click was accepted at `since`.
    PendingClick {
        /// Time of the first click.
        since: Ticks,
    },
}

/// One-shot guards, one per tier.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Reported {
    press: bool,
    short: bool,
    long: bool,
}

impl Reported {
    fn mark(&mut self, episode: Episode) {
        match episode {
            Episode::Pressed => self.press = true,
            Episode::ShortHeld => self.short = true,
            Episode::LongHeld => self.long = true,
            Episode::Idle | Episode::DebouncingEdge => {}
        }
    }
}

/// Debounce and gesture state of a single switch.
#[derive(Debug, Clone)]
pub struct GestureMachine {
    config: GestureConfig,
    episode: Episode,
    reported: Reported,
    click: ClickWindow,
    double_clicked: bool,
    released: bool,
    /// Time of the last raw transition, `None` until the first one.
    last_transition: Option<Ticks>,
    /// Start of the current hold, measured for escalation.
    hold_start: Ticks,
}

impl GestureMachine {
    /// Creates a machine in the released state with all timers at zero.
    pub const fn new(config: GestureConfig) -> Self {
        GestureMachine {
            config,
            episode: Episode::Idle,
            reported: Reported {
                press: false,
                short: false,
                long: false,
            },
            click: ClickWindow::NoPendingClick,
            double_clicked: false,
            released: false,
            last_transition: None,
            hold_start: 0,
        }
    }

    /// Returns to the state right after construction.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// Advances the machine by one tick.
    ///
    /// `closed` is the raw switch state read this tick, `time_now` must not
    /// be smaller than the value passed on the previous call. Elapsed times
    /// are computed with wrapping subtraction, so a clock running backwards
    /// shows up as a huge elapsed time (e.g. a spurious long hold).
    pub fn step(&mut self, closed: bool, time_now: Ticks) {
        let was_closed = self.episode != Episode::Idle;

        self.double_clicked = false;
        self.released = false;

        if closed {
            // Whatever fired on the previous tick has been seen by now.
            self.reported.mark(self.episode);
            self.escalate(time_now);
        } else {
            if was_closed {
                trace!("released at {}", time_now);
                self.released = true;
            }
            self.episode = Episode::Idle;
            self.reported = Reported::default();
            self.hold_start = time_now;
        }

        if closed != was_closed {
            self.last_transition = Some(time_now);
        }
    }

    fn escalate(&mut self, now: Ticks) {
        let held_for = now.wrapping_sub(self.hold_start);

        match self.episode {
            Episode::Idle => {
                if self.debounce_elapsed(now) {
                    trace!("press accepted at {}", now);
                    self.double_clicked = self.register_click(now);
                    self.hold_start = now;
                    self.episode = Episode::Pressed;
                } else {
                    trace!("press rejected at {}", now);
                    self.episode = Episode::DebouncingEdge;
                }
            }
            Episode::DebouncingEdge | Episode::Pressed => {
                if held_for >= self.config.short_held_delay() {
                    trace!("short hold at {}", now);
                    self.episode = Episode::ShortHeld;
                }
            }
            Episode::ShortHeld => {
                if held_for >= self.config.long_held_delay() {
                    trace!("long hold at {}", now);
                    self.episode = Episode::LongHeld;
                }
            }
            Episode::LongHeld => {}
        }
    }

    fn debounce_elapsed(&self, now: Ticks) -> bool {
        match self.last_transition {
            Some(at) => now.wrapping_sub(at) >= self.config.button_delay(),
            None => true,
        }
    }

    /// Records an accepted press and returns whether it completes a
    /// double-click. A completed double-click consumes the pending click.
    fn register_click(&mut self, now: Ticks) -> bool {
        match self.click {
            ClickWindow::PendingClick { since }
                if now.wrapping_sub(since) <= self.config.double_click_delay() =>
            {
                trace!("double click at {}", now);
                self.click = ClickWindow::NoPendingClick;
                true
            }
            _ => {
                self.click = ClickWindow::PendingClick { since: now };
                false
            }
        }
    }

    /// A press edge was accepted on the last tick.
    pub fn is_pressed(&self) -> bool {
        self.episode == Episode::Pressed && !self.reported.press
    }

    /// The press of the current episode was accepted on an earlier tick and
    /// the switch is still held.
    pub fn was_pressed(&self) -> bool {
        self.reported.press
    }

    /// The short hold threshold was crossed on the last tick.
    pub fn is_short_held(&self) -> bool {
        self.episode == Episode::ShortHeld && !self.reported.short
    }

    /// The long hold threshold was crossed on the last tick.
    pub fn is_long_held(&self) -> bool {
        self.episode == Episode::LongHeld && !self.reported.long
    }

    /// The press accepted on the last tick completed a double-click.
    pub fn is_double_clicked(&self) -> bool {
        self.double_clicked
    }

    /// The switch opened on the last tick.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Where the current episode stands.
    pub fn episode(&self) -> Episode {
        self.episode
    }

    /// The double-click arming state.
    pub fn click_window(&self) -> ClickWindow {
        self.click
    }

    /// The timing this machine runs with.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }
}

impl Default for GestureMachine {
    fn default() -> Self {
        Self::new(GestureConfig::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feeds `closed` for every tick in `from..=to` with the given step.
    fn hold(machine: &mut GestureMachine, closed: bool, from: Ticks, to: Ticks, step: Ticks) {
        let mut t = from;
        while t <= to {
            machine.step(closed, t);
            t += step;
        }
    }

    fn any_gesture(m: &GestureMachine) -> bool {
        m.is_pressed() || m.is_short_held() || m.is_long_held() || m.is_double_clicked()
    }

    #[test]
    fn test_initial_state() {
        let m = GestureMachine::default();
        assert!(!any_gesture(&m));
        assert!(!m.was_pressed());
        assert!(!m.is_released());
        assert_eq!(m.episode(), Episode::Idle);
        assert_eq!(m.click_window(), ClickWindow::NoPendingClick);
    }

    #[test]
    fn test_press_is_reported_once() {
        let mut m = GestureMachine::default();
        hold(&mut m, false, 0, 100, 10);

        m.step(true, 110);
        assert!(m.is_pressed());
        assert!(!m.was_pressed());

        m.step(true, 120);
        assert!(!m.is_pressed());
        assert!(m.was_pressed());

        m.step(true, 130);
        assert!(!m.is_pressed());
        assert!(m.was_pressed());
    }

    #[test]
    fn test_first_edge_is_accepted() {
        let mut m = GestureMachine::default();
        m.step(true, 0);
        assert!(m.is_pressed());
    }

    #[test]
    fn test_bounce_is_not_a_press() {
        let mut m = GestureMachine::default();
        m.step(true, 0);
        assert!(m.is_pressed());

        // Contact bounce right after the press
        m.step(false, 5);
        assert!(m.is_released());
        m.step(true, 10);
        assert!(!m.is_pressed());
        assert_eq!(m.episode(), Episode::DebouncingEdge);
        m.step(true, 200);
        assert!(!m.is_pressed());
        assert!(!m.was_pressed());

        // Once the line has been stable for long enough, an edge counts again
        m.step(false, 300);
        m.step(true, 379);
        assert!(!m.is_pressed());
        m.step(false, 380);
        m.step(true, 460);
        assert!(m.is_pressed());
    }

    #[test]
    fn test_hold_escalates() {
        let mut m = GestureMachine::default();
        hold(&mut m, false, 0, 90, 10);
        m.step(true, 100);
        assert!(m.is_pressed());

        hold(&mut m, true, 110, 2090, 10);
        assert!(!m.is_short_held());

        m.step(true, 2100);
        assert!(m.is_short_held());
        assert!(!m.is_long_held());
        assert!(m.was_pressed());

        m.step(true, 2110);
        assert!(!m.is_short_held());

        hold(&mut m, true, 2120, 5090, 10);
        assert!(!m.is_long_held());

        m.step(true, 5100);
        assert!(m.is_long_held());
        assert!(!m.is_short_held());

        m.step(true, 5110);
        assert!(!m.is_long_held());
        assert_eq!(m.episode(), Episode::LongHeld);

        // Nothing fires again while still held
        let mut t = 5120;
        while t < 20000 {
            m.step(true, t);
            assert!(!any_gesture(&m));
            t += 100;
        }
    }

    #[test]
    fn test_short_and_long_never_coexist() {
        let mut m = GestureMachine::default();
        let mut t = 0;
        while t <= 10000 {
            m.step(true, t);
            assert!(!(m.is_short_held() && m.is_long_held()));
            t += 7;
        }
    }

    #[test]
    fn test_sparse_polling_escalates_one_tier_per_tick() {
        let mut m = GestureMachine::default();
        m.step(true, 0);
        m.step(true, 6000);
        assert!(m.is_short_held());
        assert!(!m.is_long_held());
        m.step(true, 6001);
        assert!(m.is_long_held());
    }

    #[test]
    fn test_release_clears_everything() {
        let mut m = GestureMachine::default();
        m.step(true, 0);
        m.step(true, 2000);
        assert!(m.is_short_held());

        m.step(false, 2001);
        assert!(m.is_released());
        assert!(!any_gesture(&m));
        assert!(!m.was_pressed());
        assert_eq!(m.episode(), Episode::Idle);

        m.step(false, 2002);
        assert!(!m.is_released());
    }

    #[test]
    fn test_release_on_press_tick() {
        let mut m = GestureMachine::default();
        m.step(true, 0);
        assert!(m.is_pressed());
        m.step(false, 10);
        assert!(m.is_released());
        assert!(!m.is_pressed());
        assert!(!m.was_pressed());
    }

    #[test]
    fn test_double_click() {
        let mut m = GestureMachine::default();
        m.step(true, 0);
        assert!(m.is_pressed());
        assert!(!m.is_double_clicked());
        assert_eq!(m.click_window(), ClickWindow::PendingClick { since: 0 });

        m.step(false, 50);
        hold(&mut m, false, 60, 190, 10);

        m.step(true, 200);
        assert!(m.is_pressed());
        assert!(m.is_double_clicked());
        assert_eq!(m.click_window(), ClickWindow::NoPendingClick);

        m.step(true, 210);
        assert!(!m.is_double_clicked());
        m.step(false, 250);

        // A third tap right away starts a new pair instead of completing one
        m.step(true, 400);
        assert!(m.is_pressed());
        assert!(!m.is_double_clicked());
        m.step(false, 450);

        // ...and beyond the window it re-arms
        m.step(true, 1000);
        assert!(m.is_pressed());
        assert!(!m.is_double_clicked());
        assert_eq!(m.click_window(), ClickWindow::PendingClick { since: 1000 });
    }

    #[test]
    fn test_double_click_window_edge() {
        let mut m = GestureMachine::default();
        m.step(true, 0);
        m.step(false, 100);
        m.step(true, 500);
        assert!(m.is_double_clicked());

        let mut m = GestureMachine::default();
        m.step(true, 0);
        m.step(false, 100);
        m.step(true, 501);
        assert!(!m.is_double_clicked());
        assert_eq!(m.click_window(), ClickWindow::PendingClick { since: 501 });
    }

    #[test]
    fn test_rejected_edge_does_not_count_as_click() {
        let mut m = GestureMachine::default();
        m.step(true, 0);
        m.step(false, 20);
        m.step(true, 40);
        assert!(!m.is_double_clicked());
        assert_eq!(m.episode(), Episode::DebouncingEdge);
    }

    #[test]
    fn test_queries_are_idempotent() {
        let mut m = GestureMachine::default();
        m.step(true, 0);
        for _ in 0..3 {
            assert!(m.is_pressed());
            assert!(!m.was_pressed());
            assert!(!m.is_released());
        }
    }

    #[test]
    fn test_reset() {
        let mut m = GestureMachine::default();
        m.step(true, 0);
        m.step(true, 2500);
        m.reset();
        assert_eq!(m.episode(), Episode::Idle);
        assert_eq!(m.click_window(), ClickWindow::NoPendingClick);
        assert!(!any_gesture(&m));
        m.step(true, 2510);
        assert!(m.is_pressed());
    }

    #[test]
    fn test_rejected_edge_still_escalates() {
        let mut m = GestureMachine::default();
        m.step(true, 0);
        m.step(false, 5);
        m.step(true, 10);
        assert_eq!(m.episode(), Episode::DebouncingEdge);

        // Held time counts from the release at t=5
        m.step(true, 2004);
        assert!(!m.is_short_held());
        m.step(true, 2005);
        assert!(m.is_short_held());
        assert!(!m.is_pressed());
        assert!(!m.was_pressed());

        m.step(true, 5004);
        assert!(!m.is_long_held());
        m.step(true, 5005);
        assert!(m.is_long_held());
        assert!(!m.was_pressed());
    }

    #[test]
    fn test_clock_wraparound() {
        let t0 = Ticks::MAX - 1000;
        let mut m = GestureMachine::default();
        m.step(false, t0);
        m.step(true, t0 + 100);
        assert!(m.is_pressed());

        m.step(true, t0.wrapping_add(2099));
        assert!(!m.is_short_held());
        m.step(true, t0.wrapping_add(2100));
        assert!(m.is_short_held());

        // A double-click window spanning the wrap still pairs
        let mut m = GestureMachine::default();
        m.step(true, Ticks::MAX - 100);
        m.step(false, Ticks::MAX - 50);
        m.step(true, 100);
        assert!(m.is_pressed());
        assert!(m.is_double_clicked());
    }

    #[test]
    fn test_custom_config() {
        let config = GestureConfig::new(10, 20, 30, 40, 50).unwrap();
        let mut m = GestureMachine::new(config);
        m.step(true, 0);
        m.step(false, 5);
        m.step(true, 10);
        assert!(!m.is_pressed());
        m.step(false, 12);
        m.step(true, 22);
        assert!(m.is_pressed());
        assert!(m.is_double_clicked());
        m.step(true, 62);
        assert!(m.is_short_held());
        m.step(true, 72);
        assert!(m.is_long_held());
    }
}
