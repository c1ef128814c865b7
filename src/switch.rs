//! Raw switch reads, for a switch on a controller pin or behind a port
//! expander.

use core::marker::PhantomData;
use embedded_hal::digital::v2::InputPin;

use crate::{ActiveHigh, ActiveLow};

/// Reads the undebounced state of a switch.
pub trait RawSwitch {
    /// Error of the underlying hardware access.
    type Error;

    /// One-time hardware setup, run before the first read.
    ///
    /// The default does nothing.
    fn setup(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Returns `true` while the switch is physically closed.
    fn read_raw(&mut self) -> Result<bool, Self::Error>;
}

/// A switch wired straight to an input pin.
///
/// The pin must already be configured as input by the HAL (e.g. with its
/// `into_pull_up_input()`), so [`RawSwitch::setup`] does nothing here.
pub struct DirectSwitch<P, A> {
    /// The wrapped pin.
    pub pin: P,

    /// Whether the switch closes to high or to low.
    activeness: PhantomData<A>,
}

impl<P: InputPin, A> DirectSwitch<P, A> {
    /// Wraps a pin with the given activeness.
    pub fn new(pin: P, _activeness: A) -> Self {
        Self {
            pin,
            activeness: PhantomData,
        }
    }

    /// Returns the wrapped pin.
    pub fn free(self) -> P {
        self.pin
    }
}

impl<P: InputPin> DirectSwitch<P, ActiveLow> {
    /// A switch to ground on a pulled-up pin: closed reads low.
    pub fn active_low(pin: P) -> Self {
        Self::new(pin, ActiveLow)
    }
}

impl<P: InputPin> DirectSwitch<P, ActiveHigh> {
    /// A switch to the supply on a pulled-down pin: closed reads high.
    pub fn active_high(pin: P) -> Self {
        Self::new(pin, ActiveHigh)
    }
}

impl<P: InputPin> RawSwitch for DirectSwitch<P, ActiveLow> {
    type Error = P::Error;

    fn read_raw(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_low()
    }
}

impl<P: InputPin> RawSwitch for DirectSwitch<P, ActiveHigh> {
    type Error = P::Error;

    fn read_raw(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_high()
    }
}

/// A GPIO expander chip (e.g. an MCP23017) with numbered ports.
///
/// Methods take `&self` so several [`ExpanderSwitch`]es can share one chip;
/// drivers talking over a bus provide their own interior mutability, like
/// [`InputPin`] implementations do.
pub trait PortExpander {
    /// Error of the bus transaction.
    type Error;

    /// Configures `port` as an input with the internal pull-up enabled.
    fn configure_pull_up_input(&self, port: u8) -> Result<(), Self::Error>;

    /// Returns `true` if `port` reads high.
    fn read_port(&self, port: u8) -> Result<bool, Self::Error>;
}

/// A switch to ground on a pulled-up expander port: closed reads low.
pub struct ExpanderSwitch<'a, E> {
    expander: &'a E,
    port: u8,
}

impl<'a, E: PortExpander> ExpanderSwitch<'a, E> {
    /// Uses `port` of `expander`. Call [`RawSwitch::setup`] before reading.
    pub fn new(expander: &'a E, port: u8) -> Self {
        Self { expander, port }
    }

    /// The expander port this switch is on.
    pub fn port(&self) -> u8 {
        self.port
    }
}

impl<'a, E: PortExpander> RawSwitch for ExpanderSwitch<'a, E> {
    type Error = E::Error;

    fn setup(&mut self) -> Result<(), Self::Error> {
        self.expander.configure_pull_up_input(self.port)
    }

    fn read_raw(&mut self) -> Result<bool, Self::Error> {
        // Pulled up, so a closed switch pulls the port low
        Ok(!self.expander.read_port(self.port)?)
    }
}
