use std::fmt;
use std::ops::Not;

use embedded_hal::digital::{PinState, StatefulOutputPin};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    High,
}

impl From<PinState> for Level {
    fn from(state: PinState) -> Self {
        match state {
            PinState::Low => Level::Low,
            PinState::High => Level::High,
        }
    }
}

impl From<Level> for PinState {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => PinState::Low,
            Level::High => PinState::High,
        }
    }
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => f.write_str("LOW"),
            Level::High => f.write_str("HIGH"),
        }
    }
}

/// What the pin setter does with its pin.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PinAction {
    /// Drive the pin HIGH
    #[default]
    On,
    /// Drive the pin LOW
    Off,
    /// Drive the pin to the opposite of what it reads right now
    Toggle,
}

/// Never fails: anything but `on` and `toggle` turns the pin off.
impl From<&str> for PinAction {
    fn from(action: &str) -> Self {
        match action {
            "on" => PinAction::On,
            "toggle" => PinAction::Toggle,
            _ => PinAction::Off,
        }
    }
}

impl fmt::Display for PinAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinAction::On => f.write_str("on"),
            PinAction::Off => f.write_str("off"),
            PinAction::Toggle => f.write_str("toggle"),
        }
    }
}

/// Performs `action` on `pin` and returns the level it was driven to.
///
/// A toggle reads the level and writes its inverse as two separate steps, a
/// change by anything else in between is overwritten.
pub fn apply<P: StatefulOutputPin>(pin: &mut P, action: PinAction) -> Result<Level, P::Error> {
    let level = match action {
        PinAction::On => Level::High,
        PinAction::Off => Level::Low,
        PinAction::Toggle => !Level::from(PinState::from(pin.is_set_high()?)),
    };
    pin.set_state(level.into())?;
    tracing::debug!(%action, %level, "drove pin");
    Ok(level)
}
