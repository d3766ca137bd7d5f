use std::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, PinState, StatefulOutputPin};
use thiserror::Error;

use crate::sensor::LightProbe;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no scripted readings left")]
pub struct Exhausted;

/// Hands out a fixed list of readings, then fails with [Exhausted] so loops
/// that would otherwise run forever come to an end.
#[derive(Debug)]
pub struct ScriptedProbe {
    readings: std::vec::IntoIter<f64>,
}

impl ScriptedProbe {
    pub fn new(readings: &[f64]) -> Self {
        Self {
            readings: readings.to_vec().into_iter(),
        }
    }
}

impl LightProbe for ScriptedProbe {
    type Error = Exhausted;

    fn sample(&mut self) -> Result<f64, Exhausted> {
        self.readings.next().ok_or(Exhausted)
    }
}

/// An output pin that only exists in memory.
#[derive(Debug)]
pub struct MemoryPin {
    state: PinState,
    pub writes: usize,
}

impl MemoryPin {
    pub fn new(state: PinState) -> Self {
        Self { state, writes: 0 }
    }

    pub fn state(&self) -> PinState {
        self.state
    }
}

impl ErrorType for MemoryPin {
    type Error = Infallible;
}

impl OutputPin for MemoryPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.state = PinState::Low;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.state = PinState::High;
        self.writes += 1;
        Ok(())
    }
}

impl StatefulOutputPin for MemoryPin {
    fn is_set_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.state == PinState::High)
    }

    fn is_set_low(&mut self) -> Result<bool, Infallible> {
        Ok(self.state == PinState::Low)
    }
}
