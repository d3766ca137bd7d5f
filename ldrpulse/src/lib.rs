pub mod config;
pub mod counter;
pub mod latch;
pub mod meter;
pub mod pin;
pub mod reporter;
pub mod sensor;

#[cfg(test)]
mod test_doubles;
#[cfg(test)]
mod test_properties;

use thiserror::Error;

pub use counter::{count_pulses, PulseCounter};
pub use latch::{Edge, LightState, ThresholdLatch};
pub use meter::{EnergyMeter, EnergyReport};
pub use pin::{Level, PinAction};
pub use reporter::EdgeReporter;
pub use sensor::{LightProbe, LightSensor, Reading, SensorOptions};

/// Failures of the sensor driven operations, generic over the error of the
/// [LightProbe] doing the actual hardware access.
#[derive(Debug, Error)]
pub enum Error<E> {
    #[error("light probe failed")]
    Probe(#[source] E),
    #[error("could not write to the console")]
    Output(#[from] std::io::Error),
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("threshold {0} is outside of 0.0..=1.0")]
    Threshold(f64),
    #[error("the reading queue needs room for at least one reading")]
    EmptyQueue,
}
