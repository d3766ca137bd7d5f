use std::convert::Infallible;
use std::io::Write;

use crate::latch::LightState;
use crate::sensor::{LightProbe, LightSensor};
use crate::Error;

/// Writes `light` whenever the sensor turns light and `dark` whenever it
/// turns dark again, one word per line.
#[derive(Debug)]
pub struct EdgeReporter<P, W> {
    sensor: LightSensor<P>,
    out: W,
}

impl<P: LightProbe, W: Write> EdgeReporter<P, W> {
    pub fn new(sensor: LightSensor<P>, out: W) -> Self {
        Self { sensor, out }
    }

    /// Only ever returns when reading the sensor or writing a line fails.
    pub fn run(&mut self) -> Result<Infallible, Error<P::Error>> {
        loop {
            self.sensor.wait_for_light()?;
            self.emit(LightState::Light)?;
            self.sensor.wait_for_dark()?;
            self.emit(LightState::Dark)?;
        }
    }

    fn emit(&mut self, state: LightState) -> std::io::Result<()> {
        tracing::debug!(%state, threshold = self.sensor.threshold(), "reporting");
        writeln!(self.out, "{state}")?;
        self.out.flush()
    }
}
