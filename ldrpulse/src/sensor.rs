use std::collections::VecDeque;
use std::ops::ControlFlow;
use std::time::Duration;

use crate::latch::{Edge, LightState, ThresholdLatch};
use crate::{ConfigError, Error};

/// How long the capacitor of a charge time probe gets to charge before the
/// reading is considered completely dark.
pub const CHARGE_TIME_LIMIT: Duration = Duration::from_millis(10);
/// How long the capacitor of a charge time probe is shorted before a reading.
pub const DISCHARGE_TIME: Duration = Duration::from_millis(100);

/// Source of raw light readings.
pub trait LightProbe {
    type Error: std::error::Error + 'static;

    /// Takes a single blocking reading, normalized to 0.0 (dark) to 1.0
    /// (bright).
    fn sample(&mut self) -> Result<f64, Self::Error>;
}

/// Converts the time an LDR took to charge a capacitor up to the logical
/// HIGH level into a light value. `None` means the pin never read HIGH
/// within `limit`.
pub fn charge_time_value(charge_time: Option<Duration>, limit: Duration) -> f64 {
    match charge_time {
        None => 0.0,
        Some(_) if limit.is_zero() => 0.0,
        Some(t) => 1.0 - (t.as_secs_f64() / limit.as_secs_f64()).min(1.0),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorOptions {
    /// How many readings are averaged into one value. 1 disables smoothing.
    pub queue_len: usize,
    /// Values strictly above this are light
    pub threshold: f64,
}

impl SensorOptions {
    pub fn with_queue_len(self, queue_len: usize) -> Self {
        Self { queue_len, ..self }
    }

    pub fn with_threshold(self, threshold: f64) -> Self {
        Self { threshold, ..self }
    }
}

impl Default for SensorOptions {
    fn default() -> Self {
        Self {
            queue_len: 5,
            threshold: 0.1,
        }
    }
}

/// The outcome of a single [LightSensor::poll].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub state: LightState,
    pub edge: Option<Edge>,
}

/// A light dependent resistor behind a [LightProbe], with a moving average
/// over the last readings and a [ThresholdLatch] to detect light and dark.
#[derive(Debug)]
pub struct LightSensor<P> {
    probe: P,
    queue: VecDeque<f64>,
    queue_len: usize,
    latch: ThresholdLatch,
}

fn check_threshold(threshold: f64) -> Result<f64, ConfigError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(ConfigError::Threshold(threshold))
    }
}

impl<P: LightProbe> LightSensor<P> {
    pub fn new(probe: P, options: SensorOptions) -> Result<Self, ConfigError> {
        if options.queue_len == 0 {
            return Err(ConfigError::EmptyQueue);
        }
        let threshold = check_threshold(options.threshold)?;
        tracing::debug!(queue_len = options.queue_len, threshold, "configured light sensor");
        Ok(Self {
            probe,
            queue: VecDeque::with_capacity(options.queue_len),
            queue_len: options.queue_len,
            latch: ThresholdLatch::new(threshold),
        })
    }

    pub fn threshold(&self) -> f64 {
        self.latch.threshold()
    }

    pub fn set_threshold(&mut self, threshold: f64) -> Result<(), ConfigError> {
        self.latch.set_threshold(check_threshold(threshold)?);
        Ok(())
    }

    pub fn state(&self) -> Option<LightState> {
        self.latch.state()
    }

    /// Takes a fresh reading and returns the average of the queue. The first
    /// call fills the whole queue.
    pub fn value(&mut self) -> Result<f64, Error<P::Error>> {
        if self.queue.len() == self.queue_len {
            self.queue.pop_front();
        }
        while self.queue.len() < self.queue_len {
            let sample = self.probe.sample().map_err(Error::Probe)?;
            tracing::trace!(sample, "light probe reading");
            self.queue.push_back(sample);
        }
        Ok(self.queue.iter().sum::<f64>() / self.queue_len as f64)
    }

    /// Takes a fresh reading like [value](Self::value). Leaves the light/dark
    /// state used for edges alone.
    pub fn is_light(&mut self) -> Result<bool, Error<P::Error>> {
        let value = self.value()?;
        Ok(self.latch.classify(value) == LightState::Light)
    }

    pub fn poll(&mut self) -> Result<Reading, Error<P::Error>> {
        let value = self.value()?;
        let edge = self.latch.update(value);
        if let Some(edge) = edge {
            tracing::debug!(value, ?edge, "threshold crossed");
        }
        Ok(Reading {
            value,
            state: self.latch.classify(value),
            edge,
        })
    }

    /// Blocks until the sensor reads light. Returns after the first reading if
    /// it is light already.
    pub fn wait_for_light(&mut self) -> Result<(), Error<P::Error>> {
        self.wait_for(LightState::Light)
    }

    /// Blocks until the sensor reads dark. Returns after the first reading if
    /// it is dark already.
    pub fn wait_for_dark(&mut self) -> Result<(), Error<P::Error>> {
        self.wait_for(LightState::Dark)
    }

    fn wait_for(&mut self, state: LightState) -> Result<(), Error<P::Error>> {
        while self.poll()?.state != state {}
        Ok(())
    }

    /// Polls forever and hands every edge to `on_edge`, until it breaks.
    pub fn watch<F>(&mut self, mut on_edge: F) -> Result<(), Error<P::Error>>
    where
        F: FnMut(Edge) -> ControlFlow<()>,
    {
        loop {
            if let Some(edge) = self.poll()?.edge {
                if on_edge(edge).is_break() {
                    return Ok(());
                }
            }
        }
    }
}
