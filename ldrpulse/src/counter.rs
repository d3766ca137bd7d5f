use std::ops::ControlFlow;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::latch::Edge;
use crate::sensor::{LightProbe, LightSensor};
use crate::Error;

/// Number of light pulses seen since the process started.
#[derive(Debug, Default)]
pub struct PulseCounter {
    count: AtomicU64,
}

impl PulseCounter {
    pub const fn new() -> Self {
        Self {
            count: AtomicU64::new(0),
        }
    }

    /// Counts one pulse and returns the new total
    pub fn record(&self) -> u64 {
        self.count.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

/// Watches `sensor` and counts every rising edge into `counter`, handing the
/// new total to `on_pulse`. Falling edges are ignored.
pub fn count_pulses<P, F>(
    sensor: &mut LightSensor<P>,
    counter: &PulseCounter,
    mut on_pulse: F,
) -> Result<(), Error<P::Error>>
where
    P: LightProbe,
    F: FnMut(u64) -> ControlFlow<()>,
{
    sensor.watch(|edge| match edge {
        Edge::Rising => on_pulse(counter.record()),
        Edge::Falling => ControlFlow::Continue(()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::SensorOptions;
    use crate::test_doubles::{Exhausted, ScriptedProbe};

    fn ldr(readings: &[f64]) -> LightSensor<ScriptedProbe> {
        LightSensor::new(
            ScriptedProbe::new(readings),
            SensorOptions::default().with_queue_len(1),
        )
        .unwrap()
    }

    #[test]
    fn record_returns_running_total() {
        let counter = PulseCounter::new();
        assert_eq!(counter.count(), 0);
        assert_eq!(counter.record(), 1);
        assert_eq!(counter.record(), 2);
        assert_eq!(counter.count(), 2);
    }

    #[test]
    fn counts_rising_edges_only() {
        let counter = PulseCounter::new();
        let mut printed = Vec::new();
        let result = count_pulses(
            &mut ldr(&[0.0, 0.5, 0.0, 0.5, 0.4, 0.0, 0.05, 0.9, 0.0]),
            &counter,
            |n| {
                printed.push(n);
                ControlFlow::Continue(())
            },
        );
        assert!(matches!(result, Err(Error::Probe(Exhausted))));
        assert_eq!(counter.count(), 3);
        assert_eq!(printed, vec![1, 2, 3]);
    }

    #[test]
    fn light_first_reading_is_not_a_pulse() {
        let counter = PulseCounter::new();
        let _ = count_pulses(&mut ldr(&[0.8, 0.9, 0.0]), &counter, |_| {
            ControlFlow::Continue(())
        });
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn shared_between_threads() {
        let counter = PulseCounter::new();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..250 {
                        counter.record();
                    }
                });
            }
        });
        assert_eq!(counter.count(), 1000);
    }
}
