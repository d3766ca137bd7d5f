use std::ops::ControlFlow;

use embedded_hal::digital::PinState;
use proptest::prelude::*;

use crate::pin::apply;
use crate::test_doubles::{MemoryPin, ScriptedProbe};
use crate::*;

prop_compose! {
    fn arb_readings()(readings in prop::collection::vec(0.0..=1.0f64, 0..200)) -> Vec<f64> {
        readings
    }
}

fn arb_action() -> impl Strategy<Value = PinAction> {
    prop_oneof![
        Just(PinAction::On),
        Just(PinAction::Off),
        Just(PinAction::Toggle),
    ]
}

fn rising_crossings(readings: &[f64], threshold: f64) -> u64 {
    readings
        .windows(2)
        .filter(|w| w[0] <= threshold && w[1] > threshold)
        .count() as u64
}

proptest! {
    #[test]
    fn counter_matches_rising_crossings(readings in arb_readings(), threshold in 0.0..1.0f64) {
        let mut sensor = LightSensor::new(
            ScriptedProbe::new(&readings),
            SensorOptions::default().with_queue_len(1).with_threshold(threshold),
        ).unwrap();
        let counter = PulseCounter::new();
        let mut last = 0;
        let _ = count_pulses(&mut sensor, &counter, |n| {
            assert_eq!(n, last + 1);
            last = n;
            ControlFlow::Continue(())
        });
        prop_assert_eq!(counter.count(), rising_crossings(&readings, threshold));
    }

    #[test]
    fn edges_alternate(readings in arb_readings()) {
        let mut latch = ThresholdLatch::new(0.1);
        let edges: Vec<Edge> = readings.iter().filter_map(|v| latch.update(*v)).collect();
        for pair in edges.windows(2) {
            prop_assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn report_lines_alternate(readings in arb_readings()) {
        let sensor = LightSensor::new(
            ScriptedProbe::new(&readings),
            SensorOptions::default().with_queue_len(1),
        ).unwrap();
        let mut out = Vec::new();
        let _ = EdgeReporter::new(sensor, &mut out).run();
        let out = String::from_utf8(out).unwrap();
        for (i, line) in out.lines().enumerate() {
            prop_assert_eq!(line, if i % 2 == 0 { "light" } else { "dark" });
        }
    }

    #[test]
    fn on_and_off_are_idempotent(high in any::<bool>(), action in prop_oneof![Just(PinAction::On), Just(PinAction::Off)]) {
        let mut pin = MemoryPin::new(PinState::from(high));
        let once = apply(&mut pin, action).unwrap();
        let twice = apply(&mut pin, action).unwrap();
        prop_assert_eq!(once, twice);
        prop_assert_eq!(Level::from(pin.state()), once);
    }

    #[test]
    fn toggling_twice_restores(high in any::<bool>(), actions in prop::collection::vec(arb_action(), 0..10)) {
        let mut pin = MemoryPin::new(PinState::from(high));
        for action in actions {
            apply(&mut pin, action).unwrap();
        }
        let before = pin.state();
        apply(&mut pin, PinAction::Toggle).unwrap();
        prop_assert_ne!(pin.state(), before);
        apply(&mut pin, PinAction::Toggle).unwrap();
        prop_assert_eq!(pin.state(), before);
    }
}
