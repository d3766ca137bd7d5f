use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of the threshold the last value landed on.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LightState {
    Dark,
    Light,
}

impl fmt::Display for LightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightState::Dark => f.write_str("dark"),
            LightState::Light => f.write_str("light"),
        }
    }
}

/// A threshold crossing.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    /// From [LightState::Dark] to [LightState::Light]
    Rising,
    /// From [LightState::Light] to [LightState::Dark]
    Falling,
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Binary latch turning a stream of light values into [Edges](Edge).
///
/// ```mermaid
/// stateDiagram-v2
///    state first <<choice>>
///
///    [*] --> first: first value
///    first --> Dark: if value <= threshold
///    first --> Light: if value > threshold
///    Dark --> Light: value > threshold / Rising
///    Light --> Dark: value <= threshold / Falling
/// ```
///
/// The first value only decides the initial state, there is no edge to
/// report for it.
#[derive(Clone, Debug)]
pub struct ThresholdLatch {
    threshold: f64,
    state: Option<LightState>,
}

impl ThresholdLatch {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            state: None,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Takes effect with the next [update](Self::update), the current state
    /// is kept until then.
    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    /// `None` until the first value was seen
    pub fn state(&self) -> Option<LightState> {
        self.state
    }

    pub fn classify(&self, value: f64) -> LightState {
        if value > self.threshold {
            LightState::Light
        } else {
            LightState::Dark
        }
    }

    pub fn update(&mut self, value: f64) -> Option<Edge> {
        let new = self.classify(value);
        match self.state.replace(new) {
            Some(LightState::Dark) if new == LightState::Light => Some(Edge::Rising),
            Some(LightState::Light) if new == LightState::Dark => Some(Edge::Falling),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_value_sets_state_without_edge() {
        let mut latch = ThresholdLatch::new(0.1);
        assert_eq!(latch.state(), None);
        assert_eq!(latch.update(0.9), None);
        assert_eq!(latch.state(), Some(LightState::Light));

        let mut latch = ThresholdLatch::new(0.1);
        assert_eq!(latch.update(0.0), None);
        assert_eq!(latch.state(), Some(LightState::Dark));
    }

    #[test]
    fn crossings_produce_edges() {
        let mut latch = ThresholdLatch::new(0.1);
        let edges: Vec<_> = [0.05, 0.2, 0.3, 0.05, 0.01, 0.5]
            .into_iter()
            .map(|v| latch.update(v))
            .collect();
        assert_eq!(
            edges,
            vec![
                None,
                Some(Edge::Rising),
                None,
                Some(Edge::Falling),
                None,
                Some(Edge::Rising)
            ]
        );
    }

    #[test]
    fn threshold_itself_counts_as_dark() {
        let mut latch = ThresholdLatch::new(0.1);
        latch.update(0.5);
        assert_eq!(latch.update(0.1), Some(Edge::Falling));
        assert_eq!(latch.classify(0.1), LightState::Dark);
    }

    #[test]
    fn changed_threshold_applies_on_next_update() {
        let mut latch = ThresholdLatch::new(0.1);
        latch.update(0.3);
        latch.set_threshold(0.5);
        assert_eq!(latch.state(), Some(LightState::Light));
        assert_eq!(latch.update(0.3), Some(Edge::Falling));
    }

    #[test]
    fn states_print_as_console_words() {
        assert_eq!(LightState::Light.to_string(), "light");
        assert_eq!(LightState::Dark.to_string(), "dark");
    }
}
