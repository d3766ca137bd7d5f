use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flashes per kWh of most household electricity meters
pub const DEFAULT_FLASH_RATE: u64 = 1000;

/// Turns counted LED flashes of an electricity meter into energy.
#[derive(Clone, Debug)]
pub struct EnergyMeter {
    flash_rate: u64,
    start_kwh: f64,
    started_at: DateTime<Utc>,
    pulse_count: u64,
    last_pulse: Option<DateTime<Utc>>,
}

/// Snapshot of an [EnergyMeter], as printed by `pulse_count --report`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnergyReport {
    pub start_time: DateTime<Utc>,
    /// kWh available when counting started
    pub start_power: f64,
    /// kWh left after subtracting the counted pulses
    pub current_power: f64,
    pub pulse_count: u64,
    pub last_pulse: Option<DateTime<Utc>>,
}

impl EnergyMeter {
    /// A `flash_rate` of 0 falls back to [DEFAULT_FLASH_RATE].
    pub fn new(flash_rate: u64, start_kwh: f64, started_at: DateTime<Utc>) -> Self {
        let flash_rate = if flash_rate == 0 {
            DEFAULT_FLASH_RATE
        } else {
            flash_rate
        };
        Self {
            flash_rate,
            start_kwh,
            started_at,
            pulse_count: 0,
            last_pulse: None,
        }
    }

    pub fn flash_rate(&self) -> u64 {
        self.flash_rate
    }

    pub fn pulse_count(&self) -> u64 {
        self.pulse_count
    }

    /// Counts one flash seen at `at` and returns the new total
    pub fn record_pulse(&mut self, at: DateTime<Utc>) -> u64 {
        self.pulse_count += 1;
        self.last_pulse = Some(at);
        self.pulse_count
    }

    pub fn consumed_kwh(&self) -> f64 {
        self.pulse_count as f64 / self.flash_rate as f64
    }

    pub fn remaining_kwh(&self) -> f64 {
        self.start_kwh - self.consumed_kwh()
    }

    pub fn report(&self) -> EnergyReport {
        EnergyReport {
            start_time: self.started_at,
            start_power: self.start_kwh,
            current_power: self.remaining_kwh(),
            pulse_count: self.pulse_count,
            last_pulse: self.last_pulse,
        }
    }
}
