use std::convert::Infallible;
use std::io::{self, Write};
use std::thread::sleep;
use std::time::{Duration, Instant};

use ldrpulse::meter::EnergyReport;
use ldrpulse::sensor::{charge_time_value, LightProbe, CHARGE_TIME_LIMIT, DISCHARGE_TIME};
use rppal::gpio::{Error as GPIOError, Gpio, IoPin, Mode, OutputPin, Bias};
use tracing_subscriber::{prelude::*, EnvFilter};

/// An LDR charging a capacitor on a single pin. The brighter it is, the
/// faster the pin reads HIGH after the capacitor was drained.
#[derive(Debug)]
pub struct ChargeTimeProbe {
    pin: IoPin,
    charge_time_limit: Duration,
}

impl ChargeTimeProbe {
    pub fn new(gpio: &Gpio, pin: u8) -> Result<Self, GPIOError> {
        let mut pin = gpio.get(pin)?.into_io(Mode::Input);
        pin.set_bias(Bias::Off);
        tracing::debug!(pin = pin.pin(), "opened charge time probe");
        Ok(Self {
            pin,
            charge_time_limit: CHARGE_TIME_LIMIT,
        })
    }
}

impl LightProbe for ChargeTimeProbe {
    type Error = Infallible;

    fn sample(&mut self) -> Result<f64, Infallible> {
        // drain the capacitor
        self.pin.set_mode(Mode::Output);
        self.pin.set_low();
        sleep(DISCHARGE_TIME);

        let start = Instant::now();
        self.pin.set_mode(Mode::Input);
        let charge_time = loop {
            let elapsed = start.elapsed();
            if self.pin.is_high() {
                break Some(elapsed);
            }
            if elapsed >= self.charge_time_limit {
                break None;
            }
        };
        Ok(charge_time_value(charge_time, self.charge_time_limit))
    }
}

/// Claims `pin` as an output that keeps its mode and level after the
/// process exits.
pub fn open_output(gpio: &Gpio, pin: u8) -> Result<OutputPin, GPIOError> {
    let mut pin = gpio.get(pin)?.into_output();
    pin.set_reset_on_drop(false);
    Ok(pin)
}

/// Prints one pulse line: the bare total, or the JSON `report` if given.
/// A closed stdout surfaces as an error instead of a panic.
pub fn write_pulse<W: Write>(
    out: &mut W,
    pulses: u64,
    report: Option<&EnergyReport>,
) -> io::Result<()> {
    match report {
        Some(report) => {
            serde_json::to_writer(&mut *out, report)?;
            writeln!(out)?;
        }
        None => writeln!(out, "{pulses}")?,
    }
    out.flush()
}

/// Logs go to stderr, stdout is reserved for the output of the binaries.
/// `RUST_LOG` overrides the default of `info` for this workspace.
pub fn init_tracing() -> color_eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn,ldrpulse=info,ldrpulse_rpi=info,ldr_probe=info"))?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()?;
    Ok(())
}
