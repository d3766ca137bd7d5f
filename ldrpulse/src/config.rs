//! Command line configuration of the binaries. Every struct documents its
//! defaults through its [Default] impl; flags only override them.

use std::str::FromStr;

use thiserror::Error;

use crate::meter::DEFAULT_FLASH_RATE;
use crate::pin::PinAction;
use crate::sensor::SensorOptions;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgsError {
    #[error("flag `{0}` expects a value")]
    MissingValue(String),
    #[error("invalid value `{value}` for flag `{flag}`")]
    InvalidValue { flag: String, value: String },
    #[error("unrecognized argument `{0}`")]
    Unrecognized(String),
}

/// Result of parsing a command line: either a configuration to run with, or
/// a request for the usage text.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation<C> {
    Run(C),
    Help,
}

fn value<T: FromStr>(flag: &str, args: &mut impl Iterator<Item = String>) -> Result<T, ArgsError> {
    let value = args
        .next()
        .ok_or_else(|| ArgsError::MissingValue(flag.to_owned()))?;
    value.parse().map_err(|_| ArgsError::InvalidValue {
        flag: flag.to_owned(),
        value,
    })
}

/// `gpio_pin [-n <pin>] [-a on|off|toggle]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinSetterConfig {
    /// BCM number of the pin, 18 by default
    pub pin: u8,
    /// [PinAction::On] by default
    pub action: PinAction,
}

impl Default for PinSetterConfig {
    fn default() -> Self {
        Self {
            pin: 18,
            action: PinAction::On,
        }
    }
}

impl PinSetterConfig {
    pub const USAGE: &'static str = "\
usage: gpio_pin [-h] [-n N] [-a A]

Control a GPIO pin.

options:
  -h, --help  show this help message and exit
  -n N        The number of the GPIO pin. (default: 18)
  -a A        The action to perform. (\"on\", \"off\" or \"toggle\", default: on)";

    pub fn from_args<I>(args: I) -> Result<Invocation<Self>, ArgsError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Invocation::Help),
                "-n" => config.pin = value(&arg, &mut args)?,
                "-a" => config.action = PinAction::from(value::<String>(&arg, &mut args)?.as_str()),
                _ => return Err(ArgsError::Unrecognized(arg)),
            }
        }
        Ok(Invocation::Run(config))
    }
}

/// The LDR wiring shared by `light_dark` and `pulse_count`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorConfig {
    /// BCM number of the pin the LDR and capacitor are on, 19 by default
    pub pin: u8,
    /// 0.1 by default
    pub threshold: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            pin: 19,
            threshold: 0.1,
        }
    }
}

impl SensorConfig {
    pub const USAGE: &'static str = "\
usage: light_dark [-h] [-p PIN] [-t THRESHOLD]

Print \"light\" and \"dark\" whenever the light level crosses the threshold.

options:
  -h, --help    show this help message and exit
  -p PIN        The GPIO pin of the light sensor. (default: 19)
  -t THRESHOLD  Light level between 0.0 and 1.0 that separates dark from light. (default: 0.1)";

    /// The scripts react to every single reading, without smoothing.
    pub fn sensor_options(&self) -> SensorOptions {
        SensorOptions::default()
            .with_queue_len(1)
            .with_threshold(self.threshold)
    }

    /// Consumes `arg` if it is one of the sensor flags.
    fn parse_flag(
        &mut self,
        arg: &str,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<bool, ArgsError> {
        match arg {
            "-p" => self.pin = value(arg, args)?,
            "-t" => self.threshold = value(arg, args)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub fn from_args<I>(args: I) -> Result<Invocation<Self>, ArgsError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if matches!(arg.as_str(), "-h" | "--help") {
                return Ok(Invocation::Help);
            }
            if !config.parse_flag(&arg, &mut args)? {
                return Err(ArgsError::Unrecognized(arg));
            }
        }
        Ok(Invocation::Run(config))
    }
}

/// `pulse_count [-p <pin>] [-t <threshold>] [--report] [-r <flash rate>] [-s <kWh>]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseCounterConfig {
    pub sensor: SensorConfig,
    /// Print an [EnergyReport](crate::meter::EnergyReport) as JSON per pulse
    /// instead of the bare count
    pub report: bool,
    /// Pulses per kWh, [DEFAULT_FLASH_RATE] by default
    pub flash_rate: u64,
    /// Meter reading in kWh at startup, 0 by default
    pub start_kwh: f64,
}

impl Default for PulseCounterConfig {
    fn default() -> Self {
        Self {
            sensor: SensorConfig::default(),
            report: false,
            flash_rate: DEFAULT_FLASH_RATE,
            start_kwh: 0.0,
        }
    }
}

impl PulseCounterConfig {
    pub const USAGE: &'static str = "\
usage: pulse_count [-h] [-p PIN] [-t THRESHOLD] [--report] [-r RATE] [-s KWH]

Count light pulses and print the running total on every pulse.

options:
  -h, --help    show this help message and exit
  -p PIN        The GPIO pin of the light sensor. (default: 19)
  -t THRESHOLD  Light level between 0.0 and 1.0 that separates dark from light. (default: 0.1)
  --report      Print a JSON energy report per pulse instead of the count.
  -r RATE       Meter flashes per kWh. (default: 1000)
  -s KWH        Meter reading at startup in kWh. (default: 0)";

    pub fn from_args<I>(args: I) -> Result<Invocation<Self>, ArgsError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Invocation::Help),
                "--report" => config.report = true,
                "-r" => config.flash_rate = value(&arg, &mut args)?,
                "-s" => config.start_kwh = value(&arg, &mut args)?,
                _ => {
                    if !config.sensor.parse_flag(&arg, &mut args)? {
                        return Err(ArgsError::Unrecognized(arg));
                    }
                }
            }
        }
        Ok(Invocation::Run(config))
    }
}

/// `ldr-probe [-p <pin>] [-q <queue length>]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeConfig {
    /// 19 by default
    pub pin: u8,
    /// 1 by default
    pub queue_len: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            pin: 19,
            queue_len: 1,
        }
    }
}

impl ProbeConfig {
    pub const USAGE: &'static str = "\
usage: ldr-probe [-h] [-p PIN] [-q LEN]

Print the light level once per second.

options:
  -h, --help  show this help message and exit
  -p PIN      The GPIO pin of the light sensor. (default: 19)
  -q LEN      Number of readings to average. (default: 1)";

    pub fn from_args<I>(args: I) -> Result<Invocation<Self>, ArgsError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Invocation::Help),
                "-p" => config.pin = value(&arg, &mut args)?,
                "-q" => config.queue_len = value(&arg, &mut args)?,
                _ => return Err(ArgsError::Unrecognized(arg)),
            }
        }
        Ok(Invocation::Run(config))
    }
}
